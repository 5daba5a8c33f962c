//! Color model for mesh gradients.
//!
//! Colors are stored as four `f32` channels in linear-light sRGB primaries.
//! This is the single working space used everywhere: palettes, points, the
//! document format and the renderer boundary all carry the same values, so a
//! color never changes meaning across an encode/decode round trip.
//!
//! Hex input (palette import, settings) is gamma-encoded sRGB and is converted
//! into the working space on entry.

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// RGBA color in linear-light sRGB primaries, channels nominally in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    #[serde(rename = "r")]
    pub red: f32,
    #[serde(rename = "g")]
    pub green: f32,
    #[serde(rename = "b")]
    pub blue: f32,
    #[serde(rename = "a")]
    pub alpha: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);

    /// Create a color from linear-light channels.
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Create a color from gamma-encoded sRGB channels in `[0, 1]`.
    pub fn from_srgb(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self::new(
            srgb_to_linear(red),
            srgb_to_linear(green),
            srgb_to_linear(blue),
            alpha,
        )
    }

    /// Create a color from 8-bit gamma-encoded sRGB channels.
    pub fn from_srgb8(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self::from_srgb(
            red as f32 / 255.0,
            green as f32 / 255.0,
            blue as f32 / 255.0,
            alpha as f32 / 255.0,
        )
    }

    /// Gamma-encoded sRGB channels `[r, g, b, a]`.
    pub fn to_srgb(self) -> [f32; 4] {
        [
            linear_to_srgb(self.red),
            linear_to_srgb(self.green),
            linear_to_srgb(self.blue),
            self.alpha,
        ]
    }

    /// 8-bit gamma-encoded sRGB channels `[r, g, b, a]`.
    pub fn to_srgb8(self) -> [u8; 4] {
        self.to_srgb().map(unit_to_u8)
    }

    /// Hex string in `#RRGGBB` form, or `#AARRGGBB` when not fully opaque.
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_srgb8();
        if a == 255 {
            format!("#{:02X}{:02X}{:02X}", r, g, b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", a, r, g, b)
        }
    }

    /// Linear interpolation of every channel.
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        Rgba::new(
            self.red + (other.red - self.red) * t,
            self.green + (other.green - self.green) * t,
            self.blue + (other.blue - self.blue) * t,
            self.alpha + (other.alpha - self.alpha) * t,
        )
    }

    /// Copy of this color with a different alpha.
    pub fn with_alpha(self, alpha: f32) -> Rgba {
        Rgba { alpha, ..self }
    }

    /// Oklab coordinates `[L, a, b]` of the color channels (alpha ignored).
    pub fn to_oklab(self) -> [f32; 3] {
        let r = self.red;
        let g = self.green;
        let b = self.blue;

        let l = 0.412_221_46 * r + 0.536_332_55 * g + 0.051_445_995 * b;
        let m = 0.211_903_5 * r + 0.680_699_5 * g + 0.107_396_96 * b;
        let s = 0.088_302_46 * r + 0.281_718_85 * g + 0.629_978_7 * b;

        let l = l.cbrt();
        let m = m.cbrt();
        let s = s.cbrt();

        [
            0.210_454_26 * l + 0.793_617_8 * m - 0.004_072_047 * s,
            1.977_998_5 * l - 2.428_592_2 * m + 0.450_593_7 * s,
            0.025_904_037 * l + 0.782_771_77 * m - 0.808_675_77 * s,
        ]
    }

    /// Inverse of [`Rgba::to_oklab`].
    pub fn from_oklab(lab: [f32; 3], alpha: f32) -> Rgba {
        let [lightness, a, b] = lab;
        let l = lightness + 0.396_337_78 * a + 0.215_803_76 * b;
        let m = lightness - 0.105_561_346 * a - 0.063_854_17 * b;
        let s = lightness - 0.089_484_18 * a - 1.291_485_5 * b;

        let l = l * l * l;
        let m = m * m * m;
        let s = s * s * s;

        Rgba::new(
            4.076_741_7 * l - 3.307_711_6 * m + 0.230_969_94 * s,
            -1.268_438 * l + 2.609_757_4 * m - 0.341_319_38 * s,
            -0.004_196_086_3 * l - 0.703_418_6 * m + 1.707_614_7 * s,
            alpha,
        )
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

/// sRGB electro-optical transfer function.
pub fn srgb_to_linear(value: f32) -> f32 {
    if value <= 0.040_45 {
        value / 12.92
    } else {
        ((value + 0.055) / 1.055).powf(2.4)
    }
}

/// Inverse sRGB transfer function.
pub fn linear_to_srgb(value: f32) -> f32 {
    if value <= 0.003_130_8 {
        value * 12.92
    } else {
        1.055 * value.powf(1.0 / 2.4) - 0.055
    }
}

fn unit_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Interpolation space requested from the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorSpace {
    /// Interpolate device (gamma-encoded) channel values.
    #[default]
    Device,
    /// Interpolate in a perceptually uniform space.
    Perceptual,
}

impl ColorSpace {
    const DEVICE: &'static str = "device";
    const PERCEPTUAL: &'static str = "perceptual";

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Device => Self::DEVICE,
            Self::Perceptual => Self::PERCEPTUAL,
        }
    }
}

impl std::fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ColorSpace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::DEVICE => Ok(Self::Device),
            Self::PERCEPTUAL => Ok(Self::Perceptual),
            other => Err(format!("unknown color space: {other}")),
        }
    }
}

impl Serialize for ColorSpace {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ColorSpace {
    /// Unknown values fall back to [`ColorSpace::Device`].
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(value.parse().unwrap_or_default())
    }
}

/// Named system colors used for default palettes and random picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemColor {
    Red,
    Orange,
    Yellow,
    Green,
    Mint,
    Teal,
    Cyan,
    Blue,
    Indigo,
    Purple,
    Pink,
    Brown,
    Gray,
}

impl SystemColor {
    pub const ALL: [SystemColor; 13] = [
        SystemColor::Red,
        SystemColor::Orange,
        SystemColor::Yellow,
        SystemColor::Green,
        SystemColor::Mint,
        SystemColor::Teal,
        SystemColor::Cyan,
        SystemColor::Blue,
        SystemColor::Indigo,
        SystemColor::Purple,
        SystemColor::Pink,
        SystemColor::Brown,
        SystemColor::Gray,
    ];

    /// 8-bit sRGB value of the color.
    pub const fn srgb8(self) -> [u8; 3] {
        match self {
            Self::Red => [0xFF, 0x3B, 0x30],
            Self::Orange => [0xFF, 0x95, 0x00],
            Self::Yellow => [0xFF, 0xCC, 0x00],
            Self::Green => [0x34, 0xC7, 0x59],
            Self::Mint => [0x00, 0xC7, 0xBE],
            Self::Teal => [0x30, 0xB0, 0xC7],
            Self::Cyan => [0x32, 0xAD, 0xE6],
            Self::Blue => [0x00, 0x7A, 0xFF],
            Self::Indigo => [0x58, 0x56, 0xD6],
            Self::Purple => [0xAF, 0x52, 0xDE],
            Self::Pink => [0xFF, 0x2D, 0x55],
            Self::Brown => [0xA2, 0x84, 0x5E],
            Self::Gray => [0x8E, 0x8E, 0x93],
        }
    }

    pub fn rgba(self) -> Rgba {
        let [r, g, b] = self.srgb8();
        Rgba::from_srgb8(r, g, b, 255)
    }

    /// Uniformly pick one of the system colors.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> SystemColor {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

impl From<SystemColor> for Rgba {
    fn from(color: SystemColor) -> Self {
        color.rgba()
    }
}

/// Palette applied to freshly created grids when none is given.
pub fn default_palette() -> Vec<Rgba> {
    vec![SystemColor::Indigo.rgba(), SystemColor::Purple.rgba()]
}

/// Random system color, used when growing a palette or picking a background.
pub fn random_system_color<R: Rng + ?Sized>(rng: &mut R) -> Rgba {
    SystemColor::random(rng).rgba()
}
