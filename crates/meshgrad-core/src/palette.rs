//! Palette import from free text.
//!
//! Accepts a comma-separated list of hexadecimal color codes such as
//! `#5856D6, #AF52DE, fff, 80FF2D55`. Each token is `#` (optional) followed by
//! 3, 6 or 8 hex digits:
//!
//! - `RGB` - 12-bit shorthand, alpha 255
//! - `RRGGBB` - 24-bit, alpha 255
//! - `AARRGGBB` - 32-bit with leading alpha
//!
//! Malformed tokens are dropped silently; the caller only ever sees the colors
//! that parsed.

use regex::Regex;
use std::sync::OnceLock;

use crate::color::Rgba;

fn hex_token_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^#?([0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
            .expect("invalid hex color regex")
    })
}

/// Parse a single hex color code. Returns `None` for malformed input.
pub fn parse_hex_color(token: &str) -> Option<Rgba> {
    let captures = hex_token_regex().captures(token.trim())?;
    let digits = captures.get(1)?.as_str();
    let value = u32::from_str_radix(digits, 16).ok()?;

    let (a, r, g, b) = match digits.len() {
        3 => (
            255,
            ((value >> 8) & 0xF) * 17,
            ((value >> 4) & 0xF) * 17,
            (value & 0xF) * 17,
        ),
        6 => (255, (value >> 16) & 0xFF, (value >> 8) & 0xFF, value & 0xFF),
        8 => (
            (value >> 24) & 0xFF,
            (value >> 16) & 0xFF,
            (value >> 8) & 0xFF,
            value & 0xFF,
        ),
        _ => return None,
    };

    Some(Rgba::from_srgb8(r as u8, g as u8, b as u8, a as u8))
}

/// Parse a comma-separated list of hex color codes, dropping malformed tokens.
pub fn parse_palette(text: &str) -> Vec<Rgba> {
    let joined: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();

    let colors: Vec<Rgba> = joined.split(',').filter_map(parse_hex_color).collect();

    tracing::debug!(count = colors.len(), "parsed palette");
    colors
}

/// Format a palette as a comma-separated hex list accepted by [`parse_palette`].
pub fn format_palette(colors: &[Rgba]) -> String {
    colors
        .iter()
        .map(|c| c.to_hex())
        .collect::<Vec<_>>()
        .join(", ")
}
