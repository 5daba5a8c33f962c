//! Source code export.
//!
//! Emits a self-contained Rust module describing a mesh gradient as plain
//! constants: topology, viewport, the flat position and color arrays,
//! background, smoothing flag and color space. Colors are written as
//! gamma-encoded sRGB channels rounded to three decimals; values that round
//! to exactly zero or one are written as `0.0` and `1.0`.

use chrono::{DateTime, Utc};
use meshgrad_core::{MeshGrid, Rgba};

const INDENT: &str = "    ";

/// Generates Rust source for a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceGenerator {
    /// Include the generator banner and timestamp.
    pub header: bool,
}

impl Default for SourceGenerator {
    fn default() -> Self {
        Self { header: true }
    }
}

impl SourceGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a module stamped with the current time.
    pub fn generate(&self, grid: &MeshGrid) -> String {
        self.generate_at(grid, Utc::now())
    }

    /// Generate a module stamped with `timestamp`.
    pub fn generate_at(&self, grid: &MeshGrid, timestamp: DateTime<Utc>) -> String {
        let count = grid.len();
        let mut code = String::new();

        if self.header {
            code.push_str(&format!(
                "// Generated by meshgrad {} on {}\n",
                env!("CARGO_PKG_VERSION"),
                timestamp.format("%Y-%m-%d %H:%M:%S UTC")
            ));
            code.push_str(&format!(
                "// Mesh gradient {}: {} x {} control points\n\n",
                grid.id(),
                grid.rows(),
                grid.columns()
            ));
        }

        code.push_str(&format!("pub const ROWS: u32 = {};\n", grid.rows()));
        code.push_str(&format!("pub const COLUMNS: u32 = {};\n", grid.columns()));
        code.push_str(&format!(
            "pub const VIEWPORT: (u32, u32) = ({}, {});\n\n",
            grid.viewport_width(),
            grid.viewport_height()
        ));

        code.push_str("/// Normalized `[x, y]` positions, row-major.\n");
        code.push_str(&format!("pub const POINTS: [[f32; 2]; {}] = [\n", count));
        for [x, y] in grid.positions() {
            code.push_str(&format!("{INDENT}[{:?}, {:?}],\n", x, y));
        }
        code.push_str("];\n\n");

        code.push_str("/// sRGB `[red, green, blue, alpha]` per point.\n");
        code.push_str(&format!("pub const COLORS: [[f32; 4]; {}] = [\n", count));
        for color in grid.colors() {
            code.push_str(&format!("{INDENT}{},\n", color_literal(*color)));
        }
        code.push_str("];\n\n");

        code.push_str(&format!(
            "pub const BACKGROUND: [f32; 4] = {};\n",
            color_literal(grid.background_color)
        ));
        code.push_str(&format!(
            "pub const SMOOTH_COLORS: bool = {};\n",
            grid.smooth_colors
        ));
        code.push_str(&format!(
            "pub const COLOR_SPACE: &str = \"{}\";\n",
            grid.color_space
        ));

        tracing::debug!(points = count, bytes = code.len(), "generated source");
        code
    }
}

fn color_literal(color: Rgba) -> String {
    let [r, g, b, a] = color.to_srgb();
    format!(
        "[{}, {}, {}, {}]",
        rounded_channel(r),
        rounded_channel(g),
        rounded_channel(b),
        rounded_channel(a)
    )
}

/// A channel rounded to three decimals, collapsing exact `0` and `1`.
fn rounded_channel(value: f32) -> String {
    let rounded = format!("{:.3}", value);
    match rounded.parse::<f64>() {
        Ok(v) if v == 0.0 => "0.0".to_string(),
        Ok(v) if v == 1.0 => "1.0".to_string(),
        _ => rounded,
    }
}
