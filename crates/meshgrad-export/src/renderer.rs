//! Mesh gradient rasterizer.
//!
//! Renders a grid snapshot into an RGBA image using tiny-skia for the pixel
//! buffer and background fill.
//!
//! Each lattice cell is treated as a bilinear patch spanned by its four corner
//! points. The patch is subdivided into small quads, each split into two
//! triangles, and the triangles are filled with barycentric color
//! interpolation. Colors are blended in the space requested by the grid:
//!
//! - `Device` - gamma-encoded sRGB channels
//! - `Perceptual` - Oklab
//!
//! When `smooth_colors` is set the patch color weights follow a cubic Hermite
//! curve instead of a straight line, which hides the cell seams.

use image::{Rgba as Pixel, RgbaImage};
use meshgrad_core::{ColorSpace, MeshGrid, Rgba};
use tiny_skia::{Color, ColorU8, Pixmap};

use crate::error::{ExportError, ExportResult};

/// Everything the renderer needs from a grid, in storage order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub width: u32,
    pub height: u32,
    pub rows: u32,
    pub columns: u32,
    pub points: Vec<[f32; 2]>,
    pub colors: Vec<Rgba>,
    pub background: Rgba,
    pub smooth_colors: bool,
    pub color_space: ColorSpace,
}

impl RenderRequest {
    /// Snapshot `grid` at `scale` times its viewport size.
    pub fn from_grid(grid: &MeshGrid, scale: u32) -> ExportResult<Self> {
        let width = grid.viewport_width() as u64 * scale as u64;
        let height = grid.viewport_height() as u64 * scale as u64;
        if width == 0 || height == 0 || width > u32::MAX as u64 || height > u32::MAX as u64 {
            return Err(ExportError::InvalidSize { width, height });
        }

        Ok(Self {
            width: width as u32,
            height: height as u32,
            rows: grid.rows(),
            columns: grid.columns(),
            points: grid.positions().to_vec(),
            colors: grid.colors().to_vec(),
            background: grid.background_color,
            smooth_colors: grid.smooth_colors,
            color_space: grid.color_space,
        })
    }

    fn validate(&self) -> ExportResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ExportError::InvalidSize {
                width: self.width as u64,
                height: self.height as u64,
            });
        }
        let expected = self.rows as usize * self.columns as usize;
        if self.points.len() != expected || self.colors.len() != expected {
            return Err(ExportError::Renderer(format!(
                "expected {} points and colors, got {} points and {} colors",
                expected,
                self.points.len(),
                self.colors.len()
            )));
        }
        Ok(())
    }
}

/// A backend that turns a [`RenderRequest`] into pixels.
pub trait MeshRenderer {
    fn render(&self, request: &RenderRequest) -> ExportResult<RgbaImage>;
}

/// Software rasterizer built on tiny-skia.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterRenderer {
    /// Quads per cell edge.
    pub subdivisions: u32,
}

impl RasterRenderer {
    pub const DEFAULT_SUBDIVISIONS: u32 = 24;

    pub fn new(subdivisions: u32) -> Self {
        Self {
            subdivisions: subdivisions.max(1),
        }
    }
}

impl Default for RasterRenderer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SUBDIVISIONS)
    }
}

/// Patch vertex in pixel space with its color in the blend space.
#[derive(Debug, Clone, Copy)]
struct Vertex {
    x: f32,
    y: f32,
    color: [f32; 4],
}

/// Straight-alpha mesh layer, composited over the background in one pass.
struct Layer {
    width: u32,
    height: u32,
    pixels: Vec<Option<[f32; 4]>>,
}

impl Layer {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![None; width as usize * height as usize],
        }
    }

    fn fill_triangle(&mut self, a: Vertex, b: Vertex, c: Vertex) {
        let area = edge(a.x, a.y, b.x, b.y, c.x, c.y);
        if area.abs() < f32::EPSILON {
            return;
        }

        let min_x = a.x.min(b.x).min(c.x).floor().max(0.0) as u32;
        let min_y = a.y.min(b.y).min(c.y).floor().max(0.0) as u32;
        let max_x = (a.x.max(b.x).max(c.x).ceil() as i64).clamp(0, self.width as i64) as u32;
        let max_y = (a.y.max(b.y).max(c.y).ceil() as i64).clamp(0, self.height as i64) as u32;

        // Shared edges are sampled by both neighbours; the tolerance closes hairline gaps.
        let tolerance = -1e-4 * area.abs();

        for py in min_y..max_y {
            for px in min_x..max_x {
                let sx = px as f32 + 0.5;
                let sy = py as f32 + 0.5;

                let mut w0 = edge(b.x, b.y, c.x, c.y, sx, sy);
                let mut w1 = edge(c.x, c.y, a.x, a.y, sx, sy);
                let mut w2 = edge(a.x, a.y, b.x, b.y, sx, sy);
                if area < 0.0 {
                    w0 = -w0;
                    w1 = -w1;
                    w2 = -w2;
                }
                if w0 < tolerance || w1 < tolerance || w2 < tolerance {
                    continue;
                }

                let total = w0 + w1 + w2;
                let (w0, w1, w2) = (w0 / total, w1 / total, w2 / total);
                let mut color = [0.0; 4];
                for (i, channel) in color.iter_mut().enumerate() {
                    *channel = a.color[i] * w0 + b.color[i] * w1 + c.color[i] * w2;
                }

                let index = py as usize * self.width as usize + px as usize;
                self.pixels[index] = Some(color);
            }
        }
    }
}

#[inline]
fn edge(ax: f32, ay: f32, bx: f32, by: f32, px: f32, py: f32) -> f32 {
    (bx - ax) * (py - ay) - (by - ay) * (px - ax)
}

/// Cubic Hermite ease `3t^2 - 2t^3`.
#[inline]
fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

fn to_blend_space(color: Rgba, space: ColorSpace) -> [f32; 4] {
    match space {
        ColorSpace::Device => color.to_srgb(),
        ColorSpace::Perceptual => {
            let [l, a, b] = color.to_oklab();
            [l, a, b, color.alpha]
        }
    }
}

fn from_blend_space(value: [f32; 4], space: ColorSpace) -> [u8; 4] {
    match space {
        ColorSpace::Device => value.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8),
        ColorSpace::Perceptual => {
            let alpha = value[3].clamp(0.0, 1.0);
            Rgba::from_oklab([value[0], value[1], value[2]], alpha).to_srgb8()
        }
    }
}

fn bilinear(corners: [[f32; 4]; 4], u: f32, v: f32) -> [f32; 4] {
    let [c00, c10, c01, c11] = corners;
    let mut out = [0.0; 4];
    for (i, channel) in out.iter_mut().enumerate() {
        let top = c00[i] + (c10[i] - c00[i]) * u;
        let bottom = c01[i] + (c11[i] - c01[i]) * u;
        *channel = top + (bottom - top) * v;
    }
    out
}

impl MeshRenderer for RasterRenderer {
    fn render(&self, request: &RenderRequest) -> ExportResult<RgbaImage> {
        request.validate()?;

        let width = request.width;
        let height = request.height;
        let Some(mut pixmap) = Pixmap::new(width, height) else {
            return Err(ExportError::InvalidSize {
                width: width as u64,
                height: height as u64,
            });
        };

        let [r, g, b, a] = request.background.to_srgb8();
        pixmap.fill(Color::from_rgba8(r, g, b, a));

        let space = request.color_space;
        let blend: Vec<[f32; 4]> = request
            .colors
            .iter()
            .map(|c| to_blend_space(*c, space))
            .collect();

        let mut layer = Layer::new(width, height);
        let n = self.subdivisions.max(1);
        let columns = request.columns as usize;
        let scale = [width as f32, height as f32];

        for row in 0..request.rows.saturating_sub(1) as usize {
            for column in 0..request.columns.saturating_sub(1) as usize {
                let i00 = row * columns + column;
                let i10 = i00 + 1;
                let i01 = i00 + columns;
                let i11 = i01 + 1;
                let corners = [
                    request.points[i00],
                    request.points[i10],
                    request.points[i01],
                    request.points[i11],
                ];
                let corner_colors = [blend[i00], blend[i10], blend[i01], blend[i11]];

                let vertex = |i: u32, j: u32| -> Vertex {
                    let u = i as f32 / n as f32;
                    let v = j as f32 / n as f32;
                    let top_x = corners[0][0] + (corners[1][0] - corners[0][0]) * u;
                    let top_y = corners[0][1] + (corners[1][1] - corners[0][1]) * u;
                    let bottom_x = corners[2][0] + (corners[3][0] - corners[2][0]) * u;
                    let bottom_y = corners[2][1] + (corners[3][1] - corners[2][1]) * u;
                    let (cu, cv) = if request.smooth_colors {
                        (smoothstep(u), smoothstep(v))
                    } else {
                        (u, v)
                    };
                    Vertex {
                        x: (top_x + (bottom_x - top_x) * v) * scale[0],
                        y: (top_y + (bottom_y - top_y) * v) * scale[1],
                        color: bilinear(corner_colors, cu, cv),
                    }
                };

                for j in 0..n {
                    for i in 0..n {
                        let v00 = vertex(i, j);
                        let v10 = vertex(i + 1, j);
                        let v01 = vertex(i, j + 1);
                        let v11 = vertex(i + 1, j + 1);
                        layer.fill_triangle(v00, v10, v11);
                        layer.fill_triangle(v00, v11, v01);
                    }
                }
            }
        }

        for (pixel, mesh) in pixmap.pixels_mut().iter_mut().zip(&layer.pixels) {
            let Some(mesh) = mesh else { continue };
            let [sr, sg, sb, sa] = from_blend_space(*mesh, space);
            let dst = pixel.demultiply();
            *pixel = composite(ColorU8::from_rgba(sr, sg, sb, sa), dst).premultiply();
        }

        tracing::debug!(
            width,
            height,
            rows = request.rows,
            columns = request.columns,
            subdivisions = n,
            "rendered mesh gradient"
        );

        // Convert Pixmap to RgbaImage
        let pixels = pixmap.pixels();
        Ok(RgbaImage::from_fn(width, height, |x, y| {
            let color = pixels[y as usize * width as usize + x as usize].demultiply();
            Pixel([color.red(), color.green(), color.blue(), color.alpha()])
        }))
    }
}

/// Source-over in straight alpha.
fn composite(src: ColorU8, dst: ColorU8) -> ColorU8 {
    let sa = src.alpha() as f32 / 255.0;
    let da = dst.alpha() as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return ColorU8::from_rgba(0, 0, 0, 0);
    }
    let mix = |s: u8, d: u8| -> u8 {
        let value = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        value.round().clamp(0.0, 255.0) as u8
    };
    ColorU8::from_rgba(
        mix(src.red(), dst.red()),
        mix(src.green(), dst.green()),
        mix(src.blue(), dst.blue()),
        (out_a * 255.0).round() as u8,
    )
}
