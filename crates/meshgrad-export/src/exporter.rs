//! Image export.
//!
//! The exporter takes a read-only grid snapshot, hands it to a
//! [`MeshRenderer`] and encodes the pixels as PNG or JPEG, either into memory
//! or straight to a file. Renderer failures are propagated untouched.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};
use meshgrad_core::{MeshDocument, MeshGrid};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{ExportError, ExportResult};
use crate::renderer::{MeshRenderer, RasterRenderer, RenderRequest};

/// Encoded image formats the exporter can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg,
}

impl ImageFormat {
    /// Pick a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> ExportResult<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Pick a format from the extension of `path`.
    pub fn from_path(path: impl AsRef<Path>) -> ExportResult<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| {
                ExportError::UnsupportedFormat(format!(
                    "no file extension on {}",
                    path.as_ref().display()
                ))
            })?;
        Self::from_extension(ext)
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Png => write!(f, "png"),
            Self::Jpeg => write!(f, "jpeg"),
        }
    }
}

impl FromStr for ImageFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s)
    }
}

/// Renders grids and encodes the result.
#[derive(Debug, Clone)]
pub struct Exporter<R = RasterRenderer> {
    renderer: R,
    scale: u32,
    jpeg_quality: u8,
}

/// JPEG quality used unless overridden.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

impl Exporter<RasterRenderer> {
    /// Exporter using the built-in rasterizer at 1x scale.
    pub fn new() -> Self {
        Self::with_renderer(RasterRenderer::default())
    }
}

impl Default for Exporter<RasterRenderer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: MeshRenderer> Exporter<R> {
    pub fn with_renderer(renderer: R) -> Self {
        Self {
            renderer,
            scale: 1,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    /// Output size multiplier applied to the grid viewport.
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    /// JPEG quality, clamped to `1..=100`.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Render `grid` at `viewport x scale` pixels.
    pub fn render_image(&self, grid: &MeshGrid) -> ExportResult<RgbaImage> {
        let request = RenderRequest::from_grid(grid, self.scale)?;
        self.renderer.render(&request)
    }

    /// Render `grid` and encode it in memory.
    pub fn render_image_data(&self, grid: &MeshGrid, format: ImageFormat) -> ExportResult<Vec<u8>> {
        let image = self.render_image(grid)?;
        let bytes = self.encode(&image, format)?;
        tracing::debug!(%format, bytes = bytes.len(), "encoded mesh gradient image");
        Ok(bytes)
    }

    /// Render `grid` and write it to `path`; the format follows the extension.
    pub fn export_to_file(&self, grid: &MeshGrid, path: impl AsRef<Path>) -> ExportResult<()> {
        let path = path.as_ref();
        let format = ImageFormat::from_path(path)?;
        let bytes = self.render_image_data(grid, format)?;
        std::fs::write(path, bytes)?;
        tracing::info!(path = %path.display(), %format, "exported mesh gradient image");
        Ok(())
    }

    fn encode(&self, image: &RgbaImage, format: ImageFormat) -> ExportResult<Vec<u8>> {
        let mut buffer = Vec::new();
        let (width, height) = image.dimensions();
        match format {
            ImageFormat::Png => {
                PngEncoder::new(&mut buffer).write_image(
                    image.as_raw(),
                    width,
                    height,
                    ExtendedColorType::Rgba8,
                )?;
            }
            ImageFormat::Jpeg => {
                // JPEG has no alpha channel.
                let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
                JpegEncoder::new_with_quality(&mut buffer, self.jpeg_quality).write_image(
                    rgb.as_raw(),
                    width,
                    height,
                    ExtendedColorType::Rgb8,
                )?;
            }
        }
        Ok(buffer)
    }
}

/// Decode a document and render it to PNG bytes at 1x scale.
///
/// Used for file previews and thumbnails.
pub fn render_preview_png(document_bytes: &[u8]) -> ExportResult<Vec<u8>> {
    let document = MeshDocument::from_bytes(document_bytes).inspect_err(|e| {
        tracing::debug!(error = %e, "preview failed to decode document");
    })?;
    Exporter::new().render_image_data(&document.grid, ImageFormat::Png)
}
