//! # Meshgrad Export
//!
//! Output artifacts for mesh gradients:
//!
//! - **Raster**: [`RasterRenderer`] rasterizes a grid snapshot and [`Exporter`]
//!   encodes it as PNG or JPEG, to memory or to a file
//! - **Preview**: [`render_preview_png`] turns document bytes into PNG bytes
//! - **Source code**: [`SourceGenerator`] writes the grid as Rust constants
//!
//! Rendering goes through the [`MeshRenderer`] trait so other backends can be
//! plugged in; their errors are passed through unchanged.

pub mod code_gen;
pub mod error;
pub mod exporter;
pub mod renderer;

pub use code_gen::SourceGenerator;
pub use error::{ExportError, ExportResult};
pub use exporter::{render_preview_png, Exporter, ImageFormat, DEFAULT_JPEG_QUALITY};
pub use renderer::{MeshRenderer, RasterRenderer, RenderRequest};
