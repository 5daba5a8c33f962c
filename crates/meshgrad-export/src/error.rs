//! Error types for the export crate.

use meshgrad_core::MeshError;
use std::io;
use thiserror::Error;

/// Errors that can occur while rendering or exporting a mesh gradient.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The renderer could not produce pixels. The message is passed through as-is.
    #[error("Renderer failed: {0}")]
    Renderer(String),

    /// Requested output dimensions are zero or too large.
    #[error("Invalid output size {width}x{height}")]
    InvalidSize { width: u64, height: u64 },

    /// The destination format is not one the exporter can encode.
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Image encoding failed.
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error while writing the output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The source document could not be read.
    #[error("Document error: {0}")]
    Document(#[from] MeshError),
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
