//! Error types for the mesh gradient core.
//!
//! Geometry and mutation operations never fail: they clamp or no-op instead.
//! Only palette application, grid creation and document encode/decode report
//! errors, and those are always returned to the caller rather than recovered.
//!
//! All error types use `thiserror` for ergonomic error handling.

use std::io;
use thiserror::Error;

use crate::grid::PointId;

/// Errors that can occur while building, recoloring or persisting a mesh grid.
#[derive(Error, Debug)]
pub enum MeshError {
    /// A point id is absent from the grid.
    ///
    /// Ids are never taken from untrusted input, so this indicates an
    /// addressing bug in the caller rather than a user-facing condition.
    #[error("Point not found: {0}")]
    NotFound(PointId),

    /// The palette has fewer than two colors.
    #[error("Invalid palette: expected at least 2 colors, got {count}")]
    InvalidPalette {
        /// Number of colors that were supplied.
        count: usize,
    },

    /// Grid topology or viewport size is zero, or the grid has too many points.
    #[error("Invalid grid dimensions: {rows}x{columns} points on a {width}x{height} viewport")]
    InvalidDimensions {
        /// Requested row count.
        rows: u32,
        /// Requested column count.
        columns: u32,
        /// Requested viewport width.
        width: u32,
        /// Requested viewport height.
        height: u32,
    },

    /// The document was written by a newer format than this build understands.
    #[error("Document format version {found} is newer than supported version {supported}; an update is required")]
    IncompatibleVersion {
        /// Version declared by the document.
        found: u64,
        /// Highest version this build can read.
        supported: u32,
    },

    /// The document could not be parsed.
    #[error("Corrupt document: {0}")]
    CorruptDocument(String),

    /// I/O error during document file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl MeshError {
    /// Short message suitable for presenting to a user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::IncompatibleVersion { .. } => {
                "The file is not compatible with this version of the app, please update the app and try again."
            }
            Self::CorruptDocument(_) => "Unable to load data from the file.",
            Self::InvalidPalette { .. } => "A palette needs at least two colors.",
            Self::InvalidDimensions { .. } => "Rows, columns and canvas size must be greater than zero, and the grid must not be too large.",
            Self::Io(_) => "Unable to access the file.",
            Self::NotFound(_) => "Internal error: unknown point.",
        }
    }
}

/// Result type alias for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;
