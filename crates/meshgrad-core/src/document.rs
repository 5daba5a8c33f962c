//! Versioned document container.
//!
//! A document file is a JSON object `{ "format_version": N, "grid": { ... } }`.
//! The version is read first: a file written by a newer format is rejected
//! outright with [`MeshError::IncompatibleVersion`] without looking at the
//! payload. Any other parse failure is a [`MeshError::CorruptDocument`].
//!
//! Colors inside the grid are four linear-light channels; see [`crate::color`].

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{MeshError, MeshResult};
use crate::grid::MeshGrid;

/// Document format version produced by this build.
///
/// Any breaking change to the stored grid requires incrementing this.
pub const CURRENT_VERSION: u32 = 1;

/// File extension used for mesh gradient documents.
pub const DOCUMENT_EXTENSION: &str = "meshgrad";

/// Wrapper persisted to storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentEnvelope {
    pub format_version: u32,
    pub grid: MeshGrid,
}

impl DocumentEnvelope {
    /// Envelope stamped with [`CURRENT_VERSION`].
    pub fn new(grid: MeshGrid) -> Self {
        Self {
            format_version: CURRENT_VERSION,
            grid,
        }
    }
}

#[derive(Deserialize)]
struct VersionProbe {
    format_version: u64,
}

/// Serialize `grid` into a versioned document.
pub fn encode(grid: &MeshGrid) -> MeshResult<Vec<u8>> {
    #[derive(Serialize)]
    struct EnvelopeRef<'a> {
        format_version: u32,
        grid: &'a MeshGrid,
    }

    serde_json::to_vec_pretty(&EnvelopeRef {
        format_version: CURRENT_VERSION,
        grid,
    })
    .map_err(|e| MeshError::CorruptDocument(format!("failed to serialize document: {e}")))
}

/// Parse a versioned document.
pub fn decode(bytes: &[u8]) -> MeshResult<MeshGrid> {
    let probe: VersionProbe = serde_json::from_slice(bytes)
        .map_err(|e| MeshError::CorruptDocument(format!("unreadable format version: {e}")))?;

    if probe.format_version > u64::from(CURRENT_VERSION) {
        tracing::warn!(
            found = probe.format_version,
            supported = CURRENT_VERSION,
            "rejecting document from newer format"
        );
        return Err(MeshError::IncompatibleVersion {
            found: probe.format_version,
            supported: CURRENT_VERSION,
        });
    }

    decode_v1(bytes)
}

fn decode_v1(bytes: &[u8]) -> MeshResult<MeshGrid> {
    let envelope: DocumentEnvelope = serde_json::from_slice(bytes)
        .map_err(|e| MeshError::CorruptDocument(e.to_string()))?;
    Ok(envelope.grid)
}

/// A grid bound to the document file format, with file I/O helpers.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshDocument {
    pub grid: MeshGrid,
}

impl MeshDocument {
    pub fn new(grid: MeshGrid) -> Self {
        Self { grid }
    }

    /// Parse a document from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> MeshResult<Self> {
        decode(bytes).map(Self::new)
    }

    /// Serialize the document to raw bytes.
    pub fn to_bytes(&self) -> MeshResult<Vec<u8>> {
        encode(&self.grid)
    }

    /// Save document to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> MeshResult<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path.as_ref(), bytes)?;
        tracing::info!(path = %path.as_ref().display(), "saved mesh document");
        Ok(())
    }

    /// Load document from file
    pub fn load_from_file(path: impl AsRef<Path>) -> MeshResult<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        if bytes.is_empty() {
            return Err(MeshError::CorruptDocument("the file has no content".to_string()));
        }
        let document = Self::from_bytes(&bytes)?;
        tracing::info!(
            path = %path.as_ref().display(),
            rows = document.grid.rows(),
            columns = document.grid.columns(),
            "loaded mesh document"
        );
        Ok(document)
    }
}
