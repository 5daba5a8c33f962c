//! # Meshgrad
//!
//! Editor core and command-line tool for colored mesh gradients.
//!
//! ## Architecture
//!
//! Meshgrad is organized as a workspace with multiple crates:
//!
//! 1. **meshgrad-core** - Grid model, mutations, palette distribution, documents
//! 2. **meshgrad-export** - Raster rendering, image encoding, source generation
//! 3. **meshgrad-settings** - Configuration file handling and defaults
//! 4. **meshgrad** - Command-line binary that integrates all crates
//!
//! The [`commands`] module holds the document-level operations behind each
//! CLI subcommand so they can be driven without going through argument parsing.

pub mod commands;

pub use meshgrad_export as export;
pub use meshgrad_settings as settings;

pub use meshgrad_core::{
    decode, encode, parse_palette, ColorDistribution, ColorSpace, DistortionParams, GridTemplate,
    MeshDocument, MeshError, MeshGrid, MeshPoint, PointId, Rgba, CURRENT_VERSION,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, keeping stdout free for generated code and reports
/// - RUST_LOG environment variable support
/// - `default_level` when RUST_LOG is not set
pub fn init_logging(default_level: tracing::Level) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    Ok(())
}
