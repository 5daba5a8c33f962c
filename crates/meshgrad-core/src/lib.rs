//! # Meshgrad Core
//!
//! Data model and algorithms for editing mesh gradients: a fixed
//! `rows x columns` grid of colored control points spanning the unit square.
//!
//! ## Components
//!
//! - **Geometry**: normalized coordinate to viewport mapping, handle hit-testing
//! - **Grid**: point storage, id and cell addressing, derived position/color arrays
//! - **Mutation**: nudge, reset, randomize and noise distortion with edge pinning
//! - **Distribution**: palette recoloring (uniform round-robin or random)
//! - **Document**: versioned JSON container with forward-compatibility rejection
//! - **Palette**: hex color list import
//!
//! Everything here is synchronous and in-memory; only [`MeshDocument`] touches
//! the filesystem.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use meshgrad_core::{encode, decode, ColorDistribution, GridTemplate, MeshGrid};
//!
//! let mut grid = MeshGrid::from_template(&GridTemplate::new(4, 4))?;
//! grid.distribute(&meshgrad_core::parse_palette("#FF3B30, #007AFF"), ColorDistribution::Uniform)?;
//! grid.randomize_mesh(0.1);
//! let bytes = encode(&grid)?;
//! assert_eq!(decode(&bytes)?, grid);
//! ```

pub mod color;
pub mod distribution;
pub mod document;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod mutation;
pub mod noise;
pub mod palette;

pub use color::{default_palette, random_system_color, ColorSpace, Rgba, SystemColor};
pub use distribution::ColorDistribution;
pub use document::{
    decode, encode, DocumentEnvelope, MeshDocument, CURRENT_VERSION, DOCUMENT_EXTENSION,
};
pub use error::{MeshError, MeshResult};
pub use geometry::{
    from_viewport, handle_frame, hit_test, normalized_delta, to_viewport, Coordinate, Rect,
    DEFAULT_HANDLE_SIZE,
};
pub use grid::{is_pinned, lattice_coordinate, GridCell, GridTemplate, MeshGrid, MeshPoint, PointId};
pub use mutation::DistortionParams;
pub use noise::PerlinNoise;
pub use palette::{format_palette, parse_hex_color, parse_palette};
