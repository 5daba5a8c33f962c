//! Palette distribution over grid points.
//!
//! Recoloring walks the points in storage order. `Uniform` cycles through the
//! palette round-robin across the whole grid (it does not restart per row);
//! `Random` draws each point's color independently, with replacement.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::{MeshError, MeshResult};
use crate::grid::MeshGrid;

/// Strategy used to map a palette onto grid points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorDistribution {
    /// Round-robin in storage order.
    #[default]
    Uniform,
    /// Independent uniform pick per point.
    Random,
}

impl std::fmt::Display for ColorDistribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uniform => write!(f, "uniform"),
            Self::Random => write!(f, "random"),
        }
    }
}

impl std::str::FromStr for ColorDistribution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uniform" => Ok(Self::Uniform),
            "random" => Ok(Self::Random),
            other => Err(format!("unknown color distribution: {other}")),
        }
    }
}

impl MeshGrid {
    /// Recolor every point from `palette`, drawing randomness from the thread RNG.
    pub fn distribute(&mut self, palette: &[Rgba], style: ColorDistribution) -> MeshResult<()> {
        self.distribute_with_rng(palette, style, &mut rand::rng())
    }

    /// Recolor every point from `palette` using `style`.
    ///
    /// Fails with [`MeshError::InvalidPalette`] when the palette has fewer than
    /// two colors; the grid is left untouched in that case.
    pub fn distribute_with_rng<R: Rng + ?Sized>(
        &mut self,
        palette: &[Rgba],
        style: ColorDistribution,
        rng: &mut R,
    ) -> MeshResult<()> {
        if palette.len() < 2 {
            return Err(MeshError::InvalidPalette {
                count: palette.len(),
            });
        }

        self.color_palette = palette.to_vec();
        self.color_distribution = style;

        let mut snapshot = self.points().to_vec();
        for (index, point) in snapshot.iter_mut().enumerate() {
            point.color = match style {
                ColorDistribution::Uniform => palette[index % palette.len()],
                ColorDistribution::Random => palette[rng.random_range(0..palette.len())],
            };
        }
        self.replace_points(snapshot);

        tracing::debug!(colors = palette.len(), %style, "distributed palette");
        Ok(())
    }
}
