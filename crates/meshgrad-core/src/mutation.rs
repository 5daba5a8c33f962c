//! # Mesh Mutations
//!
//! Operations that move grid points:
//! - **Nudge**: shift one point by a normalized delta, clamped to the unit square
//! - **Reset layout**: put every point back on the uniform lattice
//! - **Randomize**: jitter interior coordinates around the lattice
//! - **Distort**: displace interior coordinates with coherent noise
//!
//! Randomize and distort never move a pinned axis. A coordinate at `0` or `1`
//! stays exactly there so the mesh keeps covering its viewport.

use rand::Rng;

use crate::grid::{is_pinned, lattice_coordinate, MeshGrid, PointId};
use crate::noise::PerlinNoise;

/// Parameters for [`MeshGrid::distort_points`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistortionParams {
    /// Spatial scale of the noise. Useful range 0.5 to 5.0.
    pub frequency: f64,
    /// Displacement scale in normalized units. Useful range 0.05 to 0.3.
    pub amplitude: f64,
}

impl DistortionParams {
    pub const FREQUENCY_RANGE: (f64, f64) = (0.5, 5.0);
    pub const AMPLITUDE_RANGE: (f64, f64) = (0.05, 0.3);

    pub fn new(frequency: f64, amplitude: f64) -> Self {
        Self {
            frequency,
            amplitude,
        }
    }
}

impl Default for DistortionParams {
    fn default() -> Self {
        Self {
            frequency: 1.0,
            amplitude: 0.07,
        }
    }
}

/// Distance in noise space between neighbouring lattice cells at frequency 1.
const NOISE_CELL_SPACING: f64 = 0.173;
/// Keeps samples off the integer noise lattice, where gradient noise is zero.
const NOISE_SAMPLE_OFFSET: f64 = 0.5;

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

impl MeshGrid {
    /// Move a point by `delta` (normalized units), clamping each axis to `[0, 1]`.
    ///
    /// Pinned points may be moved off the boundary. An unknown id is logged
    /// and ignored.
    pub fn nudge_point(&mut self, id: PointId, delta: [f32; 2]) {
        let Ok(index) = self.index_of(id) else {
            tracing::warn!(%id, "nudge: unknown point id");
            return;
        };

        let mut snapshot = self.points().to_vec();
        let point = &mut snapshot[index];
        point.x = clamp_unit(point.x + delta[0]);
        point.y = clamp_unit(point.y + delta[1]);
        self.replace_points(snapshot);
    }

    /// Nudge every point in `ids` by the same delta.
    pub fn nudge_points(&mut self, ids: &[PointId], delta: [f32; 2]) {
        for id in ids {
            self.nudge_point(*id, delta);
        }
    }

    /// Put every point back on the uniform lattice. Colors are untouched.
    pub fn reset_layout(&mut self) {
        let (rows, columns) = (self.rows(), self.columns());
        self.mutate_points(|point, cell| {
            point.x = lattice_coordinate(cell.column, columns);
            point.y = lattice_coordinate(cell.row, rows);
        });
        tracing::debug!(rows, columns, "reset mesh layout");
    }

    /// Randomize the mesh using the thread RNG.
    pub fn randomize_mesh(&mut self, magnitude: f32) {
        self.randomize_mesh_with_rng(magnitude, &mut rand::rng());
    }

    /// Reset the layout, then offset every unpinned axis by a uniform value in
    /// `[-magnitude, magnitude]`, clamped to `[0, 1]`.
    ///
    /// An axis is pinned when its lattice coordinate is on the boundary, or when
    /// it was on the boundary before the call; a pinned axis ends on the
    /// lattice value or keeps its previous boundary value respectively.
    pub fn randomize_mesh_with_rng<R: Rng + ?Sized>(&mut self, magnitude: f32, rng: &mut R) {
        let magnitude = if magnitude.is_finite() {
            magnitude.abs()
        } else {
            0.0
        };
        let (rows, columns) = (self.rows(), self.columns());

        self.mutate_points(|point, cell| {
            let lattice_x = lattice_coordinate(cell.column, columns);
            let lattice_y = lattice_coordinate(cell.row, rows);
            point.x = jitter_axis(point.x, lattice_x, magnitude, &mut *rng);
            point.y = jitter_axis(point.y, lattice_y, magnitude, &mut *rng);
        });
        tracing::debug!(magnitude, "randomized mesh");
    }

    /// Distort the mesh with a freshly seeded noise field.
    pub fn distort_points(&mut self, params: DistortionParams) {
        let seed = rand::rng().random::<u32>();
        self.distort_points_with_seed(params, seed);
    }

    /// Add coherent noise, scaled by `params.amplitude`, to every unpinned axis.
    ///
    /// The x displacement samples the field at `(column, row)` and the y
    /// displacement at `(row, column)`, so the two axes move independently.
    pub fn distort_points_with_seed(&mut self, params: DistortionParams, seed: u32) {
        let noise = PerlinNoise::new(seed, params.frequency * NOISE_CELL_SPACING);
        let amplitude = params.amplitude;

        self.mutate_points(|point, cell| {
            let column = cell.column as f64 + NOISE_SAMPLE_OFFSET;
            let row = cell.row as f64 + NOISE_SAMPLE_OFFSET;

            if !is_pinned(point.x) {
                let dx = noise.sample(column, row) * amplitude;
                point.x = clamp_unit(point.x + dx as f32);
            }
            if !is_pinned(point.y) {
                let dy = noise.sample(row, column) * amplitude;
                point.y = clamp_unit(point.y + dy as f32);
            }
        });
        tracing::debug!(
            frequency = params.frequency,
            amplitude = params.amplitude,
            seed,
            "distorted mesh"
        );
    }
}

fn jitter_axis<R: Rng + ?Sized>(current: f32, lattice: f32, magnitude: f32, rng: &mut R) -> f32 {
    if is_pinned(lattice) {
        return lattice;
    }
    if is_pinned(current) {
        return current;
    }
    if magnitude == 0.0 {
        return lattice;
    }
    clamp_unit(lattice + rng.random_range(-magnitude..=magnitude))
}
