//! # Mesh Grid Model
//!
//! The grid is a fixed `rows x columns` lattice of colored control points
//! stored row-major: the point for cell `(row, column)` lives at index
//! `row * columns + column`. Row 0 and column 0 are the top and left edges.
//!
//! Alongside the authoritative point list the grid keeps two derived arrays,
//! a flat position list and a flat color list, in the same order as the points.
//! Every change to the point list goes through [`MeshGrid::replace_points`],
//! which rebuilds both arrays; nothing else writes to them.
//!
//! Points are addressed by a stable [`PointId`] assigned at creation. Indices
//! are only used for lattice arithmetic.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

use crate::color::{default_palette, ColorSpace, Rgba};
use crate::distribution::ColorDistribution;
use crate::error::{MeshError, MeshResult};
use crate::geometry::Rect;

/// Opaque, stable identifier of a mesh point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointId(Uuid);

impl PointId {
    /// Create a new unique point id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PointId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({})", &self.0.to_string()[..8])
    }
}

/// Returns true when a normalized coordinate sits on the grid boundary.
pub fn is_pinned(value: f32) -> bool {
    value == 0.0 || value >= 1.0
}

/// Lattice coordinate of `index` among `count` evenly spaced positions.
pub fn lattice_coordinate(index: u32, count: u32) -> f32 {
    if count <= 1 {
        0.0
    } else {
        index as f32 / (count - 1) as f32
    }
}

/// A colored control point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshPoint {
    pub id: PointId,
    pub x: f32,
    pub y: f32,
    pub color: Rgba,
}

impl MeshPoint {
    /// Create a point with a fresh id.
    pub fn new(x: f32, y: f32, color: Rgba) -> Self {
        Self {
            id: PointId::new(),
            x,
            y,
            color,
        }
    }

    pub fn position(&self) -> [f32; 2] {
        [self.x, self.y]
    }

    /// `x` is on the left or right boundary.
    pub fn is_horizontal_edge(&self) -> bool {
        is_pinned(self.x)
    }

    /// `y` is on the top or bottom boundary.
    pub fn is_vertical_edge(&self) -> bool {
        is_pinned(self.y)
    }
}

impl fmt::Display for MeshPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{:.2}x{:.2}>", self.x, self.y)
    }
}

/// Logical lattice cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub row: u32,
    pub column: u32,
}

/// Parameters for creating a new grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridTemplate {
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub rows: u32,
    pub columns: u32,
    pub smooth_colors: bool,
    pub background_color: Rgba,
    pub color_space: ColorSpace,
    /// `None` uses [`default_palette`].
    pub color_palette: Option<Vec<Rgba>>,
    pub color_distribution: ColorDistribution,
}

impl GridTemplate {
    pub const DEFAULT_ROWS: u32 = 5;
    pub const DEFAULT_COLUMNS: u32 = 5;
    pub const DEFAULT_VIEWPORT: u32 = 512;
    /// Upper bound on `rows * columns`.
    pub const MAX_POINTS: usize = 1 << 20;

    /// Template with the given topology and defaults for everything else.
    pub fn new(rows: u32, columns: u32) -> Self {
        Self {
            rows,
            columns,
            ..Self::default()
        }
    }

    /// Palette the grid will be colored with.
    pub fn palette(&self) -> Vec<Rgba> {
        self.color_palette.clone().unwrap_or_else(default_palette)
    }

    /// Number of points the template describes, or `InvalidDimensions`.
    pub fn point_count(&self) -> MeshResult<usize> {
        point_count(
            self.rows,
            self.columns,
            self.viewport_width,
            self.viewport_height,
        )
    }
}

fn point_count(rows: u32, columns: u32, width: u32, height: u32) -> MeshResult<usize> {
    let invalid = || MeshError::InvalidDimensions {
        rows,
        columns,
        width,
        height,
    };
    if rows == 0 || columns == 0 || width == 0 || height == 0 {
        return Err(invalid());
    }
    (rows as usize)
        .checked_mul(columns as usize)
        .filter(|&count| count <= GridTemplate::MAX_POINTS)
        .ok_or_else(invalid)
}

impl Default for GridTemplate {
    fn default() -> Self {
        Self {
            viewport_width: Self::DEFAULT_VIEWPORT,
            viewport_height: Self::DEFAULT_VIEWPORT,
            rows: Self::DEFAULT_ROWS,
            columns: Self::DEFAULT_COLUMNS,
            smooth_colors: true,
            background_color: Rgba::WHITE,
            color_space: ColorSpace::Device,
            color_palette: None,
            color_distribution: ColorDistribution::Uniform,
        }
    }
}

/// The editable mesh gradient definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridRecord", into = "GridRecord")]
pub struct MeshGrid {
    id: Uuid,
    viewport_width: u32,
    viewport_height: u32,
    rows: u32,
    columns: u32,
    points: Vec<MeshPoint>,
    pub smooth_colors: bool,
    pub background_color: Rgba,
    pub color_space: ColorSpace,
    pub(crate) color_palette: Vec<Rgba>,
    pub(crate) color_distribution: ColorDistribution,
    positions: Vec<[f32; 2]>,
    colors: Vec<Rgba>,
}

impl MeshGrid {
    /// Create a grid from a template, drawing randomness from the thread RNG.
    pub fn from_template(template: &GridTemplate) -> MeshResult<Self> {
        Self::from_template_with_rng(template, &mut rand::rng())
    }

    /// Create a grid from a template.
    ///
    /// Points are laid out on the uniform lattice and immediately recolored
    /// with the template palette and distribution.
    pub fn from_template_with_rng<R: Rng + ?Sized>(
        template: &GridTemplate,
        rng: &mut R,
    ) -> MeshResult<Self> {
        let count = template.point_count()?;
        let palette = template.palette();
        if palette.len() < 2 {
            return Err(MeshError::InvalidPalette {
                count: palette.len(),
            });
        }

        let mut points = Vec::with_capacity(count);
        for row in 0..template.rows {
            for column in 0..template.columns {
                points.push(MeshPoint::new(
                    lattice_coordinate(column, template.columns),
                    lattice_coordinate(row, template.rows),
                    palette[0],
                ));
            }
        }

        let mut grid = Self {
            id: Uuid::new_v4(),
            viewport_width: template.viewport_width,
            viewport_height: template.viewport_height,
            rows: template.rows,
            columns: template.columns,
            points,
            smooth_colors: template.smooth_colors,
            background_color: template.background_color,
            color_space: template.color_space,
            color_palette: palette.clone(),
            color_distribution: template.color_distribution,
            positions: Vec::new(),
            colors: Vec::new(),
        };
        grid.rebuild_derived();
        grid.distribute_with_rng(&palette, template.color_distribution, rng)?;

        tracing::debug!(
            rows = grid.rows,
            columns = grid.columns,
            width = grid.viewport_width,
            height = grid.viewport_height,
            "created mesh grid"
        );
        Ok(grid)
    }

    /// The template this grid was (or could have been) created from.
    pub fn template(&self) -> GridTemplate {
        GridTemplate {
            viewport_width: self.viewport_width,
            viewport_height: self.viewport_height,
            rows: self.rows,
            columns: self.columns,
            smooth_colors: self.smooth_colors,
            background_color: self.background_color,
            color_space: self.color_space,
            color_palette: Some(self.color_palette.clone()),
            color_distribution: self.color_distribution,
        }
    }

    /// Build a new grid with a different topology, drawing randomness from
    /// the thread RNG.
    pub fn reconfigured(&self, rows: u32, columns: u32) -> MeshResult<Self> {
        self.reconfigured_with_rng(rows, columns, &mut rand::rng())
    }

    /// Build a new grid with a different topology.
    ///
    /// Viewport size, palette, distribution, background and flags are copied;
    /// points are regenerated on the lattice and recolored.
    pub fn reconfigured_with_rng<R: Rng + ?Sized>(
        &self,
        rows: u32,
        columns: u32,
        rng: &mut R,
    ) -> MeshResult<Self> {
        let template = GridTemplate {
            rows,
            columns,
            ..self.template()
        };
        Self::from_template_with_rng(&template, rng)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    /// Change the logical canvas size. Zero dimensions are ignored.
    pub fn set_viewport_size(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            tracing::warn!(width, height, "ignoring zero viewport size");
            return;
        }
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Viewport rectangle at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.viewport_width as f64, self.viewport_height as f64)
    }

    pub fn points(&self) -> &[MeshPoint] {
        &self.points
    }

    /// Flat position array in point order.
    pub fn positions(&self) -> &[[f32; 2]] {
        &self.positions
    }

    /// Flat color array in point order.
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    pub fn color_palette(&self) -> &[Rgba] {
        &self.color_palette
    }

    pub fn color_distribution(&self) -> ColorDistribution {
        self.color_distribution
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Storage index of cell `(row, column)`.
    pub fn index_for_cell(&self, row: u32, column: u32) -> usize {
        row as usize * self.columns as usize + column as usize
    }

    /// Cell of the point stored at `index`.
    pub fn cell_for_index(&self, index: usize) -> GridCell {
        let columns = self.columns.max(1) as usize;
        GridCell {
            row: (index / columns) as u32,
            column: (index % columns) as u32,
        }
    }

    /// Lattice position of cell `(row, column)`.
    pub fn lattice_position(&self, row: u32, column: u32) -> [f32; 2] {
        [
            lattice_coordinate(column, self.columns),
            lattice_coordinate(row, self.rows),
        ]
    }

    pub fn index_of(&self, id: PointId) -> MeshResult<usize> {
        self.points
            .iter()
            .position(|p| p.id == id)
            .ok_or(MeshError::NotFound(id))
    }

    pub fn point_by_id(&self, id: PointId) -> MeshResult<&MeshPoint> {
        self.index_of(id).map(|idx| &self.points[idx])
    }

    pub fn point_at(&self, row: u32, column: u32) -> Option<&MeshPoint> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.points.get(self.index_for_cell(row, column))
    }

    /// Replace the point with `id`. The stored id is kept even if `value.id` differs.
    pub fn set_point(&mut self, id: PointId, value: MeshPoint) -> MeshResult<()> {
        let index = self.index_of(id)?;
        let mut snapshot = self.points.clone();
        snapshot[index] = MeshPoint { id, ..value };
        self.replace_points(snapshot);
        Ok(())
    }

    /// Points for the given ids, skipping unknown ids.
    pub fn points_in<'a>(&'a self, ids: &'a [PointId]) -> impl Iterator<Item = &'a MeshPoint> + 'a {
        ids.iter().filter_map(move |id| self.point_by_id(*id).ok())
    }

    /// Recolor a selection of points. Unknown ids are skipped.
    pub fn set_color(&mut self, ids: &[PointId], color: Rgba) {
        let selected: HashSet<PointId> = ids.iter().copied().collect();
        for id in &selected {
            if self.index_of(*id).is_err() {
                tracing::warn!(%id, "set_color: unknown point id");
            }
        }
        self.mutate_points(|point, _| {
            if selected.contains(&point.id) {
                point.color = color;
            }
        });
    }

    /// Apply `f` to a snapshot of every point in row-major order, then commit.
    pub fn mutate_points<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut MeshPoint, GridCell),
    {
        let mut snapshot = self.points.clone();
        for row in 0..self.rows {
            for column in 0..self.columns {
                let index = self.index_for_cell(row, column);
                if let Some(point) = snapshot.get_mut(index) {
                    f(point, GridCell { row, column });
                }
            }
        }
        self.replace_points(snapshot);
    }

    /// The single write path for the point list.
    ///
    /// Derived arrays are rebuilt when the new list differs from the current one.
    pub(crate) fn replace_points(&mut self, points: Vec<MeshPoint>) {
        if points == self.points {
            return;
        }
        self.points = points;
        self.rebuild_derived();
    }

    fn rebuild_derived(&mut self) {
        self.positions = self.points.iter().map(MeshPoint::position).collect();
        self.colors = self.points.iter().map(|p| p.color).collect();
    }
}

/// Serialized form of [`MeshGrid`]. Derived arrays are not stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GridRecord {
    id: Uuid,
    viewport_width: u32,
    viewport_height: u32,
    rows: u32,
    columns: u32,
    points: Vec<MeshPoint>,
    #[serde(default = "default_smooth_colors")]
    smooth_colors: bool,
    background_color: Rgba,
    #[serde(default)]
    color_space: ColorSpace,
    color_palette: Vec<Rgba>,
    #[serde(default)]
    color_distribution: ColorDistribution,
}

fn default_smooth_colors() -> bool {
    true
}

impl From<MeshGrid> for GridRecord {
    fn from(grid: MeshGrid) -> Self {
        Self {
            id: grid.id,
            viewport_width: grid.viewport_width,
            viewport_height: grid.viewport_height,
            rows: grid.rows,
            columns: grid.columns,
            points: grid.points,
            smooth_colors: grid.smooth_colors,
            background_color: grid.background_color,
            color_space: grid.color_space,
            color_palette: grid.color_palette,
            color_distribution: grid.color_distribution,
        }
    }
}

impl TryFrom<GridRecord> for MeshGrid {
    type Error = MeshError;

    fn try_from(record: GridRecord) -> Result<Self, Self::Error> {
        let expected = point_count(
            record.rows,
            record.columns,
            record.viewport_width,
            record.viewport_height,
        )?;
        if record.points.len() != expected {
            return Err(MeshError::CorruptDocument(format!(
                "expected {} points for a {}x{} grid, found {}",
                expected,
                record.rows,
                record.columns,
                record.points.len()
            )));
        }

        let mut seen = HashSet::with_capacity(expected);
        if let Some(dup) = record.points.iter().find(|p| !seen.insert(p.id)) {
            return Err(MeshError::CorruptDocument(format!(
                "duplicate point id {}",
                dup.id
            )));
        }

        if record.color_palette.len() < 2 {
            return Err(MeshError::InvalidPalette {
                count: record.color_palette.len(),
            });
        }

        let mut grid = MeshGrid {
            id: record.id,
            viewport_width: record.viewport_width,
            viewport_height: record.viewport_height,
            rows: record.rows,
            columns: record.columns,
            points: record.points,
            smooth_colors: record.smooth_colors,
            background_color: record.background_color,
            color_space: record.color_space,
            color_palette: record.color_palette,
            color_distribution: record.color_distribution,
            positions: Vec::new(),
            colors: Vec::new(),
        };
        grid.rebuild_derived();
        Ok(grid)
    }
}
