//! Mapping between normalized point coordinates and a viewport rectangle.
//!
//! Point coordinates live in the unit square, `(0,0)` top-left and `(1,1)`
//! bottom-right. The editor draws them inside a viewport rectangle and hit-tests
//! square handles centered on each point. Handles for points sitting on the
//! boundary are pulled inward by half a handle so they stay clickable instead of
//! being clipped by the viewport edge.

use crate::grid::{MeshGrid, MeshPoint};

/// Default handle edge length in viewport units.
pub const DEFAULT_HANDLE_SIZE: f64 = 18.0;

/// A location in viewport space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in viewport space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size at the origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn min_x(&self) -> f64 {
        self.x
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn min_y(&self) -> f64 {
        self.y
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Half-open containment: the min edges are inside, the max edges are not.
    pub fn contains(&self, location: Coordinate) -> bool {
        location.x >= self.min_x()
            && location.x < self.max_x()
            && location.y >= self.min_y()
            && location.y < self.max_y()
    }
}

/// Map a point's normalized coordinate into `viewport`.
///
/// Coordinates exactly on `0` are moved forward by `handle_size / 2` and
/// coordinates at or past `1` are moved back by the same amount, per axis.
pub fn to_viewport(point: &MeshPoint, viewport: Rect, handle_size: f64) -> Coordinate {
    let half = handle_size * 0.5;
    let x = point.x as f64;
    let y = point.y as f64;

    let mut pos = Coordinate::new(viewport.x + viewport.width * x, viewport.y + viewport.height * y);

    if x == 0.0 {
        pos.x += half;
    } else if x >= 1.0 {
        pos.x -= half;
    }
    if y == 0.0 {
        pos.y += half;
    } else if y >= 1.0 {
        pos.y -= half;
    }

    pos
}

/// Map a viewport location back to a normalized coordinate, clamped to the unit square.
///
/// No handle adjustment is applied; this is the plain inverse of the linear mapping.
pub fn from_viewport(location: Coordinate, viewport: Rect) -> [f32; 2] {
    let x = if viewport.width > 0.0 {
        (location.x - viewport.x) / viewport.width
    } else {
        0.0
    };
    let y = if viewport.height > 0.0 {
        (location.y - viewport.y) / viewport.height
    } else {
        0.0
    };
    [x.clamp(0.0, 1.0) as f32, y.clamp(0.0, 1.0) as f32]
}

/// Convert a drag translation in viewport units into a normalized delta.
pub fn normalized_delta(dx: f64, dy: f64, viewport: Rect) -> [f32; 2] {
    let x = if viewport.width > 0.0 { dx / viewport.width } else { 0.0 };
    let y = if viewport.height > 0.0 { dy / viewport.height } else { 0.0 };
    [x as f32, y as f32]
}

/// The `handle_size` square centered on [`to_viewport`].
pub fn handle_frame(point: &MeshPoint, viewport: Rect, handle_size: f64) -> Rect {
    let pos = to_viewport(point, viewport, handle_size);
    Rect::new(
        pos.x - handle_size * 0.5,
        pos.y - handle_size * 0.5,
        handle_size,
        handle_size,
    )
}

/// First point in storage order whose handle contains `location`.
///
/// Overlapping handles are resolved by storage order, not by distance.
pub fn hit_test(
    grid: &MeshGrid,
    location: Coordinate,
    viewport: Rect,
    handle_size: f64,
) -> Option<&MeshPoint> {
    grid.points()
        .iter()
        .find(|point| handle_frame(point, viewport, handle_size).contains(location))
}
