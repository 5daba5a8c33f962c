use meshgrad_core::{
    handle_frame, hit_test, to_viewport, Coordinate, GridTemplate, MeshGrid, Rect,
    DEFAULT_HANDLE_SIZE,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_grid(rows: u32, columns: u32) -> MeshGrid {
    let mut rng = StdRng::seed_from_u64(4);
    MeshGrid::from_template_with_rng(&GridTemplate::new(rows, columns), &mut rng).unwrap()
}

#[test]
fn test_hit_test_interior_handle() {
    let grid = seeded_grid(3, 3);
    let viewport = Rect::from_size(200.0, 200.0);
    let hit = hit_test(&grid, Coordinate::new(102.0, 97.0), viewport, DEFAULT_HANDLE_SIZE);
    assert_eq!(hit.map(|p| p.id), Some(grid.points()[4].id));
}

#[test]
fn test_hit_test_corner_handle_is_inset() {
    let grid = seeded_grid(3, 3);
    let viewport = Rect::from_size(200.0, 200.0);

    // The corner handle spans [0, 18) on both axes.
    let hit = hit_test(&grid, Coordinate::new(1.0, 1.0), viewport, DEFAULT_HANDLE_SIZE);
    assert_eq!(hit.map(|p| p.id), Some(grid.points()[0].id));

    let hit = hit_test(&grid, Coordinate::new(199.0, 199.0), viewport, DEFAULT_HANDLE_SIZE);
    assert_eq!(hit.map(|p| p.id), Some(grid.points()[8].id));
}

#[test]
fn test_hit_test_miss() {
    let grid = seeded_grid(3, 3);
    let viewport = Rect::from_size(200.0, 200.0);
    assert!(hit_test(&grid, Coordinate::new(50.0, 50.0), viewport, DEFAULT_HANDLE_SIZE).is_none());
}

#[test]
fn test_hit_test_overlap_prefers_storage_order() {
    let mut grid = seeded_grid(3, 3);
    let first = grid.points()[4].id;
    let second = grid.points()[5].id;
    // Move point 5 on top of point 4.
    grid.nudge_point(second, [-0.5, 0.0]);
    assert_eq!(
        grid.point_by_id(first).unwrap().position(),
        grid.point_by_id(second).unwrap().position()
    );

    let viewport = Rect::from_size(200.0, 200.0);
    let hit = hit_test(&grid, Coordinate::new(100.0, 100.0), viewport, DEFAULT_HANDLE_SIZE);
    assert_eq!(hit.map(|p| p.id), Some(first));
}

#[test]
fn test_viewport_offset_is_applied() {
    let grid = seeded_grid(2, 2);
    let viewport = Rect::new(40.0, 30.0, 100.0, 50.0);
    let last = &grid.points()[3];
    assert_eq!(to_viewport(last, viewport, 10.0), Coordinate::new(135.0, 75.0));

    let frame = handle_frame(last, viewport, 10.0);
    assert_eq!(frame, Rect::new(130.0, 70.0, 10.0, 10.0));
}
