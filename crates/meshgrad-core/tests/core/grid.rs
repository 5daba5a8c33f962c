use meshgrad_core::{
    lattice_coordinate, ColorDistribution, GridTemplate, MeshError, MeshGrid, MeshPoint, PointId,
    Rgba, SystemColor,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn seeded_grid(rows: u32, columns: u32, seed: u64) -> MeshGrid {
    let mut rng = StdRng::seed_from_u64(seed);
    MeshGrid::from_template_with_rng(&GridTemplate::new(rows, columns), &mut rng).unwrap()
}

#[test]
fn test_point_count_matches_topology() {
    for (rows, columns) in [(1, 1), (2, 7), (5, 5), (9, 3)] {
        let grid = seeded_grid(rows, columns, 0);
        assert_eq!(grid.len(), (rows * columns) as usize);
        assert_eq!(grid.positions().len(), grid.len());
        assert_eq!(grid.colors().len(), grid.len());
    }
}

#[test]
fn test_derived_arrays_follow_points() {
    let grid = seeded_grid(4, 3, 5);
    for (index, point) in grid.points().iter().enumerate() {
        assert_eq!(grid.positions()[index], point.position());
        assert_eq!(grid.colors()[index], point.color);
    }
}

#[test]
fn test_new_grid_is_on_lattice() {
    let grid = seeded_grid(3, 5, 2);
    for row in 0..3 {
        for column in 0..5 {
            let point = grid.point_at(row, column).unwrap();
            assert_eq!(point.x, lattice_coordinate(column, 5));
            assert_eq!(point.y, lattice_coordinate(row, 3));
        }
    }
}

#[test]
fn test_point_ids_are_unique() {
    let grid = seeded_grid(6, 6, 3);
    let ids: HashSet<PointId> = grid.points().iter().map(|p| p.id).collect();
    assert_eq!(ids.len(), grid.len());
    for (index, point) in grid.points().iter().enumerate() {
        assert_eq!(grid.index_of(point.id).unwrap(), index);
    }
}

#[test]
fn test_template_round_trip() {
    let template = GridTemplate {
        viewport_width: 640,
        viewport_height: 480,
        rows: 3,
        columns: 4,
        smooth_colors: false,
        background_color: Rgba::BLACK,
        color_palette: Some(vec![SystemColor::Orange.rgba(), SystemColor::Cyan.rgba()]),
        color_distribution: ColorDistribution::Random,
        ..GridTemplate::default()
    };
    let mut rng = StdRng::seed_from_u64(8);
    let grid = MeshGrid::from_template_with_rng(&template, &mut rng).unwrap();
    assert_eq!(grid.template(), template);
}

#[test]
fn test_default_template_uses_default_palette() {
    let grid = MeshGrid::from_template(&GridTemplate::default()).unwrap();
    assert_eq!(
        grid.color_palette(),
        &[SystemColor::Indigo.rgba(), SystemColor::Purple.rgba()]
    );
    assert_eq!(grid.rows(), 5);
    assert_eq!(grid.columns(), 5);
    assert_eq!(grid.bounds().width, 512.0);
}

#[test]
fn test_set_point_unknown_id() {
    let mut grid = seeded_grid(2, 2, 1);
    let before = grid.clone();
    let result = grid.set_point(PointId::new(), MeshPoint::new(0.5, 0.5, Rgba::WHITE));
    assert!(matches!(result, Err(MeshError::NotFound(_))));
    assert_eq!(grid, before);
}

#[test]
fn test_mutate_points_visits_row_major() {
    let mut grid = seeded_grid(2, 3, 1);
    let mut visited = Vec::new();
    grid.mutate_points(|_, cell| visited.push((cell.row, cell.column)));
    assert_eq!(
        visited,
        vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
    );
}
