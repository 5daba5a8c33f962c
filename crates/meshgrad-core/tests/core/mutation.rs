use meshgrad_core::{is_pinned, DistortionParams, GridTemplate, MeshGrid};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_grid(rows: u32, columns: u32, seed: u64) -> MeshGrid {
    let mut rng = StdRng::seed_from_u64(seed);
    MeshGrid::from_template_with_rng(&GridTemplate::new(rows, columns), &mut rng).unwrap()
}

/// Nudge arbitrary points so edges leave the boundary and interior points reach it.
fn apply_nudges(grid: &mut MeshGrid, nudges: &[(prop::sample::Index, f32, f32)]) {
    for (index, dx, dy) in nudges {
        let id = grid.points()[index.index(grid.len())].id;
        grid.nudge_point(id, [*dx, *dy]);
    }
}

fn nudges() -> impl Strategy<Value = Vec<(prop::sample::Index, f32, f32)>> {
    prop::collection::vec((any::<prop::sample::Index>(), -1.5f32..1.5, -1.5f32..1.5), 0..8)
}

fn assert_structural_edges(grid: &MeshGrid) {
    let (rows, columns) = (grid.rows(), grid.columns());
    for (index, point) in grid.points().iter().enumerate() {
        let cell = grid.cell_for_index(index);
        if cell.column == 0 {
            assert_eq!(point.x, 0.0, "left edge moved at {:?}", cell);
        }
        if columns > 1 && cell.column == columns - 1 {
            assert_eq!(point.x, 1.0, "right edge moved at {:?}", cell);
        }
        if cell.row == 0 {
            assert_eq!(point.y, 0.0, "top edge moved at {:?}", cell);
        }
        if rows > 1 && cell.row == rows - 1 {
            assert_eq!(point.y, 1.0, "bottom edge moved at {:?}", cell);
        }
    }
}

#[test]
fn test_reset_after_distort_restores_lattice() {
    let mut grid = seeded_grid(5, 5, 1);
    let lattice = grid.positions().to_vec();
    grid.distort_points_with_seed(DistortionParams::new(4.0, 0.3), 99);
    grid.reset_layout();
    assert_eq!(grid.positions(), lattice.as_slice());

    let p = grid.point_at(2, 3).unwrap();
    assert_eq!((p.x, p.y), (0.75, 0.5));
}

#[test]
fn test_randomize_zero_magnitude_is_reset() {
    let mut grid = seeded_grid(4, 4, 2);
    let lattice = grid.positions().to_vec();
    let id = grid.points()[5].id;
    grid.nudge_point(id, [0.05, 0.05]);
    grid.randomize_mesh_with_rng(0.0, &mut StdRng::seed_from_u64(1));
    assert_eq!(grid.positions(), lattice.as_slice());
}

#[test]
fn test_distort_keeps_colors_and_ids() {
    let mut grid = seeded_grid(4, 5, 3);
    let ids: Vec<_> = grid.points().iter().map(|p| p.id).collect();
    let colors = grid.colors().to_vec();
    grid.distort_points_with_seed(DistortionParams::default(), 7);
    let after: Vec<_> = grid.points().iter().map(|p| p.id).collect();
    assert_eq!(after, ids);
    assert_eq!(grid.colors(), colors.as_slice());
}

#[test]
fn test_distortion_ranges() {
    let (min_freq, max_freq) = DistortionParams::FREQUENCY_RANGE;
    let (min_amp, max_amp) = DistortionParams::AMPLITUDE_RANGE;
    let params = DistortionParams::default();
    assert!((min_freq..=max_freq).contains(&params.frequency));
    assert!((min_amp..=max_amp).contains(&params.amplitude));
}

proptest! {
    #[test]
    fn prop_randomize_pins_edges(
        rows in 2u32..8,
        columns in 2u32..8,
        magnitude in 0.0f32..1.0,
        seed in any::<u64>(),
    ) {
        let mut grid = seeded_grid(rows, columns, seed);
        grid.randomize_mesh_with_rng(magnitude, &mut StdRng::seed_from_u64(seed));
        assert_structural_edges(&grid);
        for point in grid.points() {
            prop_assert!((0.0..=1.0).contains(&point.x));
            prop_assert!((0.0..=1.0).contains(&point.y));
        }
    }

    #[test]
    fn prop_distort_pins_edges(
        rows in 2u32..8,
        columns in 2u32..8,
        frequency in 0.5f64..5.0,
        amplitude in 0.05f64..0.3,
        seed in any::<u32>(),
    ) {
        let mut grid = seeded_grid(rows, columns, seed as u64);
        grid.distort_points_with_seed(DistortionParams::new(frequency, amplitude), seed);
        assert_structural_edges(&grid);
        for point in grid.points() {
            prop_assert!((0.0..=1.0).contains(&point.x));
            prop_assert!((0.0..=1.0).contains(&point.y));
        }
    }

    #[test]
    fn prop_randomize_pins_edges_after_edits(
        rows in 2u32..7,
        columns in 2u32..7,
        edits in nudges(),
        magnitude in 0.0f32..1.0,
        seed in any::<u64>(),
    ) {
        let mut grid = seeded_grid(rows, columns, seed);
        apply_nudges(&mut grid, &edits);
        let before = grid.positions().to_vec();

        grid.randomize_mesh_with_rng(magnitude, &mut StdRng::seed_from_u64(seed));
        assert_structural_edges(&grid);
        for (index, after) in grid.positions().iter().enumerate() {
            let cell = grid.cell_for_index(index);
            let lattice = grid.lattice_position(cell.row, cell.column);
            for axis in 0..2 {
                if is_pinned(lattice[axis]) {
                    prop_assert_eq!(after[axis], lattice[axis]);
                } else if is_pinned(before[index][axis]) {
                    prop_assert_eq!(after[axis], before[index][axis]);
                }
                prop_assert!((0.0..=1.0).contains(&after[axis]));
            }
        }
    }

    #[test]
    fn prop_distort_pins_edges_after_edits(
        rows in 2u32..7,
        columns in 2u32..7,
        edits in nudges(),
        frequency in 0.5f64..5.0,
        amplitude in 0.05f64..0.3,
        seed in any::<u32>(),
    ) {
        let mut grid = seeded_grid(rows, columns, seed as u64);
        apply_nudges(&mut grid, &edits);
        let before = grid.positions().to_vec();

        grid.distort_points_with_seed(DistortionParams::new(frequency, amplitude), seed);
        for (index, after) in grid.positions().iter().enumerate() {
            for axis in 0..2 {
                if is_pinned(before[index][axis]) {
                    prop_assert_eq!(after[axis], before[index][axis]);
                }
                prop_assert!((0.0..=1.0).contains(&after[axis]));
            }
        }
    }

    #[test]
    fn prop_nudge_stays_in_unit_square(
        index in 0usize..25,
        dx in -3.0f32..3.0,
        dy in -3.0f32..3.0,
    ) {
        let mut grid = seeded_grid(5, 5, 0);
        let id = grid.points()[index].id;
        let before = grid.point_by_id(id).unwrap().position();
        grid.nudge_point(id, [dx, dy]);

        let after = grid.point_by_id(id).unwrap().position();
        prop_assert_eq!(after[0], (before[0] + dx).clamp(0.0, 1.0));
        prop_assert_eq!(after[1], (before[1] + dy).clamp(0.0, 1.0));
        prop_assert_eq!(grid.positions()[index], after);
    }
}
