use meshgrad_core::{ColorDistribution, GridTemplate, MeshError, MeshGrid, SystemColor};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_grid(rows: u32, columns: u32) -> MeshGrid {
    let mut rng = StdRng::seed_from_u64(17);
    MeshGrid::from_template_with_rng(&GridTemplate::new(rows, columns), &mut rng).unwrap()
}

#[test]
fn test_uniform_three_by_three() {
    let mut grid = seeded_grid(3, 3);
    let palette = [
        SystemColor::Red.rgba(),
        SystemColor::Green.rgba(),
        SystemColor::Blue.rgba(),
    ];
    grid.distribute(&palette, ColorDistribution::Uniform).unwrap();

    let [c0, c1, c2] = palette;
    assert_eq!(grid.colors(), &[c0, c1, c2, c0, c1, c2, c0, c1, c2]);
}

#[test]
fn test_uniform_does_not_restart_per_row() {
    let mut grid = seeded_grid(2, 3);
    let palette = [SystemColor::Yellow.rgba(), SystemColor::Indigo.rgba()];
    grid.distribute(&palette, ColorDistribution::Uniform).unwrap();

    let [a, b] = palette;
    assert_eq!(grid.colors(), &[a, b, a, b, a, b]);
}

#[test]
fn test_invalid_palette_leaves_grid_unchanged() {
    let mut grid = seeded_grid(3, 3);
    let before = grid.clone();

    let result = grid.distribute(&[SystemColor::Red.rgba()], ColorDistribution::Random);
    assert!(matches!(result, Err(MeshError::InvalidPalette { count: 1 })));

    let result = grid.distribute(&[], ColorDistribution::Uniform);
    assert!(matches!(result, Err(MeshError::InvalidPalette { count: 0 })));

    assert_eq!(grid, before);
}

#[test]
fn test_distribute_records_palette_and_style() {
    let mut grid = seeded_grid(2, 2);
    let palette = vec![SystemColor::Mint.rgba(), SystemColor::Pink.rgba()];
    grid.distribute(&palette, ColorDistribution::Random).unwrap();

    assert_eq!(grid.color_palette(), palette.as_slice());
    assert_eq!(grid.color_distribution(), ColorDistribution::Random);
    assert!(grid.colors().iter().all(|c| palette.contains(c)));
}

#[test]
fn test_distribute_keeps_positions() {
    let mut grid = seeded_grid(4, 4);
    let id = grid.points()[5].id;
    grid.nudge_point(id, [0.1, 0.1]);
    let positions = grid.positions().to_vec();

    grid.distribute(
        &[SystemColor::Gray.rgba(), SystemColor::Brown.rgba()],
        ColorDistribution::Uniform,
    )
    .unwrap();
    assert_eq!(grid.positions(), positions.as_slice());
}
