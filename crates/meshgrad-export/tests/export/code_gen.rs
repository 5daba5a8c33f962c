use meshgrad_core::{GridTemplate, MeshGrid, Rgba};
use meshgrad_export::SourceGenerator;

#[test]
fn test_arrays_match_point_count() {
    let grid = MeshGrid::from_template(&GridTemplate::new(4, 5)).unwrap();
    let code = SourceGenerator { header: false }.generate(&grid);

    assert!(code.contains("pub const POINTS: [[f32; 2]; 20] = ["));
    assert!(code.contains("pub const COLORS: [[f32; 4]; 20] = ["));
    let point_lines = code
        .lines()
        .filter(|line| line.starts_with("    [") && line.matches(',').count() == 2)
        .count();
    assert_eq!(point_lines, 20);
}

#[test]
fn test_positions_follow_storage_order() {
    let mut grid = MeshGrid::from_template(&GridTemplate::new(2, 2)).unwrap();
    let id = grid.points()[0].id;
    grid.nudge_point(id, [0.25, 0.5]);

    let code = SourceGenerator { header: false }.generate(&grid);
    let first = code
        .lines()
        .skip_while(|line| !line.starts_with("pub const POINTS"))
        .nth(1)
        .unwrap();
    assert_eq!(first, "    [0.25, 0.5],");
}

#[test]
fn test_background_and_translucent_colors() {
    let mut grid = MeshGrid::from_template(&GridTemplate::new(2, 2)).unwrap();
    grid.background_color = Rgba::from_srgb8(0, 0, 0, 128);
    let code = SourceGenerator { header: false }.generate(&grid);
    assert!(code.contains("pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 0.502];"));
}
