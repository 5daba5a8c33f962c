use meshgrad_core::{
    decode, encode, ColorDistribution, ColorSpace, GridTemplate, MeshDocument, MeshError,
    MeshGrid, Rgba, SystemColor, CURRENT_VERSION, DOCUMENT_EXTENSION,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

fn edited_grid(seed: u64) -> MeshGrid {
    let mut rng = StdRng::seed_from_u64(seed);
    let template = GridTemplate {
        color_space: ColorSpace::Perceptual,
        color_palette: Some(vec![
            SystemColor::Red.rgba(),
            SystemColor::Teal.rgba(),
            SystemColor::Yellow.rgba(),
        ]),
        color_distribution: ColorDistribution::Random,
        ..GridTemplate::new(4, 3)
    };
    let mut grid = MeshGrid::from_template_with_rng(&template, &mut rng).unwrap();
    grid.randomize_mesh_with_rng(0.2, &mut rng);
    grid.background_color = Rgba::new(0.1, 0.2, 0.3, 0.5);
    grid.smooth_colors = false;
    grid
}

#[test]
fn test_round_trip_preserves_everything() {
    let grid = edited_grid(1);
    let decoded = decode(&encode(&grid).unwrap()).unwrap();

    assert_eq!(decoded, grid);
    assert_eq!(decoded.id(), grid.id());
    assert_eq!(decoded.color_space, ColorSpace::Perceptual);
    assert!(!decoded.smooth_colors);
    let ids: Vec<_> = decoded.points().iter().map(|p| p.id).collect();
    let expected: Vec<_> = grid.points().iter().map(|p| p.id).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_newer_version_is_incompatible() {
    let grid = edited_grid(2);
    let mut value: serde_json::Value = serde_json::from_slice(&encode(&grid).unwrap()).unwrap();
    value["format_version"] = serde_json::json!(CURRENT_VERSION + 1);
    let bytes = serde_json::to_vec(&value).unwrap();

    match decode(&bytes) {
        Err(MeshError::IncompatibleVersion { found, supported }) => {
            assert_eq!(found, u64::from(CURRENT_VERSION) + 1);
            assert_eq!(supported, CURRENT_VERSION);
        }
        other => panic!("expected IncompatibleVersion, got {:?}", other),
    }
}

#[test]
fn test_older_versions_still_decode() {
    let grid = edited_grid(3);
    let mut value: serde_json::Value = serde_json::from_slice(&encode(&grid).unwrap()).unwrap();
    value["format_version"] = serde_json::json!(0);
    let bytes = serde_json::to_vec(&value).unwrap();
    assert_eq!(decode(&bytes).unwrap(), grid);
}

#[test]
fn test_point_count_mismatch_is_corrupt() {
    let grid = edited_grid(4);
    let mut value: serde_json::Value = serde_json::from_slice(&encode(&grid).unwrap()).unwrap();
    value["grid"]["points"]
        .as_array_mut()
        .unwrap()
        .pop();
    let bytes = serde_json::to_vec(&value).unwrap();
    assert!(matches!(decode(&bytes), Err(MeshError::CorruptDocument(_))));
}

#[test]
fn test_not_json_is_corrupt() {
    assert!(matches!(
        decode(b"definitely not json"),
        Err(MeshError::CorruptDocument(_))
    ));
}

#[test]
fn test_missing_optional_fields_use_defaults() {
    let grid = edited_grid(5);
    let mut value: serde_json::Value = serde_json::from_slice(&encode(&grid).unwrap()).unwrap();
    let object = value["grid"].as_object_mut().unwrap();
    object.remove("smooth_colors");
    object.remove("color_space");
    object.remove("color_distribution");
    let bytes = serde_json::to_vec(&value).unwrap();

    let decoded = decode(&bytes).unwrap();
    assert!(decoded.smooth_colors);
    assert_eq!(decoded.color_space, ColorSpace::Device);
    assert_eq!(decoded.color_distribution(), ColorDistribution::Uniform);
}

#[test]
fn test_unknown_color_space_falls_back_to_device() {
    let grid = edited_grid(6);
    let mut value: serde_json::Value = serde_json::from_slice(&encode(&grid).unwrap()).unwrap();
    value["grid"]["color_space"] = serde_json::json!("display-p3");
    let bytes = serde_json::to_vec(&value).unwrap();
    assert_eq!(decode(&bytes).unwrap().color_space, ColorSpace::Device);
}

#[test]
fn test_save_and_load_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir
        .path()
        .join(format!("gradient.{}", DOCUMENT_EXTENSION));

    let document = MeshDocument::new(edited_grid(7));
    document.save_to_file(&path).unwrap();
    let loaded = MeshDocument::load_from_file(&path).unwrap();
    assert_eq!(loaded, document);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = MeshDocument::load_from_file(temp_dir.path().join("missing.meshgrad"));
    assert!(matches!(result, Err(MeshError::Io(_))));
}

#[test]
fn test_load_empty_file_is_corrupt() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("empty.meshgrad");
    std::fs::write(&path, b"").unwrap();
    assert!(matches!(
        MeshDocument::load_from_file(&path),
        Err(MeshError::CorruptDocument(_))
    ));
}

proptest! {
    #[test]
    fn prop_round_trip_after_edits(
        seed in any::<u64>(),
        rows in 1u32..6,
        columns in 1u32..6,
        magnitude in 0.0f32..0.5,
        distort_seed in any::<u32>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut grid =
            MeshGrid::from_template_with_rng(&GridTemplate::new(rows, columns), &mut rng).unwrap();
        grid.randomize_mesh_with_rng(magnitude, &mut rng);
        grid.distort_points_with_seed(Default::default(), distort_seed);

        let decoded = decode(&encode(&grid).unwrap()).unwrap();
        prop_assert_eq!(decoded.positions(), grid.positions());
        prop_assert_eq!(decoded.colors(), grid.colors());
        prop_assert_eq!(decoded, grid);
    }
}
