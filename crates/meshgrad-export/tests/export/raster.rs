use meshgrad_core::{
    encode, ColorDistribution, GridTemplate, MeshGrid, Rgba, SystemColor, DOCUMENT_EXTENSION,
};
use meshgrad_export::{render_preview_png, ExportError, Exporter, ImageFormat, RasterRenderer};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

fn small_grid() -> MeshGrid {
    let mut rng = StdRng::seed_from_u64(3);
    let template = GridTemplate {
        viewport_width: 40,
        viewport_height: 30,
        color_palette: Some(vec![SystemColor::Orange.rgba(), SystemColor::Blue.rgba()]),
        color_distribution: ColorDistribution::Uniform,
        ..GridTemplate::new(3, 3)
    };
    MeshGrid::from_template_with_rng(&template, &mut rng).unwrap()
}

#[test]
fn test_png_bytes_decode_to_viewport_size() {
    let grid = small_grid();
    let bytes = Exporter::new()
        .render_image_data(&grid, ImageFormat::Png)
        .unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (40, 30));
}

#[test]
fn test_scale_multiplies_output() {
    let grid = small_grid();
    let image = Exporter::new().with_scale(3).render_image(&grid).unwrap();
    assert_eq!(image.dimensions(), (120, 90));
}

#[test]
fn test_corner_pixels_take_corner_colors() {
    let grid = small_grid();
    let image = Exporter::with_renderer(RasterRenderer::new(8))
        .render_image(&grid)
        .unwrap();

    let [r, g, b, _] = SystemColor::Orange.rgba().to_srgb8();
    let corner = image.get_pixel(0, 0).0;
    for (actual, expected) in corner.iter().zip([r, g, b]) {
        assert!((*actual as i32 - expected as i32).abs() <= 8);
    }
}

#[test]
fn test_jpeg_export_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("gradient.jpg");
    Exporter::new()
        .with_jpeg_quality(80)
        .export_to_file(&small_grid(), &path)
        .unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
}

#[test]
fn test_export_unsupported_extension() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("gradient.heic");
    let result = Exporter::new().export_to_file(&small_grid(), &path);
    assert!(matches!(result, Err(ExportError::UnsupportedFormat(_))));
    assert!(!path.exists());
}

#[test]
fn test_collapsed_mesh_shows_background() {
    let mut grid = small_grid();
    grid.background_color = Rgba::TRANSPARENT;
    // Fold every point onto the left edge so only background shows.
    let ids: Vec<_> = grid.points().iter().map(|p| p.id).collect();
    for id in &ids {
        grid.nudge_point(*id, [-1.0, 0.0]);
    }
    let image = Exporter::new().render_image(&grid).unwrap();
    assert_eq!(image.get_pixel(20, 15).0[3], 0);
}

#[test]
fn test_preview_from_document_bytes() {
    let grid = small_grid();
    let png = render_preview_png(&encode(&grid).unwrap()).unwrap();
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (40, 30));
    assert_eq!(DOCUMENT_EXTENSION, "meshgrad");
}

#[test]
fn test_preview_rejects_corrupt_document() {
    let result = render_preview_png(b"{\"format_version\": 99}");
    assert!(matches!(result, Err(ExportError::Document(_))));
}
