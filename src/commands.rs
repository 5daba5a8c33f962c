//! Document-level operations behind the CLI subcommands.
//!
//! Every operation loads a document, applies one edit through the core API
//! and writes it back. Randomness comes from a [`StdRng`] seeded from the
//! command line, the config file, or the OS, in that order.

use anyhow::{bail, Context, Result};
use meshgrad_core::{
    format_palette, parse_hex_color, parse_palette, ColorDistribution, DistortionParams,
    MeshDocument, MeshGrid, Rgba,
};
use meshgrad_export::{Exporter, RasterRenderer, SourceGenerator};
use meshgrad_settings::Config;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::path::{Path, PathBuf};

/// Loaded configuration plus where it came from.
#[derive(Debug, Clone)]
pub struct Session {
    pub config: Config,
    config_path: Option<PathBuf>,
}

impl Session {
    /// Session using `config` that never writes it back.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            config_path: None,
        }
    }

    /// Load the config at `path`, or the platform default location.
    ///
    /// A missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Config::default_path().context("Failed to locate config directory")?,
        };
        let config = Config::load_or_default(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?;
        Ok(Self {
            config,
            config_path: Some(path),
        })
    }

    /// RNG seeded from `seed`, the configured seed, or the OS.
    pub fn rng(&self, seed: Option<u64>) -> StdRng {
        match seed.or(self.config.mutation.seed) {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Record `path` in the recent files list and persist the config if it
    /// already exists on disk.
    fn remember(&mut self, path: &Path) {
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        self.config.add_recent_file(path);
        let Some(config_path) = &self.config_path else {
            return;
        };
        if !config_path.exists() {
            return;
        }
        if let Err(e) = self.config.save_to_file(config_path) {
            tracing::warn!(error = %e, "failed to update recent files");
        }
    }
}

/// Options for a new document; unset fields come from the config.
#[derive(Debug, Clone, Default)]
pub struct NewOptions {
    pub rows: Option<u32>,
    pub columns: Option<u32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub palette: Option<String>,
    pub background: Option<String>,
    pub distribution: Option<ColorDistribution>,
    pub seed: Option<u64>,
}

fn load(path: &Path) -> Result<MeshDocument> {
    MeshDocument::load_from_file(path)
        .with_context(|| format!("Failed to open {}", path.display()))
}

fn save(document: &MeshDocument, path: &Path) -> Result<()> {
    document
        .save_to_file(path)
        .with_context(|| format!("Failed to save {}", path.display()))
}

fn edit<F>(path: &Path, f: F) -> Result<MeshGrid>
where
    F: FnOnce(&mut MeshGrid) -> Result<()>,
{
    let mut document = load(path)?;
    f(&mut document.grid)?;
    save(&document, path)?;
    Ok(document.grid)
}

fn parse_palette_arg(text: &str) -> Result<Vec<Rgba>> {
    let palette = parse_palette(text);
    if palette.len() < 2 {
        bail!(
            "palette needs at least 2 valid hex colors, found {} in '{}'",
            palette.len(),
            text
        );
    }
    Ok(palette)
}

/// Create a document at `path`.
pub fn new_document(session: &mut Session, path: &Path, options: &NewOptions) -> Result<MeshGrid> {
    if path.exists() {
        bail!("{} already exists", path.display());
    }

    let mut template = session.config.grid_template()?;
    if let Some(rows) = options.rows {
        template.rows = rows;
    }
    if let Some(columns) = options.columns {
        template.columns = columns;
    }
    if let Some(width) = options.width {
        template.viewport_width = width;
    }
    if let Some(height) = options.height {
        template.viewport_height = height;
    }
    if let Some(text) = &options.palette {
        template.color_palette = Some(parse_palette_arg(text)?);
    }
    if let Some(hex) = &options.background {
        template.background_color =
            parse_hex_color(hex).with_context(|| format!("'{hex}' is not a hex color"))?;
    }
    if let Some(distribution) = options.distribution {
        template.color_distribution = distribution;
    }

    let mut rng = session.rng(options.seed);
    let grid = MeshGrid::from_template_with_rng(&template, &mut rng)?;
    save(&MeshDocument::new(grid.clone()), path)?;
    session.remember(path);
    Ok(grid)
}

/// Rebuild the document at `path` with a new topology.
pub fn resize(
    session: &Session,
    path: &Path,
    rows: u32,
    columns: u32,
    seed: Option<u64>,
) -> Result<MeshGrid> {
    let mut rng = session.rng(seed);
    edit(path, |grid| {
        *grid = grid.reconfigured_with_rng(rows, columns, &mut rng)?;
        Ok(())
    })
}

pub fn reset(path: &Path) -> Result<MeshGrid> {
    edit(path, |grid| {
        grid.reset_layout();
        Ok(())
    })
}

pub fn randomize(
    session: &Session,
    path: &Path,
    magnitude: Option<f32>,
    seed: Option<u64>,
) -> Result<MeshGrid> {
    let magnitude = magnitude.unwrap_or(session.config.mutation.randomize_magnitude);
    let mut rng = session.rng(seed);
    edit(path, |grid| {
        grid.randomize_mesh_with_rng(magnitude, &mut rng);
        Ok(())
    })
}

pub fn distort(
    session: &Session,
    path: &Path,
    frequency: Option<f64>,
    amplitude: Option<f64>,
    seed: Option<u64>,
) -> Result<MeshGrid> {
    let defaults = session.config.mutation.distortion_params();
    let params = DistortionParams::new(
        frequency.unwrap_or(defaults.frequency),
        amplitude.unwrap_or(defaults.amplitude),
    );
    let noise_seed = session.rng(seed).random::<u32>();
    edit(path, |grid| {
        grid.distort_points_with_seed(params, noise_seed);
        Ok(())
    })
}

/// Recolor from `palette`, or from the document's own palette when `None`.
pub fn recolor(
    session: &Session,
    path: &Path,
    palette: Option<&str>,
    distribution: Option<ColorDistribution>,
    seed: Option<u64>,
) -> Result<MeshGrid> {
    let palette = palette.map(parse_palette_arg).transpose()?;
    let mut rng = session.rng(seed);
    edit(path, |grid| {
        let palette = palette.unwrap_or_else(|| grid.color_palette().to_vec());
        let style = distribution.unwrap_or(grid.color_distribution());
        grid.distribute_with_rng(&palette, style, &mut rng)?;
        Ok(())
    })
}

/// Paint the points at `cells` with `color`.
pub fn paint(path: &Path, cells: &[(u32, u32)], color: &str) -> Result<MeshGrid> {
    let color = parse_hex_color(color).with_context(|| format!("'{color}' is not a hex color"))?;
    edit(path, |grid| {
        let mut ids = Vec::with_capacity(cells.len());
        for &(row, column) in cells {
            let point = grid
                .point_at(row, column)
                .with_context(|| format!("no point at row {row}, column {column}"))?;
            ids.push(point.id);
        }
        grid.set_color(&ids, color);
        Ok(())
    })
}

pub fn nudge(path: &Path, row: u32, column: u32, delta: [f32; 2]) -> Result<MeshGrid> {
    edit(path, |grid| {
        let id = grid
            .point_at(row, column)
            .map(|p| p.id)
            .with_context(|| format!("no point at row {row}, column {column}"))?;
        grid.nudge_point(id, delta);
        Ok(())
    })
}

/// Image export options; unset fields come from the config.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub scale: Option<u32>,
    pub jpeg_quality: Option<u8>,
    pub subdivisions: Option<u32>,
}

pub fn export_image(
    session: &mut Session,
    path: &Path,
    output: &Path,
    options: &ExportOptions,
) -> Result<()> {
    let document = load(path)?;
    let settings = &session.config.export;
    let exporter = Exporter::with_renderer(RasterRenderer::new(
        options.subdivisions.unwrap_or(settings.subdivisions),
    ))
    .with_scale(options.scale.unwrap_or(settings.scale))
    .with_jpeg_quality(options.jpeg_quality.unwrap_or(settings.jpeg_quality));

    exporter
        .export_to_file(&document.grid, output)
        .with_context(|| format!("Failed to export {}", output.display()))?;
    session.remember(path);
    Ok(())
}

pub fn generate_code(path: &Path, header: bool) -> Result<String> {
    let document = load(path)?;
    Ok(SourceGenerator { header }.generate(&document.grid))
}

/// Human-readable overview of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSummary {
    pub rows: u32,
    pub columns: u32,
    pub viewport: (u32, u32),
    pub palette: String,
    pub distribution: ColorDistribution,
    pub background: String,
    pub color_space: String,
    pub smooth_colors: bool,
    pub edge_points: usize,
}

impl DocumentSummary {
    pub fn from_grid(grid: &MeshGrid) -> Self {
        Self {
            rows: grid.rows(),
            columns: grid.columns(),
            viewport: (grid.viewport_width(), grid.viewport_height()),
            palette: format_palette(grid.color_palette()),
            distribution: grid.color_distribution(),
            background: grid.background_color.to_hex(),
            color_space: grid.color_space.to_string(),
            smooth_colors: grid.smooth_colors,
            edge_points: grid
                .points()
                .iter()
                .filter(|p| p.is_horizontal_edge() || p.is_vertical_edge())
                .count(),
        }
    }
}

impl fmt::Display for DocumentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "grid:          {} x {}", self.rows, self.columns)?;
        writeln!(f, "viewport:      {} x {}", self.viewport.0, self.viewport.1)?;
        writeln!(f, "palette:       {}", self.palette)?;
        writeln!(f, "distribution:  {}", self.distribution)?;
        writeln!(f, "background:    {}", self.background)?;
        writeln!(f, "color space:   {}", self.color_space)?;
        writeln!(f, "smooth colors: {}", self.smooth_colors)?;
        write!(f, "edge points:   {}", self.edge_points)
    }
}

pub fn info(path: &Path) -> Result<DocumentSummary> {
    let document = load(path)?;
    Ok(DocumentSummary::from_grid(&document.grid))
}
