//! Configuration and settings management for Meshgrad
//!
//! Provides configuration file handling, defaults for new documents, and
//! validation. Supports JSON and TOML file formats; the default location is
//! `<config dir>/meshgrad/config.toml`.
//!
//! Configuration is organized into logical sections:
//! - Template settings (topology, viewport, palette for new documents)
//! - Editor preferences (handle size, padding)
//! - Mutation defaults (randomize magnitude, distortion parameters, seed)
//! - Export defaults (format, scale, quality)

use meshgrad_core::{
    default_palette, parse_hex_color, parse_palette, ColorDistribution, ColorSpace,
    DistortionParams, GridTemplate, DEFAULT_HANDLE_SIZE,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{SettingsError, SettingsResult};

/// Directory name under the platform config directory.
pub const APP_DIR_NAME: &str = "meshgrad";
/// Default config file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Defaults for newly created documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    pub rows: u32,
    pub columns: u32,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub smooth_colors: bool,
    pub color_space: ColorSpace,
    /// Hex color code
    pub background_color: String,
    /// Hex color codes, at least two
    pub palette: Vec<String>,
    pub distribution: ColorDistribution,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        let template = GridTemplate::default();
        Self {
            rows: template.rows,
            columns: template.columns,
            viewport_width: template.viewport_width,
            viewport_height: template.viewport_height,
            smooth_colors: template.smooth_colors,
            color_space: template.color_space,
            background_color: template.background_color.to_hex(),
            palette: default_palette().iter().map(|c| c.to_hex()).collect(),
            distribution: template.color_distribution,
        }
    }
}

/// Editor preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Point handle edge length in viewport units
    pub handle_size: f64,
    /// Space around the canvas in viewport units
    pub canvas_padding: f64,
    /// Number of recent files to track
    pub recent_files_count: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            handle_size: DEFAULT_HANDLE_SIZE,
            canvas_padding: 24.0,
            recent_files_count: 10,
        }
    }
}

/// Defaults for the randomize and distort operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationSettings {
    pub randomize_magnitude: f32,
    pub distort_frequency: f64,
    pub distort_amplitude: f64,
    /// Fixed RNG seed for reproducible sessions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for MutationSettings {
    fn default() -> Self {
        Self {
            randomize_magnitude: 0.15,
            distort_frequency: 4.0,
            distort_amplitude: 0.3,
            seed: None,
        }
    }
}

impl MutationSettings {
    pub fn distortion_params(&self) -> DistortionParams {
        DistortionParams::new(self.distort_frequency, self.distort_amplitude)
    }
}

/// Image export defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// `png` or `jpeg`
    pub format: String,
    /// Output size multiplier
    pub scale: u32,
    pub jpeg_quality: u8,
    /// Renderer quads per cell edge
    pub subdivisions: u32,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            format: "png".to_string(),
            scale: 1,
            jpeg_quality: 90,
            subdivisions: 24,
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Recent files list
    pub recent_files: Vec<PathBuf>,
    /// New document defaults
    pub template: TemplateSettings,
    /// Editor preferences
    pub editor: EditorSettings,
    /// Mutation defaults
    pub mutation: MutationSettings,
    /// Export defaults
    pub export: ExportSettings,
}

enum FileFormat {
    Json,
    Toml,
}

fn file_format(path: &Path) -> SettingsResult<FileFormat> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(FileFormat::Json),
        Some("toml") => Ok(FileFormat::Toml),
        _ => Err(SettingsError::UnsupportedFormat(
            "Config file must be .json or .toml".to_string(),
        )),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform default config path.
    pub fn default_path() -> SettingsResult<PathBuf> {
        let mut path = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("no platform config directory".to_string())
        })?;
        path.push(APP_DIR_NAME);
        path.push(CONFIG_FILE_NAME);
        Ok(path)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = file_format(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load config from file, falling back to defaults when it does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match file_format(path)? {
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
            })?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        tracing::debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let template = &self.template;
        if template.rows == 0 || template.columns == 0 {
            return Err(SettingsError::invalid("template", "rows and columns must be > 0"));
        }
        if template.viewport_width == 0 || template.viewport_height == 0 {
            return Err(SettingsError::invalid("template", "viewport dimensions must be > 0"));
        }
        if parse_hex_color(&template.background_color).is_none() {
            return Err(SettingsError::invalid(
                "template.background_color",
                format!("'{}' is not a hex color", template.background_color),
            ));
        }
        let palette = parse_palette(&template.palette.join(","));
        if palette.len() < 2 {
            return Err(SettingsError::invalid(
                "template.palette",
                format!("needs at least 2 valid colors, found {}", palette.len()),
            ));
        }

        if self.editor.handle_size <= 0.0 {
            return Err(SettingsError::invalid("editor.handle_size", "must be > 0"));
        }
        if self.editor.canvas_padding < 0.0 {
            return Err(SettingsError::invalid("editor.canvas_padding", "must be >= 0"));
        }

        let mutation = &self.mutation;
        if !(0.0..=1.0).contains(&mutation.randomize_magnitude) {
            return Err(SettingsError::invalid(
                "mutation.randomize_magnitude",
                "must be between 0 and 1",
            ));
        }
        if mutation.distort_frequency <= 0.0 {
            return Err(SettingsError::invalid("mutation.distort_frequency", "must be > 0"));
        }
        if mutation.distort_amplitude < 0.0 {
            return Err(SettingsError::invalid("mutation.distort_amplitude", "must be >= 0"));
        }

        let export = &self.export;
        if !matches!(
            export.format.to_ascii_lowercase().as_str(),
            "png" | "jpg" | "jpeg"
        ) {
            return Err(SettingsError::invalid(
                "export.format",
                format!("unknown image format '{}'", export.format),
            ));
        }
        if !(1..=16).contains(&export.scale) {
            return Err(SettingsError::invalid("export.scale", "must be between 1 and 16"));
        }
        if !(1..=100).contains(&export.jpeg_quality) {
            return Err(SettingsError::invalid(
                "export.jpeg_quality",
                "must be between 1 and 100",
            ));
        }
        if !(1..=256).contains(&export.subdivisions) {
            return Err(SettingsError::invalid(
                "export.subdivisions",
                "must be between 1 and 256",
            ));
        }

        Ok(())
    }

    /// Template for a new grid built from the template section.
    pub fn grid_template(&self) -> SettingsResult<GridTemplate> {
        let template = &self.template;
        let background = parse_hex_color(&template.background_color).ok_or_else(|| {
            SettingsError::invalid(
                "template.background_color",
                format!("'{}' is not a hex color", template.background_color),
            )
        })?;
        let palette = parse_palette(&template.palette.join(","));
        if palette.len() < 2 {
            return Err(SettingsError::invalid(
                "template.palette",
                format!("needs at least 2 valid colors, found {}", palette.len()),
            ));
        }

        Ok(GridTemplate {
            viewport_width: template.viewport_width,
            viewport_height: template.viewport_height,
            rows: template.rows,
            columns: template.columns,
            smooth_colors: template.smooth_colors,
            background_color: background,
            color_space: template.color_space,
            color_palette: Some(palette),
            color_distribution: template.distribution,
        })
    }

    /// Add file to recent files list
    pub fn add_recent_file(&mut self, path: PathBuf) {
        self.recent_files.retain(|f| f != &path);
        self.recent_files.insert(0, path);
        self.recent_files.truncate(self.editor.recent_files_count);
    }
}
