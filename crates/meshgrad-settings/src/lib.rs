//! Meshgrad Settings Crate
//!
//! Handles application configuration: defaults for new documents, editor
//! preferences, mutation and export defaults, and the recent files list.

pub mod config;
pub mod error;

pub use config::{
    Config, EditorSettings, ExportSettings, MutationSettings, TemplateSettings, APP_DIR_NAME,
    CONFIG_FILE_NAME,
};
pub use error::{SettingsError, SettingsResult};
