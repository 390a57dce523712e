//! Settings loading from config.toml
//!
//! The settings file is optional. When present it may override where the
//! gradebook is stored:
//!
//! ```toml
//! [storage]
//! data_dir = "/home/me/Documents/grades"
//! file_name = "grades.json"
//! ```

use crate::{
    config::paths::APP_DIR,
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the settings file inside the per-user config directory.
pub const SETTINGS_FILE: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Storage location overrides
    pub storage: StorageSettings,
}

/// `[storage]` table of the settings file
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding the gradebook file
    pub data_dir: Option<PathBuf>,
    /// Name of the gradebook file inside `data_dir`
    pub file_name: Option<String>,
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns `Error::Config` if the file cannot be read or is not valid TOML.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load settings from: {:?}", path_ref);

    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read settings file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse settings file {}: {e}", path_ref.display()),
    })
}

/// Loads settings from `path` if the file exists, defaults otherwise.
///
/// # Errors
/// Same as [`load_settings`] for a file that exists.
pub fn load_optional_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    if path.as_ref().exists() {
        load_settings(path)
    } else {
        tracing::debug!("No settings file at {:?}, using defaults", path.as_ref());
        Ok(Settings::default())
    }
}

/// Default settings location, `<config dir>/grade-visualizer/config.toml`.
#[must_use]
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
}
