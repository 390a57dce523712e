//! Storage path resolution.
//!
//! [`AppConfig::resolve`] is pure: every input is passed in, so tests can point the
//! gradebook anywhere without touching environment variables or the user's home.

use crate::{
    config::settings::{self, Settings},
    core::DEFAULT_FILE_NAME,
    errors::{Error, Result},
};
use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

/// Directory name used under the platform data and config directories.
pub const APP_DIR: &str = "grade-visualizer";

/// Storage location given on the command line or through the environment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StorageOverrides {
    /// Directory holding the gradebook file
    pub data_dir: Option<PathBuf>,
    /// Name of the gradebook file
    pub file_name: Option<String>,
}

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Full path of the gradebook file
    pub storage_path: PathBuf,
}

impl AppConfig {
    /// Combines overrides, settings and the platform default into a storage path.
    ///
    /// # Errors
    /// Returns `Error::Config` if no data directory can be determined or the file
    /// name is not a plain file name.
    pub fn resolve(
        overrides: &StorageOverrides,
        settings: &Settings,
        default_data_dir: Option<PathBuf>,
    ) -> Result<Self> {
        let data_dir = overrides
            .data_dir
            .clone()
            .or_else(|| settings.storage.data_dir.clone())
            .or(default_data_dir)
            .ok_or_else(|| Error::Config {
                message: "Unable to determine a data directory; pass --data-dir".to_string(),
            })?;

        let file_name = overrides
            .file_name
            .as_deref()
            .or(settings.storage.file_name.as_deref())
            .unwrap_or(DEFAULT_FILE_NAME);
        validate_file_name(file_name)?;

        Ok(Self {
            storage_path: data_dir.join(file_name),
        })
    }
}

/// Per-user data directory, e.g. `~/.local/share/grade-visualizer` on Linux.
#[must_use]
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR))
}

/// Loads settings and resolves the storage path against the platform defaults.
///
/// An explicit `settings_path` must exist; the default settings file is optional.
///
/// # Errors
/// Returns `Error::Config` for an unreadable settings file or an unresolvable path.
pub fn load_app_configuration(
    overrides: &StorageOverrides,
    settings_path: Option<&Path>,
) -> Result<AppConfig> {
    let settings = match settings_path {
        Some(path) => settings::load_settings(path)?,
        None => match settings::default_settings_path() {
            Some(path) => settings::load_optional_settings(path)?,
            None => Settings::default(),
        },
    };

    let config = AppConfig::resolve(overrides, &settings, default_data_dir())?;
    tracing::debug!("Gradebook storage path: {:?}", config.storage_path);
    Ok(config)
}

fn validate_file_name(file_name: &str) -> Result<()> {
    if Path::new(file_name).file_name() == Some(OsStr::new(file_name)) {
        Ok(())
    } else {
        Err(Error::Config {
            message: format!("Invalid gradebook file name: {file_name:?}"),
        })
    }
}
