//! Configuration management - where the gradebook lives.
//!
//! The storage location is resolved once at startup and handed to
//! [`GradeManager::new`](crate::core::GradeManager::new) as an explicit path.
//! Precedence, highest first: command line flag or environment variable, the
//! optional settings file, the platform's per-user data directory.

/// Storage path resolution
pub mod paths;
/// Optional TOML settings file
pub mod settings;

pub use paths::{APP_DIR, AppConfig, StorageOverrides, load_app_configuration};
pub use settings::{Settings, StorageSettings};
