//! Unified error type for the gradebook.
//!
//! Structural failures inside the model (removing an entry that does not exist,
//! adding a duplicate course) are reported as booleans by the core and only turned
//! into [`Error`] values by the presentation layer.

use std::path::PathBuf;
use thiserror::Error;

/// Every failure the crate can surface.
#[derive(Debug, Error)]
pub enum Error {
    /// Settings file or storage location could not be resolved.
    #[error("Configuration error: {message}")]
    Config {
        /// Human readable description
        message: String,
    },

    /// User input rejected before it reached the model.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Human readable description
        message: String,
    },

    /// No course with this name is stored.
    #[error("Course not found: {name}")]
    CourseNotFound {
        /// Requested course name
        name: String,
    },

    /// A course with this name is already stored.
    #[error("Course already exists: {name}")]
    CourseExists {
        /// Duplicate course name
        name: String,
    },

    /// Entry position outside the course's entry list.
    #[error("Entry {position} not found in course {course}")]
    EntryNotFound {
        /// Course that was searched
        course: String,
        /// 1-based position as shown to the user
        position: usize,
    },

    /// A required key is absent from a stored record.
    #[error("Missing field `{field}` in {record}")]
    MissingField {
        /// Kind of record being decoded
        record: &'static str,
        /// Name of the absent key
        field: &'static str,
    },

    /// A stored value has the wrong JSON type.
    #[error("Field `{field}` in {record} must be {expected}")]
    InvalidType {
        /// Kind of record being decoded
        record: &'static str,
        /// Name of the offending key
        field: &'static str,
        /// Expected JSON type
        expected: &'static str,
    },

    /// Malformed JSON document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing the storage file failed.
    #[error("Storage error at {}: {source}", path.display())]
    Storage {
        /// File or directory involved
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },

    /// A grade entry holds NaN or an infinity, which JSON cannot represent.
    #[error("Entry \"{entry}\" in course \"{course}\" has a non-finite {field}")]
    NonFiniteValue {
        /// Course holding the entry
        course: String,
        /// Entry description
        entry: String,
        /// Name of the offending field
        field: &'static str,
    },

    /// Building command output failed.
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),
}

impl Error {
    /// Wraps an I/O failure together with the path it happened on.
    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
