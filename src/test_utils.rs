//! Shared test utilities.
//!
//! Helpers for building courses with known grades and gradebooks backed by a
//! temporary directory.

use crate::{
    core::{Course, DEFAULT_FILE_NAME, GradeEntry, GradeManager},
    errors::{Error, Result},
};
use std::path::PathBuf;
use tempfile::TempDir;

/// Tolerance used when comparing computed grades.
pub const EPSILON: f64 = 1e-9;

/// Asserts that two grades are equal up to floating point noise.
#[track_caller]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

/// Course "Algorithms" with HW1 (8/10, weight 20) and Midterm (45/50, weight 30).
///
/// Total weight 50, current grade 86, earned percentage 43.
pub fn algorithms_course() -> Course {
    course_with_entries(
        "Algorithms",
        &[("HW1", 8.0, 10.0, 20.0), ("Midterm", 45.0, 50.0, 30.0)],
    )
}

/// Creates a course from `(description, earned, total, weight)` tuples.
pub fn course_with_entries(name: &str, entries: &[(&str, f64, f64, f64)]) -> Course {
    let mut course = Course::new(name);
    for &(description, earned, total, weight) in entries {
        course.add_entry(GradeEntry::new(description, earned, total, weight));
    }
    course
}

/// Storage file path inside a temporary directory.
pub fn storage_path_in(dir: &TempDir) -> PathBuf {
    dir.path().join(DEFAULT_FILE_NAME)
}

/// Empty gradebook stored in a fresh temporary directory.
///
/// Keep the returned `TempDir` alive for as long as the manager is used.
pub fn temp_manager() -> Result<(TempDir, GradeManager)> {
    let dir = tempfile::tempdir().map_err(|e| Error::storage(std::env::temp_dir(), e))?;
    let manager = GradeManager::new(storage_path_in(&dir))?;
    Ok((dir, manager))
}
