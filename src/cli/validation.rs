//! User input validation.
//!
//! The core accepts any numbers; everything a user should not be able to store
//! is rejected here, before a [`GradeEntry`] is built.

use crate::{
    core::GradeEntry,
    errors::{Error, Result},
};

fn invalid(message: &str) -> Error {
    Error::InvalidInput {
        message: message.to_string(),
    }
}

/// Trims a course name and rejects empty ones.
///
/// # Errors
/// Returns `Error::InvalidInput` for a blank name.
pub fn course_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(invalid("Please enter a course name"));
    }
    Ok(trimmed)
}

/// Builds an entry from user input.
///
/// # Errors
/// Returns `Error::InvalidInput` for a blank description, a non-finite number,
/// a total of zero or less, or a negative weight.
pub fn grade_entry(description: &str, earned: f64, total: f64, weight: f64) -> Result<GradeEntry> {
    let description = description.trim();
    if description.is_empty() {
        return Err(invalid("Please enter a description"));
    }

    if ![earned, total, weight].iter().all(|value| value.is_finite()) {
        return Err(invalid(
            "Please enter valid numbers for earned points, total points, and weight",
        ));
    }

    if total <= 0.0 {
        return Err(invalid("Total points must be greater than 0"));
    }

    if weight < 0.0 {
        return Err(invalid("Weight cannot be negative"));
    }

    Ok(GradeEntry::new(description, earned, total, weight))
}

/// Converts a 1-based position as shown to the user into an entry index.
#[must_use]
pub const fn entry_index(position: usize) -> Option<usize> {
    position.checked_sub(1)
}
