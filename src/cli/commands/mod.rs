//! Command implementations.
//!
//! Each handler takes the gradebook plus parsed arguments and returns the text to
//! print. Handlers that change the gradebook save it before returning.

/// Course listing, creation, removal and display
pub mod course;
/// Grade entry creation and removal
pub mod entry;

use crate::{
    core::{Course, GradeManager},
    errors::{Error, Result},
};

/// Looks up a course by its trimmed name or reports it as not found.
pub(crate) fn find_course<'a>(manager: &'a GradeManager, name: &str) -> Result<&'a Course> {
    let name = name.trim();
    manager
        .get_course(name)
        .ok_or_else(|| Error::CourseNotFound {
            name: name.to_string(),
        })
}

/// Mutable variant of [`find_course`].
pub(crate) fn find_course_mut<'a>(
    manager: &'a mut GradeManager,
    name: &str,
) -> Result<&'a mut Course> {
    let name = name.trim();
    manager
        .get_course_mut(name)
        .ok_or_else(|| Error::CourseNotFound {
            name: name.to_string(),
        })
}
