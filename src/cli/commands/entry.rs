//! Entry commands - add and remove graded items.

use super::find_course_mut;
use crate::{
    cli::{AddEntryArgs, validation},
    core::{GradeManager, report},
    errors::{Error, Result},
};
use tracing::info;

/// Validates and appends an entry to a course, then saves the gradebook.
pub fn add_entry(manager: &mut GradeManager, args: &AddEntryArgs) -> Result<String> {
    let course = find_course_mut(manager, &args.course)?;
    let entry = validation::grade_entry(&args.description, args.earned, args.total, args.weight)?;
    let description = entry.description().to_string();

    course.add_entry(entry);
    let status = report::format_status_line(course);
    manager.save()?;

    info!("Added entry {:?} to course {:?}", description, args.course);
    Ok(format!("Added entry '{description}'.\n{status}"))
}

/// Removes the entry at a 1-based `position`, then saves the gradebook.
pub fn remove_entry(
    manager: &mut GradeManager,
    course_name: &str,
    position: usize,
) -> Result<String> {
    let course = find_course_mut(manager, course_name)?;
    let not_found = || Error::EntryNotFound {
        course: course_name.to_string(),
        position,
    };

    let index = validation::entry_index(position).ok_or_else(not_found)?;
    let description = course
        .entries()
        .get(index)
        .map(|entry| entry.description().to_string())
        .ok_or_else(not_found)?;

    if !course.remove_entry(index) {
        return Err(not_found());
    }
    let status = report::format_status_line(course);
    manager.save()?;

    info!("Removed entry {:?} from course {:?}", description, course_name);
    Ok(format!("Removed entry '{description}'.\n{status}"))
}
