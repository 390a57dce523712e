//! Course commands - list, add, remove, show and chart.

use super::find_course;
use crate::{
    cli::validation,
    core::{GradeManager, report},
    errors::{Error, Result},
};
use std::fmt::Write;
use tracing::info;

/// Lists course names in the order they were added, with both grades.
pub fn list_courses(manager: &GradeManager) -> Result<String> {
    if manager.is_empty() {
        return Ok("No courses yet. Add one with `add-course <name>`.".to_string());
    }

    let mut out = String::new();
    for course in manager.courses() {
        writeln!(
            &mut out,
            "{}  (Weighted Grade: {:.2}% | Earned: {:.2}% | {} entries)",
            course.name(),
            course.current_grade(),
            course.earned_percentage(),
            course.len()
        )?;
    }
    out.truncate(out.trim_end().len());
    Ok(out)
}

/// Adds an empty course and saves the gradebook.
pub fn add_course(manager: &mut GradeManager, name: &str) -> Result<String> {
    let name = validation::course_name(name)?;

    if !manager.add_course(name) {
        return Err(Error::CourseExists {
            name: name.to_string(),
        });
    }
    manager.save()?;

    info!("Added course {:?}", name);
    Ok(format!("Added course '{name}'."))
}

/// Removes a course with all its entries and saves the gradebook.
pub fn remove_course(manager: &mut GradeManager, name: &str) -> Result<String> {
    let name = validation::course_name(name)?;

    if !manager.remove_course(name) {
        return Err(Error::CourseNotFound {
            name: name.to_string(),
        });
    }
    manager.save()?;

    info!("Removed course {:?}", name);
    Ok(format!("Removed course '{name}' and all its entries."))
}

/// Shows the entry table and grades of a course.
pub fn show_course(manager: &GradeManager, name: &str) -> Result<String> {
    let course = find_course(manager, name)?;
    report::format_course_report(&report::generate_course_report(course))
}

/// Draws the weighted score chart of a course.
pub fn chart_course(manager: &GradeManager, name: &str, width: usize) -> Result<String> {
    let course = find_course(manager, name)?;
    report::render_chart(&report::build_chart(course), width)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_list_courses_empty() -> Result<()> {
        let (_dir, manager) = temp_manager()?;
        assert!(list_courses(&manager)?.starts_with("No courses yet."));
        Ok(())
    }

    #[test]
    fn test_add_course_saves_gradebook() -> Result<()> {
        let (dir, mut manager) = temp_manager()?;

        let message = add_course(&mut manager, "  CS101 ")?;

        assert_eq!(message, "Added course 'CS101'.");
        let reloaded = GradeManager::new(storage_path_in(&dir))?;
        assert!(reloaded.get_course("CS101").is_some());
        Ok(())
    }

    #[test]
    fn test_add_duplicate_course_fails() -> Result<()> {
        let (_dir, mut manager) = temp_manager()?;
        add_course(&mut manager, "CS101")?;

        let result = add_course(&mut manager, "CS101");

        assert!(matches!(result, Err(Error::CourseExists { .. })));
        assert_eq!(manager.len(), 1);
        Ok(())
    }

    #[test]
    fn test_add_blank_course_fails() -> Result<()> {
        let (_dir, mut manager) = temp_manager()?;
        let result = add_course(&mut manager, " ");
        assert!(matches!(result, Err(Error::InvalidInput { .. })));
        assert!(manager.is_empty());
        Ok(())
    }

    #[test]
    fn test_remove_unknown_course_fails() -> Result<()> {
        let (_dir, mut manager) = temp_manager()?;
        let result = remove_course(&mut manager, "Nope");
        assert!(matches!(result, Err(Error::CourseNotFound { .. })));
        Ok(())
    }

    #[test]
    fn test_remove_course_saves_gradebook() -> Result<()> {
        let (dir, mut manager) = temp_manager()?;
        add_course(&mut manager, "CS101")?;
        add_course(&mut manager, "MATH200")?;

        remove_course(&mut manager, "CS101")?;

        let reloaded = GradeManager::new(storage_path_in(&dir))?;
        let names: Vec<&str> = reloaded.course_names().collect();
        assert_eq!(names, ["MATH200"]);
        Ok(())
    }

    #[test]
    fn test_remove_course_trims_name_like_add() -> Result<()> {
        let (dir, mut manager) = temp_manager()?;
        add_course(&mut manager, " X ")?;

        let message = remove_course(&mut manager, " X ")?;

        assert_eq!(message, "Removed course 'X' and all its entries.");
        assert!(manager.is_empty());
        let reloaded = GradeManager::new(storage_path_in(&dir))?;
        assert!(reloaded.is_empty());
        Ok(())
    }

    #[test]
    fn test_remove_blank_course_fails() -> Result<()> {
        let (_dir, mut manager) = temp_manager()?;
        add_course(&mut manager, "CS101")?;

        let result = remove_course(&mut manager, "  ");

        assert!(matches!(result, Err(Error::InvalidInput { .. })));
        assert_eq!(manager.len(), 1);
        Ok(())
    }

    #[test]
    fn test_show_course_accepts_padded_name() -> Result<()> {
        let (_dir, mut manager) = temp_manager()?;
        add_course(&mut manager, "CS101")?;
        assert!(show_course(&manager, " CS101 ")?.contains("CS101"));
        Ok(())
    }

    #[test]
    fn test_list_courses_in_insertion_order() -> Result<()> {
        let (_dir, mut manager) = temp_manager()?;
        add_course(&mut manager, "Zoology")?;
        add_course(&mut manager, "Art")?;

        let listing = list_courses(&manager)?;
        let lines: Vec<&str> = listing.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Zoology  (Weighted Grade: 0.00%"));
        assert!(lines[1].starts_with("Art  "));
        Ok(())
    }

    #[test]
    fn test_show_and_chart_unknown_course() -> Result<()> {
        let (_dir, manager) = temp_manager()?;
        assert!(matches!(
            show_course(&manager, "Nope"),
            Err(Error::CourseNotFound { .. })
        ));
        assert!(matches!(
            chart_course(&manager, "Nope", 10),
            Err(Error::CourseNotFound { .. })
        ));
        Ok(())
    }
}
