//! Command-line interface - argument parsing and command dispatch.
//!
//! This is the presentation layer over the core: it parses what the user typed,
//! validates it, calls into [`GradeManager`] and formats the result. Every command
//! that changes the gradebook saves it before returning.

/// Command implementations (courses, entries)
pub mod commands;
/// User input validation
pub mod validation;

use crate::{
    config::StorageOverrides,
    core::{GradeManager, report::{DEFAULT_CHART_WIDTH, MAX_CHART_WIDTH}},
    errors::Result,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Track course grades and visualize weighted scores.
#[derive(Parser, Debug)]
#[command(name = "grade-visualizer", version, about)]
pub struct Cli {
    /// Directory holding the gradebook file
    #[arg(long, global = true, env = "GRADEBOOK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Name of the gradebook file inside the data directory
    #[arg(long, global = true, env = "GRADEBOOK_FILE")]
    pub file: Option<String>,

    /// Settings file to use instead of the default config.toml
    #[arg(long, global = true, env = "GRADEBOOK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Storage location given on the command line or through the environment.
    #[must_use]
    pub fn storage_overrides(&self) -> StorageOverrides {
        StorageOverrides {
            data_dir: self.data_dir.clone(),
            file_name: self.file.clone(),
        }
    }
}

/// Gradebook commands.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List all courses with their grades
    Courses,

    /// Add a new, empty course
    AddCourse {
        /// Course name
        name: String,
    },

    /// Remove a course and all its entries
    RemoveCourse {
        /// Course name
        name: String,
    },

    /// Add a graded item to a course
    AddEntry(AddEntryArgs),

    /// Remove a graded item from a course
    RemoveEntry {
        /// Course name
        course: String,
        /// Entry position as listed by `show`, starting at 1
        position: usize,
    },

    /// Show the entries and grades of a course
    Show {
        /// Course name
        course: String,
    },

    /// Draw the weighted score chart of a course
    Chart {
        /// Course name
        course: String,
        /// Bar width in characters
        #[arg(
            long,
            default_value_t = DEFAULT_CHART_WIDTH,
            value_parser = clap::value_parser!(u16).range(1..=i64::from(MAX_CHART_WIDTH))
        )]
        width: u16,
    },
}

/// Arguments of `add-entry`.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct AddEntryArgs {
    /// Course name
    pub course: String,

    /// What was graded, e.g. "Midterm"
    pub description: String,

    /// Points scored
    #[arg(long, allow_negative_numbers = true)]
    pub earned: f64,

    /// Points available
    #[arg(long, allow_negative_numbers = true)]
    pub total: f64,

    /// Share of the course grade, in percent
    #[arg(long, allow_negative_numbers = true)]
    pub weight: f64,
}

/// Runs one command against the gradebook and returns the text to print.
///
/// # Errors
/// Returns an error for invalid input, unknown courses or entries, duplicate
/// course names, and failures to save the gradebook.
pub fn run(command: &Command, manager: &mut GradeManager) -> Result<String> {
    match command {
        Command::Courses => commands::course::list_courses(manager),
        Command::AddCourse { name } => commands::course::add_course(manager, name),
        Command::RemoveCourse { name } => commands::course::remove_course(manager, name),
        Command::AddEntry(args) => commands::entry::add_entry(manager, args),
        Command::RemoveEntry { course, position } => {
            commands::entry::remove_entry(manager, course, *position)
        }
        Command::Show { course } => commands::course::show_course(manager, course),
        Command::Chart { course, width } => {
            commands::course::chart_course(manager, course, usize::from(*width))
        }
    }
}
