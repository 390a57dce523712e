//! Core business logic - framework-agnostic grade entries, courses and the gradebook.

/// Course with ordered entries and aggregate grades
pub mod course;
/// Single graded item
pub mod entry;
/// Keyed course collection with JSON persistence
pub mod manager;
/// Course summaries and chart data
pub mod report;
/// Required-field checks for stored records
pub mod schema;

pub use course::Course;
pub use entry::GradeEntry;
pub use manager::{DEFAULT_FILE_NAME, GradeManager, LoadOutcome};
