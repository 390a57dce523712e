//! Report generation business logic.
//!
//! This module turns a course into display-ready data: a summary report with one
//! row per entry, the status line shown after every change, and the bar chart of
//! weight-scaled scores. Everything here is a pure function of the course, so the
//! presentation layer only has to print the strings.

use crate::{
    core::{course::Course, entry::GradeEntry},
    errors::Result,
};
use std::fmt::Write;

/// Labels longer than this are cut and suffixed with `...` in the chart.
pub const LABEL_MAX_CHARS: usize = 15;

/// Lowest axis ceiling of the chart, so tiny scores still get visible bars.
pub const MIN_CHART_CEILING: f64 = 10.0;

/// Default width of a chart bar in characters.
pub const DEFAULT_CHART_WIDTH: u16 = 40;

/// Widest chart bar drawn; wider requests are clamped to this.
pub const MAX_CHART_WIDTH: u16 = 200;

/// One entry of a course report.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryRow {
    /// 1-based position in the course
    pub position: usize,
    /// Entry description
    pub description: String,
    /// Score text such as `8/10 (80.0%)`
    pub score: String,
    /// Score percentage
    pub percentage: f64,
    /// Entry weight in percentage points
    pub weight: f64,
}

/// Summary of a course with its entries.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseReport {
    /// Course name
    pub name: String,
    /// Entries in course order
    pub rows: Vec<EntryRow>,
    /// Sum of all weights
    pub total_weight: f64,
    /// Weighted average performance
    pub current_grade: f64,
    /// Share of the total grade earned so far
    pub earned_percentage: f64,
}

/// Builds the summary report of a course.
#[must_use]
pub fn generate_course_report(course: &Course) -> CourseReport {
    let rows = course
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| EntryRow {
            position: index + 1,
            description: entry.description().to_string(),
            score: format_score(entry),
            percentage: entry.percentage(),
            weight: entry.weight(),
        })
        .collect();

    CourseReport {
        name: course.name().to_string(),
        rows,
        total_weight: course.total_weight(),
        current_grade: course.current_grade(),
        earned_percentage: course.earned_percentage(),
    }
}

/// Formats an entry score like `8/10 (80.0%)`.
#[must_use]
pub fn format_score(entry: &GradeEntry) -> String {
    format!(
        "{}/{} ({:.1}%)",
        entry.earned_points(),
        entry.total_points(),
        entry.percentage()
    )
}

/// One-line summary shown for the selected course.
#[must_use]
pub fn format_status_line(course: &Course) -> String {
    status_line(
        course.name(),
        course.current_grade(),
        course.earned_percentage(),
    )
}

fn status_line(name: &str, current_grade: f64, earned_percentage: f64) -> String {
    format!(
        "Selected: {name} | Weighted Grade: {current_grade:.2}% | Earned: {earned_percentage:.2}%"
    )
}

/// Renders a course report as a table followed by the status line.
///
/// # Errors
/// Returns `Error::Fmt` if writing to the output buffer fails.
pub fn format_course_report(report: &CourseReport) -> Result<String> {
    let mut out = String::new();
    writeln!(&mut out, "{}", report.name)?;

    if report.rows.is_empty() {
        writeln!(&mut out, "  No entries yet.")?;
    } else {
        writeln!(
            &mut out,
            "  {:>3}  {:<24} {:<24} {:>10}",
            "#", "Description", "Score", "Weight (%)"
        )?;
        for row in &report.rows {
            writeln!(
                &mut out,
                "  {:>3}  {:<24} {:<24} {:>10}",
                row.position,
                row.description,
                row.score,
                format!("{}%", row.weight)
            )?;
        }
    }

    writeln!(&mut out, "  Total weight: {}%", report.total_weight)?;
    out.push_str(&status_line(
        &report.name,
        report.current_grade,
        report.earned_percentage,
    ));
    Ok(out)
}

/// One bar of the course chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    /// Possibly truncated entry description
    pub label: String,
    /// `percentage * weight / 100`, the bar height
    pub scaled_height: f64,
    /// Unscaled entry percentage
    pub percentage: f64,
    /// Entry weight
    pub weight: f64,
}

/// Chart of a course: weight-scaled bars plus two reference lines.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    /// Chart title
    pub title: String,
    /// Bars in entry order; empty when the course has no entries
    pub bars: Vec<ChartBar>,
    /// Weighted average performance, drawn at `average_line`
    pub current_grade: f64,
    /// Pure grade, drawn at `pure_line`
    pub earned_percentage: f64,
    /// Height of the "Average Performance" line
    pub average_line: f64,
    /// Height of the "Pure Grade" line
    pub pure_line: f64,
    /// Axis ceiling
    pub ceiling: f64,
}

/// Builds the chart model of a course.
///
/// Bars are entry percentages scaled by weight, so an entry's bar shows how much
/// of the course grade it actually secured. Both reference lines are scaled by the
/// largest weight to share the bars' axis.
#[must_use]
pub fn build_chart(course: &Course) -> ChartData {
    let current_grade = course.current_grade();
    let earned_percentage = course.earned_percentage();

    if course.is_empty() {
        return ChartData {
            title: "Grade Visualization".to_string(),
            bars: Vec::new(),
            current_grade,
            earned_percentage,
            average_line: 0.0,
            pure_line: 0.0,
            ceiling: MIN_CHART_CEILING,
        };
    }

    let has_weight = course.total_weight() > 0.0;
    let bars: Vec<ChartBar> = course
        .entries()
        .iter()
        .map(|entry| {
            let weight_factor = if has_weight { entry.weight() / 100.0 } else { 0.0 };
            ChartBar {
                label: truncate_label(entry.description()),
                scaled_height: entry.percentage() * weight_factor,
                percentage: entry.percentage(),
                weight: entry.weight(),
            }
        })
        .collect();

    let max_weight = max_of(bars.iter().map(|bar| bar.weight));
    let max_height = max_of(bars.iter().map(|bar| bar.scaled_height));
    let average_line = current_grade * max_weight / 100.0;
    let pure_line = earned_percentage * max_weight / 100.0;
    let ceiling = (max_height * 1.3)
        .max(average_line * 1.1)
        .max(pure_line * 1.1)
        .max(MIN_CHART_CEILING);

    ChartData {
        title: format!("Grade Visualization - {}", course.name()),
        bars,
        current_grade,
        earned_percentage,
        average_line,
        pure_line,
        ceiling,
    }
}

/// Renders a chart as horizontal text bars `width` characters long, at most
/// [`MAX_CHART_WIDTH`].
///
/// # Errors
/// Returns `Error::Fmt` if writing to the output buffer fails.
pub fn render_chart(chart: &ChartData, width: usize) -> Result<String> {
    let mut out = String::new();
    writeln!(&mut out, "{}", chart.title)?;

    if chart.bars.is_empty() {
        write!(&mut out, "No data to display")?;
        return Ok(out);
    }

    let label_width = LABEL_MAX_CHARS + 3;
    for bar in &chart.bars {
        writeln!(
            &mut out,
            "{:<label_width$} {} {:.1}% ({}%)",
            bar.label,
            format_bar(bar.scaled_height, chart.ceiling, width, '█'),
            bar.percentage,
            bar.weight
        )?;
    }

    writeln!(&mut out)?;
    writeln!(
        &mut out,
        "{:<label_width$} {} Average Performance: {:.2}%",
        "",
        format_bar(chart.average_line, chart.ceiling, width, '▒'),
        chart.current_grade
    )?;
    write!(
        &mut out,
        "{:<label_width$} {} Pure Grade: {:.2}%",
        "",
        format_bar(chart.pure_line, chart.ceiling, width, '▓'),
        chart.earned_percentage
    )?;
    Ok(out)
}

/// Generates a bar like `[████░░░░]` filled in proportion to `value / ceiling`.
///
/// Negative values render as an empty bar, values above the ceiling as a full one.
/// `width` is clamped to [`MAX_CHART_WIDTH`].
#[must_use]
pub fn format_bar(value: f64, ceiling: f64, width: usize, fill: char) -> String {
    let width = width.min(usize::from(MAX_CHART_WIDTH));
    let ratio = if ceiling > 0.0 {
        (value / ceiling).clamp(0.0, 1.0)
    } else {
        0.0
    };

    // Cast safety: ratio ∈ [0, 1] and width is at most MAX_CHART_WIDTH.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    let filled_str = fill.to_string().repeat(filled);
    let empty_str = "░".repeat(empty);
    format!("[{filled_str}{empty_str}]")
}

fn truncate_label(description: &str) -> String {
    if description.chars().count() > LABEL_MAX_CHARS {
        let head: String = description.chars().take(LABEL_MAX_CHARS).collect();
        format!("{head}...")
    } else {
        description.to_string()
    }
}

fn max_of(values: impl Iterator<Item = f64>) -> f64 {
    values.reduce(f64::max).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_format_score() {
        let entry = GradeEntry::new("HW1", 8.0, 10.0, 20.0);
        assert_eq!(format_score(&entry), "8/10 (80.0%)");

        let entry = GradeEntry::new("Lab", 7.5, 9.0, 5.0);
        assert_eq!(format_score(&entry), "7.5/9 (83.3%)");
    }

    #[test]
    fn test_format_status_line() {
        assert_eq!(
            format_status_line(&algorithms_course()),
            "Selected: Algorithms | Weighted Grade: 86.00% | Earned: 43.00%"
        );
    }

    #[test]
    fn test_generate_course_report() {
        let report = generate_course_report(&algorithms_course());

        assert_eq!(report.name, "Algorithms");
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].position, 1);
        assert_eq!(report.rows[0].score, "8/10 (80.0%)");
        assert_eq!(report.rows[1].position, 2);
        assert_eq!(report.rows[1].description, "Midterm");
        assert_eq!(report.rows[1].weight, 30.0);
        assert_eq!(report.total_weight, 50.0);
        assert_close(report.current_grade, 86.0);
        assert_close(report.earned_percentage, 43.0);
    }

    #[test]
    fn test_format_course_report_lists_entries_and_status() -> Result<()> {
        let text = format_course_report(&generate_course_report(&algorithms_course()))?;

        assert!(text.starts_with("Algorithms\n"));
        assert!(text.contains("HW1"));
        assert!(text.contains("45/50 (90.0%)"));
        assert!(text.contains("Total weight: 50%"));
        assert!(text.ends_with("Weighted Grade: 86.00% | Earned: 43.00%"));
        Ok(())
    }

    #[test]
    fn test_format_course_report_ends_with_status_line() -> Result<()> {
        let course = course_with_entries(
            "Physics",
            &[("Lab 1", 9.0, 10.0, 10.0), ("Exam", 60.0, 80.0, 40.0)],
        );
        let text = format_course_report(&generate_course_report(&course))?;
        let last_line = text.lines().last().unwrap();
        assert_eq!(last_line, format_status_line(&course));
        Ok(())
    }

    #[test]
    fn test_format_course_report_empty_course() -> Result<()> {
        let text = format_course_report(&generate_course_report(&Course::new("CS101")))?;
        assert!(text.contains("No entries yet."));
        assert!(text.ends_with("Weighted Grade: 0.00% | Earned: 0.00%"));
        Ok(())
    }

    #[test]
    fn test_build_chart_scales_bars_by_weight() {
        let chart = build_chart(&algorithms_course());

        assert_eq!(chart.title, "Grade Visualization - Algorithms");
        assert_eq!(chart.bars.len(), 2);
        assert_close(chart.bars[0].scaled_height, 16.0);
        assert_close(chart.bars[1].scaled_height, 27.0);
        // Reference lines are scaled by the largest weight (30).
        assert_close(chart.average_line, 25.8);
        assert_close(chart.pure_line, 12.9);
        assert_close(chart.ceiling, 35.1);
    }

    #[test]
    fn test_build_chart_minimum_ceiling() {
        let course = course_with_entries("Tiny", &[("Quiz", 1.0, 10.0, 5.0)]);
        let chart = build_chart(&course);
        assert_eq!(chart.ceiling, MIN_CHART_CEILING);
    }

    #[test]
    fn test_build_chart_zero_total_weight_flattens_bars() {
        let course = course_with_entries("Audit", &[("Attendance", 9.0, 10.0, 0.0)]);
        let chart = build_chart(&course);
        assert_eq!(chart.bars[0].scaled_height, 0.0);
        assert_eq!(chart.bars[0].percentage, 90.0);
    }

    #[test]
    fn test_build_chart_truncates_long_labels() {
        let course = course_with_entries(
            "Writing",
            &[
                ("A very long assignment title", 5.0, 10.0, 10.0),
                ("Exactly15chars!", 5.0, 10.0, 10.0),
            ],
        );
        let chart = build_chart(&course);
        assert_eq!(chart.bars[0].label, "A very long ass...");
        assert_eq!(chart.bars[1].label, "Exactly15chars!");
    }

    #[test]
    fn test_empty_course_chart_has_no_data() -> Result<()> {
        let chart = build_chart(&Course::new("CS101"));
        assert!(chart.bars.is_empty());
        assert_eq!(
            render_chart(&chart, usize::from(DEFAULT_CHART_WIDTH))?,
            "Grade Visualization\nNo data to display"
        );
        Ok(())
    }

    #[test]
    fn test_render_chart_includes_bars_and_legend() -> Result<()> {
        let text = render_chart(&build_chart(&algorithms_course()), 10)?;

        assert!(text.starts_with("Grade Visualization - Algorithms\n"));
        assert!(text.contains("80.0% (20%)"));
        assert!(text.contains("90.0% (30%)"));
        assert!(text.contains("Average Performance: 86.00%"));
        assert!(text.ends_with("Pure Grade: 43.00%"));
        Ok(())
    }

    #[test]
    fn test_render_chart_clamps_huge_width() -> Result<()> {
        let text = render_chart(&build_chart(&algorithms_course()), usize::MAX)?;
        let max_cells = usize::from(MAX_CHART_WIDTH);

        for line in text.lines().filter(|line| line.contains('[')) {
            let start = line.find('[').unwrap();
            let end = line.find(']').unwrap();
            assert_eq!(line[start..end].chars().count() - 1, max_cells);
        }
        Ok(())
    }

    #[test]
    fn test_format_bar_full_half_empty() {
        assert_eq!(format_bar(10.0, 10.0, 4, '█'), "[████]");
        assert_eq!(format_bar(5.0, 10.0, 4, '█'), "[██░░]");
        assert_eq!(format_bar(0.0, 10.0, 4, '█'), "[░░░░]");
    }

    #[test]
    fn test_format_bar_clamps_width() {
        let bar = format_bar(5.0, 10.0, usize::MAX, '█');
        assert_eq!(bar.chars().count(), usize::from(MAX_CHART_WIDTH) + 2);
    }

    #[test]
    fn test_format_bar_clamps_out_of_range() {
        assert_eq!(format_bar(-3.0, 10.0, 4, '█'), "[░░░░]");
        assert_eq!(format_bar(30.0, 10.0, 4, '█'), "[████]");
        assert_eq!(format_bar(3.0, 0.0, 4, '█'), "[░░░░]");
    }
}
