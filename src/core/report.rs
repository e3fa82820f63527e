//! Dashboard figures and display formatting.
//!
//! This module computes the headline numbers shown on the overview (students
//! enrolled, latest month revenue, course fill) and the small text helpers the
//! bot layer uses to render them. Everything here is read-only over the store.

use crate::{
    core::{calendar, store::Dashboard},
    models::{Course, CourseStatus, FinancialRecord},
};

/// Headline numbers for the overview.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    /// Number of courses in any status
    pub course_count: usize,
    /// Courses currently running
    pub active_courses: usize,
    /// Sum of registrants across all courses
    pub total_students: u64,
    /// Revenue of the last financial record, 0 when there is none
    pub latest_revenue: i64,
    /// Label of the last financial record
    pub latest_month: Option<String>,
    /// Sum of course revenue
    pub course_revenue: i64,
    /// Registrants over capacity across all courses, as a percentage
    pub fill_percent: f64,
}

/// Computes the overview figures from the current store contents.
#[must_use]
pub fn generate_summary(dashboard: &Dashboard) -> DashboardSummary {
    let courses = dashboard.courses();
    let latest: Option<&FinancialRecord> = dashboard.financial_data().last();

    let total_students: u64 = courses.iter().map(|c| u64::from(c.registrants)).sum();
    let total_capacity: u64 = courses.iter().map(|c| u64::from(c.max_capacity)).sum();

    #[allow(clippy::cast_precision_loss)] // Head counts are small
    let fill_percent = calculate_progress(total_students as f64, total_capacity as f64);

    DashboardSummary {
        course_count: courses.len(),
        active_courses: courses
            .iter()
            .filter(|c| c.status == CourseStatus::Active)
            .count(),
        total_students,
        latest_revenue: latest.map_or(0, |r| r.revenue),
        latest_month: latest.map(|r| r.name.clone()),
        course_revenue: courses.iter().map(|c| c.revenue).sum(),
        fill_percent,
    }
}

/// Calculates `part` as a percentage of `whole`; 0 when `whole` is 0.
#[must_use]
pub fn calculate_progress(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }

    (part / whole) * 100.0
}

/// Generates a progress bar string for visual representation.
///
/// Creates a text-based progress bar like: `[████████░░] 80.0%`
#[must_use]
pub fn format_progress_bar(progress_percent: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped_progress = progress_percent.clamp(0.0, 100.0);

    // Cast safety: clamped_progress ∈ [0, 100], length is small (10-20).
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped_progress / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    let filled_str = "█".repeat(filled);
    let empty_str = "░".repeat(empty);

    format!("[{filled_str}{empty_str}] {progress_percent:.1}%")
}

/// Formats a shekel amount with thousands separators, e.g. `₪12,500`.
#[must_use]
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("-₪{grouped}")
    } else {
        format!("₪{grouped}")
    }
}

/// One-line course summary: name, status, session range, fill and revenue.
#[must_use]
pub fn format_course_line(course: &Course) -> String {
    let schedule = match (course.start_date, calendar::last_session_date(course)) {
        (Some(start), Some(end)) if start != end => {
            format!("{} → {}", start.format("%d/%m/%Y"), end.format("%d/%m/%Y"))
        }
        (Some(start), _) => start.format("%d/%m/%Y").to_string(),
        (None, _) => "no start date".to_string(),
    };
    format!(
        "**{}** ({}) | {} | {}/{} students ({:.0}%) | {}",
        course.name,
        course.status,
        schedule,
        course.registrants,
        course.max_capacity,
        course.fill_percent(),
        format_amount(course.revenue)
    )
}
