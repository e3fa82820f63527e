//! Monthly revenue reconciliation.
//!
//! Rebuilds the per-month revenue table from the course collection and merges
//! it into the existing financial records. The merge only ever touches
//! `revenue`: profit figures are maintained by hand and survive every resync.
//! Records for months without courses are left alone. Records are keyed by
//! name, so a snapshot holding the same month twice is collapsed to one record
//! during the pass.
//!
//! Reconciliation runs only when asked to. Re-running it after a manual
//! revenue edit overwrites that edit with the course totals again.

use crate::{
    errors::Result,
    models::{Course, FinancialRecord},
};
use chrono::{Datelike, NaiveDate};

const MONTH_NAMES: [&str; 12] = [
    "ינואר",
    "פברואר",
    "מרץ",
    "אפריל",
    "מאי",
    "יוני",
    "יולי",
    "אוגוסט",
    "ספטמבר",
    "אוקטובר",
    "נובמבר",
    "דצמבר",
];

/// Outcome of a reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileResult {
    /// Existing records whose revenue was replaced, as (label, old, new)
    pub updated: Vec<(String, i64, i64)>,
    /// Labels of records created by this pass
    pub created: Vec<String>,
    /// Labels that appeared more than once and were merged into one record
    pub collapsed: Vec<String>,
}

impl ReconcileResult {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.updated.is_empty() && self.created.is_empty() && self.collapsed.is_empty()
    }
}

/// Month label a course starting on `date` is booked under.
///
/// Plain month names repeat every year. November and December 2025 carry the
/// year in their label so they do not merge into older records of the same
/// name. This is a fixed special case for those two months, not a rule for
/// other years.
#[must_use]
pub fn month_label(date: NaiveDate) -> &'static str {
    match (date.year(), date.month()) {
        (2025, 11) => "נובמבר 2025",
        (2025, 12) => "דצמבר 2025",
        _ => MONTH_NAMES[date.month0() as usize],
    }
}

/// Total course revenue per month label, in order of first appearance.
///
/// Courses without a start date cannot be placed in a month and are skipped.
#[must_use]
pub fn revenue_by_month(courses: &[Course]) -> Vec<(&'static str, i64)> {
    let mut totals: Vec<(&'static str, i64)> = Vec::new();

    for course in courses {
        let Some(start) = course.start_date else {
            continue;
        };
        let label = month_label(start);
        match totals.iter_mut().find(|(name, _)| *name == label) {
            Some((_, total)) => *total += course.revenue,
            None => totals.push((label, course.revenue)),
        }
    }

    totals
}

/// Placeholder profit for a month first seen during reconciliation: 30% of revenue,
/// rounded half up.
#[must_use]
pub const fn estimate_profit(revenue: i64) -> i64 {
    (revenue * 3 + 5).div_euclid(10)
}

/// Collapses records sharing a name into one, returning the collapsed names.
///
/// The merged record keeps the position of the first occurrence and the
/// figures of the last one.
pub fn collapse_duplicates(records: &mut Vec<FinancialRecord>) -> Vec<String> {
    let mut kept: Vec<FinancialRecord> = Vec::with_capacity(records.len());
    let mut collapsed: Vec<String> = Vec::new();

    for record in records.drain(..) {
        match kept.iter_mut().find(|r| r.name == record.name) {
            Some(slot) => {
                if !collapsed.contains(&record.name) {
                    collapsed.push(record.name.clone());
                }
                *slot = record;
            }
            None => kept.push(record),
        }
    }

    *records = kept;
    collapsed
}

/// Merges course revenue into `records`.
///
/// Duplicate names are collapsed first. A record whose name matches a computed
/// label gets its revenue replaced and keeps everything else. Labels without a
/// record are appended with an estimated profit. Records not matched by any
/// label are untouched.
pub fn reconcile(records: &mut Vec<FinancialRecord>, courses: &[Course]) -> ReconcileResult {
    let mut result = ReconcileResult {
        collapsed: collapse_duplicates(records),
        ..ReconcileResult::default()
    };

    for (label, total) in revenue_by_month(courses) {
        if let Some(record) = records.iter_mut().find(|r| r.name == label) {
            if record.revenue != total {
                result
                    .updated
                    .push((label.to_string(), record.revenue, total));
            }
            record.revenue = total;
        } else {
            records.push(FinancialRecord {
                name: label.to_string(),
                revenue: total,
                profit: estimate_profit(total),
            });
            result.created.push(label.to_string());
        }
    }

    result
}

/// Formats a reconciliation result into a human-readable summary.
pub fn format_reconcile_summary(result: &ReconcileResult) -> Result<String> {
    use std::fmt::Write;

    if result.is_empty() {
        return Ok("Financial records already match course revenue.".to_string());
    }

    let mut summary = format!(
        "Financial sync - {} updated, {} created\n",
        result.updated.len(),
        result.created.len()
    );

    for (label, old, new) in &result.updated {
        writeln!(summary, "  {label}: ₪{old} → ₪{new}")?;
    }
    for label in &result.created {
        writeln!(summary, "  {label}: new record")?;
    }
    for label in &result.collapsed {
        writeln!(summary, "  {label}: duplicate records merged")?;
    }

    Ok(summary)
}
