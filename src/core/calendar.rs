//! Calendar resolution - which courses meet and which tasks fall on a date.
//!
//! A course meets once a week on the weekday of its start date, for
//! `duration_weeks` sessions in total. Everything here is a pure function of
//! its inputs and is recomputed for every calendar cell; there is no cache.

use crate::models::{Course, Task};
use chrono::{Datelike, Duration, NaiveDate};

/// A scheduled occurrence of a course on a given date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    /// 1-based session number
    pub number: u32,
    /// True for the session on the course's start date
    pub first: bool,
}

/// Resolves the session of `course` on `date`, if there is one.
///
/// Courses without a start date are never scheduled. The last session falls
/// `(sessions - 1)` weeks after the start.
#[must_use]
pub fn session_on(course: &Course, date: NaiveDate) -> Option<Session> {
    let start = course.start_date?;
    if date < start {
        return None;
    }

    let offset_days = (date - start).num_days();
    let last_offset = i64::from(course.session_count() - 1) * 7;
    if offset_days > last_offset || offset_days % 7 != 0 {
        return None;
    }

    Some(Session {
        number: u32::try_from(offset_days / 7 + 1).ok()?,
        first: offset_days == 0,
    })
}

/// True when `course` has a session on `date`.
#[must_use]
pub fn has_session(course: &Course, date: NaiveDate) -> bool {
    session_on(course, date).is_some()
}

/// Date of the final session, or `None` for an unscheduled course.
#[must_use]
pub fn last_session_date(course: &Course) -> Option<NaiveDate> {
    let start = course.start_date?;
    start.checked_add_signed(Duration::weeks(i64::from(course.session_count() - 1)))
}

/// Courses meeting on `date`, in collection order.
#[must_use]
pub fn sessions_on(courses: &[Course], date: NaiveDate) -> Vec<(&Course, Session)> {
    courses
        .iter()
        .filter_map(|course| session_on(course, date).map(|session| (course, session)))
        .collect()
}

/// Tasks shown on `date`: by due date, or by assigned date when no due date is set.
#[must_use]
pub fn tasks_on(tasks: &[Task], date: NaiveDate) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| task.due_date.or(task.assigned_date) == Some(date))
        .collect()
}

/// Every date of the given month; empty for an invalid month.
#[must_use]
pub fn month_days(year: i32, month: u32) -> Vec<NaiveDate> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    first
        .iter_days()
        .take_while(|day| day.month() == month)
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::models::{Priority, TaskStatus};
    use crate::test_utils::course_fixture;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_four_week_course_meets_weekly() {
        let course = course_fixture("c1", "Mondays", Some(date(2025, 1, 6)), 4, 0);

        for day in [6, 13, 20, 27] {
            assert!(has_session(&course, date(2025, 1, day)), "expected session on Jan {day}");
        }
        assert!(!has_session(&course, date(2025, 1, 7)));
        assert!(!has_session(&course, date(2025, 2, 3)));
        assert!(!has_session(&course, date(2025, 1, 5)));
    }

    #[test]
    fn test_first_session_is_flagged() {
        let course = course_fixture("c1", "Mondays", Some(date(2025, 1, 6)), 4, 0);

        assert_eq!(
            session_on(&course, date(2025, 1, 6)),
            Some(Session {
                number: 1,
                first: true
            })
        );
        assert_eq!(
            session_on(&course, date(2025, 1, 27)),
            Some(Session {
                number: 4,
                first: false
            })
        );
    }

    #[test]
    fn test_zero_duration_means_single_session() {
        let course = course_fixture("c1", "One-off", Some(date(2025, 3, 2)), 0, 0);

        assert!(has_session(&course, date(2025, 3, 2)));
        assert!(!has_session(&course, date(2025, 3, 9)));
        assert_eq!(last_session_date(&course), Some(date(2025, 3, 2)));
    }

    #[test]
    fn test_course_without_start_is_never_scheduled() {
        let course = course_fixture("c1", "Someday", None, 4, 0);
        assert!(!has_session(&course, date(2025, 1, 6)));
        assert_eq!(last_session_date(&course), None);
    }

    #[test]
    fn test_schedule_crosses_year_boundary() {
        let course = course_fixture("c1", "Winter", Some(date(2025, 12, 22)), 3, 0);

        assert!(has_session(&course, date(2025, 12, 29)));
        assert!(has_session(&course, date(2026, 1, 5)));
        assert!(!has_session(&course, date(2026, 1, 12)));
    }

    #[test]
    fn test_resolver_matches_closed_form_over_a_range() {
        let start = date(2025, 2, 10);
        let course = course_fixture("c1", "Range", Some(start), 5, 0);

        for offset in -10..60 {
            let day = start + Duration::days(offset);
            let expected = (0..=28).contains(&offset) && offset % 7 == 0;
            assert_eq!(has_session(&course, day), expected, "offset {offset}");
        }
    }

    #[test]
    fn test_sessions_on_filters_collection() {
        let courses = vec![
            course_fixture("a", "A", Some(date(2025, 1, 6)), 4, 0),
            course_fixture("b", "B", Some(date(2025, 1, 7)), 4, 0),
            course_fixture("c", "C", Some(date(2024, 12, 30)), 2, 0),
        ];

        let hits = sessions_on(&courses, date(2025, 1, 6));
        let ids: Vec<&str> = hits.iter().map(|(c, _)| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert!(hits[0].1.first);
        assert!(!hits[1].1.first);
    }

    #[test]
    fn test_tasks_on_prefers_due_date() {
        let make = |id: &str, due: Option<NaiveDate>, assigned: Option<NaiveDate>| Task {
            id: id.to_string(),
            description: id.to_string(),
            assignee_id: "faina".to_string(),
            status: TaskStatus::Pending,
            priority: Priority::Medium,
            due_date: due,
            assigned_date: assigned,
        };
        let tasks = vec![
            make("due", Some(date(2025, 7, 10)), Some(date(2025, 7, 1))),
            make("assigned", None, Some(date(2025, 7, 10))),
            make("assigned-elsewhere", Some(date(2025, 7, 11)), Some(date(2025, 7, 10))),
            make("undated", None, None),
        ];

        let ids: Vec<&str> = tasks_on(&tasks, date(2025, 7, 10))
            .into_iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["due", "assigned"]);
    }

    #[test]
    fn test_month_days() {
        assert_eq!(month_days(2025, 2).len(), 28);
        assert_eq!(month_days(2024, 2).len(), 29);
        assert_eq!(month_days(2025, 12).last(), Some(&date(2025, 12, 31)));
        assert!(month_days(2025, 13).is_empty());
    }
}
