//! Calendar Discord commands - a single day in detail, or a month at a glance.
//!
//! Sessions are resolved on every call from each course's start date and
//! session count; nothing about the calendar is stored.

use crate::{
    core::calendar,
    errors::Result,
    models::{Course, Task},
};
use chrono::{Datelike, NaiveDate};
use std::fmt::Write;

/// Sessions and tasks falling on `date`.
fn format_day(courses: &[Course], tasks: &[Task], date: NaiveDate) -> Result<String> {
    let mut out = format!("📅 **{}**\n", date.format("%A %d/%m/%Y"));

    let sessions = calendar::sessions_on(courses, date);
    if sessions.is_empty() {
        out.push_str("\nNo sessions.");
    }
    for (course, session) in sessions {
        let marker = if session.first { " 🚀 first session" } else { "" };
        write!(
            out,
            "\n🎓 {} - session {}/{}{marker}",
            course.name,
            session.number,
            course.session_count()
        )?;
    }

    let due = calendar::tasks_on(tasks, date);
    if !due.is_empty() {
        out.push('\n');
    }
    for task in due {
        write!(out, "\n📌 {} [{}, {}]", task.description, task.priority, task.status)?;
    }
    Ok(out)
}

/// Days of the month that have at least one session, with the courses meeting.
/// `None` when `month` is not a month number.
fn format_month(courses: &[Course], year: i32, month: u32) -> Result<Option<String>> {
    let days = calendar::month_days(year, month);
    let Some(first) = days.first() else {
        return Ok(None);
    };
    let mut out = format!("🗓️ **{}**\n", first.format("%B %Y"));

    let mut any = false;
    for day in &days {
        let names: Vec<&str> = calendar::sessions_on(courses, *day)
            .into_iter()
            .map(|(course, _)| course.name.as_str())
            .collect();
        if names.is_empty() {
            continue;
        }
        any = true;
        write!(out, "\n`{:>2}` {}", day.day(), names.join(", "))?;
    }
    if !any {
        out.push_str("\nNo sessions this month.");
    }
    Ok(Some(out))
}

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::{format_day, format_month};
    use crate::{
        bot::{BotData, parse_date_arg, say_long},
        errors::{Error, Result},
    };
    use chrono::Datelike;

    /// Shows the sessions and tasks on a day (today by default).
    #[poise::command(slash_command, prefix_command)]
    pub async fn day(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Date (YYYY-MM-DD), default today"] date: Option<String>,
    ) -> Result<()> {
        let date =
            parse_date_arg(date.as_deref())?.unwrap_or_else(|| chrono::Local::now().date_naive());

        let text = {
            let dashboard = ctx.data().dashboard.lock().await;
            format_day(dashboard.courses(), dashboard.tasks(), date)?
        };

        say_long(ctx, &text).await?;
        Ok(())
    }

    /// Shows which days of a month have sessions (current month by default).
    #[poise::command(slash_command, prefix_command)]
    pub async fn month(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Year, default this year"] year: Option<i32>,
        #[description = "Month number 1-12, default this month"] month: Option<u32>,
    ) -> Result<()> {
        let today = chrono::Local::now().date_naive();
        let (year, month) = (
            year.unwrap_or_else(|| today.year()),
            month.unwrap_or_else(|| today.month()),
        );

        let text = {
            let dashboard = ctx.data().dashboard.lock().await;
            format_month(dashboard.courses(), year, month)?
        }
        .ok_or_else(|| Error::validation(format!("{month} is not a month number (1-12)")))?;

        say_long(ctx, &text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::models::{Priority, TaskStatus};
    use crate::test_utils::{course_fixture, task_fixture};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_day_lists_sessions_and_tasks() -> Result<()> {
        let courses = vec![course_fixture("c1", "Prompting", Some(date(2025, 1, 6)), 4, 0)];
        let mut task = task_fixture("t1", "faina", TaskStatus::Pending, Priority::High);
        task.due_date = Some(date(2025, 1, 13));

        let first = format_day(&courses, std::slice::from_ref(&task), date(2025, 1, 6))?;
        assert!(first.contains("Prompting - session 1/4 🚀 first session"));
        assert!(!first.contains("📌"));

        let second = format_day(&courses, std::slice::from_ref(&task), date(2025, 1, 13))?;
        assert!(second.contains("Prompting - session 2/4"));
        assert!(!second.contains("first session"));
        assert!(second.contains("📌 Task t1 [High, Pending]"));

        let off = format_day(&courses, &[], date(2025, 1, 7))?;
        assert!(off.contains("No sessions."));
        Ok(())
    }

    #[test]
    fn test_format_month_marks_session_days() -> Result<()> {
        let courses = vec![course_fixture("c1", "Prompting", Some(date(2025, 1, 6)), 4, 0)];

        let january = format_month(&courses, 2025, 1)?.unwrap();
        for day in [6, 13, 20, 27] {
            assert!(january.contains(&format!("`{day:>2}` Prompting")));
        }
        assert_eq!(january.matches("Prompting").count(), 4);

        let february = format_month(&courses, 2025, 2)?.unwrap();
        assert!(february.contains("No sessions this month."));

        assert!(format_month(&courses, 2025, 13)?.is_none());
        Ok(())
    }
}
