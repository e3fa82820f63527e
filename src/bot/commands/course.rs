//! Course Discord commands - listing, creation, status changes and rosters.
//!
//! Courses are picked through autocomplete, which submits the course id. A
//! typed name is accepted too when exactly one course carries it.

use crate::{
    core::{outreach, report},
    errors::{Error, Result},
    models::Course,
};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Courses by start date, oldest first unless `newest_first`. Undated
/// courses go last either way, in their stored order.
fn sort_by_start(courses: &[Course], newest_first: bool) -> Vec<&Course> {
    let mut sorted: Vec<&Course> = courses.iter().collect();
    sorted.sort_by(|a, b| match (a.start_date, b.start_date) {
        (Some(x), Some(y)) if newest_first => y.cmp(&x),
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    sorted
}

/// Parses `Column=value` pairs separated by `;`.
fn parse_custom_fields(raw: &str) -> Result<BTreeMap<String, String>> {
    raw.split(';')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (column, value) = pair.split_once('=').ok_or_else(|| {
                Error::validation(format!("'{pair}' should look like Column=value"))
            })?;
            Ok((column.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Splits a comma separated column list, dropping blanks.
fn parse_columns(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

/// Roster text for a course: one block per student plus broadcast helpers.
fn format_roster(course: &Course) -> Result<String> {
    let mut out = format!(
        "👥 **{}** - {}/{} students\n",
        course.name, course.registrants, course.max_capacity
    );

    if course.students.is_empty() {
        out.push_str("No students enrolled yet.");
        return Ok(out);
    }

    for student in &course.students {
        write!(
            out,
            "\n• **{}** | paid {}",
            student.name,
            report::format_amount(student.amount_paid)
        )?;
        if !student.phone.is_empty() {
            write!(out, " | {}", student.phone)?;
        }
        for (column, value) in course.custom_fields(student) {
            if !value.is_empty() {
                write!(out, " | {column}: {value}")?;
            }
        }
        if !student.notes.is_empty() {
            write!(out, "\n  _{}_", student.notes)?;
        }
        if let Some(link) = outreach::whatsapp_link(&student.phone, &format!("היי {}", student.name))
        {
            write!(out, "\n  <{link}>")?;
        }
    }

    if let Some(phones) = outreach::broadcast_phone_list(&course.students) {
        write!(out, "\n\n📱 Broadcast list: `{phones}`")?;
    }
    let emails: Vec<&str> = course
        .students
        .iter()
        .filter_map(outreach::student_email)
        .collect();
    if let Some(link) = outreach::gmail_compose_link(&emails) {
        write!(out, "\n✉️ Email everyone: <{link}>")?;
    }

    Ok(out)
}

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::{format_roster, parse_columns, parse_custom_fields, sort_by_start};
    use crate::{
        bot::{BotData, handlers::autocomplete, parse_date_arg, say_long},
        core::{outreach, report, roster, store::Dashboard},
        errors::{Error, Result},
        models::{CourseChanges, CourseDraft, CourseStatus, StudentDraft},
    };
    use std::fmt::Write;

    /// Id and current name of the course `key` refers to.
    fn course_ref(dashboard: &Dashboard, key: &str) -> Result<(String, String)> {
        dashboard
            .resolve_course(key)
            .map(|c| (c.id.clone(), c.name.clone()))
    }

    fn parse_status(raw: &str) -> Result<CourseStatus> {
        raw.parse().map_err(Error::validation)
    }

    /// Lists courses, optionally only those in one status.
    #[poise::command(slash_command, prefix_command)]
    pub async fn courses(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Only show courses in this status"]
        #[autocomplete = "autocomplete::autocomplete_course_status"]
        status: Option<String>,
        #[description = "Latest start date first (default oldest first)"] newest_first: Option<
            bool,
        >,
    ) -> Result<()> {
        let status = status.as_deref().map(parse_status).transpose()?;

        let text = {
            let dashboard = ctx.data().dashboard.lock().await;
            let mut text = String::new();
            for course in sort_by_start(dashboard.courses(), newest_first.unwrap_or(false))
                .into_iter()
                .filter(|c| status.is_none_or(|s| c.status == s))
            {
                writeln!(text, "• {}", report::format_course_line(course))?;
            }
            text
        };

        if text.is_empty() {
            ctx.say("📚 No courses found. Create one with `/course_add`.")
                .await?;
        } else {
            say_long(ctx, &format!("📚 **Courses**\n{text}")).await?;
        }
        Ok(())
    }

    /// Creates a course.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, prefix_command)]
    pub async fn course_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Course name"] name: String,
        #[description = "Start date (YYYY-MM-DD)"] start_date: Option<String>,
        #[description = "Number of weekly sessions (default 4)"] sessions: Option<u32>,
        #[description = "Seats available (default 20)"] max_capacity: Option<u32>,
        #[description = "Expected revenue in shekels"] revenue: Option<i64>,
        #[description = "Owner"]
        #[autocomplete = "autocomplete::autocomplete_member_name"]
        owner: Option<String>,
        #[description = "Stage (default Planning)"]
        #[autocomplete = "autocomplete::autocomplete_course_status"]
        status: Option<String>,
        #[description = "Custom student columns, comma separated"] columns: Option<String>,
    ) -> Result<()> {
        let defaults = CourseDraft::default();
        let draft = CourseDraft {
            name,
            status: status.as_deref().map(parse_status).transpose()?.unwrap_or_default(),
            max_capacity: max_capacity.unwrap_or(defaults.max_capacity),
            revenue: revenue.unwrap_or(defaults.revenue),
            owner: owner.unwrap_or_default(),
            start_date: parse_date_arg(start_date.as_deref())?,
            duration_weeks: sessions.unwrap_or(defaults.duration_weeks),
            student_columns: columns.as_deref().map(parse_columns).unwrap_or_default(),
        };
        let display_name = draft.name.trim().to_string();

        ctx.data().dashboard.lock().await.add_course(draft)?;

        ctx.say(format!("✅ Course **{display_name}** created."))
            .await?;
        Ok(())
    }

    /// Moves a course to another lifecycle stage.
    #[poise::command(slash_command, prefix_command)]
    pub async fn course_status(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Course"]
        #[autocomplete = "autocomplete::autocomplete_course"]
        course: String,
        #[description = "New stage"]
        #[autocomplete = "autocomplete::autocomplete_course_status"]
        status: String,
    ) -> Result<()> {
        let status = parse_status(&status)?;
        let name = {
            let mut dashboard = ctx.data().dashboard.lock().await;
            let mut updated = dashboard.resolve_course(&course)?.clone();
            updated.status = status;
            let name = updated.name.clone();
            dashboard.update_course(updated);
            name
        };

        ctx.say(format!("✅ **{name}** is now {status}.")).await?;
        Ok(())
    }

    /// Corrects a course's details. Only the given fields change.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, prefix_command)]
    pub async fn course_edit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Course"]
        #[autocomplete = "autocomplete::autocomplete_course"]
        course: String,
        #[description = "New name"] name: Option<String>,
        #[description = "Owner"]
        #[autocomplete = "autocomplete::autocomplete_member_name"]
        owner: Option<String>,
        #[description = "Revenue in shekels"] revenue: Option<i64>,
        #[description = "Seats available"] max_capacity: Option<u32>,
        #[description = "Start date (YYYY-MM-DD), or 'none' to clear"] start_date: Option<
            String,
        >,
        #[description = "Number of weekly sessions"] sessions: Option<u32>,
    ) -> Result<()> {
        let changes = CourseChanges {
            name,
            owner,
            revenue,
            max_capacity,
            start_date: start_date
                .as_deref()
                .map(|raw| {
                    if raw.trim().eq_ignore_ascii_case("none") {
                        Ok(None)
                    } else {
                        parse_date_arg(Some(raw))
                    }
                })
                .transpose()?,
            duration_weeks: sessions,
        };
        if changes.is_empty() {
            ctx.say("ℹ️ Nothing to change: give at least one field.")
                .await?;
            return Ok(());
        }

        let line = {
            let mut dashboard = ctx.data().dashboard.lock().await;
            let mut updated = dashboard.resolve_course(&course)?.clone();
            changes.apply(&mut updated)?;
            let line = report::format_course_line(&updated);
            dashboard.update_course(updated);
            line
        };

        ctx.say(format!("✏️ Updated {line}")).await?;
        Ok(())
    }

    /// Deletes a course. Its tasks and financial records are kept.
    #[poise::command(slash_command, prefix_command)]
    pub async fn course_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Course"]
        #[autocomplete = "autocomplete::autocomplete_course"]
        course: String,
    ) -> Result<()> {
        let removed = {
            let mut dashboard = ctx.data().dashboard.lock().await;
            let (id, _) = course_ref(&dashboard, &course)?;
            dashboard.delete_course(&id)
        };

        match removed {
            Some(c) => {
                ctx.say(format!(
                    "🗑️ Deleted **{}** ({} students).",
                    c.name,
                    c.students.len()
                ))
                .await?;
            }
            None => {
                ctx.say("❌ Course not found.").await?;
            }
        }
        Ok(())
    }

    /// Shows a course roster with contact links.
    #[poise::command(slash_command, prefix_command)]
    pub async fn students(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Course"]
        #[autocomplete = "autocomplete::autocomplete_course"]
        course: String,
    ) -> Result<()> {
        let text = {
            let dashboard = ctx.data().dashboard.lock().await;
            format_roster(dashboard.resolve_course(&course)?)?
        };

        say_long(ctx, &text).await?;
        Ok(())
    }

    /// Finds students by name across every course.
    #[poise::command(slash_command, prefix_command)]
    pub async fn student_find(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Part of the student's name"] name: String,
    ) -> Result<()> {
        let needle = name.trim().to_lowercase();
        let text = {
            let dashboard = ctx.data().dashboard.lock().await;
            let mut text = String::new();
            for entry in roster::all_students(dashboard.courses())
                .into_iter()
                .filter(|e| e.student.name.to_lowercase().contains(&needle))
            {
                write!(text, "• **{}** - {}", entry.student.name, entry.course.name)?;
                if let Some(email) = outreach::student_email(entry.student) {
                    write!(text, " | {email}")?;
                }
                if !entry.student.phone.is_empty() {
                    write!(text, " | {}", entry.student.phone)?;
                }
                text.push('\n');
            }
            text
        };

        if text.is_empty() {
            ctx.say(format!("🔍 No student matching '{}'.", name.trim()))
                .await?;
        } else {
            say_long(ctx, &format!("🔍 **Students**\n{text}")).await?;
        }
        Ok(())
    }

    /// Enrolls a student in a course.
    #[poise::command(slash_command, prefix_command)]
    pub async fn student_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Course"]
        #[autocomplete = "autocomplete::autocomplete_course"]
        course: String,
        #[description = "Student name"] name: String,
        #[description = "Phone number"] phone: Option<String>,
        #[description = "Amount paid in shekels"] amount_paid: Option<i64>,
        #[description = "Notes"] notes: Option<String>,
        #[description = "Custom fields as Column=value; Column=value"] fields: Option<String>,
    ) -> Result<()> {
        let draft = StudentDraft {
            name,
            phone: phone.unwrap_or_default(),
            amount_paid: amount_paid.unwrap_or(0),
            notes: notes.unwrap_or_default(),
            custom_data: fields
                .as_deref()
                .map(parse_custom_fields)
                .transpose()?
                .unwrap_or_default(),
        };

        let message = {
            let mut dashboard = ctx.data().dashboard.lock().await;
            let (id, course_name) = course_ref(&dashboard, &course)?;
            let student_name = dashboard.add_student(&id, draft)?.name.clone();
            let registrants = dashboard.course(&id).map_or(0, |c| c.registrants);
            format!("✅ **{student_name}** enrolled in **{course_name}** ({registrants} students).")
        };

        ctx.say(message).await?;
        Ok(())
    }

    /// Removes a student from a course.
    #[poise::command(slash_command, prefix_command)]
    pub async fn student_remove(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Course"]
        #[autocomplete = "autocomplete::autocomplete_course"]
        course: String,
        #[description = "Student name"] student: String,
    ) -> Result<()> {
        let message = {
            let mut dashboard = ctx.data().dashboard.lock().await;
            let (id, course_name) = course_ref(&dashboard, &course)?;
            let student_id = dashboard
                .course(&id)
                .and_then(|c| c.students.iter().find(|s| s.name == student.trim()))
                .map(|s| s.id.clone())
                .ok_or_else(|| Error::StudentNotFound {
                    id: student.clone(),
                })?;
            let removed = dashboard.remove_student(&id, &student_id)?;
            let registrants = dashboard.course(&id).map_or(0, |c| c.registrants);
            format!(
                "🗑️ Removed **{}** from **{course_name}** ({registrants} students).",
                removed.name
            )
        };

        ctx.say(message).await?;
        Ok(())
    }

    /// Adds a custom student column to a course.
    #[poise::command(slash_command, prefix_command)]
    pub async fn student_column_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Course"]
        #[autocomplete = "autocomplete::autocomplete_course"]
        course: String,
        #[description = "Column name"] column: String,
    ) -> Result<()> {
        let course_name = {
            let mut dashboard = ctx.data().dashboard.lock().await;
            let (id, course_name) = course_ref(&dashboard, &course)?;
            dashboard.add_student_column(&id, &column)?;
            course_name
        };

        ctx.say(format!(
            "✅ Column **{}** added to **{course_name}**.",
            column.trim()
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{course_fixture, student_fixture};

    #[test]
    fn test_parse_custom_fields() {
        let fields = parse_custom_fields("Email = dana@example.com; City=Haifa;").unwrap();
        assert_eq!(fields.get("Email").map(String::as_str), Some("dana@example.com"));
        assert_eq!(fields.get("City").map(String::as_str), Some("Haifa"));

        assert!(matches!(
            parse_custom_fields("no separator"),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_parse_columns() {
        assert_eq!(
            parse_columns("Email, City ,,"),
            vec!["Email".to_string(), "City".to_string()]
        );
    }

    #[test]
    fn test_format_roster_lists_students_and_links() {
        let mut course = course_fixture("c1", "Prompting", None, 4, 0);
        course.student_columns = vec!["Email".to_string()];
        let mut dana = student_fixture("s1", "Dana");
        dana.phone = "050-1234567".to_string();
        dana.amount_paid = 1_200;
        dana
            .custom_data
            .insert("Email".to_string(), "dana@example.com".to_string());
        course.students.push(dana);
        course.recount_registrants();

        let roster = format_roster(&course).unwrap();

        assert!(roster.contains("**Prompting** - 1/20 students"));
        assert!(roster.contains("**Dana** | paid ₪1,200 | 050-1234567 | Email: dana@example.com"));
        assert!(roster.contains("https://wa.me/972501234567?text="));
        assert!(roster.contains("Broadcast list: `972501234567`"));
        assert!(roster.contains("mail.google.com"));
    }

    #[test]
    fn test_format_roster_empty_course() {
        let course = course_fixture("c1", "Prompting", None, 4, 0);
        assert!(format_roster(&course).unwrap().ends_with("No students enrolled yet."));
    }

    #[test]
    fn test_sort_by_start_puts_undated_last() {
        let courses = vec![
            course_fixture("late", "Late", chrono::NaiveDate::from_ymd_opt(2025, 9, 1), 4, 0),
            course_fixture("open", "Open", None, 4, 0),
            course_fixture("early", "Early", chrono::NaiveDate::from_ymd_opt(2025, 3, 2), 4, 0),
        ];

        let ids = |sorted: Vec<&Course>| -> Vec<String> {
            sorted.into_iter().map(|c| c.id.clone()).collect()
        };
        assert_eq!(ids(sort_by_start(&courses, false)), ["early", "late", "open"]);
        assert_eq!(ids(sort_by_start(&courses, true)), ["late", "early", "open"]);
    }
}
