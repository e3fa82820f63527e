//! Outbound hand-off links - WhatsApp chats and Gmail compose windows.
//!
//! These only build URLs; opening them is up to whoever shows the link.
//! Phone numbers are normalised to the international Israeli form that
//! `wa.me` expects.

use crate::models::{Priority, Student, Task, TeamMember};

const WHATSAPP_BASE: &str = "https://wa.me/";
const GMAIL_COMPOSE: &str = "https://mail.google.com/mail/?view=cm&fs=1&to=";
const COUNTRY_PREFIX: &str = "972";

/// Digits of `phone` with a leading trunk `0` replaced by the country code.
///
/// Returns `None` when the number has no digits at all.
#[must_use]
pub fn normalize_phone(phone: &str) -> Option<String> {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    Some(match digits.strip_prefix('0') {
        Some(rest) => format!("{COUNTRY_PREFIX}{rest}"),
        None => digits,
    })
}

/// Chat link to `phone` with `message` pre-filled.
#[must_use]
pub fn whatsapp_link(phone: &str, message: &str) -> Option<String> {
    let number = normalize_phone(phone)?;
    Some(format!(
        "{WHATSAPP_BASE}{number}?text={}",
        urlencoding::encode(message)
    ))
}

/// Gmail compose link addressed to all `emails`; `None` if the list is empty.
#[must_use]
pub fn gmail_compose_link<S: AsRef<str>>(emails: &[S]) -> Option<String> {
    if emails.is_empty() {
        return None;
    }
    let recipients = emails
        .iter()
        .map(|email| email.as_ref().trim())
        .collect::<Vec<&str>>()
        .join(",");
    Some(format!("{GMAIL_COMPOSE}{}", urlencoding::encode(&recipients)))
}

/// The student's email, taken from the first custom column that looks like one.
#[must_use]
pub fn student_email(student: &Student) -> Option<&str> {
    student
        .custom_data
        .iter()
        .find(|(column, _)| column.to_lowercase().contains("mail") || column.contains("מייל"))
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

/// Normalised phone numbers of every student that has one, comma separated.
#[must_use]
pub fn broadcast_phone_list<'a, I>(students: I) -> Option<String>
where
    I: IntoIterator<Item = &'a Student>,
{
    let phones: Vec<String> = students
        .into_iter()
        .filter_map(|s| normalize_phone(&s.phone))
        .collect();
    if phones.is_empty() {
        None
    } else {
        Some(phones.join(","))
    }
}

/// Notification sent to a member when a task is assigned to them.
#[must_use]
pub fn task_assignment_message(member: &TeamMember, task: &Task) -> String {
    let urgency = if task.priority == Priority::High {
        "גבוהה"
    } else {
        "רגילה"
    };
    format!(
        "היי {}, הוקצתה לך משימה חדשה במערכת:\n\"{}\"\nדחיפות: {urgency}",
        member.name, task.description
    )
}

/// Chat link notifying the assignee of a new task, when they have a phone number.
#[must_use]
pub fn task_assignment_link(member: &TeamMember, task: &Task) -> Option<String> {
    let phone = member.phone.as_deref()?;
    whatsapp_link(phone, &task_assignment_message(member, task))
}
