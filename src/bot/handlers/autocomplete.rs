//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggestions come straight from the in-memory dashboard, so they always
//! reflect unsaved changes. Courses, tasks and payment links are offered by
//! name but submitted by id, since only ids are unique.

use crate::{
    bot::BotData,
    core::tasks::{TaskFilter, sorted_for_display},
    errors::Error,
    models::CourseStatus,
};
use poise::serenity_prelude::AutocompleteChoice;
use std::collections::HashMap;
use tracing::trace;

/// Discord caps autocomplete results at 25 entries.
const MAX_CHOICES: usize = 25;

fn matching<I>(names: I, partial: &str) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let partial_lower = partial.to_lowercase();
    let mut matching: Vec<String> = names
        .into_iter()
        .filter(|name| name.to_lowercase().contains(&partial_lower))
        .take(MAX_CHOICES)
        .collect();
    matching.sort();
    matching
}

/// Filters `(label, id)` pairs on the label, keeping their order.
///
/// A label shared by several entries gets its id appended so the entries can
/// be told apart in the picker.
fn labelled_choices<'a, I>(entries: I, partial: &str) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let partial_lower = partial.to_lowercase();
    let entries: Vec<(&str, &str)> = entries
        .into_iter()
        .filter(|(label, _)| label.to_lowercase().contains(&partial_lower))
        .take(MAX_CHOICES)
        .collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for (label, _) in &entries {
        *counts.entry(*label).or_default() += 1;
    }

    entries
        .into_iter()
        .map(|(label, id)| {
            let shown = if counts.get(label).copied().unwrap_or(0) > 1 {
                format!("{label} ({id})")
            } else {
                label.to_string()
            };
            (shown, id.to_string())
        })
        .collect()
}

fn to_choices(pairs: Vec<(String, String)>) -> Vec<AutocompleteChoice> {
    trace!(choices = pairs.len(), "Returning autocomplete choices");
    pairs
        .into_iter()
        .map(|(label, id)| AutocompleteChoice::new(label, id))
        .collect()
}

/// Suggests courses by name; the submitted value is the course id.
pub async fn autocomplete_course(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<AutocompleteChoice> {
    let dashboard = ctx.data().dashboard.lock().await;
    to_choices(labelled_choices(
        dashboard
            .courses()
            .iter()
            .map(|c| (c.name.as_str(), c.id.as_str())),
        partial,
    ))
}

/// Provides autocomplete suggestions for team member names.
pub async fn autocomplete_member_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let dashboard = ctx.data().dashboard.lock().await;
    matching(
        dashboard.team_members().iter().map(|m| m.name.clone()),
        partial,
    )
}

/// Suggests tasks by description, pending tasks first; the value is the task id.
pub async fn autocomplete_task(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<AutocompleteChoice> {
    let dashboard = ctx.data().dashboard.lock().await;
    to_choices(labelled_choices(
        sorted_for_display(dashboard.tasks(), &TaskFilter::default())
            .into_iter()
            .map(|t| (t.description.as_str(), t.id.as_str())),
        partial,
    ))
}

/// Suggests payment links by title; the value is the link id.
pub async fn autocomplete_link(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<AutocompleteChoice> {
    let dashboard = ctx.data().dashboard.lock().await;
    to_choices(labelled_choices(
        dashboard
            .payment_links()
            .iter()
            .map(|l| (l.title.as_str(), l.id.as_str())),
        partial,
    ))
}

/// Provides autocomplete suggestions for course statuses.
pub async fn autocomplete_course_status(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    CourseStatus::ALL
        .iter()
        .map(|status| status.as_str())
        .filter(|name| name.to_lowercase().contains(&partial_lower))
        .map(str::to_string)
        .collect()
}

/// Provides autocomplete suggestions for task priorities.
pub async fn autocomplete_priority(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    ["High", "Medium", "Low"]
        .iter()
        .filter(|name| name.to_lowercase().contains(&partial_lower))
        .map(|&name| name.to_string())
        .collect()
}
