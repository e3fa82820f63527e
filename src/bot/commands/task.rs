//! Task and team Discord commands.
//!
//! Tasks are picked by description through autocomplete, which submits the
//! task id; a typed description is accepted when only one task has it.
//! Creating a task replies with a WhatsApp hand-off link for the assignee when
//! they have a phone number on file.

use crate::{
    core::{report, tasks::MemberProgress},
    errors::Result,
    models::{Task, TaskStatus, TeamMember},
};
use std::fmt::Write;

fn format_task_line(task: &Task, assignee: Option<&TeamMember>) -> Result<String> {
    let check = if task.status == TaskStatus::Done {
        "✅"
    } else {
        "⬜"
    };
    let mut line = format!(
        "{check} **{}** [{}] - {}",
        task.description,
        task.priority,
        assignee.map_or("unassigned", |m| m.name.as_str())
    );
    if let Some(due) = task.due_date {
        write!(line, " | due {}", due.format("%d/%m"))?;
    }
    Ok(line)
}

fn format_member_progress(progress: &MemberProgress<'_>) -> Result<String> {
    let member = progress.member;
    let bar = report::format_progress_bar(f64::from(progress.percent), Some(10));
    let mut block = format!(
        "**{}** ({}) - {}/{} done {bar}",
        member.name, member.role, progress.done, progress.total
    );
    for task in progress.pending.iter().take(3) {
        write!(block, "\n  • {} [{}]", task.description, task.priority)?;
    }
    Ok(block)
}

/// Full card of one member: role, focus, ownership, KPIs, cover and contact.
fn format_member_profile(progress: &MemberProgress<'_>) -> Result<String> {
    let member = progress.member;
    let mut card = format!("🧭 **{}** - {} ({})\n", member.name, member.role_title, member.role);

    if !member.focus.is_empty() {
        write!(card, "\n🎯 **Focus:** {}", member.focus)?;
    }
    if !member.responsibilities.is_empty() {
        card.push_str("\n🛡️ **Owns:**");
        for item in &member.responsibilities {
            write!(card, "\n  • {item}")?;
        }
    }
    if !member.kpis.is_empty() {
        card.push_str("\n📈 **KPIs:**");
        for kpi in &member.kpis {
            write!(card, "\n  • {kpi}")?;
        }
    }
    if !member.backup.is_empty() {
        write!(card, "\n🤝 **Backup:** {}", member.backup)?;
    }

    let contact: Vec<&str> = [member.phone.as_deref(), member.email.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !contact.is_empty() {
        write!(card, "\n📇 {}", contact.join(" | "))?;
    }

    write!(card, "\n\n{}", format_member_progress(progress)?)?;
    Ok(card)
}

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::{format_member_profile, format_member_progress, format_task_line};
    use crate::{
        bot::{BotData, handlers::autocomplete, parse_date_arg, say_long},
        core::{
            outreach,
            store::Dashboard,
            tasks::{self, TaskFilter},
        },
        errors::{Error, Result},
        models::{Priority, TaskChanges, TaskDraft, TaskStatus},
    };
    use std::fmt::Write;

    fn member_id(dashboard: &Dashboard, name: &str) -> Result<String> {
        dashboard
            .team_member_by_name(name)
            .map(|m| m.id.clone())
            .ok_or_else(|| Error::validation(format!("No team member named '{name}'")))
    }

    /// Id and description of the task `key` refers to.
    fn task_ref(dashboard: &Dashboard, key: &str) -> Result<(String, String)> {
        dashboard
            .resolve_task(key)
            .map(|t| (t.id.clone(), t.description.clone()))
    }

    fn parse_priority(raw: &str) -> Result<Priority> {
        raw.parse().map_err(Error::validation)
    }

    /// Lists tasks, pending first and most urgent first.
    #[poise::command(slash_command, prefix_command)]
    pub async fn tasks(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Only tasks of this member"]
        #[autocomplete = "autocomplete::autocomplete_member_name"]
        member: Option<String>,
        #[description = "Only tasks of this priority"]
        #[autocomplete = "autocomplete::autocomplete_priority"]
        priority: Option<String>,
        #[description = "Only tasks assigned or due on this date (YYYY-MM-DD)"] date: Option<
            String,
        >,
    ) -> Result<()> {
        let text = {
            let dashboard = ctx.data().dashboard.lock().await;
            let filter = TaskFilter {
                assignee_id: member
                    .as_deref()
                    .map(|name| member_id(&dashboard, name))
                    .transpose()?,
                priority: priority.as_deref().map(parse_priority).transpose()?,
                date: parse_date_arg(date.as_deref())?,
            };

            let mut text = String::new();
            for task in tasks::sorted_for_display(dashboard.tasks(), &filter) {
                let assignee = dashboard.team_member(&task.assignee_id);
                writeln!(text, "{}", format_task_line(task, assignee)?)?;
            }
            text
        };

        if text.is_empty() {
            ctx.say("📋 No tasks match.").await?;
        } else {
            say_long(ctx, &format!("📋 **Tasks**\n{text}")).await?;
        }
        Ok(())
    }

    /// Creates a task and offers a WhatsApp link to notify the assignee.
    #[poise::command(slash_command, prefix_command)]
    pub async fn task_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "What needs doing"] description: String,
        #[description = "Who does it"]
        #[autocomplete = "autocomplete::autocomplete_member_name"]
        assignee: String,
        #[description = "Priority (default Medium)"]
        #[autocomplete = "autocomplete::autocomplete_priority"]
        priority: Option<String>,
        #[description = "Due date (YYYY-MM-DD)"] due_date: Option<String>,
    ) -> Result<()> {
        let message = {
            let mut dashboard = ctx.data().dashboard.lock().await;
            let draft = TaskDraft {
                description,
                assignee_id: member_id(&dashboard, &assignee)?,
                priority: priority
                    .as_deref()
                    .map(parse_priority)
                    .transpose()?
                    .unwrap_or_default(),
                due_date: parse_date_arg(due_date.as_deref())?,
                assigned_date: None,
            };

            let id = dashboard.add_task(draft)?;
            let mut message = String::new();
            if let Some(task) = dashboard.task(&id) {
                write!(message, "✅ Task **{}** assigned to {assignee}.", task.description)?;
                let link = dashboard
                    .team_member(&task.assignee_id)
                    .and_then(|member| outreach::task_assignment_link(member, task));
                if let Some(link) = link {
                    write!(message, "\n📲 Notify on WhatsApp: <{link}>")?;
                }
            }
            message
        };

        ctx.say(message).await?;
        Ok(())
    }

    /// Marks a task done, or pending again.
    #[poise::command(slash_command, prefix_command)]
    pub async fn task_toggle(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Task"]
        #[autocomplete = "autocomplete::autocomplete_task"]
        task: String,
    ) -> Result<()> {
        let (description, status) = {
            let mut dashboard = ctx.data().dashboard.lock().await;
            let (id, description) = task_ref(&dashboard, &task)?;
            (description, dashboard.toggle_task_status(&id))
        };

        let reply = match status {
            Some(TaskStatus::Done) => format!("✅ **{description}** is done."),
            Some(TaskStatus::Pending) => format!("⬜ **{description}** is pending again."),
            None => format!("❌ Task '{description}' not found."),
        };
        ctx.say(reply).await?;
        Ok(())
    }

    /// Edits a task's description, assignee, priority or due date.
    #[poise::command(slash_command, prefix_command)]
    pub async fn task_edit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Task"]
        #[autocomplete = "autocomplete::autocomplete_task"]
        task: String,
        #[description = "New description"] description: Option<String>,
        #[description = "New assignee"]
        #[autocomplete = "autocomplete::autocomplete_member_name"]
        assignee: Option<String>,
        #[description = "New priority"]
        #[autocomplete = "autocomplete::autocomplete_priority"]
        priority: Option<String>,
        #[description = "Due date (YYYY-MM-DD), or 'none' to clear"] due_date: Option<String>,
    ) -> Result<()> {
        let line = {
            let mut dashboard = ctx.data().dashboard.lock().await;
            let changes = TaskChanges {
                description,
                assignee_id: assignee
                    .as_deref()
                    .map(|name| member_id(&dashboard, name))
                    .transpose()?,
                priority: priority.as_deref().map(parse_priority).transpose()?,
                due_date: due_date
                    .as_deref()
                    .map(|raw| {
                        if raw.trim().eq_ignore_ascii_case("none") {
                            Ok(None)
                        } else {
                            parse_date_arg(Some(raw))
                        }
                    })
                    .transpose()?,
            };
            if changes.is_empty() {
                None
            } else {
                let mut updated = dashboard.resolve_task(&task)?.clone();
                changes.apply(&mut updated)?;
                let line =
                    format_task_line(&updated, dashboard.team_member(&updated.assignee_id))?;
                dashboard.update_task(updated);
                Some(line)
            }
        };

        match line {
            Some(line) => ctx.say(format!("✏️ Updated {line}")).await?,
            None => {
                ctx.say("ℹ️ Nothing to change: give at least one field.")
                    .await?
            }
        };
        Ok(())
    }

    /// Deletes a task.
    #[poise::command(slash_command, prefix_command)]
    pub async fn task_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Task"]
        #[autocomplete = "autocomplete::autocomplete_task"]
        task: String,
    ) -> Result<()> {
        let removed = {
            let mut dashboard = ctx.data().dashboard.lock().await;
            let (id, _) = task_ref(&dashboard, &task)?;
            dashboard.delete_task(&id)
        };

        match removed {
            Some(t) => ctx.say(format!("🗑️ Deleted task **{}**.", t.description)).await?,
            None => ctx.say("❌ Task not found.").await?,
        };
        Ok(())
    }

    /// Shows each team member's task progress.
    #[poise::command(slash_command, prefix_command)]
    pub async fn team(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let text = {
            let dashboard = ctx.data().dashboard.lock().await;
            let mut text = String::from("🧭 **Team**\n");
            for member in dashboard.team_members() {
                let progress = tasks::member_progress(member, dashboard.tasks());
                writeln!(text, "\n{}", format_member_progress(&progress)?)?;
            }
            text
        };

        say_long(ctx, &text).await?;
        Ok(())
    }

    /// Shows one member's role, focus, ownership areas, KPIs and open tasks.
    #[poise::command(slash_command, prefix_command)]
    pub async fn member(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Team member"]
        #[autocomplete = "autocomplete::autocomplete_member_name"]
        name: String,
    ) -> Result<()> {
        let text = {
            let dashboard = ctx.data().dashboard.lock().await;
            let member = dashboard
                .team_member_by_name(name.trim())
                .ok_or_else(|| Error::validation(format!("No team member named '{name}'")))?;
            format_member_profile(&tasks::member_progress(member, dashboard.tasks()))?
        };

        say_long(ctx, &text).await?;
        Ok(())
    }

    /// Updates a team member's phone number or email.
    #[poise::command(slash_command, prefix_command)]
    pub async fn member_contact(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Team member"]
        #[autocomplete = "autocomplete::autocomplete_member_name"]
        member: String,
        #[description = "Phone number"] phone: Option<String>,
        #[description = "Email address"] email: Option<String>,
    ) -> Result<()> {
        if phone.is_none() && email.is_none() {
            ctx.say("ℹ️ Nothing to update: give a phone number or an email.")
                .await?;
            return Ok(());
        }

        {
            let mut dashboard = ctx.data().dashboard.lock().await;
            let mut updated = dashboard
                .team_member_by_name(&member)
                .cloned()
                .ok_or_else(|| Error::validation(format!("No team member named '{member}'")))?;
            if let Some(phone) = phone {
                updated.phone = Some(phone.trim().to_string()).filter(|p| !p.is_empty());
            }
            if let Some(email) = email {
                updated.email = Some(email.trim().to_string()).filter(|e| !e.is_empty());
            }
            dashboard.update_team_member(updated);
        }

        ctx.say(format!("✅ Contact details for **{member}** updated."))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
