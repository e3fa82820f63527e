//! General Discord commands - ping, help, the overview and the advisor.
//! These commands either touch no state or only read it.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, say_long},
        core::{advisor, report},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**Course Desk Help**\n\
        Changes are kept in memory until you run `/save`.\n\n\
        **Courses**\n\
        • `/courses [status] [newest_first]` - Lists courses by start date.\n\
        • `/course_add <name> ...` - Creates a course.\n\
        • `/course_edit <course> ...` - Corrects name, owner, revenue, seats, dates.\n\
        • `/course_status <course> <status>` - Moves a course to another stage.\n\
        • `/course_delete <course>` - Deletes a course (tasks and finances stay).\n\
        • `/students <course>` - Shows the roster with contact links.\n\
        • `/student_find <name>` - Finds a student in any course.\n\
        • `/student_add`, `/student_remove`, `/student_column_add` - Manage the roster.\n\n\
        **Team**\n\
        • `/tasks [member] [priority] [date]` - Lists tasks, pending first.\n\
        • `/task_add`, `/task_edit`, `/task_toggle`, `/task_delete` - Manage tasks.\n\
        • `/team` - Shows each member's progress.\n\
        • `/member <name>` - Role, focus, KPIs and backup of one member.\n\
        • `/member_contact <member> [phone] [email]` - Updates contact details.\n\n\
        **Calendar & Money**\n\
        • `/day [date]` - Sessions and tasks on a day.\n\
        • `/month [year] [month]` - Session days in a month.\n\
        • `/finance`, `/finance_set`, `/finance_sync` - Monthly records.\n\
        • `/links`, `/link_add`, `/link_delete` - Payment links.\n\n\
        **Utility**\n\
        • `/overview` - Headline figures.\n\
        • `/ask <question>` - Asks the strategy advisor.\n\
        • `/save` - Persists everything.\n\
        • `/backup` - Exports a JSON backup file.";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Shows the headline figures of the dashboard.
    #[poise::command(slash_command, prefix_command)]
    pub async fn overview(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let summary = {
            let dashboard = ctx.data().dashboard.lock().await;
            report::generate_summary(&dashboard)
        };

        let latest = summary.latest_month.as_deref().map_or_else(
            || "No financial records yet".to_string(),
            |month| format!("{month}: {}", report::format_amount(summary.latest_revenue)),
        );

        let embed = serenity::CreateEmbed::default()
            .title("📊 Overview")
            .color(0x0034_98DB)
            .field(
                "Courses",
                format!(
                    "{} total, {} active",
                    summary.course_count, summary.active_courses
                ),
                true,
            )
            .field("Students", summary.total_students.to_string(), true)
            .field(
                "Course revenue",
                report::format_amount(summary.course_revenue),
                true,
            )
            .field("Latest month", latest, false)
            .field(
                "Seats filled",
                report::format_progress_bar(summary.fill_percent, Some(10)),
                false,
            );

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Asks the strategy advisor a free-text question.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ask(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Your question"]
        #[rest]
        question: String,
    ) -> Result<()> {
        ctx.defer().await?;

        let answer = advisor::ask_advisor(ctx.data().advisor.as_deref(), &question).await;
        say_long(ctx, &answer).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
