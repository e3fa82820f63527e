//! Financial record Discord commands - listing, manual edits and course sync.
//!
//! `/finance_set` replaces a month's record outright. `/finance_sync` only
//! rewrites revenue from the courses and leaves hand-entered profit alone.

use crate::{core::report, errors::Result, models::FinancialRecord};
use std::fmt::Write;

fn format_records(records: &[FinancialRecord]) -> Result<String> {
    if records.is_empty() {
        return Ok(
            "💰 No financial records yet. Add one with `/finance_set` or run `/finance_sync`."
                .to_string(),
        );
    }

    let mut out = String::from("💰 **Monthly results**\n");
    for record in records {
        write!(
            out,
            "\n**{}** - revenue {} | profit {}",
            record.name,
            report::format_amount(record.revenue),
            report::format_amount(record.profit)
        )?;
    }
    let revenue: i64 = records.iter().map(|r| r.revenue).sum();
    let profit: i64 = records.iter().map(|r| r.profit).sum();
    write!(
        out,
        "\n\n**Total** - revenue {} | profit {}",
        report::format_amount(revenue),
        report::format_amount(profit)
    )?;
    Ok(out)
}

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::format_records;
    use crate::{
        bot::{BotData, say_long},
        core::{finance, report},
        errors::{Error, Result},
        models::FinancialRecord,
    };

    /// Shows every monthly financial record.
    #[poise::command(slash_command, prefix_command)]
    pub async fn finance(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let text = {
            let dashboard = ctx.data().dashboard.lock().await;
            format_records(dashboard.financial_data())?
        };

        say_long(ctx, &text).await?;
        Ok(())
    }

    /// Sets a month's revenue and profit, replacing any existing record.
    #[poise::command(slash_command, prefix_command)]
    pub async fn finance_set(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Month label, e.g. יולי"] month: String,
        #[description = "Revenue in shekels"] revenue: i64,
        #[description = "Profit in shekels"] profit: i64,
    ) -> Result<()> {
        let name = month.trim().to_string();
        if name.is_empty() {
            return Err(Error::validation("Month label cannot be empty"));
        }

        ctx.data()
            .dashboard
            .lock()
            .await
            .update_financial_record(FinancialRecord {
                name: name.clone(),
                revenue,
                profit,
            });

        ctx.say(format!(
            "✅ **{name}**: revenue {} | profit {}",
            report::format_amount(revenue),
            report::format_amount(profit)
        ))
        .await?;
        Ok(())
    }

    /// Recomputes monthly revenue from course start dates.
    #[poise::command(slash_command, prefix_command)]
    pub async fn finance_sync(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let result = ctx
            .data()
            .dashboard
            .lock()
            .await
            .sync_financials_with_courses();

        let summary = finance::format_reconcile_summary(&result)?;
        ctx.say(format!("🔄 **Financial Sync**\n```\n{summary}\n```"))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
