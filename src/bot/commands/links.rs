//! Payment link Discord commands.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete, say_long},
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// Lists the saved payment links.
    #[poise::command(slash_command, prefix_command)]
    pub async fn links(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let text = {
            let dashboard = ctx.data().dashboard.lock().await;
            let mut text = String::new();
            for link in dashboard.payment_links() {
                writeln!(text, "• **{}** <{}>", link.title, link.url)?;
            }
            text
        };

        if text.is_empty() {
            ctx.say("🔗 No payment links yet. Add one with `/link_add`.")
                .await?;
        } else {
            say_long(ctx, &format!("🔗 **Payment links**\n{text}")).await?;
        }
        Ok(())
    }

    /// Saves a payment link.
    #[poise::command(slash_command, prefix_command)]
    pub async fn link_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "What the link is for"] title: String,
        #[description = "Payment page URL"] url: String,
    ) -> Result<()> {
        ctx.data()
            .dashboard
            .lock()
            .await
            .add_payment_link(&title, &url)?;

        ctx.say(format!("✅ Link **{}** saved.", title.trim())).await?;
        Ok(())
    }

    /// Deletes a payment link.
    #[poise::command(slash_command, prefix_command)]
    pub async fn link_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Link"]
        #[autocomplete = "autocomplete::autocomplete_link"]
        link: String,
    ) -> Result<()> {
        let removed = {
            let mut dashboard = ctx.data().dashboard.lock().await;
            let id = dashboard.resolve_payment_link(&link)?.id.clone();
            dashboard.delete_payment_link(&id)
        };

        match removed {
            Some(link) => ctx.say(format!("🗑️ Deleted link **{}**.", link.title)).await?,
            None => ctx.say("❌ Link not found.").await?,
        };
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
