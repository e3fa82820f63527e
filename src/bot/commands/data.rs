//! Persistence Discord commands - explicit save and JSON backup export.
//!
//! Nothing is written to storage until `/save` runs. A failed save leaves the
//! in-memory state untouched so it can be retried.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::backup,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use tracing::error;

    /// Saves every collection to storage.
    #[poise::command(slash_command, prefix_command)]
    pub async fn save(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.defer().await?;

        let outcome = {
            let dashboard = ctx.data().dashboard.lock().await;
            dashboard.save_all(ctx.data().storage.as_ref()).await
        };

        match outcome {
            Ok(()) => {
                ctx.say("💾 All changes saved.").await?;
            }
            Err(e) => {
                error!("Save failed: {e}");
                ctx.say(format!(
                    "❌ Save failed, nothing after the failing collection was written: {e}"
                ))
                .await?;
            }
        }
        Ok(())
    }

    /// Exports a JSON backup of every collection.
    #[poise::command(slash_command, prefix_command)]
    pub async fn backup(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.defer().await?;

        let file = {
            let dashboard = ctx.data().dashboard.lock().await;
            backup::render_backup(&dashboard, chrono::Utc::now())?
        };
        let path = backup::write_backup(&ctx.data().settings.backup.directory, &file)?;

        let attachment =
            serenity::CreateAttachment::bytes(file.contents.into_bytes(), file.file_name);
        ctx.send(
            poise::CreateReply::default()
                .content(format!("📦 Backup written to `{}`.", path.display()))
                .attachment(attachment),
        )
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
