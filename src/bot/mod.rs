//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the course desk: slash
//! commands over the dashboard store, autocomplete handlers, and the shared
//! context every command receives.

/// Discord command implementations (courses, tasks, calendar, finance, links, data)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    config::settings::Settings,
    core::{advisor::Advisor, storage::KeyValueStore, store::Dashboard},
    errors::{Error, Result},
    models::lenient_date,
};
use chrono::NaiveDate;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
///
/// The dashboard is the single in-memory source of truth; every command
/// takes the lock, runs its mutation synchronously, and releases it.
pub struct BotData {
    /// The entity store
    pub dashboard: Mutex<Dashboard>,
    /// Backend that `/save` writes to
    pub storage: Arc<dyn KeyValueStore>,
    /// Advisor client, absent when no API key is configured
    pub advisor: Option<Box<dyn Advisor>>,
    /// Settings the process was started with
    pub settings: Settings,
}

impl BotData {
    /// Creates a new `BotData` instance around an already loaded dashboard.
    #[must_use]
    pub fn new(
        dashboard: Dashboard,
        storage: Arc<dyn KeyValueStore>,
        advisor: Option<Box<dyn Advisor>>,
        settings: Settings,
    ) -> Self {
        Self {
            dashboard: Mutex::new(dashboard),
            storage,
            advisor,
            settings,
        }
    }
}

/// Context handed to every command.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

/// Parses an optional `YYYY-MM-DD` command argument.
///
/// Blank input means "not given"; anything else must be a valid date.
pub fn parse_date_arg(raw: Option<&str>) -> Result<Option<NaiveDate>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => lenient_date::parse(value)
            .map(Some)
            .ok_or_else(|| Error::validation(format!("'{value}' is not a date (use YYYY-MM-DD)"))),
    }
}

/// Discord rejects messages longer than 2000 characters.
pub const MESSAGE_LIMIT: usize = 1900;

/// Splits `text` into chunks under `limit` characters, breaking on lines where possible.
#[must_use]
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        let pending = current.chars().count() + line.chars().count() + 1;
        if !current.is_empty() && pending > limit {
            chunks.push(std::mem::take(&mut current));
        }
        if line.chars().count() > limit {
            let chars: Vec<char> = line.chars().collect();
            for piece in chars.chunks(limit) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }
        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
    }

    if !current.is_empty() || chunks.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Sends `text`, split over as many messages as needed.
pub async fn say_long(ctx: Context<'_>, text: &str) -> Result<()> {
    for chunk in split_message(text, MESSAGE_LIMIT) {
        ctx.say(chunk).await?;
    }
    Ok(())
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("❌ {error}")).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Connects to Discord and serves commands until the client stops.
#[instrument(skip_all)]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;
    Ok(())
}
