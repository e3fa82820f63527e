use course_desk::{
    bot::{self, BotData},
    config::{database, seed, settings},
    core::{
        advisor::{Advisor, GeminiAdvisor},
        ids::UuidIds,
        storage::{KeyValueStore, SqliteStore},
        store::Dashboard,
    },
    errors::{Error, Result},
};
use dotenvy::dotenv;
use std::{env, sync::Arc};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Settings and seed data
    let settings = settings::load_default_settings()
        .inspect_err(|e| error!("Failed to load settings: {}", e))?;
    let seed_data = seed::load_seed(settings.seed.path.as_deref())
        .inspect_err(|e| error!("Failed to load seed data: {}", e))?;

    // 4. Storage backend
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;
    let storage: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::new(db));

    // 5. Load the dashboard, falling back to seed data per collection
    let dashboard = Dashboard::load(
        storage.as_ref(),
        seed_data,
        Box::new(UuidIds),
        &settings.storage.key_prefix,
    )
    .await;

    // 6. Optional advisor
    let advisor = GeminiAdvisor::from_env(&settings.advisor).map(|a| Box::new(a) as Box<dyn Advisor>);
    if advisor.is_none() {
        warn!("ADVISOR_API_KEY not set; /ask will report a missing key.");
    }

    // 7. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, BotData::new(dashboard, storage, advisor, settings)).await
}
