//! Application settings loaded from `course_desk.toml`.
//!
//! Every section is optional. A missing settings file is not an error: the
//! desk runs on defaults, which is the common case for a single-device setup.
//! Secrets (bot token, advisor API key) never live here; they come from the
//! environment.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const SETTINGS_PATH_VAR: &str = "COURSE_DESK_CONFIG";
const DEFAULT_SETTINGS_PATH: &str = "course_desk.toml";

/// Full settings file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Persistence slot naming
    pub storage: StorageSettings,
    /// Backup export location
    pub backup: BackupSettings,
    /// Advisor client parameters
    pub advisor: AdvisorSettings,
    /// Seed data override
    pub seed: SeedSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Prefix put in front of every collection key (`fd_` gives `fd_courses`)
    pub key_prefix: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            key_prefix: "fd_".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackupSettings {
    pub directory: PathBuf,
}

impl Default for BackupSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("backups"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdvisorSettings {
    /// Model name passed to the completion endpoint
    pub model: String,
    /// Base URL of the completion API
    pub endpoint: String,
    /// Standing instruction sent with every question
    pub system_instruction: String,
}

impl Default for AdvisorSettings {
    fn default() -> Self {
        Self {
            model: "gemini-3-flash-preview".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            system_instruction: "אתה יועץ אסטרטגי למכללה קטנה לקורסי בינה מלאכותית. \
                ענה בעברית, בקצרה ובאופן מעשי, עם דגש על רווחיות ומשמעת ניהולית."
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedSettings {
    /// Replaces the built-in seed dataset when set
    pub path: Option<PathBuf>,
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        tracing::info!("No settings file at {:?}, using defaults", path_ref);
        return Ok(Settings::default());
    }

    tracing::debug!("Loading settings from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read settings file {path_ref:?}: {e}"),
    })?;

    parse_settings(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse settings file {path_ref:?}: {e}"),
    })
}

/// Loads settings from `COURSE_DESK_CONFIG`, falling back to `./course_desk.toml`.
pub fn load_default_settings() -> Result<Settings> {
    let path = std::env::var(SETTINGS_PATH_VAR).unwrap_or_else(|_| DEFAULT_SETTINGS_PATH.into());
    load_settings(path)
}

fn parse_settings(contents: &str) -> std::result::Result<Settings, toml::de::Error> {
    toml::from_str(contents)
}
