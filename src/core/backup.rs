//! Full-state backup export.
//!
//! A backup is one JSON document holding every collection plus the time it
//! was generated. It is written to the backup directory and handed to the
//! user as a file named after the current date. There is no import path.

use crate::{
    core::store::Dashboard,
    errors::Result,
    models::{Course, FinancialRecord, PaymentLink, Task, TeamMember},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Backup document layout.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup<'a> {
    pub courses: &'a [Course],
    pub tasks: &'a [Task],
    pub team_members: &'a [TeamMember],
    pub financial_data: &'a [FinancialRecord],
    pub payment_links: &'a [PaymentLink],
    pub backup_date: DateTime<Utc>,
}

impl<'a> Backup<'a> {
    #[must_use]
    pub fn of(dashboard: &'a Dashboard, generated_at: DateTime<Utc>) -> Self {
        Self {
            courses: dashboard.courses(),
            tasks: dashboard.tasks(),
            team_members: dashboard.team_members(),
            financial_data: dashboard.financial_data(),
            payment_links: dashboard.payment_links(),
            backup_date: generated_at,
        }
    }

    /// Pretty-printed JSON of the document.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }
}

/// File name for a backup taken on `date`.
#[must_use]
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("fd_ai_backup_{}.json", date.format("%Y-%m-%d"))
}

/// A rendered backup ready to be written or attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupFile {
    pub file_name: String,
    pub contents: String,
}

/// Renders the backup document for `dashboard` as of `generated_at`.
pub fn render_backup(dashboard: &Dashboard, generated_at: DateTime<Utc>) -> Result<BackupFile> {
    Ok(BackupFile {
        file_name: backup_file_name(generated_at.date_naive()),
        contents: Backup::of(dashboard, generated_at).to_json()?,
    })
}

/// Writes `backup` into `directory`, creating it if needed, and returns the file path.
pub fn write_backup(directory: &Path, backup: &BackupFile) -> Result<PathBuf> {
    std::fs::create_dir_all(directory)?;
    let path = directory.join(&backup.file_name);
    std::fs::write(&path, &backup.contents)?;
    tracing::info!("Backup written to {:?}", path);
    Ok(path)
}
