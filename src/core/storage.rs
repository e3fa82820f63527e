//! Persistent key-value storage for collection snapshots.
//!
//! The store reads and writes whole collections as serialized strings under a
//! fixed key per collection. [`SqliteStore`] keeps them in the
//! `storage_slots` table; [`MemoryStore`] keeps them in a map and stands in
//! where there is no persistence backend.

use crate::{
    entities::{StorageSlot, storage_slot},
    errors::Result,
};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{Set, prelude::*};
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Minimal persistence contract: absent keys read as `None`.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// `SQLite`-backed slots, one row per key.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db: DatabaseConnection,
}

impl SqliteStore {
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Underlying connection, for table setup and diagnostics.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let slot = StorageSlot::find_by_id(key.to_string()).one(&self.db).await?;
        Ok(slot.map(|s| s.value))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let now = Utc::now().naive_utc();

        let existing = StorageSlot::find_by_id(key.to_string()).one(&self.db).await?;

        if let Some(slot) = existing {
            let mut active_model: storage_slot::ActiveModel = slot.into();
            active_model.value = Set(value.to_string());
            active_model.updated_at = Set(now);
            active_model.update(&self.db).await?;
        } else {
            let new_slot = storage_slot::ActiveModel {
                key: Set(key.to_string()),
                value: Set(value.to_string()),
                updated_at: Set(now),
            };
            new_slot.insert(&self.db).await?;
        }

        Ok(())
    }
}

/// In-process slots; contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-populated with the given slots.
    #[must_use]
    pub fn with_slots<I, K, V>(slots: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            slots: Mutex::new(
                slots
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.slots
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
