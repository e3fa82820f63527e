//! Storage slot entity - one row per persisted collection.
//!
//! Each row maps a logical key (e.g. `fd_courses`) to the JSON snapshot of
//! that collection. There is no schema version column; the snapshot format
//! is whatever the domain records serialize to.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Storage slot database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "storage_slots")]
pub struct Model {
    /// Slot key, unique per collection
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// Serialized collection snapshot
    #[sea_orm(column_type = "Text")]
    pub value: String,
    /// When this slot was last written
    pub updated_at: DateTime,
}

/// Storage slots stand alone
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
