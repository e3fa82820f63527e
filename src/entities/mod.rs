//! Entity module - SeaORM entity definitions for the persistence backend.
//! The dashboard keeps its collections in memory; the database only holds
//! one serialized snapshot per collection slot.

pub mod storage_slot;

pub use storage_slot::{
    Column as StorageSlotColumn, Entity as StorageSlot, Model as StorageSlotModel,
};
