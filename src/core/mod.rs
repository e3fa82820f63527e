//! Core business logic - framework-agnostic store, calendar and finance operations.
//!
//! Nothing in here knows about Discord. The bot layer calls into these
//! modules and formats their results.

/// Strategy advisor client and failure mapping
pub mod advisor;
/// Full-state backup export
pub mod backup;
/// Weekly session resolution and per-day task lookup
pub mod calendar;
/// Monthly revenue reconciliation
pub mod finance;
/// Identifier generation
pub mod ids;
/// WhatsApp and Gmail hand-off links
pub mod outreach;
/// Overview figures and display helpers
pub mod report;
/// Course rosters and custom student columns
pub mod roster;
/// Persistent key-value storage backends
pub mod storage;
/// The dashboard entity store and its mutation API
pub mod store;
/// Task filtering, ordering and member progress
pub mod tasks;
