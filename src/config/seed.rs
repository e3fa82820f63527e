//! Seed dataset loading.
//!
//! The seed is the dataset a collection falls back to when it has no stored
//! snapshot. The built-in seed is compiled into the binary from `seed.toml`;
//! a seed file named in the settings replaces it wholesale.

use crate::errors::{Error, Result};
use crate::models::{Course, FinancialRecord, PaymentLink, Task, TeamMember};
use serde::Deserialize;
use std::path::Path;

const BUILTIN_SEED: &str = include_str!("../../seed.toml");

/// One fallback collection per storage slot.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub team: Vec<TeamMember>,
    pub courses: Vec<Course>,
    pub financial: Vec<FinancialRecord>,
    pub tasks: Vec<Task>,
    pub payment_links: Vec<PaymentLink>,
}

/// Parses the seed dataset shipped with the crate.
pub fn builtin_seed() -> Result<SeedData> {
    parse_seed(BUILTIN_SEED, "built-in seed")
}

/// Loads the seed from `path` if given, otherwise the built-in seed.
///
/// # Errors
/// Returns an error if the seed file cannot be read or parsed.
pub fn load_seed(path: Option<&Path>) -> Result<SeedData> {
    let Some(path) = path else {
        return builtin_seed();
    };

    tracing::info!("Loading seed data from {:?}", path);
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read seed file {path:?}: {e}"),
    })?;
    parse_seed(&contents, &path.display().to_string())
}

fn parse_seed(contents: &str, origin: &str) -> Result<SeedData> {
    let mut seed: SeedData = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {origin}: {e}"),
    })?;

    // Seeded rosters obey the same invariant as managed ones.
    for course in &mut seed.courses {
        course.recount_registrants();
    }
    Ok(seed)
}
