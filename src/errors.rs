//! Unified error type for the course desk.
//!
//! Every fallible operation in the crate returns [`Result`]. Load failures are
//! recovered inside the store and never reach this type; save failures,
//! validation failures and lookups of missing entities do.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to write slot '{key}': {message}")]
    Storage { key: String, message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Course not found: {id}")]
    CourseNotFound { id: String },

    #[error("Student not found: {id}")]
    StudentNotFound { id: String },

    #[error("Task not found: {id}")]
    TaskNotFound { id: String },

    #[error("Payment link not found: {id}")]
    PaymentLinkNotFound { id: String },

    #[error("Advisor error: {message}")]
    Advisor { message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("Serenity/Poise framework error: {0}")]
    #[allow(clippy::enum_variant_names)]
    FrameworkError(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::FrameworkError(Box::new(value))
    }
}

impl Error {
    /// Shorthand for a required-field failure at the mutation boundary.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
