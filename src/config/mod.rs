/// Database configuration and connection management
pub mod database;

/// Seed dataset loading (built-in `seed.toml` or an override file)
pub mod seed;

/// Settings file loading (`course_desk.toml`)
pub mod settings;
