use std::env;

use crate::error::AppError;

/// Which database the process talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbProfile {
    /// Postgres at `DATABASE_URL`
    Postgres,
    /// SQLite database file, created on first connect
    SqliteFile { file: String },
    /// Private in-memory SQLite (tests, local runs)
    InMemory,
}

impl DbProfile {
    /// Resolve the profile from `DB_KIND` (default `postgres`).
    pub fn from_env() -> Result<Self, AppError> {
        let kind = env::var("DB_KIND").unwrap_or_else(|_| "postgres".to_string());
        match kind.trim().to_ascii_lowercase().as_str() {
            "postgres" => Ok(DbProfile::Postgres),
            "sqlite-file" => Ok(DbProfile::SqliteFile {
                file: must_var("SQLITE_FILE")?,
            }),
            "sqlite-memory" => Ok(DbProfile::InMemory),
            other => Err(AppError::config(format!(
                "Unsupported DB_KIND '{other}' (expected postgres, sqlite-file or sqlite-memory)"
            ))),
        }
    }

    pub fn is_sqlite(&self) -> bool {
        !matches!(self, DbProfile::Postgres)
    }
}

/// Connection URL for a profile
pub fn db_url(profile: &DbProfile) -> Result<String, AppError> {
    match profile {
        DbProfile::Postgres => must_var("DATABASE_URL"),
        DbProfile::SqliteFile { file } => Ok(format!("sqlite://{file}?mode=rwc")),
        DbProfile::InMemory => Ok("sqlite::memory:".to_string()),
    }
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
