//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Request handling never reads process-wide environment variables;
//! everything it needs travels in a [`CoreConfig`].

use crate::constants::DEFAULT_DATABASE_PATH;
use crate::{PatientError, PatientResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    database_path: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::InvalidInput` if `database_path` is empty.
    pub fn new(database_path: PathBuf) -> PatientResult<Self> {
        if database_path.as_os_str().is_empty() {
            return Err(PatientError::InvalidInput(
                "database path cannot be empty".into(),
            ));
        }

        Ok(Self { database_path })
    }

    /// Path of the SQLite database file.
    pub fn database_path(&self) -> &Path {
        &self.database_path
    }
}

/// Resolve the database path from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_DATABASE_PATH`].
pub fn database_path_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH))
}
