//! Constants used throughout the patients core crate.
//!
//! This module contains storage names and codec constants to ensure
//! consistency across the codebase.

use std::time::Duration;

/// Default SQLite database file when no explicit path is configured.
pub const DEFAULT_DATABASE_PATH: &str = "patients.db";

/// Separator placed between symptoms in the stored text column.
pub const SYMPTOM_SEPARATOR: &str = ", ";

/// Delimiter the stored symptom text is split on when decoding.
pub const SYMPTOM_DELIMITER: char = ',';

/// How long a connection waits on a locked database before giving up.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
