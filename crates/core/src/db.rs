//! SQLite connection handling and schema.
//!
//! Connections are opened per operation and closed when dropped. There is no
//! connection shared between requests; concurrent writers are serialised by
//! SQLite's own locking, with [`BUSY_TIMEOUT`] as the wait budget.

use crate::config::CoreConfig;
use crate::constants::BUSY_TIMEOUT;
use crate::{PatientError, PatientResult};
use rusqlite::Connection;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS patients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(120) NOT NULL,
    age INTEGER NOT NULL,
    symptoms TEXT NOT NULL,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS ix_patients_name ON patients (name);
";

/// Opens a connection to the configured database file.
///
/// SQLite creates the file if it does not exist yet; the schema is not
/// created here, see [`initialise_schema`].
pub fn open_connection(cfg: &CoreConfig) -> PatientResult<Connection> {
    let conn =
        Connection::open(cfg.database_path()).map_err(|source| PatientError::DatabaseOpen {
            path: cfg.database_path().to_path_buf(),
            source,
        })?;
    conn.busy_timeout(BUSY_TIMEOUT)
        .map_err(PatientError::DatabaseConfigure)?;
    Ok(conn)
}

/// Creates the `patients` table and its index if they are missing.
pub fn initialise_schema(conn: &Connection) -> PatientResult<()> {
    conn.execute_batch(SCHEMA).map_err(PatientError::SchemaInit)
}

/// Opens an in-memory database with the schema applied.
#[cfg(test)]
pub(crate) fn open_memory_database() -> PatientResult<Connection> {
    let conn = Connection::open_in_memory().map_err(|source| PatientError::DatabaseOpen {
        path: ":memory:".into(),
        source,
    })?;
    initialise_schema(&conn)?;
    Ok(conn)
}
