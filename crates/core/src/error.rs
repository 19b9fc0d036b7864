use crate::validation::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),
    #[error("failed to open database {path}: {source}", path = path.display())]
    DatabaseOpen {
        path: std::path::PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("failed to configure database connection: {0}")]
    DatabaseConfigure(rusqlite::Error),
    #[error("failed to initialise database schema: {0}")]
    SchemaInit(rusqlite::Error),
    #[error("failed to insert patient: {0}")]
    Insert(rusqlite::Error),
    #[error("failed to query patients: {0}")]
    Query(rusqlite::Error),
    #[error("invalid stored timestamp {value:?}: {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

pub type PatientResult<T> = std::result::Result<T, PatientError>;
