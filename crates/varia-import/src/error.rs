//! Error types for the import pipeline.

use thiserror::Error;

/// Result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Errors that can occur during import.
///
/// Record-level errors (`Malformed`, `Database`) abort only the record they
/// occurred in; the import stream continues with the next record.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] varia_db::DbError),

    #[error("Malformed record on input line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
