//! Error types for the ledger module.

use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The key is not acceptable to the world state.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// The transaction context carries no timestamp.
    #[error("transaction timestamp unavailable")]
    MissingTimestamp,

    /// The transaction context carries no creator certificate.
    #[error("creator certificate unavailable")]
    MissingCreator,

    /// The backend rejected or could not serve the request.
    #[error("ledger unavailable: {0}")]
    Unavailable(String),

    /// A blocking storage task failed to complete.
    #[error("storage task failed: {0}")]
    Task(String),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
