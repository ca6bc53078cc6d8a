//! Error types for the storage layer

use thiserror::Error;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in the task and conversation stores
#[derive(Debug, Error)]
pub enum StoreError {
    /// Unknown task or conversation id
    #[error("{0} not found")]
    NotFound(&'static str),

    /// SQLite failures (I/O, constraint violations, busy database)
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl StoreError {
    /// Whether this error maps to a 404 at the HTTP surface
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
