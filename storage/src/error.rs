//! Storage error types.
//!
//! Used by store implementations and callers of storage APIs.

use guard_core::GuardError;
use thiserror::Error;

/// Errors that can occur when using storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Already exists: {0}")]
    AlreadyExists(String),
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StorageError::AlreadyExists(db.message().to_string())
            }
            sqlx::Error::RowNotFound => StorageError::NotFound("row".to_string()),
            other => StorageError::Database(other.to_string()),
        }
    }
}

impl From<regex::Error> for StorageError {
    fn from(e: regex::Error) -> Self {
        StorageError::InvalidQuery(e.to_string())
    }
}

impl From<StorageError> for GuardError {
    fn from(e: StorageError) -> Self {
        GuardError::Storage(e.to_string())
    }
}
