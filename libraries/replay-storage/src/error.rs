/// Storage-specific errors
use thiserror::Error;

/// Storage bootstrap error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<StorageError> for replay_core::ReplayError {
    fn from(err: StorageError) -> Self {
        replay_core::ReplayError::storage(err.to_string())
    }
}
