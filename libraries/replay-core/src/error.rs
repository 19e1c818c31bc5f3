/// Core error types for Retro Replay
use thiserror::Error;

/// Result type alias using `ReplayError`
pub type Result<T> = std::result::Result<T, ReplayError>;

/// Core error type for Retro Replay
#[derive(Error, Debug)]
pub enum ReplayError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Entity not found, locally or at an external provider
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// External provider could not be reached, rejected our credentials or
    /// returned a payload we could not decode
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Provider has no credentials configured
    #[error("Provider not configured: {0}")]
    ProviderDisabled(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),
}

impl ReplayError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a provider unavailable error
    pub fn provider_unavailable(msg: impl Into<String>) -> Self {
        Self::ProviderUnavailable(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether this error reports a missing entity
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for ReplayError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = ReplayError::not_found("Game", "abc");
        assert_eq!(err.to_string(), "Game not found: abc");
        assert!(err.is_not_found());
    }

    #[test]
    fn other_errors_are_not_not_found() {
        assert!(!ReplayError::provider_unavailable("timeout").is_not_found());
        assert!(!ReplayError::invalid_input("bad").is_not_found());
    }
}
