//! Error types for the provider clients.

use replay_core::{Provider, ReplayError};
use thiserror::Error;

/// Errors that can occur when talking to a metadata provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Provider could not be reached (connect failure or timeout)
    #[error("{provider} unreachable: {message}")]
    Unreachable { provider: Provider, message: String },

    /// Credentials were rejected
    #[error("{provider} authentication failed: {message}")]
    AuthFailed { provider: Provider, message: String },

    /// Provider returned an error response
    #[error("{provider} error ({status}): {message}")]
    ServerError {
        provider: Provider,
        status: u16,
        message: String,
    },

    /// Failed to parse provider response
    #[error("Failed to parse {provider} response: {message}")]
    ParseError { provider: Provider, message: String },

    /// The provider has no record with this id
    #[error("{provider} record not found: {id}")]
    NotFound { provider: Provider, id: String },

    /// Malformed id or query
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation not offered by this provider
    #[error("{provider} does not support {what}")]
    Unsupported { provider: Provider, what: String },

    /// No credentials were configured for this provider
    #[error("{0} is not configured")]
    NotConfigured(Provider),

    /// Client configuration is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ProviderError {
    /// Whether this error reports an unknown provider id
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<ProviderError> for ReplayError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotFound { provider, id } => {
                ReplayError::not_found(format!("{} game", provider.display_name()), id)
            }
            ProviderError::InvalidInput(msg) => ReplayError::InvalidInput(msg),
            ProviderError::Unsupported { .. } => ReplayError::InvalidInput(err.to_string()),
            ProviderError::NotConfigured(provider) => {
                ReplayError::ProviderDisabled(provider.display_name().to_string())
            }
            other => ReplayError::ProviderUnavailable(other.to_string()),
        }
    }
}

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;
