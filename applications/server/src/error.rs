/// Server error types
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use replay_core::ReplayError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Domain(#[from] ReplayError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<replay_providers::ProviderError> for ServerError {
    fn from(err: replay_providers::ProviderError) -> Self {
        ServerError::Domain(err.into())
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ServerError {
    fn from(rejection: QueryRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

impl ServerError {
    /// Status code and client-facing message. Internal details are logged,
    /// never returned.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ServerError::Domain(err) => match err {
                ReplayError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
                ReplayError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                ReplayError::ProviderUnavailable(msg) => {
                    tracing::warn!("Provider unavailable: {}", msg);
                    (StatusCode::BAD_GATEWAY, err.to_string())
                }
                ReplayError::ProviderDisabled(_) => {
                    (StatusCode::SERVICE_UNAVAILABLE, err.to_string())
                }
                ReplayError::Storage(_)
                | ReplayError::Database(_)
                | ReplayError::Serialization(_) => {
                    tracing::error!("Database error: {:?}", err);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Database error".to_string(),
                    )
                }
            },
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServerError::Config(msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.status_and_message();

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
