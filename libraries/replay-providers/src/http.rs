//! Shared HTTP plumbing for the provider clients.

use crate::error::{ProviderError, Result};
use reqwest::{Client, Response, StatusCode};
use replay_core::Provider;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Build a client with the per-request timeout applied.
pub(crate) fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT.min(timeout))
        .user_agent(concat!("retro-replay/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(ProviderError::Request)
}

/// Validate a base URL and strip its trailing slash.
pub(crate) fn normalize_base_url(raw: &str) -> Result<String> {
    let parsed = url::Url::parse(raw)
        .map_err(|e| ProviderError::InvalidConfig(format!("invalid URL '{}': {}", raw, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ProviderError::InvalidConfig(format!(
            "URL must use http or https: {}",
            raw
        )));
    }

    Ok(raw.trim_end_matches('/').to_string())
}

/// Classify a transport failure.
pub(crate) fn send_error(provider: Provider, err: reqwest::Error) -> ProviderError {
    if err.is_connect() || err.is_timeout() {
        ProviderError::Unreachable {
            provider,
            message: err.to_string(),
        }
    } else {
        ProviderError::Request(err)
    }
}

/// Turn a non-success response into the matching error.
pub(crate) async fn error_for_status(provider: Provider, response: Response) -> ProviderError {
    let status = response.status();
    let message = response.text().await.unwrap_or_default();

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ProviderError::AuthFailed { provider, message }
        }
        _ => ProviderError::ServerError {
            provider,
            status: status.as_u16(),
            message,
        },
    }
}

/// Decode a JSON body, reporting failures as parse errors.
pub(crate) async fn decode_json<T: serde::de::DeserializeOwned>(
    provider: Provider,
    response: Response,
) -> Result<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| ProviderError::ParseError {
            provider,
            message: e.to_string(),
        })
}
