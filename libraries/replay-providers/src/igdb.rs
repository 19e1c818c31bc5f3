//! IGDB client
//!
//! IGDB authenticates through Twitch's client-credentials flow. The bearer
//! token is cached and refreshed shortly before it expires; a 401 from the
//! API drops the cached token and retries the request once.

use crate::error::{ProviderError, Result};
use crate::http::{build_client, decode_json, error_for_status, normalize_base_url, send_error};
use crate::provider::{numeric_id, MetadataProvider, SearchQuery};
use async_trait::async_trait;
use chrono::DateTime;
use replay_core::{Provider, ProviderRecord, ReferenceItem, ReferenceKind};
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

pub const DEFAULT_API_URL: &str = "https://api.igdb.com/v4";
pub const DEFAULT_TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";

const COVER_URL: &str = "https://images.igdb.com/igdb/image/upload/t_cover_big";
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);
const REFERENCE_LIMIT: u32 = 500;
const GAME_FIELDS: &str = "name,summary,first_release_date,cover.image_id,platforms.name,\
genres.name,involved_companies.company.name,involved_companies.developer,\
involved_companies.publisher,total_rating";

#[derive(Debug, Clone)]
pub struct IgdbConfig {
    pub client_id: String,
    pub client_secret: String,
    pub api_url: String,
    pub token_url: String,
    pub timeout: Duration,
}

impl IgdbConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            api_url: DEFAULT_API_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    #[must_use]
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

struct AccessToken {
    value: String,
    expires_at: Instant,
}

impl AccessToken {
    fn is_fresh(&self) -> bool {
        Instant::now() + TOKEN_REFRESH_MARGIN < self.expires_at
    }
}

pub struct IgdbClient {
    http: Client,
    client_id: String,
    client_secret: String,
    api_url: String,
    token_url: String,
    token: RwLock<Option<AccessToken>>,
}

impl IgdbClient {
    pub fn new(config: IgdbConfig) -> Result<Self> {
        if config.client_id.trim().is_empty() || config.client_secret.trim().is_empty() {
            return Err(ProviderError::InvalidConfig(
                "IGDB client id and secret are required".to_string(),
            ));
        }

        Ok(Self {
            http: build_client(config.timeout)?,
            api_url: normalize_base_url(&config.api_url)?,
            token_url: normalize_base_url(&config.token_url)?,
            client_id: config.client_id,
            client_secret: config.client_secret,
            token: RwLock::new(None),
        })
    }

    /// Current bearer token, exchanging credentials when none is cached or the
    /// cached one is about to expire.
    async fn access_token(&self) -> Result<String> {
        {
            let cached = self.token.read().await;
            if let Some(token) = cached.as_ref().filter(|t| t.is_fresh()) {
                return Ok(token.value.clone());
            }
        }

        let mut cached = self.token.write().await;
        // Another task may have refreshed while we waited for the lock
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.value.clone());
        }

        let token = self.request_token().await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    async fn request_token(&self) -> Result<AccessToken> {
        #[derive(Deserialize)]
        struct TokenResponse {
            access_token: String,
            expires_in: u64,
        }

        tracing::debug!("Requesting IGDB access token");

        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("grant_type", "client_credentials"),
            ])
            .send()
            .await
            .map_err(|e| send_error(Provider::Igdb, e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            // Twitch answers bad credentials with 400 as well as 401/403
            return Err(if status.is_client_error() {
                ProviderError::AuthFailed {
                    provider: Provider::Igdb,
                    message,
                }
            } else {
                ProviderError::ServerError {
                    provider: Provider::Igdb,
                    status: status.as_u16(),
                    message,
                }
            });
        }

        let body: TokenResponse = decode_json(Provider::Igdb, response).await?;
        let expires_at = Instant::now()
            .checked_add(Duration::from_secs(body.expires_in))
            .ok_or_else(|| ProviderError::ParseError {
                provider: Provider::Igdb,
                message: format!("token lifetime out of range: {}s", body.expires_in),
            })?;

        Ok(AccessToken {
            value: body.access_token,
            expires_at,
        })
    }

    async fn invalidate_token(&self) {
        *self.token.write().await = None;
    }

    /// POST an Apicalypse query to an endpoint.
    async fn query<T: DeserializeOwned>(&self, endpoint: &str, body: String) -> Result<Vec<T>> {
        let url = format!("{}/{}", self.api_url, endpoint);
        let mut retried = false;

        loop {
            let token = self.access_token().await?;
            let response = self
                .http
                .post(&url)
                .header("Client-ID", &self.client_id)
                .header(header::ACCEPT, "application/json")
                .bearer_auth(&token)
                .body(body.clone())
                .send()
                .await
                .map_err(|e| send_error(Provider::Igdb, e))?;

            let status = response.status();
            if status == StatusCode::UNAUTHORIZED && !retried {
                tracing::warn!("IGDB rejected the access token, refreshing");
                self.invalidate_token().await;
                retried = true;
                continue;
            }

            if !status.is_success() {
                return Err(error_for_status(Provider::Igdb, response).await);
            }

            return decode_json(Provider::Igdb, response).await;
        }
    }
}

#[async_trait]
impl MetadataProvider for IgdbClient {
    fn provider(&self) -> Provider {
        Provider::Igdb
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<ProviderRecord>> {
        query.validate()?;
        tracing::debug!(query = %query.text, limit = query.limit, "Searching IGDB");

        let games: Vec<IgdbGame> = self.query("games", search_body(query)).await?;
        Ok(games.into_iter().map(IgdbGame::into_record).collect())
    }

    async fn fetch(&self, external_id: &str) -> Result<ProviderRecord> {
        let id = numeric_id(Provider::Igdb, external_id)?;

        let games: Vec<IgdbGame> = self.query("games", fetch_body(id)).await?;
        games
            .into_iter()
            .next()
            .map(IgdbGame::into_record)
            .ok_or_else(|| ProviderError::NotFound {
                provider: Provider::Igdb,
                id: id.to_string(),
            })
    }

    async fn reference(&self, kind: ReferenceKind) -> Result<Vec<ReferenceItem>> {
        let (endpoint, body) = reference_query(kind);
        self.query(endpoint, body).await
    }
}

/// Escape a value for use inside an Apicalypse string literal.
fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

fn search_body(query: &SearchQuery) -> String {
    let mut body = format!(
        "search \"{}\"; fields {};",
        escape(query.text.trim()),
        GAME_FIELDS
    );
    if let Some(platform) = query.platform_id {
        body.push_str(&format!(" where platforms = ({});", platform));
    }
    body.push_str(&format!(" limit {}; offset {};", query.limit, query.offset));
    body
}

fn fetch_body(id: u64) -> String {
    format!("fields {}; where id = {};", GAME_FIELDS, id)
}

fn reference_query(kind: ReferenceKind) -> (&'static str, String) {
    let (endpoint, fields) = match kind {
        ReferenceKind::Platforms => ("platforms", "name,abbreviation"),
        ReferenceKind::Genres => ("genres", "name"),
        ReferenceKind::GameModes => ("game_modes", "name"),
        ReferenceKind::Collections => ("collections", "name"),
        ReferenceKind::Franchises => ("franchises", "name"),
    };
    (
        endpoint,
        format!("fields {}; sort name asc; limit {};", fields, REFERENCE_LIMIT),
    )
}

#[derive(Debug, Deserialize)]
struct IgdbGame {
    id: u64,
    name: String,
    summary: Option<String>,
    first_release_date: Option<i64>,
    cover: Option<IgdbCover>,
    #[serde(default)]
    platforms: Vec<IgdbNamed>,
    #[serde(default)]
    genres: Vec<IgdbNamed>,
    #[serde(default)]
    involved_companies: Vec<IgdbInvolvedCompany>,
    total_rating: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct IgdbCover {
    image_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IgdbNamed {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IgdbInvolvedCompany {
    company: Option<IgdbNamed>,
    #[serde(default)]
    developer: bool,
    #[serde(default)]
    publisher: bool,
}

fn names(items: Vec<IgdbNamed>) -> Vec<String> {
    items.into_iter().filter_map(|item| item.name).collect()
}

impl IgdbGame {
    fn into_record(self) -> ProviderRecord {
        let mut developers = Vec::new();
        let mut publishers = Vec::new();
        for involved in self.involved_companies {
            let Some(name) = involved.company.and_then(|c| c.name) else {
                continue;
            };
            if involved.developer {
                developers.push(name.clone());
            }
            if involved.publisher {
                publishers.push(name);
            }
        }

        ProviderRecord {
            provider: Provider::Igdb,
            external_id: self.id.to_string(),
            title: self.name,
            summary: self.summary,
            release_date: self
                .first_release_date
                .and_then(|secs| DateTime::from_timestamp(secs, 0))
                .map(|dt| dt.date_naive()),
            cover_image: self
                .cover
                .and_then(|c| c.image_id)
                .map(|image_id| format!("{}/{}.jpg", COVER_URL, image_id)),
            platforms: names(self.platforms),
            genres: names(self.genres),
            developers,
            publishers,
            rating: self.total_rating,
        }
    }
}
