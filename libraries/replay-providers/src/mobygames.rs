//! MobyGames client

use crate::error::{ProviderError, Result};
use crate::http::{build_client, decode_json, error_for_status, normalize_base_url, send_error};
use crate::provider::{numeric_id, MetadataProvider, SearchQuery};
use async_trait::async_trait;
use chrono::NaiveDate;
use replay_core::{Provider, ProviderRecord};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.mobygames.com/v1";

/// Longest title the search endpoint accepts
const MAX_TITLE_LEN: usize = 128;

#[derive(Debug, Clone)]
pub struct MobyGamesConfig {
    pub api_key: String,
    pub api_url: String,
    pub timeout: Duration,
}

impl MobyGamesConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct MobyGamesClient {
    http: Client,
    api_key: String,
    api_url: String,
}

impl MobyGamesClient {
    pub fn new(config: MobyGamesConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderError::InvalidConfig(
                "MobyGames API key is required".to_string(),
            ));
        }

        Ok(Self {
            http: build_client(config.timeout)?,
            api_url: normalize_base_url(&config.api_url)?,
            api_key: config.api_key,
        })
    }

    async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<reqwest::Response> {
        self.http
            .get(format!("{}{}", self.api_url, path))
            .query(&[("api_key", self.api_key.as_str()), ("format", "normal")])
            .query(params)
            .send()
            .await
            .map_err(|e| send_error(Provider::MobyGames, e))
    }
}

#[async_trait]
impl MetadataProvider for MobyGamesClient {
    fn provider(&self) -> Provider {
        Provider::MobyGames
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<ProviderRecord>> {
        query.validate()?;
        let title = truncate_title(query.text.trim());
        tracing::debug!(query = %title, limit = query.limit, "Searching MobyGames");

        let response = self.get("/games", &[("title", title.as_str())]).await?;
        if !response.status().is_success() {
            return Err(error_for_status(Provider::MobyGames, response).await);
        }

        let body: SearchResponse = decode_json(Provider::MobyGames, response).await?;

        // The endpoint ignores our paging, so apply it here
        Ok(body
            .games
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .map(MobyGame::into_record)
            .collect())
    }

    async fn fetch(&self, external_id: &str) -> Result<ProviderRecord> {
        let id = numeric_id(Provider::MobyGames, external_id)?;

        let response = self.get(&format!("/games/{}", id), &[]).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound {
                provider: Provider::MobyGames,
                id: id.to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(error_for_status(Provider::MobyGames, response).await);
        }

        let game: MobyGame = decode_json(Provider::MobyGames, response).await?;
        Ok(game.into_record())
    }
}

fn truncate_title(title: &str) -> String {
    title.chars().take(MAX_TITLE_LEN).collect()
}

/// Parse `YYYY-MM-DD`, `YYYY-MM` or `YYYY`, padding partial dates to the first
/// day of the month or year.
fn parse_partial_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let padded = match raw.len() {
        4 => format!("{}-01-01", raw),
        7 => format!("{}-01", raw),
        _ => raw.to_string(),
    };
    NaiveDate::parse_from_str(&padded, "%Y-%m-%d").ok()
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    games: Vec<MobyGame>,
}

#[derive(Debug, Deserialize)]
struct MobyGame {
    game_id: u64,
    title: String,
    description: Option<String>,
    original_release_date: Option<String>,
    sample_cover: Option<MobyCover>,
    #[serde(default)]
    platforms: Vec<MobyPlatform>,
    #[serde(default)]
    genres: Vec<MobyGenre>,
    #[serde(default)]
    developers: Vec<MobyCompany>,
    #[serde(default)]
    publishers: Vec<MobyCompany>,
    moby_score: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct MobyCover {
    image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MobyPlatform {
    platform_name: Option<String>,
    first_release_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MobyGenre {
    genre_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MobyCompany {
    company_name: Option<String>,
}

impl MobyGame {
    fn into_record(self) -> ProviderRecord {
        // Fall back to the earliest per-platform release
        let release_date = self
            .original_release_date
            .as_deref()
            .and_then(parse_partial_date)
            .or_else(|| {
                self.platforms
                    .iter()
                    .filter_map(|p| p.first_release_date.as_deref())
                    .filter_map(parse_partial_date)
                    .min()
            });

        ProviderRecord {
            provider: Provider::MobyGames,
            external_id: self.game_id.to_string(),
            title: self.title,
            summary: self.description,
            release_date,
            cover_image: self.sample_cover.and_then(|c| c.image),
            platforms: self
                .platforms
                .into_iter()
                .filter_map(|p| p.platform_name)
                .collect(),
            genres: self.genres.into_iter().filter_map(|g| g.genre_name).collect(),
            developers: self
                .developers
                .into_iter()
                .filter_map(|c| c.company_name)
                .collect(),
            publishers: self
                .publishers
                .into_iter()
                .filter_map(|c| c.company_name)
                .collect(),
            rating: self.moby_score,
        }
    }
}
