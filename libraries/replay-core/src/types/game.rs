//! Library entry types
//!
//! A library entry is a game the user owns or tracks, together with the
//! library state they assign to it.

use super::ids::GameId;
use super::provider::Provider;
use crate::error::{ReplayError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a game sits in the user's backlog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    WantToPlay,
    Playing,
    Completed,
    OnHold,
    Dropped,
}

impl GameStatus {
    /// Every status, in backlog order
    pub const ALL: [GameStatus; 5] = [
        Self::WantToPlay,
        Self::Playing,
        Self::Completed,
        Self::OnHold,
        Self::Dropped,
    ];

    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WantToPlay => "want_to_play",
            Self::Playing => "playing",
            Self::Completed => "completed",
            Self::OnHold => "on_hold",
            Self::Dropped => "dropped",
        }
    }
}

impl FromStr for GameStatus {
    type Err = ReplayError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                ReplayError::invalid_input(format!(
                    "Invalid status '{}'. Must be one of: want_to_play, playing, completed, on_hold, dropped",
                    s
                ))
            })
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted game in the library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub id: GameId,
    pub title: String,
    pub summary: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub cover_image: Option<String>,
    pub platforms: Vec<String>,
    pub genres: Vec<String>,
    pub developers: Vec<String>,
    pub publishers: Vec<String>,
    pub rating: Option<f64>,
    pub status: GameStatus,
    pub notes: Option<String>,
    /// Provider the entry was imported from (relation only)
    pub source_provider: Option<Provider>,
    /// Provider-specific id; always set when `source_provider` is
    pub source_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new library entry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewGame {
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub developers: Vec<String>,
    #[serde(default)]
    pub publishers: Vec<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub status: GameStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub source_provider: Option<Provider>,
    #[serde(default)]
    pub source_id: Option<String>,
}

impl NewGame {
    /// A manual entry with only a title; everything else empty
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Check the shape invariants that the type system does not carry
    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)?;
        validate_rating(self.rating)?;

        match (&self.source_provider, &self.source_id) {
            (None, None) => Ok(()),
            (Some(_), Some(id)) if !id.trim().is_empty() => Ok(()),
            (Some(provider), _) => Err(ReplayError::invalid_input(format!(
                "source_id is required when source_provider is {}",
                provider
            ))),
            (None, Some(_)) => Err(ReplayError::invalid_input(
                "source_id requires a source_provider",
            )),
        }
    }
}

/// Data for updating an entry
///
/// Absent fields are left unchanged. The optional metadata fields
/// (`summary`, `release_date`, `cover_image`, `rating`, `notes`) use
/// `Some(None)` for an explicit JSON `null`, which clears the stored value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GameUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub summary: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub release_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<Option<String>>,
    #[serde(default)]
    pub platforms: Option<Vec<String>>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    #[serde(default)]
    pub developers: Option<Vec<String>>,
    #[serde(default)]
    pub publishers: Option<Vec<String>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub rating: Option<Option<f64>>,
    #[serde(default)]
    pub status: Option<GameStatus>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
}

impl GameUpdate {
    /// Only change the status
    pub fn status(status: GameStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        validate_rating(self.rating.flatten())
    }
}

/// A present field (even `null`) becomes `Some`; a missing one stays `None`
/// through `#[serde(default)]`.
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Predicate for listing entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilter {
    #[serde(default)]
    pub status: Option<GameStatus>,
    /// Case-insensitive title substring
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub offset: u32,
    #[serde(default = "ListFilter::default_limit")]
    pub limit: u32,
}

impl ListFilter {
    pub const DEFAULT_LIMIT: u32 = 100;
    pub const MAX_LIMIT: u32 = 1000;

    fn default_limit() -> u32 {
        Self::DEFAULT_LIMIT
    }

    /// Restrict to a single status
    pub fn with_status(status: GameStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.limit == 0 || self.limit > Self::MAX_LIMIT {
            return Err(ReplayError::invalid_input(format!(
                "limit must be between 1 and {}",
                Self::MAX_LIMIT
            )));
        }
        Ok(())
    }
}

impl Default for ListFilter {
    fn default() -> Self {
        Self {
            status: None,
            search: None,
            offset: 0,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(ReplayError::invalid_input("title must not be empty"));
    }
    Ok(())
}

fn validate_rating(rating: Option<f64>) -> Result<()> {
    match rating {
        Some(r) if !r.is_finite() || r < 0.0 => Err(ReplayError::invalid_input(
            "rating must be a non-negative number",
        )),
        _ => Ok(()),
    }
}
