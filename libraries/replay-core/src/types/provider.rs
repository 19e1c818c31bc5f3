//! External metadata provider types

use crate::error::{ReplayError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported game-metadata providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Igdb,
    MobyGames,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Self::Igdb, Self::MobyGames];

    /// Convert to string representation (path segment and storage form)
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Igdb => "igdb",
            Self::MobyGames => "mobygames",
        }
    }

    /// Human-readable name for messages
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Igdb => "IGDB",
            Self::MobyGames => "MobyGames",
        }
    }
}

impl FromStr for Provider {
    type Err = ReplayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "igdb" => Ok(Self::Igdb),
            "mobygames" => Ok(Self::MobyGames),
            _ => Err(ReplayError::invalid_input(format!(
                "Unknown provider '{}'. Must be one of: igdb, mobygames",
                s
            ))),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalized metadata returned by a provider, not yet owned by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRecord {
    pub provider: Provider,
    pub external_id: String,
    pub title: String,
    pub summary: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub cover_image: Option<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub developers: Vec<String>,
    #[serde(default)]
    pub publishers: Vec<String>,
    pub rating: Option<f64>,
}

impl ProviderRecord {
    /// A record carrying only an id and a title
    pub fn new(provider: Provider, external_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            provider,
            external_id: external_id.into(),
            title: title.into(),
            summary: None,
            release_date: None,
            cover_image: None,
            platforms: Vec::new(),
            genres: Vec::new(),
            developers: Vec::new(),
            publishers: Vec::new(),
            rating: None,
        }
    }
}

/// Reference lists a provider can expose (used to build search filters)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceKind {
    Platforms,
    Genres,
    GameModes,
    Collections,
    Franchises,
}

impl ReferenceKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Platforms => "platforms",
            Self::Genres => "genres",
            Self::GameModes => "game-modes",
            Self::Collections => "collections",
            Self::Franchises => "franchises",
        }
    }
}

impl FromStr for ReferenceKind {
    type Err = ReplayError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "platforms" => Ok(Self::Platforms),
            "genres" => Ok(Self::Genres),
            "game-modes" => Ok(Self::GameModes),
            "collections" => Ok(Self::Collections),
            "franchises" => Ok(Self::Franchises),
            _ => Err(ReplayError::invalid_input(format!(
                "Unknown reference list '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One item of a provider reference list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceItem {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
}
