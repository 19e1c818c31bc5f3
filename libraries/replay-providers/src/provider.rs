use crate::error::{ProviderError, Result};
use async_trait::async_trait;
use replay_core::{Provider, ProviderRecord, ReferenceItem, ReferenceKind};

/// A remote source of game metadata.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Which provider this client talks to
    fn provider(&self) -> Provider;

    /// Search by title. Results are in provider order.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<ProviderRecord>>;

    /// Fetch one record by the provider's own id.
    async fn fetch(&self, external_id: &str) -> Result<ProviderRecord>;

    /// Fetch a reference list (platforms, genres, ...).
    async fn reference(&self, kind: ReferenceKind) -> Result<Vec<ReferenceItem>> {
        Err(ProviderError::Unsupported {
            provider: self.provider(),
            what: format!("{} reference list", kind),
        })
    }
}

/// Title search parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub limit: u32,
    pub offset: u32,
    /// Restrict results to one provider platform id (IGDB only)
    pub platform_id: Option<u64>,
}

impl SearchQuery {
    pub const DEFAULT_LIMIT: u32 = 20;
    pub const MAX_LIMIT: u32 = 50;

    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
            platform_id: None,
        }
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn with_platform(mut self, platform_id: u64) -> Self {
        self.platform_id = Some(platform_id);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(ProviderError::InvalidInput(
                "search query must not be empty".to_string(),
            ));
        }
        if self.limit == 0 || self.limit > Self::MAX_LIMIT {
            return Err(ProviderError::InvalidInput(format!(
                "limit must be between 1 and {}",
                Self::MAX_LIMIT
            )));
        }
        Ok(())
    }
}

/// Parse a numeric provider id.
pub(crate) fn numeric_id(provider: Provider, external_id: &str) -> Result<u64> {
    external_id.trim().parse::<u64>().map_err(|_| {
        ProviderError::InvalidInput(format!(
            "{} ids are numeric, got '{}'",
            provider.display_name(),
            external_id
        ))
    })
}
