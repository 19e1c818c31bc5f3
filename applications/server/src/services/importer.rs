//! Import reconciler
//!
//! Turns a provider record into a new library entry. Imports never
//! deduplicate: importing the same provider id twice yields two entries.

use replay_core::{
    CatalogStore, GameStatus, LibraryEntry, NewGame, Provider, ProviderRecord, ReplayError, Result,
};
use replay_providers::ProviderRegistry;
use std::sync::Arc;

pub struct Importer {
    catalog: Arc<dyn CatalogStore>,
    providers: ProviderRegistry,
}

impl Importer {
    pub fn new(catalog: Arc<dyn CatalogStore>, providers: ProviderRegistry) -> Self {
        Self { catalog, providers }
    }

    /// Fetch `external_id` from `provider` and persist it as a new entry.
    ///
    /// The catalog is only written after a successful fetch, so a failed
    /// import leaves it untouched.
    pub async fn import(&self, provider: Provider, external_id: &str) -> Result<LibraryEntry> {
        let client = self.providers.get(provider)?;
        let record = client.fetch(external_id).await?;

        if record.title.trim().is_empty() {
            return Err(ReplayError::provider_unavailable(format!(
                "{} returned a record without a title",
                provider.display_name()
            )));
        }

        let entry = self.catalog.create_game(new_game_from_record(record)).await?;

        tracing::info!(
            provider = %provider,
            external_id = %external_id,
            id = %entry.id,
            title = %entry.title,
            "Imported game"
        );

        Ok(entry)
    }
}

/// Map a provider record onto a new entry in the default status.
pub fn new_game_from_record(record: ProviderRecord) -> NewGame {
    NewGame {
        title: record.title,
        summary: record.summary,
        release_date: record.release_date,
        cover_image: record.cover_image,
        platforms: record.platforms,
        genres: record.genres,
        developers: record.developers,
        publishers: record.publishers,
        rating: record.rating,
        status: GameStatus::WantToPlay,
        notes: None,
        source_provider: Some(record.provider),
        source_id: Some(record.external_id),
    }
}
