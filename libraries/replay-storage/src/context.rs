use crate::games;
use async_trait::async_trait;
use replay_core::{error::Result, storage::CatalogStore, types::*, ReplayError};
use sqlx::SqlitePool;

/// Catalog store backed by a local `SQLite` database
#[derive(Clone)]
pub struct LocalCatalog {
    pool: SqlitePool,
}

impl LocalCatalog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl CatalogStore for LocalCatalog {
    async fn create_game(&self, game: NewGame) -> Result<LibraryEntry> {
        let entry = games::create(&self.pool, game).await?;
        tracing::debug!(id = %entry.id, title = %entry.title, "Created library entry");
        Ok(entry)
    }

    async fn get_game(&self, id: &GameId) -> Result<LibraryEntry> {
        games::get_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| ReplayError::not_found("Game", id.as_str()))
    }

    async fn list_games(&self, filter: &ListFilter) -> Result<Vec<LibraryEntry>> {
        games::list(&self.pool, filter).await
    }

    async fn update_game(&self, id: &GameId, update: GameUpdate) -> Result<LibraryEntry> {
        games::update(&self.pool, id, update)
            .await?
            .ok_or_else(|| ReplayError::not_found("Game", id.as_str()))
    }

    async fn delete_game(&self, id: &GameId) -> Result<()> {
        if games::delete(&self.pool, id).await? {
            tracing::debug!(id = %id, "Deleted library entry");
            Ok(())
        } else {
            Err(ReplayError::not_found("Game", id.as_str()))
        }
    }

    async fn stats(&self) -> Result<LibraryStats> {
        games::stats(&self.pool).await
    }
}
