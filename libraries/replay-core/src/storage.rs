//! Storage trait for the game catalog

use crate::error::Result;
use crate::types::{GameId, GameUpdate, LibraryEntry, LibraryStats, ListFilter, NewGame};
use async_trait::async_trait;

/// Durable keyed collection of library entries
///
/// Every operation touches at most one entry and is atomic at that
/// granularity. Missing entries are reported as `ReplayError::NotFound`.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Persist a new entry, assigning its id and timestamps
    async fn create_game(&self, game: NewGame) -> Result<LibraryEntry>;

    /// Get an entry by id
    async fn get_game(&self, id: &GameId) -> Result<LibraryEntry>;

    /// List entries matching the filter, in insertion order
    async fn list_games(&self, filter: &ListFilter) -> Result<Vec<LibraryEntry>>;

    /// Apply the present fields of `update` to an entry
    async fn update_game(&self, id: &GameId, update: GameUpdate) -> Result<LibraryEntry>;

    /// Delete an entry
    async fn delete_game(&self, id: &GameId) -> Result<()>;

    /// Counts grouped by status and platform
    async fn stats(&self) -> Result<LibraryStats>;
}
