//! Retro Replay Storage
//!
//! `SQLite` catalog store for Retro Replay.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each feature owns its own queries (`games`)
//! - **Embedded Migrations**: the schema ships inside the binary
//! - **Trait Boundary**: `LocalCatalog` implements `replay_core::CatalogStore`
//!
//! # Example
//!
//! ```rust,no_run
//! use replay_core::{CatalogStore, NewGame};
//! use replay_storage::{create_pool, run_migrations, LocalCatalog};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://game_library.db", 5).await?;
//! run_migrations(&pool).await?;
//!
//! let catalog = LocalCatalog::new(pool);
//! let entry = catalog.create_game(NewGame::titled("Chrono Trigger")).await?;
//! println!("Created {}", entry.id);
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod games;

pub use context::LocalCatalog;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| StorageError::Migration(e.to_string()))
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `sqlite://game_library.db`)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns an error if the URL is malformed or the connection fails
pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(url = %database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::Connection(format!("{}: {}", database_url, e)))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    tracing::debug!("SQLite pool created");

    Ok(pool)
}

/// Connect, migrate and wrap the pool in a catalog
pub async fn open_catalog(
    database_url: &str,
    max_connections: u32,
) -> Result<LocalCatalog, StorageError> {
    let pool = create_pool(database_url, max_connections).await?;
    run_migrations(&pool).await?;
    tracing::info!("Catalog database ready");
    Ok(LocalCatalog::new(pool))
}
