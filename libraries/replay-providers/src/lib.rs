//! Retro Replay Providers
//!
//! HTTP clients for the external game-metadata providers.
//!
//! # Features
//!
//! - **IGDB**: Twitch client-credentials token exchange with transparent
//!   refresh, Apicalypse queries, reference lists
//! - **MobyGames**: API-key authenticated title search and lookup
//! - **Registry**: only providers with credentials are registered
//!
//! # Example
//!
//! ```ignore
//! use replay_providers::{IgdbClient, IgdbConfig, MetadataProvider, SearchQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let igdb = IgdbClient::new(IgdbConfig::new("client-id", "client-secret"))?;
//!
//!     let results = igdb.search(&SearchQuery::new("chrono trigger")).await?;
//!     for record in results {
//!         println!("{} - {}", record.external_id, record.title);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod error;
mod http;
pub mod igdb;
pub mod mobygames;
mod provider;
mod registry;

pub use error::{ProviderError, Result};
pub use igdb::{IgdbClient, IgdbConfig};
pub use mobygames::{MobyGamesClient, MobyGamesConfig};
pub use provider::{MetadataProvider, SearchQuery};
pub use registry::ProviderRegistry;
