//! Retro Replay Core
//!
//! Domain types, the catalog storage trait and error handling shared by every
//! Retro Replay crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `LibraryEntry`, `GameStatus`, `ProviderRecord`, etc.
//! - **Core Traits**: `CatalogStore`
//! - **Error Handling**: Unified `ReplayError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use replay_core::types::{GameStatus, NewGame};
//!
//! let game = NewGame::titled("Chrono Trigger");
//! assert_eq!(game.status, GameStatus::WantToPlay);
//! assert!(game.validate().is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{ReplayError, Result};
pub use storage::CatalogStore;

pub use types::{
    GameId, GameStatus, GameUpdate, LibraryEntry, LibraryStats, ListFilter, NewGame, Provider,
    ProviderRecord, ReferenceItem, ReferenceKind,
};
