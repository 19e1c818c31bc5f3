//! Retro Replay Server Library
//!
//! Game library HTTP API: catalog CRUD plus search and import from external
//! metadata providers.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod router;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use router::create_router;
pub use services::Importer;
pub use state::AppState;
