mod game;
mod ids;
mod provider;
mod stats;

pub use game::{GameStatus, GameUpdate, LibraryEntry, ListFilter, NewGame};
pub use ids::GameId;
pub use provider::{Provider, ProviderRecord, ReferenceItem, ReferenceKind};
pub use stats::LibraryStats;
