/// Business services
pub mod importer;

pub use importer::{new_game_from_record, Importer};
