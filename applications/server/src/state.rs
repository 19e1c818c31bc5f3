/// Shared application state
use crate::services::Importer;
use replay_core::CatalogStore;
use replay_providers::ProviderRegistry;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogStore>,
    pub providers: ProviderRegistry,
    pub importer: Arc<Importer>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogStore>, providers: ProviderRegistry) -> Self {
        let importer = Arc::new(Importer::new(Arc::clone(&catalog), providers.clone()));
        Self {
            catalog,
            providers,
            importer,
        }
    }
}
