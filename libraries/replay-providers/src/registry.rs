use crate::error::{ProviderError, Result};
use crate::provider::MetadataProvider;
use replay_core::Provider;
use std::collections::HashMap;
use std::sync::Arc;

/// The providers that have credentials configured.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<Provider, Arc<dyn MetadataProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a client, replacing any earlier one for the same provider.
    pub fn register(&mut self, client: Arc<dyn MetadataProvider>) {
        self.providers.insert(client.provider(), client);
    }

    #[must_use]
    pub fn with(mut self, client: Arc<dyn MetadataProvider>) -> Self {
        self.register(client);
        self
    }

    /// Look up a provider client. Unconfigured providers are reported as such
    /// rather than as unknown.
    pub fn get(&self, provider: Provider) -> Result<Arc<dyn MetadataProvider>> {
        self.providers
            .get(&provider)
            .cloned()
            .ok_or(ProviderError::NotConfigured(provider))
    }

    pub fn is_enabled(&self, provider: Provider) -> bool {
        self.providers.contains_key(&provider)
    }

    /// Enabled providers in a stable order
    pub fn enabled(&self) -> Vec<Provider> {
        Provider::ALL
            .into_iter()
            .filter(|p| self.is_enabled(*p))
            .collect()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("enabled", &self.enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::SearchQuery;
    use async_trait::async_trait;
    use replay_core::{ProviderRecord, ReferenceKind};

    struct Stub(Provider);

    #[async_trait]
    impl MetadataProvider for Stub {
        fn provider(&self) -> Provider {
            self.0
        }

        async fn search(&self, _query: &SearchQuery) -> Result<Vec<ProviderRecord>> {
            Ok(Vec::new())
        }

        async fn fetch(&self, external_id: &str) -> Result<ProviderRecord> {
            Ok(ProviderRecord::new(self.0, external_id, "Stub"))
        }
    }

    #[test]
    fn unregistered_provider_is_not_configured() {
        let registry = ProviderRegistry::new().with(Arc::new(Stub(Provider::Igdb)));

        assert!(registry.get(Provider::Igdb).is_ok());
        assert!(matches!(
            registry.get(Provider::MobyGames),
            Err(ProviderError::NotConfigured(Provider::MobyGames))
        ));
        assert_eq!(registry.enabled(), vec![Provider::Igdb]);
    }

    #[tokio::test]
    async fn default_reference_is_unsupported() {
        let stub = Stub(Provider::MobyGames);
        let err = stub.reference(ReferenceKind::Genres).await.unwrap_err();
        assert!(matches!(err, ProviderError::Unsupported { .. }));
    }
}
