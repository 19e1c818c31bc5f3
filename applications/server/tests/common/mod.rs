//! Common test utilities and fixtures
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use replay_core::{Provider, ProviderRecord, ReferenceItem, ReferenceKind};
use replay_providers::{MetadataProvider, ProviderError, ProviderRegistry, SearchQuery};
use replay_server::{create_router, AppState};
use replay_storage::LocalCatalog;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

/// Router over a real SQLite catalog in a temporary directory
pub struct TestApp {
    pub router: Router,
    pub catalog: Arc<LocalCatalog>,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new(providers: ProviderRegistry) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let url = format!("sqlite://{}", temp_dir.path().join("library.db").display());

        let catalog = Arc::new(
            replay_storage::open_catalog(&url, 5)
                .await
                .expect("Failed to open catalog"),
        );
        let app_state = AppState::new(catalog.clone(), providers);

        Self {
            router: create_router(app_state),
            catalog,
            _temp_dir: temp_dir,
        }
    }

    /// Send a request and decode the JSON response body
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if body_bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap()
        };

        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.send(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        self.send(json_request("POST", uri, body.to_string())).await
    }

    pub async fn put_json(&self, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        self.send(json_request("PUT", uri, body.to_string())).await
    }

    pub async fn post_empty(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }
}

pub fn json_request(method: &str, uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

/// In-memory provider serving a fixed set of records
pub struct FakeProvider {
    provider: Provider,
    records: Vec<ProviderRecord>,
    references: Vec<ReferenceItem>,
}

impl FakeProvider {
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            records: Vec::new(),
            references: Vec::new(),
        }
    }

    pub fn with_record(mut self, record: ProviderRecord) -> Self {
        self.records.push(record);
        self
    }

    pub fn with_reference(mut self, item: ReferenceItem) -> Self {
        self.references.push(item);
        self
    }
}

#[async_trait]
impl MetadataProvider for FakeProvider {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<ProviderRecord>, ProviderError> {
        let needle = query.text.to_lowercase();
        Ok(self
            .records
            .iter()
            .filter(|r| r.title.to_lowercase().contains(&needle))
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .cloned()
            .collect())
    }

    async fn fetch(&self, external_id: &str) -> Result<ProviderRecord, ProviderError> {
        self.records
            .iter()
            .find(|r| r.external_id == external_id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound {
                provider: self.provider,
                id: external_id.to_string(),
            })
    }

    async fn reference(&self, _kind: ReferenceKind) -> Result<Vec<ReferenceItem>, ProviderError> {
        Ok(self.references.clone())
    }
}

pub mod fixtures {
    use chrono::NaiveDate;
    use replay_core::{Provider, ProviderRecord};

    pub fn chrono_trigger() -> ProviderRecord {
        let mut record = ProviderRecord::new(Provider::Igdb, "1942", "Chrono Trigger");
        record.release_date = NaiveDate::from_ymd_opt(1995, 3, 11);
        record.platforms = vec!["SNES".to_string()];
        record.genres = vec!["Role-playing (RPG)".to_string()];
        record.developers = vec!["Square".to_string()];
        record
    }

    pub fn secret_of_mana() -> ProviderRecord {
        let mut record = ProviderRecord::new(Provider::Igdb, "2050", "Secret of Mana");
        record.platforms = vec!["SNES".to_string()];
        record
    }
}
