/// Server configuration
use crate::error::{Result, ServerError};
use replay_providers::{
    igdb, mobygames, IgdbClient, IgdbConfig, MobyGamesClient, MobyGamesConfig, ProviderRegistry,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub providers: ProviderSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Required, there is no default database location
    #[serde(default)]
    pub database_url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderSettings {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub igdb: IgdbSettings,

    #[serde(default)]
    pub mobygames: MobyGamesSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IgdbSettings {
    #[serde(default)]
    pub client_id: String,

    #[serde(default)]
    pub client_secret: String,

    #[serde(default = "default_igdb_api_url")]
    pub api_url: String,

    #[serde(default = "default_igdb_token_url")]
    pub token_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MobyGamesSettings {
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_mobygames_api_url")]
    pub api_url: String,
}

impl ServerConfig {
    /// Load configuration from a TOML file and the environment.
    ///
    /// An explicit `path` must exist; otherwise `config.toml` in the working
    /// directory is used when present. Variables prefixed with `REPLAY_`
    /// override file values, with `__` separating sections
    /// (`REPLAY_STORAGE__DATABASE_URL`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = PathBuf::from("config.toml");
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("REPLAY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.storage.database_url.trim().is_empty() {
            return Err(ServerError::Config(
                "Database URL is required (set REPLAY_STORAGE__DATABASE_URL)".to_string(),
            ));
        }

        if self.server.host.parse::<std::net::IpAddr>().is_err() {
            return Err(ServerError::Config(format!(
                "Invalid listen address: {}",
                self.server.host
            )));
        }

        if self.providers.timeout_secs == 0 {
            return Err(ServerError::Config(
                "Provider timeout must be at least one second".to_string(),
            ));
        }

        Ok(())
    }
}

impl ProviderSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build a client for every provider with credentials. Providers without
    /// credentials stay disabled.
    pub fn build_registry(&self) -> Result<ProviderRegistry> {
        let mut registry = ProviderRegistry::new();

        if self.igdb.is_configured() {
            let config = IgdbConfig::new(&self.igdb.client_id, &self.igdb.client_secret)
                .with_api_url(&self.igdb.api_url)
                .with_token_url(&self.igdb.token_url)
                .with_timeout(self.timeout());
            let client = IgdbClient::new(config).map_err(|e| ServerError::Config(e.to_string()))?;
            registry.register(Arc::new(client));
            tracing::info!("IGDB provider enabled");
        } else {
            tracing::warn!("IGDB credentials not set, provider disabled");
        }

        if self.mobygames.is_configured() {
            let config = MobyGamesConfig::new(&self.mobygames.api_key)
                .with_api_url(&self.mobygames.api_url)
                .with_timeout(self.timeout());
            let client =
                MobyGamesClient::new(config).map_err(|e| ServerError::Config(e.to_string()))?;
            registry.register(Arc::new(client));
            tracing::info!("MobyGames provider enabled");
        } else {
            tracing::warn!("MobyGames API key not set, provider disabled");
        }

        Ok(registry)
    }
}

impl IgdbSettings {
    pub fn is_configured(&self) -> bool {
        !self.client_id.trim().is_empty() && !self.client_secret.trim().is_empty()
    }
}

impl MobyGamesSettings {
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

// Default values
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_connections() -> u32 {
    5
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_igdb_api_url() -> String {
    igdb::DEFAULT_API_URL.to_string()
}

fn default_igdb_token_url() -> String {
    igdb::DEFAULT_TOKEN_URL.to_string()
}

fn default_mobygames_api_url() -> String {
    mobygames::DEFAULT_API_URL.to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_connections: default_max_connections(),
        }
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            igdb: IgdbSettings::default(),
            mobygames: MobyGamesSettings::default(),
        }
    }
}

impl Default for IgdbSettings {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            api_url: default_igdb_api_url(),
            token_url: default_igdb_token_url(),
        }
    }
}

impl Default for MobyGamesSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: default_mobygames_api_url(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use replay_core::Provider;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.storage.max_connections, 5);
        assert_eq!(config.providers.timeout_secs, 30);
        assert_eq!(config.providers.igdb.api_url, "https://api.igdb.com/v4");
        assert!(!config.providers.igdb.is_configured());
        assert!(!config.providers.mobygames.is_configured());
    }

    #[test]
    fn missing_database_url_is_rejected() {
        let err = ServerConfig::default().validate().unwrap_err();
        assert!(matches!(err, ServerError::Config(ref msg) if msg.contains("Database URL")));
    }

    #[test]
    fn invalid_host_is_rejected() {
        let mut config = ServerConfig::default();
        config.storage.database_url = "sqlite://games.db".to_string();
        config.server.host = "not-an-ip".to_string();
        assert!(config.validate().is_err());

        config.server.host = "127.0.0.1".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_from_file() {
        let file = write_config(
            r#"
            [server]
            port = 9001

            [storage]
            database_url = "sqlite://library.db"

            [providers.mobygames]
            api_key = "moby-key"
            "#,
        );

        let config = ServerConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9001);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.database_url, "sqlite://library.db");
        assert!(config.providers.mobygames.is_configured());
        assert_eq!(
            config.providers.mobygames.api_url,
            "https://api.mobygames.com/v1"
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = ServerConfig::load(Some(Path::new("/nonexistent/replay.toml"))).unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn registry_only_contains_configured_providers() {
        let mut settings = ProviderSettings::default();
        settings.mobygames.api_key = "moby-key".to_string();

        let registry = settings.build_registry().unwrap();
        assert!(registry.is_enabled(Provider::MobyGames));
        assert!(!registry.is_enabled(Provider::Igdb));
    }

    #[test]
    fn half_configured_igdb_stays_disabled() {
        let mut settings = ProviderSettings::default();
        settings.igdb.client_id = "client".to_string();

        let registry = settings.build_registry().unwrap();
        assert!(!registry.is_enabled(Provider::Igdb));
    }
}
