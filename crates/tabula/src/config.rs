//! Client configuration.
//!
//! Defaults suit a local backend. Values can come from a TOML file, and the
//! API base URL can always be overridden through `TABULA_API_URL`:
//!
//! ```toml
//! api_base_url = "https://admin.example.com"
//! search_debounce_ms = 300
//! page_size = 20
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tabula_net::http::{HttpClientBuilder, RestApiClient};
use tabula_net::{NetworkError, UsersClient};

use crate::error::{ConfigError, ModelError, StoreError};
use crate::model::{Collation, DEFAULT_LOCALE};
use crate::store::JsonFileStorage;

/// Environment variable overriding [`ClientConfig::api_base_url`].
pub const API_URL_ENV: &str = "TABULA_API_URL";

/// Settings shared by the controllers and the API client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend origin; endpoint paths are appended to it.
    pub api_base_url: String,
    /// Locale for collation and date display.
    pub locale: String,
    /// Quiet period before a search term is sent.
    pub search_debounce_ms: u64,
    /// Rows per page in the remote user list.
    pub page_size: u32,
    /// Rows per page in the local table example.
    pub table_page_size: usize,
    /// Per-request timeout.
    pub request_timeout_secs: u64,
    /// Where UI preferences are stored. `None` uses the platform data dir.
    pub preferences_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            search_debounce_ms: 500,
            page_size: 10,
            table_page_size: 5,
            request_timeout_secs: 30,
            preferences_path: None,
        }
    }
}

impl ClientConfig {
    /// Defaults plus environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default()
            .with_overrides(|key| std::env::var(key).ok())
            .validated()
    }

    /// Load from a TOML file, then apply environment overrides.
    ///
    /// Missing keys keep their defaults.
    pub fn load_toml(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(target: "tabula::store", path = %path.display(), "loaded client config");
        config
            .with_overrides(|key| std::env::var(key).ok())
            .validated()
    }

    /// Apply overrides from `lookup`, which maps variable names to values.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(API_URL_ENV).filter(|url| !url.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
        self
    }

    /// Check ranges and formats.
    pub fn validated(self) -> Result<Self, ConfigError> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            return Err(ConfigError::invalid_value(
                "api_base_url",
                format!("expected an http(s) URL, got '{}'", self.api_base_url),
            ));
        }
        if self.page_size == 0 {
            return Err(ConfigError::invalid_value("page_size", "must be positive"));
        }
        if self.table_page_size == 0 {
            return Err(ConfigError::invalid_value("table_page_size", "must be positive"));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::invalid_value(
                "request_timeout_secs",
                "must be positive",
            ));
        }
        Ok(self)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// A JSON REST client for the configured backend.
    pub fn rest_client(&self) -> Result<RestApiClient, NetworkError> {
        RestApiClient::builder(&self.api_base_url)
            .http_client_builder(HttpClientBuilder::new().request_timeout(self.request_timeout()))
            .json_api()
            .build()
    }

    /// A users API client for the configured backend.
    pub fn users_client(&self) -> Result<UsersClient, NetworkError> {
        Ok(UsersClient::new(self.rest_client()?))
    }

    /// Collation for the configured locale.
    pub fn collation(&self) -> Result<Collation, ModelError> {
        Collation::new(&self.locale)
    }

    /// Preference storage at `preferences_path`, or in the platform data
    /// directory when unset.
    pub fn preference_storage(&self) -> Result<JsonFileStorage, StoreError> {
        match &self.preferences_path {
            Some(path) => JsonFileStorage::open(path.clone()),
            None => JsonFileStorage::in_data_dir(),
        }
    }
}
