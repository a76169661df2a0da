//! Configuration for both pipeline stages
//!
//! Configuration is read from an optional YAML file; every field has a
//! default so an empty document is valid. Credentials and storage locations
//! can be overridden from the environment.

use crate::auth::{AuthConfig, Location};
use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::DedupPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Env var holding the catalog API key
pub const ENV_API_KEY: &str = "TMDB_API_KEY";
/// Env var holding a catalog bearer (read access) token
pub const ENV_BEARER_TOKEN: &str = "TMDB_BEARER_TOKEN";
/// Env var overriding the catalog base URL
pub const ENV_API_BASE_URL: &str = "MOVIE_INSIGHTS_API_BASE_URL";
/// Env var overriding the table destination
pub const ENV_TABLE_URL: &str = "MOVIE_INSIGHTS_TABLE_URL";
/// Env var overriding the chart destination
pub const ENV_CHARTS_URL: &str = "MOVIE_INSIGHTS_CHARTS_URL";
/// Env var pointing at a TTF/OTF font for chart text
pub const ENV_FONT: &str = "MOVIE_INSIGHTS_FONT";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Movie catalog API settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Ingestor settings
    #[serde(default)]
    pub ingest: IngestConfig,

    /// Object storage locations
    #[serde(default)]
    pub storage: StorageConfig,

    /// Chart rendering settings
    #[serde(default)]
    pub charts: ChartsConfig,
}

impl AppConfig {
    /// Load config from an optional YAML file, then apply env overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse config from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Apply overrides from an environment lookup
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.catalog.api_key = Some(key);
        }
        if let Some(token) = get(ENV_BEARER_TOKEN) {
            self.catalog.bearer_token = Some(token);
        }
        if let Some(url) = get(ENV_API_BASE_URL) {
            self.catalog.base_url = url;
        }
        if let Some(url) = get(ENV_TABLE_URL) {
            self.storage.table_url = url;
        }
        if let Some(url) = get(ENV_CHARTS_URL) {
            self.storage.charts_url = url;
        }
        if let Some(font) = get(ENV_FONT) {
            self.charts.font_path = Some(PathBuf::from(font));
        }
    }

    /// Validate settings needed by the ingestor
    pub fn validate_catalog(&self) -> Result<()> {
        if self.catalog.base_url.trim().is_empty() {
            return Err(Error::missing_field("catalog.base_url"));
        }
        url::Url::parse(&self.catalog.base_url)?;
        url::Url::parse(&self.catalog.image_base_url)?;

        if self.catalog.api_key.is_none() && self.catalog.bearer_token.is_none() {
            return Err(Error::missing_field("catalog.api_key"));
        }
        if self.ingest.min_movies == 0 {
            return Err(Error::invalid_value(
                "ingest.min_movies",
                "must be greater than zero",
            ));
        }
        if self.ingest.max_pages == 0 {
            return Err(Error::invalid_value(
                "ingest.max_pages",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Validate settings needed by both stages' storage access
    pub fn validate_storage(&self) -> Result<()> {
        if self.storage.table_url.trim().is_empty() {
            return Err(Error::missing_field("storage.table_url"));
        }
        if self.storage.table_key.trim().is_empty() {
            return Err(Error::missing_field("storage.table_key"));
        }
        if self.storage.charts_url.trim().is_empty() {
            return Err(Error::missing_field("storage.charts_url"));
        }
        Ok(())
    }
}

// ============================================================================
// Catalog Config
// ============================================================================

/// Movie catalog API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent as the `api_key` query parameter
    #[serde(default)]
    pub api_key: Option<String>,

    /// Bearer token, used instead of the API key when set
    #[serde(default)]
    pub bearer_token: Option<String>,

    /// Value of the `language` query parameter
    #[serde(default = "default_language")]
    pub language: String,

    /// Prefix joined with each movie's poster path
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Client-side request rate
    #[serde(default = "default_rps")]
    pub requests_per_second: u32,

    /// Burst size of the rate limiter
    #[serde(default = "default_rps")]
    pub burst_size: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            bearer_token: None,
            language: default_language(),
            image_base_url: default_image_base_url(),
            timeout_seconds: default_timeout(),
            requests_per_second: default_rps(),
            burst_size: default_rps(),
        }
    }
}

impl CatalogConfig {
    /// Build the HTTP client config for the catalog
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig::builder()
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(self.timeout_seconds))
            .rate_limit(RateLimiterConfig::new(
                self.requests_per_second,
                self.burst_size,
            ))
            .build()
    }

    /// Build the auth config; a bearer token takes precedence over the API key
    pub fn auth_config(&self) -> AuthConfig {
        if let Some(token) = &self.bearer_token {
            return AuthConfig::Bearer {
                token: token.clone(),
            };
        }
        match &self.api_key {
            Some(key) => AuthConfig::ApiKey {
                location: Location::Query,
                name: "api_key".to_string(),
                value: key.clone(),
            },
            None => AuthConfig::None,
        }
    }
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_rps() -> u32 {
    10
}

// ============================================================================
// Ingest Config
// ============================================================================

/// Ingestor settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Number of unique movies to retain when the trigger gives none
    #[serde(default = "default_min_movies")]
    pub min_movies: usize,

    /// Hard cap on discovery pages requested in one run
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Which duplicate wins when ids repeat across pages
    #[serde(default)]
    pub dedup: DedupPolicy,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            min_movies: default_min_movies(),
            max_pages: default_max_pages(),
            dedup: DedupPolicy::default(),
        }
    }
}

fn default_min_movies() -> usize {
    30
}

fn default_max_pages() -> u32 {
    500
}

// ============================================================================
// Storage Config
// ============================================================================

/// Object storage locations shared by the two stages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Destination URL of the movie table
    #[serde(default = "default_table_url")]
    pub table_url: String,

    /// Object key of the movie table
    #[serde(default = "default_table_key")]
    pub table_key: String,

    /// Destination URL of the rendered charts
    #[serde(default = "default_charts_url")]
    pub charts_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            table_url: default_table_url(),
            table_key: default_table_key(),
            charts_url: default_charts_url(),
        }
    }
}

fn default_table_url() -> String {
    "s3://movie-s3-1".to_string()
}

fn default_table_key() -> String {
    "top_movies.csv".to_string()
}

fn default_charts_url() -> String {
    "s3://movie-visualizations-output".to_string()
}

// ============================================================================
// Charts Config
// ============================================================================

/// Chart rendering settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartsConfig {
    /// Font file used for chart text; system fonts are searched when unset
    #[serde(default)]
    pub font_path: Option<PathBuf>,
}
