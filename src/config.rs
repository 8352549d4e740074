//! Static configuration: search endpoint, page size, debounce interval

use crate::{CatsearchError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_PAGE_SIZE: u32 = 12;
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

/// Upper bound accepted by the search backend per page
pub const MAX_PAGE_SIZE: u32 = 250;

/// Search endpoint settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    /// Root of the search endpoint (`{base_url}/search`)
    pub base_url: String,
    /// Items per page
    pub page_size: u32,
    /// Stabilization delay before a typed query is searched
    pub debounce_ms: u64,
    /// Query searched on startup; empty means the whole catalog
    pub initial_query: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            initial_query: String::new(),
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Check ranges and normalize the base URL
    pub fn validate(mut self) -> Result<Self> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(CatsearchError::Config(format!(
                "pageSize must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }

        let trimmed = self.base_url.trim().trim_end_matches('/').to_string();
        let url = reqwest::Url::parse(&trimmed)
            .map_err(|e| CatsearchError::Config(format!("baseUrl '{}': {}", self.base_url, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(CatsearchError::Config(format!(
                "baseUrl must be http or https, got '{}'",
                url.scheme()
            )));
        }
        self.base_url = trimmed;
        Ok(self)
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub search: SearchConfig,
    /// Log file location; defaults to `catsearch.log` next to the executable
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Apply command-line overrides on top of file values
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(base_url) = overrides.base_url {
            self.search.base_url = base_url;
        }
        if let Some(page_size) = overrides.page_size {
            self.search.page_size = page_size;
        }
        if let Some(debounce_ms) = overrides.debounce_ms {
            self.search.debounce_ms = debounce_ms;
        }
        if let Some(query) = overrides.initial_query {
            self.search.initial_query = query;
        }
        if let Some(log_file) = overrides.log_file {
            self.log_file = Some(log_file);
        }
        self
    }

    pub fn validate(mut self) -> Result<Self> {
        self.search = self.search.validate()?;
        Ok(self)
    }
}

/// Values given on the command line; `None` keeps the file/default value
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub page_size: Option<u32>,
    pub debounce_ms: Option<u64>,
    pub initial_query: Option<String>,
    pub log_file: Option<PathBuf>,
}
