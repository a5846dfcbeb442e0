//! Configuration for filmcrawl.
//!
//! Settings come from built-in defaults, an optional TOML file, and
//! `FILMCRAWL_*` environment overrides, applied in that order.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{CrawlError, Result};

/// Upper bound on the number of items a single crawl will emit.
pub const DEFAULT_MAX_RESULTS: usize = 1000;

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "parsed_imdb.tsv";

/// Application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Site root; search and title paths are resolved against it.
    pub base_url: String,
    /// Path of the search form and listing pages.
    pub search_path: String,
    /// Path prefix of detail documents.
    pub title_path: String,
    /// User agent configuration.
    /// - None: Use default filmcrawl user agent
    /// - "impersonate": Randomly select from real browser user agents
    /// - Any other string: Use as custom user agent
    pub user_agent: Option<String>,
    /// Request timeout in seconds.
    pub request_timeout: u64,
    /// Delay after each request in milliseconds.
    pub request_delay_ms: u64,
    /// Clamp applied to the resolved result count.
    pub max_results: usize,
    /// Output TSV path.
    pub output: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "https://www.imdb.com/".to_string(),
            search_path: "search/title".to_string(),
            title_path: "title/".to_string(),
            user_agent: None,
            request_timeout: 30,
            request_delay_ms: 0,
            max_results: DEFAULT_MAX_RESULTS,
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl Settings {
    /// Load settings from an optional TOML file, then apply env overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings = match path {
            Some(path) => Self::load_from_path(path)?,
            None => Self::default(),
        };
        settings.with_env_overrides()
    }

    /// Load settings from a specific TOML file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CrawlError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        toml::from_str(&contents)
            .map_err(|e| CrawlError::Config(format!("Failed to parse TOML config: {}", e)))
    }

    /// Apply `FILMCRAWL_*` environment variable overrides.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Some(url) = env_var("FILMCRAWL_BASE_URL") {
            self.base_url = url;
        }
        if let Some(ua) = env_var("FILMCRAWL_USER_AGENT") {
            self.user_agent = Some(ua);
        }
        if let Some(delay) = env_var("FILMCRAWL_REQUEST_DELAY_MS") {
            self.request_delay_ms = delay.parse().map_err(|_| {
                CrawlError::Config(format!(
                    "FILMCRAWL_REQUEST_DELAY_MS must be an integer, got {}",
                    delay
                ))
            })?;
        }
        Ok(self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    /// Resolved site URLs used by the engine.
    pub fn site(&self) -> Result<SiteUrls> {
        SiteUrls::new(&self.base_url, &self.search_path, &self.title_path)
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

/// Absolute endpoints of the target site.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteUrls {
    /// Search form and listing pages.
    pub search: String,
    /// Prefix that a title id is appended to.
    pub title_root: String,
}

impl SiteUrls {
    pub fn new(base_url: &str, search_path: &str, title_path: &str) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| CrawlError::Config(format!("Invalid base URL {}: {}", base_url, e)))?;
        let join = |path: &str| {
            base.join(path)
                .map(String::from)
                .map_err(|e| CrawlError::Config(format!("Invalid path {}: {}", path, e)))
        };
        Ok(Self {
            search: join(search_path)?,
            title_root: join(title_path)?,
        })
    }

    /// Detail document URL for a title id.
    pub fn title_url(&self, title_id: &str) -> String {
        format!("{}{}", self.title_root, title_id)
    }
}
