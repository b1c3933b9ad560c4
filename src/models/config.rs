//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Local cache settings
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Apply overrides from environment-style lookups.
    ///
    /// Takes a lookup function rather than reading the process environment
    /// directly so callers (and tests) decide where values come from.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(env::API_BASE_URL) {
            if !base_url.trim().is_empty() {
                self.api.base_url = base_url.trim().to_string();
            }
        }
        if let Some(raw) = lookup(env::API_TIMEOUT_MS) {
            match raw.trim().parse() {
                Ok(ms) => self.api.timeout_ms = ms,
                Err(_) => log::warn!("Ignoring {}={:?}: not a number", env::API_TIMEOUT_MS, raw),
            }
        }
        if let Some(raw) = lookup(env::CACHE_TTL_SECS) {
            match raw.trim().parse() {
                Ok(secs) => self.cache.ttl_secs = secs,
                Err(_) => log::warn!("Ignoring {}={:?}: not a number", env::CACHE_TTL_SECS, raw),
            }
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        let base = Url::parse(&self.api.base_url)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(AppError::validation(format!(
                "api.base_url must be http(s), got {}",
                base.scheme()
            )));
        }
        if base.cannot_be_a_base() {
            return Err(AppError::validation("api.base_url cannot be a base URL"));
        }
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::validation("api.user_agent is empty"));
        }
        if self.api.timeout_ms == 0 {
            return Err(AppError::validation("api.timeout_ms must be > 0"));
        }
        if self.cache.ttl_secs == 0 {
            return Err(AppError::validation("cache.ttl_secs must be > 0"));
        }
        if self.cache.dir.as_os_str().is_empty() {
            return Err(AppError::validation("cache.dir is empty"));
        }
        Ok(())
    }
}

/// Environment variable names recognised by [`Config::apply_overrides`].
pub mod env {
    pub const API_BASE_URL: &str = "LEETTRACK_API_BASE_URL";
    pub const API_TIMEOUT_MS: &str = "LEETTRACK_API_TIMEOUT_MS";
    pub const CACHE_TTL_SECS: &str = "LEETTRACK_CACHE_TTL_SECS";
}

/// Upstream API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL the endpoints are appended to
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(default = "defaults::timeout_ms")]
    pub timeout_ms: u64,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            timeout_ms: defaults::timeout_ms(),
            user_agent: defaults::user_agent(),
        }
    }
}

/// Local cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Freshness window in seconds
    #[serde(default = "defaults::ttl_secs")]
    pub ttl_secs: u64,

    /// Cache directory, relative to the data directory unless absolute
    #[serde(default = "defaults::cache_dir")]
    pub dir: PathBuf,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Resolve the cache directory against a data directory.
    pub fn dir_in(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.dir)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: defaults::ttl_secs(),
            dir: defaults::cache_dir(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // API defaults
    pub fn base_url() -> String {
        "http://localhost:3001/api".into()
    }
    pub fn timeout_ms() -> u64 {
        10_000
    }
    pub fn user_agent() -> String {
        concat!("leettrack/", env!("CARGO_PKG_VERSION")).into()
    }

    // Cache defaults
    pub fn ttl_secs() -> u64 {
        5 * 60
    }
    pub fn cache_dir() -> PathBuf {
        PathBuf::from("cache")
    }
}
