// src/config.rs

//! Configuration loading utilities.
//!
//! Resolves the data directory layout and assembles a ready-to-use
//! [`QuestionService`] from the configuration found there.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cache::QuestionCache;
use crate::error::Result;
use crate::models::Config;
use crate::services::QuestionService;
use crate::storage::{CacheStore, LocalStorage, MemoryStore};
use crate::transport::HttpTransport;

/// Default data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = ".leettrack";

/// Path of the config file inside a data directory.
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

/// Load configuration from `{data_dir}/config.toml`, then apply
/// environment overrides.
///
/// Falls back to defaults if the file is missing or unreadable.
pub fn load_config(data_dir: &Path) -> Config {
    let path = config_path(data_dir);
    let mut config = if path.exists() {
        Config::load_or_default(&path)
    } else {
        log::debug!("No config at {}, using defaults", path.display());
        Config::default()
    };
    config.apply_overrides(|key| std::env::var(key).ok());
    config
}

/// Where the cache snapshot is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    /// Files under the configured cache directory
    Disk,
    /// Process memory only
    Memory,
}

/// Build a service from configuration.
pub fn build_service(config: &Config, data_dir: &Path, backend: CacheBackend) -> Result<QuestionService> {
    config.validate()?;

    let store: Arc<dyn CacheStore> = match backend {
        CacheBackend::Disk => Arc::new(LocalStorage::new(config.cache.dir_in(data_dir))),
        CacheBackend::Memory => Arc::new(MemoryStore::new()),
    };
    let cache = QuestionCache::with_ttl(store, config.cache.ttl());
    let transport = Arc::new(HttpTransport::from_config(&config.api)?);

    QuestionService::new(transport, cache, &config.api.base_url)
}
