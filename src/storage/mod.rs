//! Key-value storage backends for the local cache.
//!
//! The cache only needs a string-keyed store of string values; each backend
//! decides where those strings live.
//!
//! ## Layout (file backend)
//!
//! ```text
//! {data_dir}/cache/
//! ├── leettrack_questions               # JSON array of questions
//! └── leettrack_questions_timestamp     # capture time, epoch millis
//! ```

pub mod local;
pub mod memory;

use async_trait::async_trait;

use crate::error::Result;

// Re-export for convenience
pub use local::LocalStorage;
pub use memory::MemoryStore;

/// Trait for cache storage backends.
///
/// Absence is not an error: `get` on a missing key returns `Ok(None)` and
/// `remove` on a missing key succeeds.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key` if present.
    async fn remove(&self, key: &str) -> Result<()>;
}
