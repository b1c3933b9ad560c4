// src/cache.rs

//! Time-boxed snapshot of the question collection.
//!
//! The snapshot is stored as two entries in a [`CacheStore`]: the serialized
//! collection and its capture time in epoch milliseconds. Missing or
//! unreadable entries mean "no cache"; they never fail a read.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{ProgressUpdate, Question, QuestionId};
use crate::storage::CacheStore;

/// Key holding the serialized collection.
pub const QUESTIONS_KEY: &str = "leettrack_questions";

/// Key holding the capture timestamp (epoch millis).
pub const TIMESTAMP_KEY: &str = "leettrack_questions_timestamp";

/// Default freshness window.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A cached collection as read back from the store.
#[derive(Debug, Clone)]
pub struct CacheSnapshot {
    pub questions: Vec<Question>,
    /// Time since the snapshot was written; zero if the clock went backwards
    pub age: Duration,
    /// Whether `age` is inside the freshness window
    pub fresh: bool,
}

/// Question cache over a pluggable store.
#[derive(Clone)]
pub struct QuestionCache {
    store: Arc<dyn CacheStore>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl QuestionCache {
    /// Create a cache with the default freshness window and the system clock.
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self::with_ttl(store, DEFAULT_TTL)
    }

    pub fn with_ttl(store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self::with_clock(store, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn CacheStore>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { store, ttl, clock }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Read the snapshot, whatever its age.
    ///
    /// Returns `None` if either entry is missing or cannot be parsed.
    pub async fn read(&self) -> Result<Option<CacheSnapshot>> {
        let Some(raw_questions) = self.store.get(QUESTIONS_KEY).await? else {
            return Ok(None);
        };
        let Some(raw_timestamp) = self.store.get(TIMESTAMP_KEY).await? else {
            return Ok(None);
        };

        let written_ms: i64 = match raw_timestamp.trim().parse() {
            Ok(ms) => ms,
            Err(_) => {
                log::warn!("Ignoring cache: unreadable timestamp {:?}", raw_timestamp);
                return Ok(None);
            }
        };
        let questions: Vec<Question> = match serde_json::from_str(&raw_questions) {
            Ok(questions) => questions,
            Err(e) => {
                log::warn!("Ignoring cache: unreadable question snapshot: {}", e);
                return Ok(None);
            }
        };

        let now_ms = self.clock.now().timestamp_millis();
        let age = Duration::from_millis(now_ms.saturating_sub(written_ms).max(0) as u64);

        Ok(Some(CacheSnapshot {
            questions,
            age,
            fresh: age < self.ttl,
        }))
    }

    /// Read the snapshot only if it is inside the freshness window.
    pub async fn read_fresh(&self) -> Result<Option<CacheSnapshot>> {
        Ok(self.read().await?.filter(|snapshot| snapshot.fresh))
    }

    /// Replace the snapshot and stamp it with the current time.
    pub async fn write(&self, questions: &[Question]) -> Result<()> {
        let json = serde_json::to_string(questions)?;
        self.store.set(QUESTIONS_KEY, &json).await?;
        self.store
            .set(TIMESTAMP_KEY, &self.clock.now().timestamp_millis().to_string())
            .await?;
        log::debug!("Cached {} questions", questions.len());
        Ok(())
    }

    /// Merge `update` into the cached question with `id`.
    ///
    /// Freshness is ignored and the timestamp is left alone. Returns whether
    /// a cached question was patched; an unknown id or empty cache is a no-op.
    pub async fn patch_one(&self, id: &QuestionId, update: &ProgressUpdate) -> Result<bool> {
        let Some(raw) = self.store.get(QUESTIONS_KEY).await? else {
            return Ok(false);
        };
        let mut questions: Vec<Question> = match serde_json::from_str(&raw) {
            Ok(questions) => questions,
            Err(e) => {
                log::warn!("Skipping cache patch: unreadable question snapshot: {}", e);
                return Ok(false);
            }
        };

        let Some(question) = questions.iter_mut().find(|q| q.id.same_as(id)) else {
            return Ok(false);
        };
        question.apply(update);

        let json = serde_json::to_string(&questions)?;
        self.store.set(QUESTIONS_KEY, &json).await?;
        Ok(true)
    }

    /// Drop both cache entries.
    pub async fn clear(&self) -> Result<()> {
        self.store.remove(QUESTIONS_KEY).await?;
        self.store.remove(TIMESTAMP_KEY).await?;
        log::info!("Cache cleared");
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::ManualClock;
    use super::*;
    use crate::fallback::sample_questions;
    use crate::storage::MemoryStore;
    use chrono::TimeZone;

    fn setup() -> (Arc<MemoryStore>, Arc<ManualClock>, QuestionCache) {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap(),
        ));
        let cache = QuestionCache::with_clock(store.clone(), DEFAULT_TTL, clock.clone());
        (store, clock, cache)
    }

    #[tokio::test]
    async fn test_empty_cache_reads_none() {
        let (_, _, cache) = setup();
        assert!(cache.read().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_then_read_is_fresh() {
        let (store, clock, cache) = setup();
        cache.write(&sample_questions()).await.unwrap();
        clock.advance(Duration::from_secs(30));

        let snapshot = cache.read().await.unwrap().unwrap();
        assert!(snapshot.fresh);
        assert_eq!(snapshot.age, Duration::from_secs(30));
        assert_eq!(snapshot.questions, sample_questions());

        let stamp = store.get(TIMESTAMP_KEY).await.unwrap().unwrap();
        assert_eq!(stamp, "1706788800000");
    }

    #[tokio::test]
    async fn test_stale_after_window() {
        let (_, clock, cache) = setup();
        cache.write(&sample_questions()).await.unwrap();
        clock.advance(Duration::from_secs(301));

        let snapshot = cache.read().await.unwrap().unwrap();
        assert!(!snapshot.fresh);
        assert!(cache.read_fresh().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_window_boundary_is_stale() {
        let (_, clock, cache) = setup();
        cache.write(&sample_questions()).await.unwrap();
        clock.advance(DEFAULT_TTL);

        assert!(cache.read_fresh().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_timestamp_means_absent() {
        let (store, _, cache) = setup();
        cache.write(&sample_questions()).await.unwrap();
        store.remove(TIMESTAMP_KEY).await.unwrap();

        assert!(cache.read().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_entries_mean_absent() {
        let (store, _, cache) = setup();
        cache.write(&sample_questions()).await.unwrap();

        store.set(QUESTIONS_KEY, "{not json").await.unwrap();
        assert!(cache.read().await.unwrap().is_none());

        cache.write(&sample_questions()).await.unwrap();
        store.set(TIMESTAMP_KEY, "yesterday").await.unwrap();
        assert!(cache.read().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_patch_one_merges_in_place() {
        let (store, clock, cache) = setup();
        cache.write(&sample_questions()).await.unwrap();
        let stamp_before = store.get(TIMESTAMP_KEY).await.unwrap();
        clock.advance(Duration::from_secs(10));

        let patched = cache
            .patch_one(&QuestionId::Number(1), &ProgressUpdate::solved(true))
            .await
            .unwrap();
        assert!(patched);

        let snapshot = cache.read().await.unwrap().unwrap();
        assert!(snapshot.questions[0].solved);
        assert_eq!(snapshot.questions[1..], sample_questions()[1..]);
        assert_eq!(store.get(TIMESTAMP_KEY).await.unwrap(), stamp_before);
    }

    #[tokio::test]
    async fn test_patch_one_matches_string_ids_from_numeric_input() {
        let (_store, _clock, cache) = setup();
        let mut questions = sample_questions();
        questions[0].id = QuestionId::Text("1".into());
        cache.write(&questions).await.unwrap();

        let patched = cache
            .patch_one(&QuestionId::from("1"), &ProgressUpdate::solved(true))
            .await
            .unwrap();
        assert!(patched);

        let snapshot = cache.read().await.unwrap().unwrap();
        assert!(snapshot.questions[0].solved);
        assert_eq!(snapshot.questions[0].id, QuestionId::Text("1".into()));
    }

    #[tokio::test]
    async fn test_patch_one_ignores_freshness() {
        let (_, clock, cache) = setup();
        cache.write(&sample_questions()).await.unwrap();
        clock.advance(Duration::from_secs(3600));

        assert!(
            cache
                .patch_one(&QuestionId::Number(4), &ProgressUpdate::solved(true))
                .await
                .unwrap()
        );
        let snapshot = cache.read().await.unwrap().unwrap();
        assert!(snapshot.questions[3].solved);
    }

    #[tokio::test]
    async fn test_patch_unknown_id_is_noop() {
        let (_, _, cache) = setup();
        assert!(
            !cache
                .patch_one(&QuestionId::Number(1), &ProgressUpdate::solved(true))
                .await
                .unwrap()
        );

        cache.write(&sample_questions()).await.unwrap();
        assert!(
            !cache
                .patch_one(&QuestionId::Number(99), &ProgressUpdate::solved(true))
                .await
                .unwrap()
        );
        assert_eq!(
            cache.read().await.unwrap().unwrap().questions,
            sample_questions()
        );
    }

    #[tokio::test]
    async fn test_clear_removes_both_keys() {
        let (store, _, cache) = setup();
        cache.write(&sample_questions()).await.unwrap();
        cache.clear().await.unwrap();

        assert!(store.is_empty().await);
        assert!(cache.read().await.unwrap().is_none());
    }
}
