// src/services/questions.rs

//! Question data-access service.
//!
//! Ties the transport, cache, sample dataset and query layer together:
//! reads consult the cache, then the API, then fall back to sample data;
//! writes go to the API and are mirrored into the cache.

use std::sync::Arc;

use serde_json::Value;
use url::Url;

use crate::cache::QuestionCache;
use crate::error::{ApiError, ApiResult, Result};
use crate::fallback::sample_questions;
use crate::models::{CompanySummary, DataOrigin, ProgressUpdate, Question, QuestionId, UserStats};
use crate::services::query::{self, QueryFilter};
use crate::transport::{ApiRequest, Transport};

/// Options for [`QuestionService::fetch_questions`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Serve a fresh cache snapshot instead of calling the API
    pub use_cache: bool,
    pub company: Option<String>,
    pub difficulty: Option<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            company: None,
            difficulty: None,
        }
    }
}

impl FetchOptions {
    /// Bypass the cache and always hit the API.
    pub fn refresh() -> Self {
        Self {
            use_cache: false,
            ..Self::default()
        }
    }

    pub fn company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = Some(difficulty.into());
        self
    }

    fn filter(&self) -> QueryFilter {
        QueryFilter {
            company: self.company.clone(),
            difficulty: self.difficulty.clone(),
            ..QueryFilter::default()
        }
    }
}

/// A collection read together with the path that served it.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub questions: Vec<Question>,
    pub origin: DataOrigin,
}

/// Data-access service for tracked questions.
#[derive(Clone)]
pub struct QuestionService {
    transport: Arc<dyn Transport>,
    cache: QuestionCache,
    base_url: Url,
}

impl QuestionService {
    /// Create a service against the API rooted at `base_url`.
    pub fn new(transport: Arc<dyn Transport>, cache: QuestionCache, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(crate::error::AppError::config(format!(
                "API base URL cannot be a base: {base_url}"
            )));
        }
        Ok(Self {
            transport,
            cache,
            base_url,
        })
    }

    pub fn cache(&self) -> &QuestionCache {
        &self.cache
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL by appending path segments to the base.
    fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.to_string()
    }

    /// Read questions and report where they came from.
    ///
    /// Transport failures never surface here: the sample dataset is served
    /// instead and the substitution is logged. The collection that was
    /// served (live or sample) always replaces the cached snapshot.
    pub async fn fetch_questions(&self, options: &FetchOptions) -> ApiResult<Fetched> {
        let criteria = options.filter();

        if options.use_cache {
            match self.cache.read_fresh().await {
                Ok(Some(snapshot)) => {
                    log::info!("Using cached questions ({:?} old)", snapshot.age);
                    return Ok(Fetched {
                        questions: query::filter(&snapshot.questions, &criteria),
                        origin: DataOrigin::Cached,
                    });
                }
                Ok(None) => {}
                Err(e) => log::warn!("Cache read failed, fetching instead: {}", e),
            }
        }

        log::info!("Fetching questions from API...");
        let (questions, origin) = match self.load_from_api().await {
            Ok(questions) => (questions, DataOrigin::Live),
            Err(e) => {
                log::warn!(
                    "API unavailable ({}: {}), using sample data",
                    e.kind(),
                    e.message()
                );
                (sample_questions(), DataOrigin::Fallback)
            }
        };

        if let Err(e) = self.cache.write(&questions).await {
            log::warn!("Failed to cache questions: {}", e);
        }

        Ok(Fetched {
            questions: query::filter(&questions, &criteria),
            origin,
        })
    }

    async fn load_from_api(&self) -> ApiResult<Vec<Question>> {
        let body = self
            .transport
            .send(ApiRequest::get(self.endpoint(&["questions"])))
            .await?;
        serde_json::from_value(body).map_err(ApiError::network)
    }

    /// Read questions, discarding the origin.
    pub async fn get_questions(&self, options: &FetchOptions) -> ApiResult<Vec<Question>> {
        Ok(self.fetch_questions(options).await?.questions)
    }

    /// Read the questions of one company (case-insensitive).
    pub async fn get_questions_by_company(&self, company: &str) -> ApiResult<Vec<Question>> {
        if company.trim().is_empty() {
            return Err(ApiError::validation("Company name is required"));
        }
        self.get_questions(&FetchOptions::default().company(company))
            .await
    }

    /// Send a progress update and mirror it into the cache.
    ///
    /// Returns the server acknowledgment as-is. Transport failures propagate;
    /// the cache is only patched after the server accepted the update.
    pub async fn update_progress(&self, id: &QuestionId, update: &ProgressUpdate) -> ApiResult<Value> {
        if id.is_blank() {
            return Err(ApiError::validation("Question ID is required"));
        }

        let body = serde_json::to_value(update).map_err(|e| {
            ApiError::validation("Progress update could not be encoded")
                .with_payload(Some(serde_json::json!({ "originalError": e.to_string() })))
        })?;
        let id_segment = id.to_string();
        let url = self.endpoint(&["questions", &id_segment, "progress"]);

        let ack = self
            .transport
            .send(ApiRequest::put(url, body))
            .await
            .inspect_err(|e| log::error!("Error updating question {}: {}", id, e))?;

        match self.cache.patch_one(id, update).await {
            Ok(true) => log::debug!("Patched cached question {}", id),
            Ok(false) => log::debug!("Question {} not cached; nothing to patch", id),
            Err(e) => log::warn!("Failed to patch cached question {}: {}", id, e),
        }

        Ok(ack)
    }

    /// Aggregate progress over the full collection.
    pub async fn user_stats(&self) -> ApiResult<UserStats> {
        let questions = self.get_questions(&FetchOptions::default()).await?;
        Ok(UserStats::from_questions(&questions))
    }

    /// One dashboard summary per company, sorted by company name.
    pub async fn company_summaries(&self) -> ApiResult<Vec<CompanySummary>> {
        let questions = self.get_questions(&FetchOptions::default()).await?;
        Ok(CompanySummary::group(&questions))
    }

    /// Free-text search, then filter by `criteria`.
    ///
    /// A blank query is a plain filtered read.
    pub async fn search_questions(&self, text: &str, criteria: &QueryFilter) -> ApiResult<Vec<Question>> {
        let questions = self.get_questions(&FetchOptions::default()).await?;
        let found = if text.trim().is_empty() {
            questions
        } else {
            query::search(&questions, text)
        };
        Ok(query::filter(&found, criteria))
    }

    /// Drop the cached snapshot.
    pub async fn clear_cache(&self) -> Result<()> {
        self.cache.clear().await
    }
}
