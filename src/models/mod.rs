// src/models/mod.rs

//! Domain models for the tracker.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod question;
mod stats;

// Re-export all public types
pub use config::{ApiConfig, CacheConfig, Config, env};
pub use question::{Difficulty, ProgressUpdate, Question, QuestionId};
pub use stats::{CompanySummary, RECENT_ACTIVITY_LIMIT, UserStats};

/// Which path served a collection read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataOrigin {
    /// Fetched from the API during this call
    Live,
    /// Served from a fresh cache snapshot
    Cached,
    /// API failed; embedded sample data substituted
    Fallback,
}

impl std::fmt::Display for DataOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DataOrigin::Live => "live",
            DataOrigin::Cached => "cached",
            DataOrigin::Fallback => "fallback",
        };
        f.write_str(s)
    }
}
