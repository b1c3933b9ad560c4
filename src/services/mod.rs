//! Service layer for the tracker.
//!
//! This module contains the business logic for:
//! - Question data access (`QuestionService`)
//! - In-memory filtering and search (`query`)

pub mod query;
mod questions;

pub use query::QueryFilter;
pub use questions::{FetchOptions, Fetched, QuestionService};
