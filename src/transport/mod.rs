//! HTTP transport for the question API.
//!
//! The [`Transport`] trait is the seam between the orchestration layer and
//! the network: [`HttpTransport`] talks to a real server, tests plug in a
//! scripted double.

pub mod http;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ApiResult;

pub use http::{HttpTransport, classify_status};

/// HTTP verbs used against the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
}

/// A single API call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            body: None,
        }
    }

    pub fn put(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Put,
            url: url.into(),
            body: Some(body),
        }
    }
}

/// Trait for API transports.
///
/// Implementations send one request, wait at most their configured timeout,
/// and return the decoded JSON body or a classified [`ApiError`].
///
/// [`ApiError`]: crate::error::ApiError
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> ApiResult<Value>;
}
