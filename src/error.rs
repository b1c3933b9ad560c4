// src/error.rs

//! Unified error handling for the tracker.
//!
//! Two layers live here:
//! - [`ApiError`]: the classified failure produced at the transport boundary
//!   (and by input validation) and propagated unchanged by every data-access
//!   operation.
//! - [`AppError`]: everything else the application can trip over (config
//!   files, I/O, serialization), plus a wrapper for `ApiError`.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Result type alias for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for data-access operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Classification of a data-access failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Connection-level failure, or a success body that could not be decoded
    NetworkError,
    /// The request did not complete within the configured timeout
    TimeoutError,
    /// 500 or any unrecognised non-success status
    ServerError,
    /// 404
    NotFound,
    /// 400, or a caller-side argument check
    ValidationError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NetworkError => "NETWORK_ERROR",
            ErrorKind::TimeoutError => "TIMEOUT_ERROR",
            ErrorKind::ServerError => "SERVER_ERROR",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::ValidationError => "VALIDATION_ERROR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified data-access error.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ApiError {
    kind: ErrorKind,
    message: String,
    status: Option<u16>,
    payload: Option<Value>,
}

impl ApiError {
    /// Create an error of the given kind with no status or payload.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            payload: None,
        }
    }

    /// Attach an HTTP status code.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attach a server- or client-supplied payload.
    pub fn with_payload(mut self, payload: Option<Value>) -> Self {
        self.payload = payload;
        self
    }

    /// Create a network error carrying the underlying failure message.
    pub fn network(cause: impl fmt::Display) -> Self {
        Self::new(ErrorKind::NetworkError, "Network error occurred").with_payload(Some(
            serde_json::json!({ "originalError": cause.to_string() }),
        ))
    }

    /// Create a timeout error.
    pub fn timeout() -> Self {
        Self::new(ErrorKind::TimeoutError, "Request timeout")
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ValidationError, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }
}

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Data-access failure
    #[error("API error ({kind}): {0}", kind = .0.kind())]
    Api(#[from] ApiError),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_error_keeps_original_message() {
        let err = ApiError::network("connection refused");
        assert_eq!(err.kind(), ErrorKind::NetworkError);
        assert_eq!(err.status(), None);
        assert_eq!(
            err.payload().and_then(|p| p["originalError"].as_str()),
            Some("connection refused")
        );
    }

    #[test]
    fn display_uses_message() {
        let err = ApiError::new(ErrorKind::NotFound, "Resource not found").with_status(404);
        assert_eq!(err.to_string(), "Resource not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn app_error_wraps_api_error() {
        let err: AppError = ApiError::validation("Question ID is required").into();
        assert!(matches!(&err, AppError::Api(e) if e.kind() == ErrorKind::ValidationError));
        assert_eq!(
            err.to_string(),
            "API error (VALIDATION_ERROR): Question ID is required"
        );
    }
}
