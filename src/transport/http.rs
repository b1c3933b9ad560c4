//! reqwest-backed transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::Client;
use serde_json::Value;

use crate::error::{ApiError, ApiResult, ErrorKind, Result};
use crate::models::ApiConfig;
use crate::transport::{ApiRequest, Method, Transport};

/// Create a configured asynchronous HTTP client.
///
/// No client-level timeout is set; [`HttpTransport`] bounds each call
/// itself so the whole exchange (headers and body) shares one deadline.
pub fn create_async_client(config: &ApiConfig) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let client = Client::builder()
        .user_agent(&config.user_agent)
        .default_headers(headers)
        .build()?;
    Ok(client)
}

/// Transport over a shared reqwest client with a per-call deadline.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Build a transport from API settings.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Ok(Self::new(create_async_client(config)?, config.timeout()))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn exchange(&self, request: &ApiRequest) -> ApiResult<Value> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Put => self.client.put(&request.url),
        };
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();

        if !status.is_success() {
            // best effort: a non-JSON error body just means no payload
            let payload = response.json::<Value>().await.ok();
            return Err(classify_status(status.as_u16(), payload));
        }

        // acknowledgments may come back without a body
        let bytes = response.bytes().await.map_err(transport_error)?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(ApiError::network)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<Value> {
        log::debug!("{:?} {}", request.method, request.url);
        match tokio::time::timeout(self.timeout, self.exchange(&request)).await {
            Ok(result) => result,
            Err(_) => {
                log::debug!(
                    "{:?} {} timed out after {:?}",
                    request.method,
                    request.url,
                    self.timeout
                );
                Err(ApiError::timeout())
            }
        }
    }
}

/// Map a non-success HTTP status (and its optional JSON body) to an error.
pub fn classify_status(status: u16, payload: Option<Value>) -> ApiError {
    let (kind, message) = match status {
        404 => (ErrorKind::NotFound, "Resource not found".to_string()),
        400 => (ErrorKind::ValidationError, "Invalid request".to_string()),
        500 => (ErrorKind::ServerError, "Server error".to_string()),
        other => {
            let server_message = payload
                .as_ref()
                .and_then(|p| p.get("message"))
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty());
            let message = match server_message {
                Some(m) => m.to_string(),
                None => format!("HTTP Error: {other}"),
            };
            (ErrorKind::ServerError, message)
        }
    };
    ApiError::new(kind, message)
        .with_status(status)
        .with_payload(payload)
}

fn transport_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::timeout()
    } else {
        ApiError::network(error)
    }
}
