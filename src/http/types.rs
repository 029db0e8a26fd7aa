//! Transport contract types

use crate::error::{Error, Result};
use crate::types::{JsonValue, Method};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// A wire-ready request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL, query string included
    pub url: String,
    /// Request headers
    pub headers: Vec<(String, String)>,
    /// JSON body
    pub body: Option<JsonValue>,
    /// Deadline for this call
    pub timeout: Duration,
}

impl HttpRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            timeout,
        }
    }

    /// Create a POST request with a JSON body
    pub fn post(url: impl Into<String>, body: JsonValue, timeout: Duration) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            headers: Vec::new(),
            body: Some(body),
            timeout,
        }
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Add `Authorization: Bearer <token>`
    #[must_use]
    pub fn bearer(self, token: &str) -> Self {
        self.header("Authorization", format!("Bearer {token}"))
    }

    /// Look up a header (case-insensitive)
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// A raw response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code
    pub status: u16,
    /// Headers, keys lowercased
    pub headers: HashMap<String, String>,
    /// Body text
    pub body: String,
}

impl HttpResponse {
    /// Create a response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Add a header
    #[must_use]
    pub fn with_header(mut self, key: &str, value: impl Into<String>) -> Self {
        self.headers.insert(key.to_ascii_lowercase(), value.into());
        self
    }

    /// Look up a header (case-insensitive)
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// `Retry-After` header value, verbatim
    pub fn retry_after(&self) -> Option<String> {
        self.header("retry-after").map(str::to_string)
    }

    /// Check for 200 OK
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Parse the body as JSON
    pub fn json(&self, entity: &str) -> Result<JsonValue> {
        serde_json::from_str(&self.body)
            .map_err(|e| Error::shape(entity, format!("response body is not JSON: {e}")))
    }
}

/// Executes HTTP requests on behalf of the fetch paths
///
/// Implementations should honour `request.timeout`; the fetch paths also
/// bound every call with the same deadline.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a request
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        (**self).execute(request).await
    }
}
