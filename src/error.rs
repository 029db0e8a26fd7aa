//! Error types for entity-pager
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Every variant belongs to exactly one [`ErrorKind`], which is what hosts
//! use to decide between failing the sync, discarding a cursor, or backing
//! off and retrying.

use thiserror::Error;

/// The main error type for entity-pager
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Entity '{entity}' is not registered")]
    UnknownEntity { entity: String },

    #[error("Entity '{entity}' is registered for both GraphQL and REST")]
    AmbiguousEntity { entity: String },

    #[error("Entity '{entity}' has no {endpoint} endpoint configured")]
    MissingEndpoint { entity: String, endpoint: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Cursor Errors
    // ============================================================================
    #[error("Invalid cursor for entity '{entity}': {message}")]
    InvalidCursor { entity: String, message: String },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Request cancelled")]
    Cancelled,

    // ============================================================================
    // Upstream-Reported Errors
    // ============================================================================
    #[error("HTTP {status}{}", retry_hint(.retry_after))]
    HttpStatus {
        status: u16,
        retry_after: Option<String>,
    },

    #[error("Datasource failed for entity '{entity}': {message}")]
    DatasourceFailed { entity: String, message: String },

    // ============================================================================
    // Shape Errors
    // ============================================================================
    #[error("Unexpected response shape for entity '{entity}': {message}")]
    Shape { entity: String, message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unknown entity, bad descriptor or invalid request; never retried
    Config,
    /// Malformed or wrong-dialect cursor; the caller's token is stale
    Cursor,
    /// Network failure, timeout or cancellation
    Transport,
    /// Non-200 status or an error array reported by the API
    Upstream,
    /// Response JSON does not match the expected schema
    Shape,
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create a missing endpoint error
    pub fn missing_endpoint(entity: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::MissingEndpoint {
            entity: entity.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Create an invalid cursor error
    pub fn invalid_cursor(entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidCursor {
            entity: entity.into(),
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, retry_after: Option<String>) -> Self {
        Self::HttpStatus {
            status,
            retry_after,
        }
    }

    /// Create a datasource failed error
    pub fn datasource_failed(entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DatasourceFailed {
            entity: entity.into(),
            message: message.into(),
        }
    }

    /// Create a shape error
    pub fn shape(entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Shape {
            entity: entity.into(),
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config { .. }
            | Error::UnknownEntity { .. }
            | Error::AmbiguousEntity { .. }
            | Error::MissingEndpoint { .. }
            | Error::InvalidRequest { .. }
            | Error::InvalidUrl(_)
            | Error::YamlParse(_)
            | Error::Io(_) => ErrorKind::Config,
            Error::InvalidCursor { .. } => ErrorKind::Cursor,
            Error::Http(_) | Error::Transport { .. } | Error::Timeout { .. } | Error::Cancelled => {
                ErrorKind::Transport
            }
            Error::HttpStatus { .. } | Error::DatasourceFailed { .. } => ErrorKind::Upstream,
            Error::Shape { .. } | Error::JsonParse(_) => ErrorKind::Shape,
        }
    }

    /// Check if this error is a request timeout
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Timeout { .. } => true,
            Error::Http(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// Check if the host may retry the call that produced this error
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) | Error::Transport { .. } | Error::Timeout { .. } => true,
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

fn retry_hint(retry_after: &Option<String>) -> String {
    retry_after
        .as_deref()
        .map(|r| format!(" (retry after {r})"))
        .unwrap_or_default()
}

/// Check if an HTTP status code is retryable
pub(crate) fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for entity-pager
pub type Result<T> = std::result::Result<T, Error>;
