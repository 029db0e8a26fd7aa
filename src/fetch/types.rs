//! Fetch request and response types

use crate::cursor::{self, CompositeCursor};
use crate::error::{Error, Result};
use crate::types::{AttributeConfig, JsonObject};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// Largest page size the API accepts
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Page size used when the caller does not pick one
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Per-call deadline used when the caller does not pick one
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Input of one page fetch
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    /// API base URL, e.g. `https://api.us-2.example.com`
    pub base_url: String,
    /// Bearer token
    pub token: String,
    /// Entity to list
    pub entity_id: String,
    /// Requested page size (1..=1000)
    pub page_size: u32,
    /// Attributes the host declared for the entity
    pub attributes: Vec<AttributeConfig>,
    /// Upstream filter expression
    pub filter: Option<String>,
    /// Opaque cursor returned by the previous page
    pub cursor: Option<String>,
    /// Deadline applied to each network call
    pub timeout: Duration,
}

impl FetchRequest {
    /// Create a request for the first page with default size and timeout
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            entity_id: entity_id.into(),
            page_size: DEFAULT_PAGE_SIZE,
            attributes: Vec::new(),
            filter: None,
            cursor: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Declare an attribute
    #[must_use]
    pub fn with_attribute(mut self, attribute: AttributeConfig) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Declare all attributes at once
    #[must_use]
    pub fn with_attributes(mut self, attributes: Vec<AttributeConfig>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Set the upstream filter
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Resume from a previous page's cursor
    #[must_use]
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Set the per-call deadline
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Same request, continued from `cursor`
    #[must_use]
    pub fn next(&self, cursor: impl Into<String>) -> Self {
        self.clone().with_cursor(cursor)
    }
}

/// Output of one page fetch, cursor still structured
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchResponse {
    /// HTTP status of the last call made
    pub status_code: u16,
    /// `Retry-After` header of a non-200 response
    pub retry_after: Option<String>,
    /// Records in upstream order
    pub records: Vec<JsonObject>,
    /// Cursor of the following page
    pub next_cursor: Option<CompositeCursor>,
}

impl FetchResponse {
    /// Successful page
    pub fn success(records: Vec<JsonObject>, next_cursor: Option<CompositeCursor>) -> Self {
        Self {
            status_code: 200,
            retry_after: None,
            records,
            next_cursor,
        }
    }

    /// Successful, final page without records
    pub fn empty() -> Self {
        Self::success(Vec::new(), None)
    }

    /// Non-200 outcome: no records, no cursor
    pub fn status_only(status_code: u16, retry_after: Option<String>) -> Self {
        Self {
            status_code,
            retry_after,
            records: Vec::new(),
            next_cursor: None,
        }
    }
}

/// One page as handed to the host
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// HTTP status; anything but 200 is a transient failure, not end of data
    pub status_code: u16,
    /// Retry hint accompanying a non-200 status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<String>,
    /// Raw records in upstream order
    pub records: Vec<JsonObject>,
    /// Opaque cursor for the next call; `None` on the last page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

impl Page {
    /// Encode the response's cursor for the host
    pub fn from_response(response: FetchResponse) -> Result<Self> {
        let next_cursor = match response.next_cursor {
            Some(c) if !c.is_terminal() => Some(cursor::encode(&c)?),
            _ => None,
        };
        Ok(Self {
            status_code: response.status_code,
            retry_after: response.retry_after,
            records: response.records,
            next_cursor,
        })
    }

    /// Check for a 200 page
    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }

    /// Check whether another page follows
    pub fn has_next(&self) -> bool {
        self.next_cursor.is_some()
    }

    /// Turn a non-200 page into [`Error::HttpStatus`]
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::http_status(self.status_code, self.retry_after))
        }
    }

    /// Parsed retry hint: delta seconds or an HTTP date
    pub fn retry_after_delay(&self) -> Option<Duration> {
        parse_retry_after(self.retry_after.as_deref()?, Utc::now())
    }
}

/// Parse a `Retry-After` value relative to `now`
pub(crate) fn parse_retry_after(value: &str, now: DateTime<Utc>) -> Option<Duration> {
    let value = value.trim();
    if let Ok(seconds) = value.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }
    let at = DateTime::parse_from_rfc2822(value).ok()?.with_timezone(&Utc);
    (at - now).to_std().ok().or(Some(Duration::ZERO))
}
