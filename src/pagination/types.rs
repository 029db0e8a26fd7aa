//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by all strategies.

use crate::cursor::CompositeCursor;
use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::Value;

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available from this cursor
    Continue(String),
    /// No more pages
    Done,
}

impl NextPage {
    /// Continue when the token is non-empty, otherwise done
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some(t) if !t.is_empty() => Self::Continue(t.to_string()),
            _ => Self::Done,
        }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue(_))
    }

    /// Convert into the cursor handed back to the caller
    pub fn into_cursor(self) -> Option<CompositeCursor> {
        match self {
            Self::Continue(token) => Some(CompositeCursor::new(token)),
            Self::Done => None,
        }
    }
}

/// `meta.pagination` block of a REST response
///
/// `offset` is an integer for offset-dialect endpoints and an opaque string
/// for scroll endpoints, so it is kept as a raw value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PaginationMeta {
    /// Offset (integer) or scroll token (string)
    #[serde(default)]
    pub offset: Option<Value>,
    /// Page size the server applied
    #[serde(default)]
    pub limit: Option<u64>,
    /// Total number of matching resources
    #[serde(default)]
    pub total: Option<u64>,
    /// After token for combined endpoints
    #[serde(default)]
    pub after: Option<String>,
}

impl PaginationMeta {
    /// Read the pagination block from a response body
    ///
    /// A body without `meta.pagination` yields an empty block; a block of the
    /// wrong shape is a shape error.
    pub fn from_body(entity: &str, body: &Value) -> Result<Self> {
        match body.pointer("/meta/pagination") {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(block) => Self::deserialize(block).map_err(|e| {
                Error::shape(entity, format!("malformed meta.pagination: {e}"))
            }),
        }
    }
}

/// Core trait for list pagination dialects
pub trait Paginator: Send + Sync {
    /// Value of the cursor request parameter for the incoming cursor, if any
    fn request_cursor(&self, incoming: Option<&str>) -> Result<Option<String>>;

    /// Decide whether a page follows the one just fetched
    fn next_page(&self, meta: &PaginationMeta, incoming: Option<&str>) -> Result<NextPage>;
}
