//! Cursor serialization
//!
//! Wire format: standard base64 of the compact JSON form
//! `{"cursor": "...", "innerCursor": {...}}`, absent fields omitted.

use super::page_info::PageInfo;
use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Page-continuation token, possibly nested
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeCursor {
    /// Protocol-specific cursor string for this level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Cursor for a sub-list one level deeper
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_cursor: Option<Box<CompositeCursor>>,
}

impl CompositeCursor {
    /// Flat cursor holding a single token
    pub fn new(cursor: impl Into<String>) -> Self {
        Self {
            cursor: Some(cursor.into()),
            inner_cursor: None,
        }
    }

    /// Attach an inner cursor
    #[must_use]
    pub fn with_inner(mut self, inner: CompositeCursor) -> Self {
        self.inner_cursor = Some(Box::new(inner));
        self
    }

    /// No cursor at this level and nothing nested: there is no next page
    pub fn is_terminal(&self) -> bool {
        self.cursor.is_none() && self.inner_cursor.is_none()
    }

    /// Cursor string at this level
    pub fn value(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    /// Next-page cursor derived from a page-info tree
    ///
    /// The outer level decides: it continues only when it reports more pages
    /// and its end cursor is non-empty. Deeper levels that also continue are
    /// carried along as inner cursors.
    pub fn from_page_info(info: &PageInfo) -> Option<Self> {
        let cursor = info
            .end_cursor
            .as_deref()
            .filter(|c| info.has_next_page && !c.is_empty())?;
        let inner_cursor = info
            .inner
            .as_deref()
            .and_then(Self::from_page_info)
            .map(Box::new);

        Some(Self {
            cursor: Some(cursor.to_string()),
            inner_cursor,
        })
    }
}

/// Serialize a cursor into its opaque wire form
pub fn encode(cursor: &CompositeCursor) -> Result<String> {
    let json = serde_json::to_vec(cursor)?;
    Ok(STANDARD.encode(json))
}

/// Parse an opaque cursor received from the host
///
/// `entity` only labels the error so the host knows which listing carried
/// the stale token.
pub fn decode(entity: &str, opaque: &str) -> Result<CompositeCursor> {
    let bytes = STANDARD
        .decode(opaque.trim())
        .map_err(|e| Error::invalid_cursor(entity, format!("not valid base64: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| Error::invalid_cursor(entity, format!("not a valid cursor document: {e}")))
}
