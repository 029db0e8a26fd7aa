//! Pagination strategy implementations
//!
//! Each strategy handles one list dialect of the REST API.

use super::types::{NextPage, PaginationMeta, Paginator};
use crate::error::{Error, Result};
use crate::registry::CursorDialect;
use serde_json::Value;

// ============================================================================
// Integer Offset Pagination
// ============================================================================

/// Integer offset pagination
///
/// The cursor is the decimal offset of the next page. The response carries
/// `offset`, `limit` and `total`; the next offset is the incoming offset plus
/// the requested page size, and a page follows only while it is below
/// `total`.
#[derive(Debug, Clone)]
pub struct OffsetPaginator {
    /// Entity being listed (labels errors)
    pub entity: String,
    /// Requested page size
    pub page_size: u32,
}

impl OffsetPaginator {
    /// Create a new offset paginator
    pub fn new(entity: impl Into<String>, page_size: u32) -> Self {
        Self {
            entity: entity.into(),
            page_size,
        }
    }

    /// Parse the incoming cursor as an offset (default 0)
    ///
    /// Only plain decimal digits are accepted, the form this paginator emits.
    pub fn parse_offset(&self, incoming: Option<&str>) -> Result<u64> {
        let Some(raw) = incoming else {
            return Ok(0);
        };
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::invalid_cursor(
                &self.entity,
                format!("expected an integer offset, got '{raw}'"),
            ));
        }
        raw.parse::<u64>().map_err(|_| {
            Error::invalid_cursor(&self.entity, format!("offset '{raw}' is out of range"))
        })
    }
}

impl Paginator for OffsetPaginator {
    fn request_cursor(&self, incoming: Option<&str>) -> Result<Option<String>> {
        match incoming {
            Some(_) => Ok(Some(self.parse_offset(incoming)?.to_string())),
            None => Ok(None),
        }
    }

    fn next_page(&self, meta: &PaginationMeta, incoming: Option<&str>) -> Result<NextPage> {
        let offset = self.parse_offset(incoming)?;
        let total = meta.total.ok_or_else(|| {
            Error::shape(&self.entity, "meta.pagination.total missing from offset response")
        })?;

        let next_offset = offset.checked_add(u64::from(self.page_size)).ok_or_else(|| {
            Error::invalid_cursor(&self.entity, format!("offset {offset} is out of range"))
        })?;
        if total > next_offset {
            Ok(NextPage::Continue(next_offset.to_string()))
        } else {
            Ok(NextPage::Done)
        }
    }
}

// ============================================================================
// Scroll Token Pagination
// ============================================================================

/// Scroll token pagination
///
/// The response's `offset` is an opaque token, passed back verbatim. An
/// empty token ends the listing.
#[derive(Debug, Clone)]
pub struct ScrollPaginator {
    /// Entity being listed (labels errors)
    pub entity: String,
}

impl ScrollPaginator {
    /// Create a new scroll paginator
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
        }
    }
}

impl Paginator for ScrollPaginator {
    fn request_cursor(&self, incoming: Option<&str>) -> Result<Option<String>> {
        Ok(incoming.map(str::to_string))
    }

    fn next_page(&self, meta: &PaginationMeta, _incoming: Option<&str>) -> Result<NextPage> {
        match &meta.offset {
            None | Some(Value::Null) => Ok(NextPage::Done),
            Some(Value::String(token)) => Ok(NextPage::from_token(Some(token))),
            Some(other) => Err(Error::shape(
                &self.entity,
                format!("expected a string scroll token, got {other}"),
            )),
        }
    }
}

// ============================================================================
// After Token Pagination
// ============================================================================

/// After token pagination (combined endpoints)
#[derive(Debug, Clone, Default)]
pub struct AfterTokenPaginator;

impl Paginator for AfterTokenPaginator {
    fn request_cursor(&self, incoming: Option<&str>) -> Result<Option<String>> {
        Ok(incoming.map(str::to_string))
    }

    fn next_page(&self, meta: &PaginationMeta, _incoming: Option<&str>) -> Result<NextPage> {
        Ok(NextPage::from_token(meta.after.as_deref()))
    }
}

/// Strategy for a REST dialect
pub fn paginator_for(
    dialect: CursorDialect,
    entity: &str,
    page_size: u32,
) -> Result<Box<dyn Paginator>> {
    match dialect {
        CursorDialect::IntegerOffset => Ok(Box::new(OffsetPaginator::new(entity, page_size))),
        CursorDialect::ScrollToken => Ok(Box::new(ScrollPaginator::new(entity))),
        CursorDialect::AfterToken => Ok(Box::new(AfterTokenPaginator)),
        CursorDialect::EndCursor => Err(Error::config(format!(
            "entity '{entity}' uses GraphQL end cursors, not a REST dialect"
        ))),
    }
}
