//! GraphQL page-info tree
//!
//! A GraphQL connection reports `pageInfo { hasNextPage endCursor }`. When a
//! node selects another connection, that connection has its own page info,
//! so the pagination state of one response is a chain of levels. Level 0 is
//! the outermost list.

use serde_json::Value;

/// Pagination state of one connection level plus the level below it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    /// `hasNextPage`
    pub has_next_page: bool,
    /// `endCursor`
    pub end_cursor: Option<String>,
    /// Page info of the nested connection, if any
    pub inner: Option<Box<PageInfo>>,
}

impl PageInfo {
    /// Create a single-level page info
    pub fn new(has_next_page: bool, end_cursor: Option<&str>) -> Self {
        Self {
            has_next_page,
            end_cursor: end_cursor.map(str::to_string),
            inner: None,
        }
    }

    /// Attach the nested level
    #[must_use]
    pub fn with_inner(mut self, inner: PageInfo) -> Self {
        self.inner = Some(Box::new(inner));
        self
    }

    /// Number of levels in the tree (at least 1)
    pub fn depth(&self) -> usize {
        1 + self.inner.as_deref().map_or(0, PageInfo::depth)
    }

    /// Page info `n` levels below this one
    pub fn level(&self, n: usize) -> Option<&PageInfo> {
        let mut current = self;
        for _ in 0..n {
            current = current.inner.as_deref()?;
        }
        Some(current)
    }

    /// End cursor `n` levels deep
    ///
    /// Negative `n` yields the outermost cursor; `n` past the last level
    /// yields `None`.
    pub fn end_cursor_after(&self, n: i32) -> Option<&str> {
        let depth = usize::try_from(n).unwrap_or(0);
        self.level(depth)?.end_cursor.as_deref()
    }

    /// Parse a `pageInfo` object
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let has_next_page = obj.get("hasNextPage")?.as_bool()?;
        let end_cursor = match obj.get("endCursor") {
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        };
        Some(Self {
            has_next_page,
            end_cursor,
            inner: None,
        })
    }

    /// Build the tree from a connection object
    ///
    /// `nested` names the connection field to follow at each level; the
    /// first node of each level is the one descended into.
    pub fn from_connection(connection: &Value, nested: &[String]) -> Option<Self> {
        let mut info = Self::from_value(connection.get("pageInfo")?)?;

        if let Some((field, rest)) = nested.split_first() {
            info.inner = connection
                .get("nodes")
                .and_then(Value::as_array)
                .and_then(|nodes| nodes.first())
                .and_then(|node| node.get(field))
                .and_then(|child| Self::from_connection(child, rest))
                .map(Box::new);
        }

        Some(info)
    }
}

/// End cursor `n` levels deep in an optional tree; `None` for an absent tree
pub fn page_info_after(info: Option<&PageInfo>, n: i32) -> Option<&str> {
    info?.end_cursor_after(n)
}
