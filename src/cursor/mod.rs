//! Cursor module
//!
//! Opaque, client-held continuation tokens.
//!
//! # Overview
//!
//! The engine keeps no state between pages. Everything needed to resume a
//! listing travels in a [`CompositeCursor`], which is serialized to an opaque
//! string for the host and decoded again on the next call. A cursor may nest
//! an inner cursor for GraphQL responses whose pagination state lives one
//! level below the outer list; [`PageInfo`] models that nested page-info tree.

mod codec;
mod page_info;

pub use codec::{decode, encode, CompositeCursor};
pub use page_info::{page_info_after, PageInfo};
