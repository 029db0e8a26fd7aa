//! Pagination module
//!
//! Supports: Integer Offset, Scroll Token, After Token
//!
//! # Overview
//!
//! The pagination module gives the REST fetch path one interface over the
//! API's list dialects. Each strategy turns the caller's incoming cursor into
//! the request parameter and reads `meta.pagination` from the response to
//! decide whether a next page exists. Strategies are stateless: the only
//! carried-forward state is the cursor the caller hands back.

mod strategies;
mod types;

pub use strategies::{paginator_for, AfterTokenPaginator, OffsetPaginator, ScrollPaginator};
pub use types::{NextPage, PaginationMeta, Paginator};
