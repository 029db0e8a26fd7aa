//! Query and endpoint builders
//!
//! Pure functions that turn an entity descriptor, a cursor, an optional
//! filter and a page size into a wire-ready GraphQL document, REST URL or
//! JSON body. Nothing here performs I/O, so every output is deterministic
//! and directly testable.

pub mod graphql;
pub mod rest;

pub use graphql::{build_query, graphql_body, graphql_url};
pub use rest::{
    build_combined_body, build_detail_body, build_detail_url, build_list_url, endpoint_url,
};

#[cfg(test)]
mod tests;
