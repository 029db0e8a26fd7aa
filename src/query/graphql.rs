//! GraphQL document construction

use super::rest::endpoint_url;
use crate::error::Result;
use crate::registry::{GraphqlEntity, GRAPHQL_ENDPOINT};
use serde_json::{json, Value};
use std::fmt::Write as _;
use url::Url;

/// Build the query document for one page
///
/// `after` is only emitted when a cursor is present; the first page omits
/// the argument rather than sending `after: null`. A filter is spliced in
/// verbatim as additional arguments.
pub fn build_query(
    entity: &GraphqlEntity,
    page_size: u32,
    cursor: Option<&str>,
    filter: Option<&str>,
) -> String {
    let mut args: Vec<String> = Vec::new();

    if !entity.types.is_empty() {
        args.push(format!("types: [{}]", entity.types.join(", ")));
    }
    if let Some(archived) = entity.archived {
        args.push(format!("archived: {archived}"));
    }
    if let Some(enabled) = entity.enabled {
        args.push(format!("enabled: {enabled}"));
    }
    if let Some(filter) = filter.map(str::trim).filter(|f| !f.is_empty()) {
        args.push(filter.to_string());
    }
    args.push(format!("sortKey: {}", entity.sort_key));
    args.push("sortOrder: DESCENDING".to_string());
    args.push(format!("first: {page_size}"));
    if let Some(cursor) = cursor {
        // JSON string syntax matches GraphQL string literal escaping
        args.push(format!("after: {}", Value::String(cursor.to_string())));
    }

    let fields = if entity.node_fields.trim().is_empty() {
        "__typename"
    } else {
        entity.node_fields.trim()
    };

    let mut doc = String::new();
    doc.push_str("query {\n");
    let _ = writeln!(
        doc,
        "  {}({}) {{",
        entity.collection.field_name(),
        args.join(", ")
    );
    doc.push_str("    nodes {\n");
    for line in fields.lines() {
        let _ = writeln!(doc, "      {line}");
    }
    doc.push_str("    }\n");
    doc.push_str("    pageInfo {\n      hasNextPage\n      endCursor\n    }\n");
    doc.push_str("  }\n}");
    doc
}

/// URL of the GraphQL endpoint
pub fn graphql_url(base_url: &str, entity: &str) -> Result<Url> {
    endpoint_url(base_url, entity, Some(GRAPHQL_ENDPOINT), "graphql")
}

/// JSON request body carrying a query document
pub fn graphql_body(query: &str) -> Value {
    json!({ "query": query })
}
