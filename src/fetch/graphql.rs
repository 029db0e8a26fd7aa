//! GraphQL fetch path
//!
//! One query per page against the identity-protection endpoint. The
//! response's `pageInfo` decides the next cursor.

use super::types::{FetchRequest, FetchResponse};
use super::{check_reported_errors, execute, outer_cursor};
use crate::cursor::{CompositeCursor, PageInfo};
use crate::error::{Error, Result};
use crate::http::{HttpRequest, Transport};
use crate::query::{build_query, graphql_body, graphql_url};
use crate::registry::{EntityDescriptor, GraphqlEntity};
use crate::types::JsonObject;
use serde_json::Value;
use tracing::{debug, warn};

pub(super) async fn fetch_page<T: Transport + ?Sized>(
    transport: &T,
    descriptor: &EntityDescriptor,
    entity: &GraphqlEntity,
    request: &FetchRequest,
    incoming: Option<&CompositeCursor>,
) -> Result<FetchResponse> {
    let query = build_query(
        entity,
        request.page_size,
        outer_cursor(incoming),
        request.filter.as_deref(),
    );
    let url = graphql_url(&request.base_url, &descriptor.id)?;

    debug!(entity = %descriptor.id, %url, "Sending GraphQL query");
    let http = HttpRequest::post(url.as_str(), graphql_body(&query), request.timeout)
        .bearer(&request.token)
        .header("Accept", "application/json");
    let response = execute(transport, http).await?;

    if !response.is_ok() {
        warn!(
            entity = %descriptor.id,
            status = response.status,
            "GraphQL request returned non-200 status"
        );
        return Ok(FetchResponse::status_only(
            response.status,
            response.retry_after(),
        ));
    }

    let body = response.json(&descriptor.id)?;
    check_reported_errors(&descriptor.id, &body)?;
    parse_connection(&descriptor.id, entity, &body)
}

/// Extract nodes and the next cursor from a GraphQL response body
///
/// The collection is read from `data.<collection>`, or from the root when
/// the body carries no `data` wrapper.
pub(super) fn parse_connection(
    entity_id: &str,
    entity: &GraphqlEntity,
    body: &Value,
) -> Result<FetchResponse> {
    let field = entity.collection.field_name();
    let root = body.get("data").filter(|d| !d.is_null()).unwrap_or(body);
    let connection = root
        .get(field)
        .filter(|c| c.is_object())
        .ok_or_else(|| Error::shape(entity_id, format!("response has no '{field}' object")))?;

    let nodes = connection
        .get("nodes")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::shape(entity_id, format!("'{field}.nodes' is not an array")))?;
    let records = nodes
        .iter()
        .map(|node| {
            node.as_object()
                .cloned()
                .ok_or_else(|| Error::shape(entity_id, format!("'{field}.nodes' holds a non-object")))
        })
        .collect::<Result<Vec<JsonObject>>>()?;

    let page_info = PageInfo::from_connection(connection, &entity.nested_connections)
        .ok_or_else(|| {
            Error::shape(entity_id, format!("'{field}.pageInfo' is missing or malformed"))
        })?;
    if page_info.has_next_page && page_info.end_cursor.as_deref().unwrap_or("").is_empty() {
        warn!(entity = %entity_id, "hasNextPage is true but endCursor is empty; ending listing");
    }

    Ok(FetchResponse::success(
        records,
        CompositeCursor::from_page_info(&page_info),
    ))
}
