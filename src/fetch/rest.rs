//! REST fetch path
//!
//! Two shapes of entity share this path:
//!
//! - two-phase: GET the list endpoint for ids and pagination metadata, then
//!   POST those ids to the detail endpoint. Detail responses carry no
//!   pagination of their own, so the list phase alone decides the cursor.
//! - single-phase: POST limit/after/filter to a combined endpoint that
//!   returns records and an `after` token together.
//!
//! A non-200 at either phase ends the call with that status; the remaining
//! phase is not attempted.

use super::types::{FetchRequest, FetchResponse};
use super::{check_reported_errors, execute, outer_cursor};
use crate::cursor::CompositeCursor;
use crate::error::{Error, Result};
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::pagination::{paginator_for, PaginationMeta, Paginator};
use crate::query::{build_combined_body, build_detail_body, build_detail_url, build_list_url};
use crate::registry::{CursorDialect, EntityDescriptor, RestEntity};
use crate::types::JsonObject;
use serde_json::Value;
use tracing::{debug, warn};

pub(super) async fn fetch_page<T: Transport + ?Sized>(
    transport: &T,
    descriptor: &EntityDescriptor,
    entity: &RestEntity,
    request: &FetchRequest,
    incoming: Option<&CompositeCursor>,
) -> Result<FetchResponse> {
    let paginator = paginator_for(entity.dialect, &descriptor.id, request.page_size)?;
    let cursor = outer_cursor(incoming);

    if entity.is_two_phase() {
        fetch_two_phase(transport, descriptor, entity, paginator.as_ref(), request, cursor).await
    } else {
        fetch_combined(transport, descriptor, entity, paginator.as_ref(), request, cursor).await
    }
}

async fn fetch_two_phase<T: Transport + ?Sized>(
    transport: &T,
    descriptor: &EntityDescriptor,
    entity: &RestEntity,
    paginator: &dyn Paginator,
    request: &FetchRequest,
    cursor: Option<&str>,
) -> Result<FetchResponse> {
    let entity_id = descriptor.id.as_str();
    let request_cursor = paginator.request_cursor(cursor)?;
    let list_url = build_list_url(
        &request.base_url,
        entity_id,
        entity,
        request.page_size,
        request_cursor.as_deref(),
        request.filter.as_deref(),
    )?;

    debug!(entity = %entity_id, url = %list_url, "Listing resource ids");
    let list = execute(
        transport,
        HttpRequest::get(list_url.as_str(), request.timeout)
            .bearer(&request.token)
            .header("Accept", "application/json"),
    )
    .await?;
    if !list.is_ok() {
        return Ok(status_only(entity_id, "list", &list));
    }

    let body = list.json(entity_id)?;
    check_reported_errors(entity_id, &body)?;
    let ids = parse_ids(entity_id, &body)?;
    let meta = PaginationMeta::from_body(entity_id, &body)?;
    let next = paginator.next_page(&meta, cursor)?;

    if ids.is_empty() {
        // Scroll endpoints can hand out a token with an empty page and only
        // report the end (empty resources, empty token) on the call after.
        if next.is_done() {
            debug!(entity = %entity_id, "List phase returned no ids and no cursor; end of data");
            return Ok(FetchResponse::empty());
        }
        if entity.dialect == CursorDialect::ScrollToken {
            debug!(entity = %entity_id, "Empty scroll page with a continuation token");
        }
        return Ok(FetchResponse::success(Vec::new(), next.into_cursor()));
    }

    let detail_url = build_detail_url(&request.base_url, entity_id, entity)?;
    debug!(entity = %entity_id, url = %detail_url, ids = ids.len(), "Fetching resource details");
    let detail = execute(
        transport,
        HttpRequest::post(detail_url.as_str(), build_detail_body(&ids), request.timeout)
            .bearer(&request.token)
            .header("Accept", "application/json"),
    )
    .await?;
    if !detail.is_ok() {
        return Ok(status_only(entity_id, "detail", &detail));
    }

    let body = detail.json(entity_id)?;
    check_reported_errors(entity_id, &body)?;
    let records = parse_records(entity_id, &body)?;

    Ok(FetchResponse::success(records, next.into_cursor()))
}

async fn fetch_combined<T: Transport + ?Sized>(
    transport: &T,
    descriptor: &EntityDescriptor,
    entity: &RestEntity,
    paginator: &dyn Paginator,
    request: &FetchRequest,
    cursor: Option<&str>,
) -> Result<FetchResponse> {
    let entity_id = descriptor.id.as_str();
    let request_cursor = paginator.request_cursor(cursor)?;
    let url = build_detail_url(&request.base_url, entity_id, entity)?;
    let body = build_combined_body(
        entity,
        request.page_size,
        request_cursor.as_deref(),
        request.filter.as_deref(),
    );

    debug!(entity = %entity_id, %url, "Fetching combined page");
    let response = execute(
        transport,
        HttpRequest::post(url.as_str(), body, request.timeout)
            .bearer(&request.token)
            .header("Accept", "application/json"),
    )
    .await?;
    if !response.is_ok() {
        return Ok(status_only(entity_id, "combined", &response));
    }

    let body = response.json(entity_id)?;
    check_reported_errors(entity_id, &body)?;
    let records = parse_records(entity_id, &body)?;
    let meta = PaginationMeta::from_body(entity_id, &body)?;
    let next = paginator.next_page(&meta, cursor)?;

    Ok(FetchResponse::success(records, next.into_cursor()))
}

fn status_only(entity_id: &str, phase: &str, response: &HttpResponse) -> FetchResponse {
    warn!(
        entity = %entity_id,
        phase,
        status = response.status,
        "REST request returned non-200 status"
    );
    FetchResponse::status_only(response.status, response.retry_after())
}

/// `resources` as an array; `null` counts as empty
fn resources<'a>(entity_id: &str, body: &'a Value) -> Result<&'a [Value]> {
    match body.get("resources") {
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(Value::Null) => Ok(&[]),
        Some(other) => Err(Error::shape(
            entity_id,
            format!("'resources' is not an array: {other}"),
        )),
        None => Err(Error::shape(entity_id, "response has no 'resources' field")),
    }
}

/// Resource ids from a list-phase body
fn parse_ids(entity_id: &str, body: &Value) -> Result<Vec<String>> {
    resources(entity_id, body)?
        .iter()
        .map(|id| {
            id.as_str()
                .map(str::to_string)
                .ok_or_else(|| Error::shape(entity_id, format!("resource id is not a string: {id}")))
        })
        .collect()
}

/// Records from a detail or combined body
fn parse_records(entity_id: &str, body: &Value) -> Result<Vec<JsonObject>> {
    resources(entity_id, body)?
        .iter()
        .map(|record| {
            record
                .as_object()
                .cloned()
                .ok_or_else(|| Error::shape(entity_id, "resource is not an object"))
        })
        .collect()
}
