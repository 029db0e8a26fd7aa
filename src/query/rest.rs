//! REST URL and body construction

use crate::error::{Error, Result};
use crate::registry::RestEntity;
use serde_json::{json, Map, Value};
use url::Url;

/// Join the base URL and an endpoint path
///
/// An empty base URL or a missing/empty path is rejected instead of
/// producing a malformed URL.
pub fn endpoint_url(
    base_url: &str,
    entity: &str,
    path: Option<&str>,
    endpoint: &str,
) -> Result<Url> {
    let base = base_url.trim();
    if base.is_empty() {
        return Err(Error::invalid_request(format!(
            "base URL is empty for entity '{entity}'"
        )));
    }
    let path = path
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| Error::missing_endpoint(entity, endpoint))?;

    let joined = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Ok(Url::parse(&joined)?)
}

/// List-phase URL
///
/// Query parameters are appended in a fixed order: `limit`, then the
/// dialect's cursor parameter when a cursor is present, then `filter` when
/// present.
pub fn build_list_url(
    base_url: &str,
    entity: &str,
    rest: &RestEntity,
    page_size: u32,
    cursor: Option<&str>,
    filter: Option<&str>,
) -> Result<Url> {
    let mut url = endpoint_url(base_url, entity, rest.list_endpoint.as_deref(), "list")?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("limit", &page_size.to_string());
        if let Some(cursor) = cursor {
            query.append_pair(rest.dialect.param_name(), cursor);
        }
        if let Some(filter) = filter.filter(|f| !f.is_empty()) {
            query.append_pair("filter", filter);
        }
    }
    Ok(url)
}

/// Detail-phase (or combined) URL
pub fn build_detail_url(base_url: &str, entity: &str, rest: &RestEntity) -> Result<Url> {
    endpoint_url(base_url, entity, Some(&rest.detail_endpoint), "detail")
}

/// Detail-phase body for a batch of ids
pub fn build_detail_body(ids: &[String]) -> Value {
    json!({ "ids": ids })
}

/// Body of a single-phase combined request
pub fn build_combined_body(
    rest: &RestEntity,
    page_size: u32,
    cursor: Option<&str>,
    filter: Option<&str>,
) -> Value {
    let mut body = Map::new();
    body.insert("limit".to_string(), json!(page_size));
    if let Some(cursor) = cursor {
        body.insert(rest.dialect.param_name().to_string(), json!(cursor));
    }
    if let Some(filter) = filter.filter(|f| !f.is_empty()) {
        body.insert("filter".to_string(), json!(filter));
    }
    if let Some(sort) = &rest.sort {
        body.insert("sort".to_string(), json!(sort));
    }
    Value::Object(body)
}
