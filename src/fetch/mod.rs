//! Page fetch module
//!
//! Entry point of the engine: one call in, one page out.
//!
//! # Overview
//!
//! [`PageFetcher::get_page`] validates the request, resolves the entity in
//! the registry, decodes the caller's cursor and dispatches once on the
//! entity's protocol:
//!
//! - GraphQL entities: one query per page ([`graphql`])
//! - REST entities: list-then-detail or a single combined call ([`rest`])
//!
//! The fetcher holds no per-page state and can be shared freely across
//! tasks. It never retries; every call ends in one classified outcome.

mod graphql;
mod rest;
mod types;

pub use types::{
    FetchRequest, FetchResponse, Page, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT, MAX_PAGE_SIZE,
};

use crate::cursor::{self, CompositeCursor};
use crate::error::{Error, Result};
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::registry::{EntityDescriptor, EntityKind, EntityRegistry};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

/// Fetches pages of entity records through an injected transport
pub struct PageFetcher<T> {
    registry: Arc<EntityRegistry>,
    transport: T,
}

impl<T: Transport> PageFetcher<T> {
    /// Create a fetcher
    pub fn new(registry: Arc<EntityRegistry>, transport: T) -> Self {
        Self {
            registry,
            transport,
        }
    }

    /// Get the registry
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Get the transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch one page, cursor still structured
    pub async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse> {
        let descriptor = validate_request(&self.registry, request)?;
        let incoming = request
            .cursor
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .map(|c| cursor::decode(&descriptor.id, c))
            .transpose()?;

        debug!(
            entity = %descriptor.id,
            protocol = %descriptor.protocol(),
            page_size = request.page_size,
            resumed = incoming.is_some(),
            "Fetching page"
        );

        let response = match &descriptor.kind {
            EntityKind::Graphql(entity) => {
                graphql::fetch_page(&self.transport, descriptor, entity, request, incoming.as_ref())
                    .await?
            }
            EntityKind::Rest(entity) => {
                rest::fetch_page(&self.transport, descriptor, entity, request, incoming.as_ref())
                    .await?
            }
        };

        debug!(
            entity = %descriptor.id,
            status = response.status_code,
            records = response.records.len(),
            has_next = response.next_cursor.is_some(),
            "Page fetched"
        );
        Ok(response)
    }

    /// Fetch one page and encode its cursor for the host
    pub async fn get_page(&self, request: &FetchRequest) -> Result<Page> {
        Page::from_response(self.fetch(request).await?)
    }

    /// Fetch one page unless `cancel` resolves first
    ///
    /// Cancellation drops the in-flight call and yields [`Error::Cancelled`].
    pub async fn get_page_until<F>(&self, request: &FetchRequest, cancel: F) -> Result<Page>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            result = self.get_page(request) => result,
            () = cancel => Err(Error::Cancelled),
        }
    }
}

impl<T> std::fmt::Debug for PageFetcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageFetcher")
            .field("entities", &self.registry.len())
            .finish_non_exhaustive()
    }
}

/// Check a request before any network call and resolve its entity
pub fn validate_request<'a>(
    registry: &'a EntityRegistry,
    request: &FetchRequest,
) -> Result<&'a EntityDescriptor> {
    if request.page_size == 0 || request.page_size > MAX_PAGE_SIZE {
        return Err(Error::invalid_request(format!(
            "page size must be between 1 and {MAX_PAGE_SIZE}, got {}",
            request.page_size
        )));
    }
    if request.base_url.trim().is_empty() {
        return Err(Error::invalid_request("base URL is empty"));
    }
    url::Url::parse(request.base_url.trim())?;
    if request.token.trim().is_empty() {
        return Err(Error::invalid_request("bearer token is empty"));
    }
    if request.timeout.is_zero() {
        return Err(Error::invalid_request("timeout must be positive"));
    }

    let descriptor = registry.resolve(&request.entity_id)?;

    let unique: Vec<_> = request
        .attributes
        .iter()
        .filter(|a| a.unique_id)
        .collect();
    match unique.as_slice() {
        [attr] if attr.external_id == descriptor.unique_id_attribute => Ok(descriptor),
        [attr] => Err(Error::invalid_request(format!(
            "entity '{}' must use '{}' as its unique id attribute, not '{}'",
            descriptor.id, descriptor.unique_id_attribute, attr.external_id
        ))),
        [] => Err(Error::invalid_request(format!(
            "entity '{}' declares no unique id attribute (expected '{}')",
            descriptor.id, descriptor.unique_id_attribute
        ))),
        _ => Err(Error::invalid_request(format!(
            "entity '{}' declares more than one unique id attribute",
            descriptor.id
        ))),
    }
}

/// Execute a request bounded by its own deadline
pub(crate) async fn execute<T: Transport + ?Sized>(
    transport: &T,
    request: HttpRequest,
) -> Result<HttpResponse> {
    let timeout = request.timeout;
    match tokio::time::timeout(timeout, transport.execute(request)).await {
        Ok(result) => result,
        Err(_) => Err(Error::Timeout {
            timeout_ms: timeout.as_millis() as u64,
        }),
    }
}

/// Surface a non-empty `errors` array as a datasource failure
///
/// The API can report errors alongside a 200 status, so this runs before the
/// body is treated as data.
pub(crate) fn check_reported_errors(entity: &str, body: &Value) -> Result<()> {
    let Some(errors) = body.get("errors").and_then(Value::as_array) else {
        return Ok(());
    };
    if errors.is_empty() {
        return Ok(());
    }

    let message = errors
        .iter()
        .map(describe_error)
        .collect::<Vec<_>>()
        .join("; ");
    warn!(entity = %entity, errors = errors.len(), "Upstream reported errors");
    Err(Error::datasource_failed(entity, message))
}

fn describe_error(error: &Value) -> String {
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("unknown error");
    let code = error
        .get("code")
        .or_else(|| error.pointer("/extensions/code"))
        .map(|c| match c {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        });
    match code {
        Some(code) => format!("code {code}: {message}"),
        None => message.to_string(),
    }
}

/// Cursor string at the outer level, if any
fn outer_cursor(incoming: Option<&CompositeCursor>) -> Option<&str> {
    incoming.and_then(CompositeCursor::value).filter(|c| !c.is_empty())
}
