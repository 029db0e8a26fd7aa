//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: request → reqwest transport → page and
//! cursor handed back to the host

use entity_pager::fetch::FetchRequest;
use entity_pager::{
    AttributeConfig, CompositeCursor, EntityRegistry, Error, ErrorKind, HostConfig, Page,
    PageFetcher, ReqwestTransport,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{
    body_json, body_string_contains, header, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher() -> PageFetcher<ReqwestTransport> {
    PageFetcher::new(
        Arc::new(EntityRegistry::builtin()),
        ReqwestTransport::new().unwrap(),
    )
}

fn request(server: &MockServer, entity: &str, unique_id: &str) -> FetchRequest {
    FetchRequest::new(server.uri(), "test-token", entity)
        .with_attribute(AttributeConfig::unique(unique_id))
}

/// Drive pages until the cursor runs out
async fn collect_all(
    fetcher: &PageFetcher<ReqwestTransport>,
    first: FetchRequest,
) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut request = first;
    loop {
        let page = fetcher.get_page(&request).await.unwrap();
        let next = page.next_cursor.clone();
        pages.push(page);
        match next {
            Some(cursor) => request = request.next(cursor),
            None => return pages,
        }
    }
}

// ============================================================================
// GraphQL Integration Tests
// ============================================================================

#[tokio::test]
async fn test_graphql_users_two_pages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/identity-protection/combined/graphql/v1"))
        .and(header("Authorization", "Bearer test-token"))
        .and(body_string_contains("after: \\\"c1\\\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "entities": {
                    "nodes": [{"entityId": "u3"}],
                    "pageInfo": {"hasNextPage": false, "endCursor": "c2"}
                }
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/identity-protection/combined/graphql/v1"))
        .and(body_string_contains("types: [USER]"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "entities": {
                    "nodes": [{"entityId": "u1"}, {"entityId": "u2"}],
                    "pageInfo": {"hasNextPage": true, "endCursor": "c1"}
                }
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let pages = collect_all(&fetcher(), request(&mock_server, "user", "entityId")).await;

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].records.len(), 2);
    assert_eq!(pages[0].next_cursor.as_deref(), Some("eyJjdXJzb3IiOiJjMSJ9"));
    assert_eq!(pages[1].records[0]["entityId"], json!("u3"));
    assert!(!pages[1].has_next());
}

#[tokio::test]
async fn test_graphql_error_array_on_200() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/identity-protection/combined/graphql/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{"message": "token expired", "extensions": {"code": "UNAUTHENTICATED"}}]
        })))
        .mount(&mock_server)
        .await;

    let err = fetcher()
        .get_page(&request(&mock_server, "endpoint", "entityId"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Upstream);
    assert!(err.to_string().contains("code UNAUTHENTICATED: token expired"));
}

// ============================================================================
// REST Integration Tests
// ============================================================================

#[tokio::test]
async fn test_devices_scroll_until_empty_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/devices/queries/devices-scroll/v1"))
        .and(query_param("limit", "2"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"pagination": {"offset": "scroll-2", "total": 2}},
            "resources": ["d1", "d2"],
            "errors": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/devices/queries/devices-scroll/v1"))
        .and(query_param("offset", "scroll-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"pagination": {"offset": "", "total": 2}},
            "resources": [],
            "errors": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/devices/entities/devices/v2"))
        .and(body_json(json!({"ids": ["d1", "d2"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resources": [
                {"device_id": "d1", "hostname": "alpha"},
                {"device_id": "d2", "hostname": "beta"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let first = request(&mock_server, "endpoint_protection_device", "device_id").with_page_size(2);
    let pages = collect_all(&fetcher(), first).await;

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].records.len(), 2);
    assert!(pages[1].records.is_empty());
    assert!(pages[1].is_success());
}

#[tokio::test]
async fn test_incidents_integer_offset() {
    let mock_server = MockServer::start().await;

    for (offset, ids) in [(None, vec!["i1", "i2"]), (Some("2"), vec!["i3"])] {
        let mut mock = Mock::given(method("GET")).and(path("/incidents/queries/incidents/v1"));
        mock = match offset {
            Some(offset) => mock.and(query_param("offset", offset)),
            None => mock.and(query_param_is_missing("offset")),
        };
        mock.respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"pagination": {"offset": offset.unwrap_or("0").parse::<u64>().unwrap(), "limit": 2, "total": 3}},
            "resources": ids
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    }

    Mock::given(method("POST"))
        .and(path("/incidents/entities/incidents/GET/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resources": [{"incident_id": "i"}]
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let first = request(&mock_server, "endpoint_protection_incident", "incident_id")
        .with_page_size(2);
    let pages = collect_all(&fetcher(), first).await;

    assert_eq!(pages.len(), 2);
    assert!(!pages[1].has_next());
}

#[tokio::test]
async fn test_alerts_combined_with_filter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/alerts/combined/alerts/v1"))
        .and(body_json(json!({
            "limit": 50,
            "filter": "severity:>50",
            "sort": "created_timestamp|desc"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"pagination": {"after": "next-alerts", "total": 120}},
            "resources": [{"composite_id": "a:1"}]
        })))
        .mount(&mock_server)
        .await;

    let req = request(&mock_server, "endpoint_protection_alert", "composite_id")
        .with_page_size(50)
        .with_filter("severity:>50");
    let response = fetcher().fetch(&req).await.unwrap();

    assert_eq!(response.records.len(), 1);
    assert_eq!(response.next_cursor, Some(CompositeCursor::new("next-alerts")));
}

#[tokio::test]
async fn test_rate_limited_list_skips_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/detects/queries/detects/v1"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "12"))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/detects/entities/summaries/GET/v1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let page = fetcher()
        .get_page(&request(&mock_server, "endpoint_protection_detect", "detection_id"))
        .await
        .unwrap();

    assert_eq!(page.status_code, 429);
    assert_eq!(page.retry_after.as_deref(), Some("12"));
    assert_eq!(page.retry_after_delay(), Some(Duration::from_secs(12)));

    let err = page.error_for_status().unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 429, .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/identity-protection/combined/graphql/v1"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&mock_server)
        .await;

    let req = request(&mock_server, "user", "entityId").with_timeout(Duration::from_millis(100));
    let err = fetcher().get_page(&req).await.unwrap_err();

    assert!(err.is_timeout());
    assert_eq!(err.kind(), ErrorKind::Transport);
}

// ============================================================================
// Host Config Integration Tests
// ============================================================================

#[tokio::test]
async fn test_request_from_config_file() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/identity-protection/combined/graphql/v1"))
        .and(header("Authorization", "Bearer from-file"))
        .and(body_string_contains("first: 10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "incidents": {
                    "nodes": [],
                    "pageInfo": {"hasNextPage": false, "endCursor": null}
                }
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("host.yaml");
    std::fs::write(
        &path,
        format!("base_url: {}\ntoken: from-file\npage_size: 10\n", mock_server.uri()),
    )
    .unwrap();

    let config = HostConfig::from_file(&path).unwrap();
    let req = config
        .request("incident")
        .unwrap()
        .with_attribute(AttributeConfig::unique("incidentId"));
    let page = fetcher().get_page(&req).await.unwrap();

    assert!(page.is_success());
    assert!(page.records.is_empty());
    assert!(!page.has_next());
}
