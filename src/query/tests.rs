//! Tests for the query and endpoint builders

use super::*;
use crate::error::Error;
use crate::registry::{CursorDialect, GraphqlEntity, RestEntity};
use pretty_assertions::assert_eq;
use serde_json::json;

fn user_entity() -> GraphqlEntity {
    GraphqlEntity::entities(&["USER"], "RISK_SCORE").with_node_fields("entityId\nprimaryDisplayName")
}

fn device_entity() -> RestEntity {
    RestEntity::two_phase(
        CursorDialect::ScrollToken,
        "/devices/queries/devices-scroll/v1",
        "/devices/entities/devices/v2",
    )
}

// ============================================================================
// GraphQL Tests
// ============================================================================

#[test]
fn test_graphql_query_first_page() {
    let query = build_query(&user_entity(), 100, None, None);

    assert_eq!(
        query,
        "query {\n  entities(types: [USER], archived: false, enabled: true, sortKey: RISK_SCORE, sortOrder: DESCENDING, first: 100) {\n    nodes {\n      entityId\n      primaryDisplayName\n    }\n    pageInfo {\n      hasNextPage\n      endCursor\n    }\n  }\n}"
    );
    assert!(!query.contains("after"));
}

#[test]
fn test_graphql_query_with_cursor() {
    let query = build_query(&user_entity(), 50, Some("c1"), None);
    assert!(query.contains("first: 50, after: \"c1\")"));
}

#[test]
fn test_graphql_query_quotes_cursor() {
    let query = build_query(&user_entity(), 50, Some("a\"b\\c"), None);
    assert!(query.contains(r#"after: "a\"b\\c""#));
}

#[test]
fn test_graphql_query_incidents() {
    let entity = GraphqlEntity::incidents("START_TIME").with_node_fields("incidentId");
    let query = build_query(&entity, 25, None, None);

    assert!(query.contains("  incidents(sortKey: START_TIME, sortOrder: DESCENDING, first: 25) {"));
    assert!(!query.contains("types:"));
    assert!(!query.contains("archived:"));
}

#[test]
fn test_graphql_query_filter_and_defaults() {
    let entity = GraphqlEntity::entities(&["ENDPOINT"], "RISK_SCORE").with_flags(None, Some(true));
    let query = build_query(&entity, 10, None, Some(" riskScoreSeverities: [HIGH] "));

    assert!(query.contains(
        "entities(types: [ENDPOINT], enabled: true, riskScoreSeverities: [HIGH], sortKey: RISK_SCORE"
    ));
    assert!(query.contains("nodes {\n      __typename\n    }"));
}

#[test]
fn test_graphql_url_and_body() {
    let url = graphql_url("https://api.example.com/", "user").unwrap();
    assert_eq!(
        url.as_str(),
        "https://api.example.com/identity-protection/combined/graphql/v1"
    );
    assert_eq!(graphql_body("query {}"), json!({"query": "query {}"}));
}

// ============================================================================
// REST URL Tests
// ============================================================================

#[test]
fn test_list_url_first_page() {
    let url = build_list_url(
        "https://api.example.com",
        "endpoint_protection_device",
        &device_entity(),
        100,
        None,
        None,
    )
    .unwrap();
    assert_eq!(
        url.as_str(),
        "https://api.example.com/devices/queries/devices-scroll/v1?limit=100"
    );
}

#[test]
fn test_list_url_parameter_order_and_encoding() {
    let url = build_list_url(
        "https://api.example.com",
        "endpoint_protection_device",
        &device_entity(),
        5,
        Some("tok=="),
        Some("status:'normal'"),
    )
    .unwrap();
    assert_eq!(
        url.as_str(),
        "https://api.example.com/devices/queries/devices-scroll/v1?limit=5&offset=tok%3D%3D&filter=status%3A%27normal%27"
    );
}

#[test]
fn test_list_url_after_dialect() {
    let rest = RestEntity::two_phase(CursorDialect::AfterToken, "/list", "/detail");
    let url = build_list_url("https://h", "x", &rest, 1, Some("a1"), Some("")).unwrap();
    assert_eq!(url.as_str(), "https://h/list?limit=1&after=a1");
}

#[test]
fn test_list_url_missing_endpoint() {
    let rest = RestEntity::combined("/alerts/combined/alerts/v1");
    let err = build_list_url("https://h", "endpoint_protection_alert", &rest, 1, None, None)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::MissingEndpoint { ref entity, ref endpoint }
            if entity == "endpoint_protection_alert" && endpoint == "list"
    ));
}

#[test]
fn test_endpoint_url_rejects_empty_inputs() {
    assert!(matches!(
        endpoint_url("", "x", Some("/p"), "detail"),
        Err(Error::InvalidRequest { .. })
    ));
    assert!(matches!(
        endpoint_url("https://h", "x", Some("  "), "detail"),
        Err(Error::MissingEndpoint { .. })
    ));
    assert!(matches!(
        endpoint_url("not a url", "x", Some("/p"), "detail"),
        Err(Error::InvalidUrl(_))
    ));
}

#[test]
fn test_detail_url_and_body() {
    let url = build_detail_url("https://h/", "x", &device_entity()).unwrap();
    assert_eq!(url.as_str(), "https://h/devices/entities/devices/v2");

    let body = build_detail_body(&["a".to_string(), "b".to_string()]);
    assert_eq!(body, json!({"ids": ["a", "b"]}));
}

#[test]
fn test_combined_body() {
    let rest = RestEntity::combined("/alerts/combined/alerts/v1").with_sort("created_timestamp|desc");

    let body = build_combined_body(&rest, 100, None, None);
    assert_eq!(body, json!({"limit": 100, "sort": "created_timestamp|desc"}));

    let body = build_combined_body(&rest, 10, Some("next"), Some("status:'new'"));
    assert_eq!(
        body,
        json!({
            "limit": 10,
            "after": "next",
            "filter": "status:'new'",
            "sort": "created_timestamp|desc"
        })
    );
}
