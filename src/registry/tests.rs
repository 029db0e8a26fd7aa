//! Tests for the entity registry

use super::*;
use crate::error::Error;
use crate::types::Protocol;

fn rest_device(id: &str) -> EntityDescriptor {
    EntityDescriptor::rest(
        id,
        "device_id",
        RestEntity::two_phase(CursorDialect::ScrollToken, "/list", "/detail"),
    )
}

fn graphql_user(id: &str) -> EntityDescriptor {
    EntityDescriptor::graphql(id, "entityId", GraphqlEntity::entities(&["USER"], "RISK_SCORE"))
}

// ============================================================================
// Resolution Tests
// ============================================================================

#[test]
fn test_resolve_graphql_entity() {
    let registry = EntityRegistry::builtin();
    let descriptor = registry.resolve("user").unwrap();

    assert_eq!(descriptor.protocol(), Protocol::Graphql);
    assert_eq!(descriptor.unique_id_attribute, "entityId");
    assert_eq!(descriptor.cursor_dialect(), CursorDialect::EndCursor);
    assert_eq!(descriptor.sort_key(), Some("RISK_SCORE"));
}

#[test]
fn test_resolve_rest_entities() {
    let registry = EntityRegistry::builtin();

    let device = registry.resolve("endpoint_protection_device").unwrap();
    assert_eq!(device.protocol(), Protocol::Rest);
    assert_eq!(device.cursor_dialect(), CursorDialect::ScrollToken);

    let incident = registry.resolve("endpoint_protection_incident").unwrap();
    let EntityKind::Rest(rest) = &incident.kind else {
        panic!("Expected REST descriptor");
    };
    assert!(rest.use_int_cursor());
    assert!(rest.is_two_phase());

    let alert = registry.resolve("endpoint_protection_alert").unwrap();
    let EntityKind::Rest(rest) = &alert.kind else {
        panic!("Expected REST descriptor");
    };
    assert!(!rest.use_int_cursor());
    assert!(!rest.is_two_phase());
    assert_eq!(rest.dialect, CursorDialect::AfterToken);
}

#[test]
fn test_incident_follows_alert_events() {
    let registry = EntityRegistry::builtin();
    let incident = registry.resolve("incident").unwrap();
    let EntityKind::Graphql(gql) = &incident.kind else {
        panic!("Expected GraphQL descriptor");
    };

    assert_eq!(gql.nested_connections, vec!["alertEvents".to_string()]);
    assert!(gql.node_fields.contains("alertEvents {\n  nodes {"));
    assert!(gql.node_fields.contains("pageInfo {\n    hasNextPage\n    endCursor\n  }"));
}

#[test]
fn test_resolve_unknown_entity() {
    let registry = EntityRegistry::builtin();
    let err = registry.resolve("printer").unwrap_err();
    assert!(matches!(err, Error::UnknownEntity { entity } if entity == "printer"));
}

#[test]
fn test_resolve_rejects_dual_registration() {
    let registry = EntityRegistry::new(vec![graphql_user("shared")], vec![rest_device("shared")]);

    let err = registry.resolve("shared").unwrap_err();
    assert!(matches!(err, Error::AmbiguousEntity { entity } if entity == "shared"));
}

#[test]
fn test_resolve_rejects_descriptor_in_wrong_table() {
    let registry = EntityRegistry::new(vec![rest_device("device")], vec![]);

    let err = registry.resolve("device").unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

// ============================================================================
// Table Tests
// ============================================================================

#[test]
fn test_builtin_tables_are_disjoint() {
    let graphql = builtin_graphql_entities();
    let rest = builtin_rest_entities();

    for descriptor in &graphql {
        assert!(rest.iter().all(|r| r.id != descriptor.id), "{}", descriptor.id);
        assert_eq!(descriptor.protocol(), Protocol::Graphql);
    }
    for descriptor in &rest {
        assert_eq!(descriptor.protocol(), Protocol::Rest);
    }

    let registry = EntityRegistry::builtin();
    assert_eq!(registry.len(), graphql.len() + rest.len());
    for (id, _) in registry.entity_ids() {
        assert!(registry.resolve(id).is_ok());
    }
}

#[test]
fn test_entity_ids_sorted() {
    let registry = EntityRegistry::new(
        vec![graphql_user("user")],
        vec![rest_device("alpha"), rest_device("zulu")],
    );

    assert_eq!(
        registry.entity_ids(),
        vec![
            ("alpha", Protocol::Rest),
            ("user", Protocol::Graphql),
            ("zulu", Protocol::Rest),
        ]
    );
    assert!(registry.contains("zulu"));
    assert!(!registry.contains("nope"));
}

#[test]
fn test_empty_registry() {
    let registry = EntityRegistry::default();
    assert!(registry.is_empty());
    assert!(matches!(
        registry.resolve("user"),
        Err(Error::UnknownEntity { .. })
    ));
}

#[test]
fn test_dialect_param_names() {
    assert_eq!(CursorDialect::IntegerOffset.param_name(), "offset");
    assert_eq!(CursorDialect::ScrollToken.param_name(), "offset");
    assert_eq!(CursorDialect::AfterToken.param_name(), "after");
}
