//! Built-in entity tables for the platform
//!
//! The GraphQL selection sets below are static configuration: they list the
//! fields requested for each node. Incidents select `alertEvents` as a
//! connection, so its page info rides along as the inner cursor level.

use super::types::{CursorDialect, EntityDescriptor, GraphqlEntity, RestEntity};

/// Path of the identity-protection GraphQL endpoint
pub const GRAPHQL_ENDPOINT: &str = "/identity-protection/combined/graphql/v1";

const USER_FIELDS: &str = r"entityId
primaryDisplayName
secondaryDisplayName
type
riskScore
riskScoreSeverity
creationTime
archived
... on UserEntity {
  emailAddresses
  mostRecentActivity
}
accounts {
  ... on ActiveDirectoryAccountDescriptor {
    domain
    samAccountName
    ou
    enabled
    lastUpdateTime
  }
}
riskFactors {
  type
  severity
}";

const ENDPOINT_FIELDS: &str = r"entityId
primaryDisplayName
secondaryDisplayName
type
riskScore
riskScoreSeverity
creationTime
archived
... on EndpointEntity {
  hostName
  lastIpAddress
  agentVersion
  mostRecentActivity
}
riskFactors {
  type
  severity
}";

const INCIDENT_FIELDS: &str = r"incidentId
type
severity
status
startTime
endTime
lifeCycleStage
markedAsRead
compromisedEntities {
  entityId
  primaryDisplayName
}
alertEvents {
  nodes {
    alertId
    alertType
    timestamp
  }
  pageInfo {
    hasNextPage
    endCursor
  }
}";

/// GraphQL entity table
pub fn builtin_graphql_entities() -> Vec<EntityDescriptor> {
    vec![
        EntityDescriptor::graphql(
            "user",
            "entityId",
            GraphqlEntity::entities(&["USER"], "RISK_SCORE").with_node_fields(USER_FIELDS),
        ),
        EntityDescriptor::graphql(
            "endpoint",
            "entityId",
            GraphqlEntity::entities(&["ENDPOINT"], "RISK_SCORE")
                .with_node_fields(ENDPOINT_FIELDS),
        ),
        EntityDescriptor::graphql(
            "incident",
            "incidentId",
            GraphqlEntity::incidents("START_TIME")
                .with_node_fields(INCIDENT_FIELDS)
                .with_nested_connections(&["alertEvents"]),
        ),
    ]
}

/// REST entity table
pub fn builtin_rest_entities() -> Vec<EntityDescriptor> {
    vec![
        EntityDescriptor::rest(
            "endpoint_protection_device",
            "device_id",
            RestEntity::two_phase(
                CursorDialect::ScrollToken,
                "/devices/queries/devices-scroll/v1",
                "/devices/entities/devices/v2",
            ),
        ),
        EntityDescriptor::rest(
            "endpoint_protection_incident",
            "incident_id",
            RestEntity::two_phase(
                CursorDialect::IntegerOffset,
                "/incidents/queries/incidents/v1",
                "/incidents/entities/incidents/GET/v1",
            ),
        ),
        EntityDescriptor::rest(
            "endpoint_protection_detect",
            "detection_id",
            RestEntity::two_phase(
                CursorDialect::IntegerOffset,
                "/detects/queries/detects/v1",
                "/detects/entities/summaries/GET/v1",
            ),
        ),
        EntityDescriptor::rest(
            "endpoint_protection_alert",
            "composite_id",
            RestEntity::combined("/alerts/combined/alerts/v1").with_sort("created_timestamp|desc"),
        ),
    ]
}
