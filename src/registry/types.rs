//! Entity descriptor types
//!
//! A descriptor is the static, declarative description of one entity:
//! which protocol serves it and how its pages are addressed.

use crate::types::Protocol;

/// How the next page of an entity is addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorDialect {
    /// GraphQL `pageInfo.endCursor`
    EndCursor,
    /// REST `meta.pagination.offset` as an integer with `limit` and `total`
    IntegerOffset,
    /// REST `meta.pagination.offset` as an opaque scroll token
    ScrollToken,
    /// REST `meta.pagination.after` token
    AfterToken,
}

impl CursorDialect {
    /// Query parameter / body field that carries the cursor upstream
    pub fn param_name(self) -> &'static str {
        match self {
            CursorDialect::EndCursor => "after",
            CursorDialect::IntegerOffset | CursorDialect::ScrollToken => "offset",
            CursorDialect::AfterToken => "after",
        }
    }

    /// Short name for listings
    pub fn as_str(self) -> &'static str {
        match self {
            CursorDialect::EndCursor => "end_cursor",
            CursorDialect::IntegerOffset => "integer_offset",
            CursorDialect::ScrollToken => "scroll_token",
            CursorDialect::AfterToken => "after_token",
        }
    }
}

/// Top-level GraphQL collection an entity is listed from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphqlCollection {
    /// `entities(...)`: users, endpoints
    Entities,
    /// `incidents(...)`
    Incidents,
}

impl GraphqlCollection {
    /// Field name in both the query and the response
    pub fn field_name(self) -> &'static str {
        match self {
            GraphqlCollection::Entities => "entities",
            GraphqlCollection::Incidents => "incidents",
        }
    }
}

/// GraphQL-specific part of a descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphqlEntity {
    /// Collection queried
    pub collection: GraphqlCollection,
    /// `types:` argument values (enum literals, e.g. `USER`)
    pub types: Vec<String>,
    /// `archived:` argument, omitted when `None`
    pub archived: Option<bool>,
    /// `enabled:` argument, omitted when `None`
    pub enabled: Option<bool>,
    /// `sortKey:` argument (enum literal)
    pub sort_key: String,
    /// Selection set placed inside `nodes { ... }`
    pub node_fields: String,
    /// Connection fields to descend through when building the page-info tree
    pub nested_connections: Vec<String>,
}

impl GraphqlEntity {
    /// Create an `entities` collection entry
    pub fn entities(types: &[&str], sort_key: impl Into<String>) -> Self {
        Self {
            collection: GraphqlCollection::Entities,
            types: types.iter().map(|t| (*t).to_string()).collect(),
            archived: Some(false),
            enabled: Some(true),
            sort_key: sort_key.into(),
            node_fields: String::new(),
            nested_connections: Vec::new(),
        }
    }

    /// Create an `incidents` collection entry
    pub fn incidents(sort_key: impl Into<String>) -> Self {
        Self {
            collection: GraphqlCollection::Incidents,
            types: Vec::new(),
            archived: None,
            enabled: None,
            sort_key: sort_key.into(),
            node_fields: String::new(),
            nested_connections: Vec::new(),
        }
    }

    /// Set the node selection set
    #[must_use]
    pub fn with_node_fields(mut self, fields: impl Into<String>) -> Self {
        self.node_fields = fields.into();
        self
    }

    /// Set the `archived`/`enabled` arguments
    #[must_use]
    pub fn with_flags(mut self, archived: Option<bool>, enabled: Option<bool>) -> Self {
        self.archived = archived;
        self.enabled = enabled;
        self
    }

    /// Set the nested connections that carry their own page info
    #[must_use]
    pub fn with_nested_connections(mut self, connections: &[&str]) -> Self {
        self.nested_connections = connections.iter().map(|c| (*c).to_string()).collect();
        self
    }
}

/// REST-specific part of a descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestEntity {
    /// Pagination dialect of the list (or combined) endpoint
    pub dialect: CursorDialect,
    /// Path of the id-listing endpoint; `None` for single-phase entities
    pub list_endpoint: Option<String>,
    /// Path of the detail endpoint (or the combined endpoint)
    pub detail_endpoint: String,
    /// Upstream sort expression, sent by single-phase entities
    pub sort: Option<String>,
}

impl RestEntity {
    /// Two-phase entity: list ids, then fetch details
    pub fn two_phase(
        dialect: CursorDialect,
        list_endpoint: impl Into<String>,
        detail_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            dialect,
            list_endpoint: Some(list_endpoint.into()),
            detail_endpoint: detail_endpoint.into(),
            sort: None,
        }
    }

    /// Single-phase entity: one combined endpoint with an `after` token
    pub fn combined(endpoint: impl Into<String>) -> Self {
        Self {
            dialect: CursorDialect::AfterToken,
            list_endpoint: None,
            detail_endpoint: endpoint.into(),
            sort: None,
        }
    }

    /// Set the sort expression
    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Whether the list phase uses an integer offset
    pub fn use_int_cursor(&self) -> bool {
        self.dialect == CursorDialect::IntegerOffset
    }

    /// Whether a separate list phase precedes the detail fetch
    pub fn is_two_phase(&self) -> bool {
        self.list_endpoint.is_some()
    }
}

/// Protocol-specific descriptor body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityKind {
    /// Served by the GraphQL API
    Graphql(GraphqlEntity),
    /// Served by the REST API
    Rest(RestEntity),
}

/// Static description of one supported entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDescriptor {
    /// Entity id the host refers to
    pub id: String,
    /// Attribute that uniquely identifies a record
    pub unique_id_attribute: String,
    /// Protocol-specific configuration
    pub kind: EntityKind,
}

impl EntityDescriptor {
    /// Create a GraphQL descriptor
    pub fn graphql(
        id: impl Into<String>,
        unique_id_attribute: impl Into<String>,
        entity: GraphqlEntity,
    ) -> Self {
        Self {
            id: id.into(),
            unique_id_attribute: unique_id_attribute.into(),
            kind: EntityKind::Graphql(entity),
        }
    }

    /// Create a REST descriptor
    pub fn rest(
        id: impl Into<String>,
        unique_id_attribute: impl Into<String>,
        entity: RestEntity,
    ) -> Self {
        Self {
            id: id.into(),
            unique_id_attribute: unique_id_attribute.into(),
            kind: EntityKind::Rest(entity),
        }
    }

    /// Protocol serving this entity
    pub fn protocol(&self) -> Protocol {
        match self.kind {
            EntityKind::Graphql(_) => Protocol::Graphql,
            EntityKind::Rest(_) => Protocol::Rest,
        }
    }

    /// Pagination dialect of this entity
    pub fn cursor_dialect(&self) -> CursorDialect {
        match &self.kind {
            EntityKind::Graphql(_) => CursorDialect::EndCursor,
            EntityKind::Rest(rest) => rest.dialect,
        }
    }

    /// Sort key, if the entity declares one
    pub fn sort_key(&self) -> Option<&str> {
        match &self.kind {
            EntityKind::Graphql(gql) => Some(gql.sort_key.as_str()),
            EntityKind::Rest(rest) => rest.sort.as_deref(),
        }
    }
}
