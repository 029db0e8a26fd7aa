//! Entity registry module
//!
//! Maps entity ids to static descriptors: protocol, unique-id attribute,
//! sort key and pagination dialect.
//!
//! # Overview
//!
//! Two disjoint tables exist, one for GraphQL entities and one for REST
//! entities. An id must appear in exactly one of them; `resolve` surfaces
//! membership in both or neither as a configuration error rather than
//! picking a side. The registry is immutable once built and is shared by
//! reference (usually behind an `Arc`).

mod builtin;
mod types;

pub use builtin::{builtin_graphql_entities, builtin_rest_entities, GRAPHQL_ENDPOINT};
pub use types::{
    CursorDialect, EntityDescriptor, EntityKind, GraphqlCollection, GraphqlEntity, RestEntity,
};

use crate::error::{Error, Result};
use crate::types::Protocol;
use std::collections::HashMap;

/// Immutable lookup from entity id to descriptor
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    graphql: HashMap<String, EntityDescriptor>,
    rest: HashMap<String, EntityDescriptor>,
}

impl EntityRegistry {
    /// Create a registry from the GraphQL and REST tables
    pub fn new(graphql: Vec<EntityDescriptor>, rest: Vec<EntityDescriptor>) -> Self {
        Self {
            graphql: graphql.into_iter().map(|d| (d.id.clone(), d)).collect(),
            rest: rest.into_iter().map(|d| (d.id.clone(), d)).collect(),
        }
    }

    /// Registry with the platform's built-in entities
    pub fn builtin() -> Self {
        Self::new(builtin_graphql_entities(), builtin_rest_entities())
    }

    /// Resolve an entity id to its descriptor
    pub fn resolve(&self, entity_id: &str) -> Result<&EntityDescriptor> {
        match (self.graphql.get(entity_id), self.rest.get(entity_id)) {
            (Some(_), Some(_)) => Err(Error::AmbiguousEntity {
                entity: entity_id.to_string(),
            }),
            (None, None) => Err(Error::UnknownEntity {
                entity: entity_id.to_string(),
            }),
            (Some(descriptor), None) => check_table(descriptor, Protocol::Graphql),
            (None, Some(descriptor)) => check_table(descriptor, Protocol::Rest),
        }
    }

    /// Check if an entity id is registered in either table
    pub fn contains(&self, entity_id: &str) -> bool {
        self.graphql.contains_key(entity_id) || self.rest.contains_key(entity_id)
    }

    /// All registered ids with the protocol of the table they live in, sorted by id
    pub fn entity_ids(&self) -> Vec<(&str, Protocol)> {
        let mut ids: Vec<_> = self
            .graphql
            .keys()
            .map(|id| (id.as_str(), Protocol::Graphql))
            .chain(self.rest.keys().map(|id| (id.as_str(), Protocol::Rest)))
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Number of registered descriptors across both tables
    pub fn len(&self) -> usize {
        self.graphql.len() + self.rest.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.graphql.is_empty() && self.rest.is_empty()
    }
}

/// A descriptor filed under the wrong table is a configuration error
fn check_table(descriptor: &EntityDescriptor, table: Protocol) -> Result<&EntityDescriptor> {
    if descriptor.protocol() == table {
        Ok(descriptor)
    } else {
        Err(Error::config(format!(
            "entity '{}' is a {} descriptor registered in the {table} table",
            descriptor.id,
            descriptor.protocol()
        )))
    }
}

#[cfg(test)]
mod tests;
