//! Common types used throughout entity-pager
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type; one raw record as returned upstream
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::GET => f.write_str("GET"),
            Method::POST => f.write_str("POST"),
        }
    }
}

// ============================================================================
// Protocol
// ============================================================================

/// Query protocol an entity is fetched with
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// Identity-protection GraphQL API
    Graphql,
    /// Endpoint-protection REST API
    Rest,
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Protocol::Graphql => f.write_str("graphql"),
            Protocol::Rest => f.write_str("rest"),
        }
    }
}

// ============================================================================
// Attributes
// ============================================================================

/// An attribute the host declared for an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeConfig {
    /// Attribute name as the upstream API spells it
    pub external_id: String,
    /// Whether this attribute uniquely identifies a record
    #[serde(default)]
    pub unique_id: bool,
}

impl AttributeConfig {
    /// Create a plain attribute
    pub fn new(external_id: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            unique_id: false,
        }
    }

    /// Create a unique-id attribute
    pub fn unique(external_id: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            unique_id: true,
        }
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_conversion() {
        let get: reqwest::Method = Method::GET.into();
        assert_eq!(reqwest::Method::GET, get);
        let post: reqwest::Method = Method::POST.into();
        assert_eq!(reqwest::Method::POST, post);
    }

    #[test]
    fn test_protocol_serde() {
        let protocol: Protocol = serde_json::from_str("\"graphql\"").unwrap();
        assert_eq!(protocol, Protocol::Graphql);
        assert_eq!(Protocol::Rest.to_string(), "rest");
    }

    #[test]
    fn test_attribute_config_serde() {
        let attr: AttributeConfig =
            serde_json::from_str(r#"{"externalId": "entityId", "uniqueId": true}"#).unwrap();
        assert_eq!(attr, AttributeConfig::unique("entityId"));

        let attr: AttributeConfig = serde_json::from_str(r#"{"externalId": "name"}"#).unwrap();
        assert!(!attr.unique_id);
    }

    #[test]
    fn test_option_string_none_if_empty() {
        assert_eq!(
            Some("test".to_string()).none_if_empty(),
            Some("test".to_string())
        );
        assert_eq!(Some(String::new()).none_if_empty(), None);
        assert_eq!(None::<String>.none_if_empty(), None);
        assert_eq!("test".to_string().none_if_empty(), Some("test".to_string()));
        assert_eq!(String::new().none_if_empty(), None);
    }
}
