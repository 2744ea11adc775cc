//! Shared Kubernetes value types
//!
//! Small structural types that several CRDs embed. They are declared here
//! where the CRDs reshape the core type: quantities accept integers as well
//! as strings and operators are closed enums. Core types the CRDs embed
//! unchanged (security contexts, service and claim specs, env sources) come
//! from `k8s-openapi` directly.

use std::borrow::Cow;
use std::collections::BTreeMap;

use schemars::{json_schema, JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};

/// A value that is either an integer or a string (`x-kubernetes-int-or-string`)
///
/// Used for quantities (`"4Gi"`, `2`) and ports that may be named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntOrString {
    /// Integer form
    Int(i64),
    /// String form
    String(String),
}

impl JsonSchema for IntOrString {
    fn schema_name() -> Cow<'static, str> {
        "IntOrString".into()
    }

    fn inline_schema() -> bool {
        true
    }

    fn json_schema(_: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "x-kubernetes-int-or-string": true,
            "anyOf": [
                { "type": "integer" },
                { "type": "string" }
            ]
        })
    }
}

impl From<i64> for IntOrString {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for IntOrString {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// Label query over a set of resources
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    /// Label selector requirements, ANDed together
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_expressions: Option<Vec<LabelSelectorRequirement>>,

    /// Map of exact label matches, ANDed together
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_labels: Option<BTreeMap<String, String>>,
}

/// A selector requirement: a key, an operator and a set of values
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelectorRequirement {
    /// Label key the selector applies to
    pub key: String,

    /// Relationship between the key and the values
    pub operator: SelectorOperator,

    /// Values; must be empty for `Exists` and `DoesNotExist`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum SelectorOperator {
    In,
    NotIn,
    Exists,
    DoesNotExist,
}

/// Compute resource requirements of a container
///
/// Quantities accept both integers and strings (`2`, `"500m"`, `"4Gi"`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRequirements {
    /// Maximum amount of compute resources allowed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<BTreeMap<String, IntOrString>>,

    /// Minimum amount of compute resources required
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requests: Option<BTreeMap<String, IntOrString>>,

    /// Dynamically allocated resources, named after entries of the pod's `resourceClaims`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claims: Option<Vec<ResourceClaim>>,
}

/// Reference to one entry of the pod's `resourceClaims`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceClaim {
    pub name: String,

    /// Request within the claim; all requests when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<String>,
}

/// Metadata that may be attached to templated child resources
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
}

/// Toleration for a node taint
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Toleration {
    /// Taint key; empty matches all keys
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Key to value relationship
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<TolerationOperator>,

    /// Taint value the toleration matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Taint effect to match; empty matches all effects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<TaintEffect>,

    /// Period a `NoExecute` toleration tolerates the taint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toleration_seconds: Option<i64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum TolerationOperator {
    Exists,
    Equal,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum TaintEffect {
    NoSchedule,
    PreferNoSchedule,
    NoExecute,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_or_string_keeps_its_form() {
        let int: IntOrString = serde_yaml::from_str("3").unwrap();
        assert_eq!(int, IntOrString::Int(3));

        let quantity: IntOrString = serde_yaml::from_str("4Gi").unwrap();
        assert_eq!(quantity, IntOrString::String("4Gi".to_string()));

        assert_eq!(serde_yaml::to_string(&IntOrString::Int(3)).unwrap().trim(), "3");
    }

    #[test]
    fn int_or_string_schema_is_flagged() {
        let schema = schemars::schema_for!(IntOrString);
        let value = schema.as_value();
        assert_eq!(value["x-kubernetes-int-or-string"], serde_json::json!(true));
    }

    #[test]
    fn empty_selector_serializes_to_empty_map() {
        let yaml = serde_yaml::to_string(&LabelSelector::default()).unwrap();
        assert_eq!(yaml.trim(), "{}");
    }
}
