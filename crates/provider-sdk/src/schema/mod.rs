//! Resource schemas
//!
//! A [`Schema`] describes the attributes a resource accepts, keyed by their
//! Terraform (snake_case) names. Each [`Attribute`] remembers the wire name
//! of the Kubernetes field it maps to, so configuration values can be
//! translated back into manifest fields (see [`crate::value`]).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::validators::Validator;

pub mod builder;
pub mod naming;

pub use builder::{attributes_for, attributes_from_json_schema};
pub use naming::to_snake_case;

/// Schema of one resource type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    pub version: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub attributes: Attributes,
}

/// Whether the practitioner sets an attribute or the provider does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    Required,
    Optional,
    /// Set by the provider, never by configuration
    Computed,
}

impl Requirement {
    pub fn is_required(self) -> bool {
        self == Requirement::Required
    }

    pub fn is_computed(self) -> bool {
        self == Requirement::Computed
    }
}

/// Type of an attribute value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "of", rename_all = "snake_case")]
pub enum AttributeKind {
    String,
    /// String in configuration; emitted as an integer when it parses as one
    IntOrString,
    Int64,
    Float64,
    Bool,
    /// Arbitrary JSON passed through as written, minus null fields
    Dynamic,
    List(Box<Element>),
    Map(Box<Element>),
    /// A nested object
    SingleNested(Attributes),
    /// List of nested objects
    ListNested(Attributes),
    /// Map of nested objects
    MapNested(Attributes),
}

impl AttributeKind {
    /// Short name used in type mismatch diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeKind::String => "string",
            AttributeKind::IntOrString => "string or number",
            AttributeKind::Int64 => "number",
            AttributeKind::Float64 => "number",
            AttributeKind::Bool => "bool",
            AttributeKind::Dynamic => "dynamic",
            AttributeKind::List(_) | AttributeKind::ListNested(_) => "list",
            AttributeKind::Map(_) | AttributeKind::MapNested(_) => "map",
            AttributeKind::SingleNested(_) => "object",
        }
    }
}

/// Element type of a list or map of primitives
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    #[serde(flatten)]
    pub kind: AttributeKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Validator>,
}

impl Element {
    pub fn new(kind: AttributeKind) -> Self {
        Self {
            kind,
            validators: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    /// Field name in the rendered manifest
    pub wire_name: String,
    pub requirement: Requirement,
    #[serde(flatten)]
    pub kind: AttributeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Validator>,
}

impl Attribute {
    pub fn new(wire_name: impl Into<String>, kind: AttributeKind, requirement: Requirement) -> Self {
        Self {
            wire_name: wire_name.into(),
            requirement,
            kind,
            description: None,
            validators: Vec::new(),
        }
    }

    pub fn required(wire_name: impl Into<String>, kind: AttributeKind) -> Self {
        Self::new(wire_name, kind, Requirement::Required)
    }

    pub fn optional(wire_name: impl Into<String>, kind: AttributeKind) -> Self {
        Self::new(wire_name, kind, Requirement::Optional)
    }

    pub fn computed(wire_name: impl Into<String>, kind: AttributeKind) -> Self {
        Self::new(wire_name, kind, Requirement::Computed)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Nested attributes of an object, list-of-objects or map-of-objects
    pub fn nested(&self) -> Option<&Attributes> {
        match &self.kind {
            AttributeKind::SingleNested(attrs)
            | AttributeKind::ListNested(attrs)
            | AttributeKind::MapNested(attrs) => Some(attrs),
            _ => None,
        }
    }
}

/// Attributes keyed by Terraform name
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, Attribute>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.insert(name, attribute);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, attribute: Attribute) -> Option<Attribute> {
        self.0.insert(name.into(), attribute)
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.0.iter().map(|(name, attr)| (name.as_str(), attr))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when any attribute must be configured
    pub fn any_required(&self) -> bool {
        self.0.values().any(|attr| attr.requirement.is_required())
    }
}

impl Schema {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }
}
