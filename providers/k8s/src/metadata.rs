//! Object metadata
//!
//! Every manifest resource carries the same `metadata` block. Its schema is
//! declared by hand: Kubernetes naming rules do not come out of `ObjectMeta`'s
//! JSON schema, and cluster-scoped kinds must not offer a namespace.

use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use provider_sdk::{Attribute, AttributeKind, Attributes, Element, Validator};
use serde::{Deserialize, Serialize};

/// The configurable subset of `ObjectMeta`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestMetadata {
    pub name: String,

    #[serde(default)]
    pub namespace: Option<String>,

    #[serde(default)]
    pub labels: Option<BTreeMap<String, String>>,

    #[serde(default)]
    pub annotations: Option<BTreeMap<String, String>>,
}

impl From<ManifestMetadata> for ObjectMeta {
    fn from(metadata: ManifestMetadata) -> Self {
        ObjectMeta {
            name: Some(metadata.name),
            namespace: metadata.namespace,
            labels: metadata.labels.filter(|labels| !labels.is_empty()),
            annotations: metadata.annotations.filter(|annotations| !annotations.is_empty()),
            ..Default::default()
        }
    }
}

/// Attributes of the `metadata` block
pub fn attributes(namespaced: bool) -> Attributes {
    let strings = || AttributeKind::Map(Box::new(Element::new(AttributeKind::String)));

    let attributes = Attributes::new()
        .with(
            "name",
            Attribute::required("name", AttributeKind::String)
                .with_description("Unique name of the object, a DNS-1123 subdomain")
                .with_validator(Validator::ObjectName),
        )
        .with(
            "labels",
            Attribute::optional("labels", strings())
                .with_description("Map of string keys and values used to organize and select objects")
                .with_validator(Validator::Labels),
        )
        .with(
            "annotations",
            Attribute::optional("annotations", strings())
                .with_description("Unstructured key value map stored with the object")
                .with_validator(Validator::Annotations),
        );

    if namespaced {
        attributes.with(
            "namespace",
            Attribute::optional("namespace", AttributeKind::String)
                .with_description("Namespace the object belongs to, a DNS-1123 label")
                .with_validator(Validator::NamespaceName),
        )
    } else {
        attributes
    }
}
