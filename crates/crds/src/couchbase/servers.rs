//! Couchbase server classes (`spec.servers`) and volume claim templates

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{EnvFromSource, EnvVar, PersistentVolumeClaimSpec};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::common::{ResourceRequirements, TemplateMetadata};

/// A class of identically configured Couchbase pods
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Unique name of the server class
    #[schemars(regex(pattern = r"^[-_a-zA-Z0-9]+$"))]
    pub name: String,

    /// Number of pods in the class
    #[schemars(range(min = 0))]
    pub size: i64,

    /// Couchbase services run by pods of this class
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<CouchbaseService>>,

    /// Server groups pods of this class are spread across
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_groups: Option<Vec<String>>,

    /// Let a CouchbaseAutoscaler resize this class
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoscale_enabled: Option<bool>,

    /// Image override for this class
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<Vec<EnvVar>>,

    /// Config maps and secrets whose keys become environment variables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_from: Option<Vec<EnvFromSource>>,

    /// Persistent volume claim templates mounted by pods of this class
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_mounts: Option<VolumeMounts>,

    /// Pod template overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod: Option<PodTemplate>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum CouchbaseService {
    Data,
    Index,
    Query,
    Search,
    Eventing,
    Analytics,
}

/// Names of volume claim templates used for each mount point
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMounts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<String>,
}

/// Pod template; `spec` is an arbitrary PodSpec fragment passed through as is
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PodTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TemplateMetadata>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<serde_json::Value>,
}

/// Template for persistent volume claims
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VolumeClaimTemplate {
    pub metadata: VolumeClaimTemplateMetadata,

    pub spec: PersistentVolumeClaimSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VolumeClaimTemplateMetadata {
    /// Name referenced from `volumeMounts`
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
}
