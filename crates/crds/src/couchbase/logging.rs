//! Couchbase server and audit logging (`spec.logging`)

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::common::{IntOrString, ResourceRequirements};

/// Logging settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CouchbaseLogging {
    /// Log forwarding from server pods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerLogging>,

    /// Audit logging
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit: Option<AuditLogging>,

    /// Age after which logs of deleted pods are removed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(regex(pattern = r"^\d+(ns|us|ms|s|m|h)$"))]
    pub log_retention_time: Option<String>,

    /// Number of deleted pods whose logs are kept
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0))]
    pub log_retention_count: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServerLogging {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Let the operator own the log forwarding configuration secret
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manage_configuration: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidecar: Option<LogSidecar>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LogSidecar {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogging {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Audit event IDs that are not recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled_events: Option<Vec<i64>>,

    /// Users whose actions are not audited, as `name/domain`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled_users: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<LogRotation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub garbage_collection: Option<AuditGarbageCollection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LogRotation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<IntOrString>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prune_age: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuditGarbageCollection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidecar: Option<AuditCleanupSidecar>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuditCleanupSidecar {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Minimum age of rotated audit logs before removal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,
}
