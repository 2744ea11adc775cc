//! CouchbaseCluster Custom Resource Definition
//!
//! Top level of the `couchbase.com/v2` `CouchbaseCluster` spec.

use k8s_openapi::api::core::v1::PodSecurityContext;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{
    Backup, Buckets, ClusterSettings, CouchbaseLogging, Monitoring, Networking, Security,
    ServerConfig, VolumeClaimTemplate, Xdcr,
};
use crate::common::IntOrString;

/// CouchbaseClusterSpec defines the desired state of a Couchbase cluster
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[kube(
    group = "couchbase.com",
    version = "v2",
    kind = "CouchbaseCluster",
    plural = "couchbaseclusters",
    shortname = "cbc",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct CouchbaseClusterSpec {
    /// Container image used for all Couchbase server pods
    pub image: String,

    /// Stop the operator from reconciling the cluster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,

    /// Forbid scheduling two pods of the cluster on the same node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anti_affinity: Option<bool>,

    /// How pods are replaced when the spec changes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upgrade_strategy: Option<UpgradeStrategy>,

    /// Mechanism used to upgrade individual pods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upgrade_process: Option<UpgradeProcess>,

    /// Bounds on a rolling upgrade
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rolling_upgrade: Option<RollingUpgrade>,

    /// Shut down all pods while keeping persistent volumes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hibernate: Option<bool>,

    /// How the cluster is brought down when hibernating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hibernation_strategy: Option<HibernationStrategy>,

    /// Behaviour when pods are lost and cannot be failed over
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_policy: Option<RecoveryPolicy>,

    /// Cloud platform hint used for storage and networking defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,

    /// Allow server class scaling operations that are still in preview
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_preview_scaling: Option<bool>,

    /// Expand persistent volumes online instead of replacing pods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_online_volume_expansion: Option<bool>,

    /// Minutes to wait for an online volume expansion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0, max = 30))]
    pub online_volume_expansion_timeout_in_mins: Option<i64>,

    /// Prefer images from the environment over `image`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_image_precedence: Option<bool>,

    /// Report available software updates as events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub software_update_notifications: Option<bool>,

    /// Derive pod resource requests from service memory quotas
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_resource_allocation: Option<AutoResourceAllocation>,

    /// Period during which autoscaling recommendations are ignored after a rebalance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoscale_stabilization_period: Option<String>,

    /// Availability zones pods are distributed across
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_groups: Option<Vec<String>>,

    /// Pod-level security attributes, superseded by `security.podSecurityContext`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_context: Option<PodSecurityContext>,

    /// Couchbase cluster-wide settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<ClusterSettings>,

    /// Authentication and authorization settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<Security>,

    /// Network exposure and TLS settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub networking: Option<Networking>,

    /// Server classes making up the cluster
    #[schemars(length(min = 1))]
    pub servers: Vec<ServerConfig>,

    /// Bucket management
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buckets: Option<Buckets>,

    /// Cross data center replication
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xdcr: Option<Xdcr>,

    /// Automated backup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup: Option<Backup>,

    /// Metrics exporter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitoring: Option<Monitoring>,

    /// Server and audit logging
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<CouchbaseLogging>,

    /// Persistent volume claim templates referenced by server classes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_claim_templates: Option<Vec<VolumeClaimTemplate>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum UpgradeStrategy {
    RollingUpgrade,
    ImmediateUpgrade,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum UpgradeProcess {
    SwapRebalance,
    DeltaRecovery,
    InPlaceUpgrade,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum HibernationStrategy {
    Immediate,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum RecoveryPolicy {
    PrioritizeDataIntegrity,
    PrioritizeUptime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Aws,
    Gce,
    Azure,
}

/// Limits applied while a rolling upgrade is in progress
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RollingUpgrade {
    /// Number of pods upgraded at once
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1))]
    pub max_upgradable: Option<i64>,

    /// Share of pods upgraded at once, e.g. `20%`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(regex(pattern = r"^(100|[1-9]?[0-9])%$"))]
    pub max_upgradable_percent: Option<String>,
}

/// Automatic pod resource allocation
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AutoResourceAllocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Memory added on top of the service quotas, as a percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0))]
    pub overhead_percent: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_limits: Option<IntOrString>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_requests: Option<IntOrString>,
}
