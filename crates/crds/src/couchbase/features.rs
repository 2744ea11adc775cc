//! Operator-managed Couchbase features: buckets, XDCR, backup and monitoring

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::common::{LabelSelector, ResourceRequirements, Toleration};

/// Bucket management
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Buckets {
    /// Let the operator create and delete buckets from bucket resources
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed: Option<bool>,

    /// Selects the bucket resources belonging to this cluster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,

    /// Create bucket resources for buckets found on the cluster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synchronize: Option<bool>,
}

/// Cross data center replication
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Xdcr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,

    /// Clusters replicated to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_clusters: Option<Vec<RemoteCluster>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCluster {
    pub name: String,

    /// UUID of the remote cluster
    #[schemars(regex(pattern = r"^[0-9a-f]{32}$"))]
    pub uuid: String,

    /// Connection string of the remote cluster
    pub hostname: String,

    /// Secret holding credentials for the remote cluster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication_secret: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<RemoteClusterTls>,

    /// Selects the replication resources for this remote
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replications: Option<Replications>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteClusterTls {
    pub secret: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Replications {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,
}

/// Automated backup
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed: Option<bool>,

    /// Image of the backup tooling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account_name: Option<String>,

    /// Secret holding S3 credentials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_secret: Option<String>,

    /// Use the pod's cloud IAM role instead of a secret
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "useIAMRole")]
    pub use_iam_role: Option<bool>,

    /// Custom object store endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_endpoint: Option<ObjectEndpoint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,

    /// Selects the backup resources for this cluster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_selector: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerations: Option<Vec<Toleration>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectEndpoint {
    pub url: String,

    /// Secret holding the CA certificate of the endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,

    /// Use path-style rather than virtual-host addressing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_virtual_path: Option<bool>,
}

/// Metrics exporters
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Monitoring {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prometheus: Option<Prometheus>,
}

/// Prometheus exporter sidecar
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Prometheus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Secret holding a bearer token required to scrape metrics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_secret: Option<String>,

    /// Seconds between metric refreshes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 600))]
    pub refresh_rate: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,
}
