//! Couchbase network exposure and TLS (`spec.networking`)

use k8s_openapi::api::core::v1::ServiceSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::CouchbaseService;
use crate::common::TemplateMetadata;

/// Networking settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Networking {
    /// Create a service for the web console
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expose_admin_console: Option<bool>,

    /// Restrict the console service to pods running these services
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_console_services: Option<Vec<CouchbaseService>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_console_service_template: Option<ServiceTemplate>,

    /// Per-pod services to create
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exposed_features: Option<Vec<ExposedFeature>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exposed_feature_service_template: Option<ServiceTemplate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exposed_feature_traffic_policy: Option<TrafficPolicy>,

    /// TLS for client and node to node traffic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<Tls>,

    /// Public DNS configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns: Option<Dns>,

    /// Service mesh the cluster runs under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_platform: Option<NetworkPlatform>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_balancer_source_ranges: Option<Vec<String>>,

    /// Wait for this address to become reachable before creating pods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_for_address_reachable: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_for_address_reachable_delay: Option<String>,

    /// Serve the web console over HTTPS only
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "disableUIOverHTTP")]
    pub disable_ui_over_http: Option<bool>,

    /// Serve the web console over HTTP only
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "disableUIOverHTTPS")]
    pub disable_ui_over_https: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_family: Option<AddressFamily>,

    /// Cloud native gateway sidecar
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_native_gateway: Option<CloudNativeGateway>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExposedFeature {
    Admin,
    Xdcr,
    Client,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum TrafficPolicy {
    Cluster,
    Local,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum NetworkPlatform {
    Istio,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum AddressFamily {
    IPv4,
    IPv6,
}

/// Template for services created by the operator
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TemplateMetadata>,

    /// Service spec merged into the generated service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<ServiceSpec>,
}

/// TLS configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Tls {
    /// Secrets holding additional trusted CA certificates
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "rootCAs")]
    pub root_cas: Option<Vec<String>>,

    /// Secrets holding the server and operator client certificates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_source: Option<TlsSecretSource>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_certificate_policy: Option<ClientCertificatePolicy>,

    /// Where a user name is read from in a client certificate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_certificate_paths: Option<Vec<ClientCertificatePath>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_to_node_encryption: Option<NodeToNodeEncryption>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_minimum_version: Option<TlsVersion>,

    /// Cipher suites in IANA notation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cipher_suites: Option<Vec<String>>,

    /// Allow certificates to be reloaded without encrypting the private key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_plain_text_cert_reload: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TlsSecretSource {
    /// Secret holding `tls.crt`, `tls.key` and `ca.crt` for the server
    pub server_secret_name: String,

    /// Secret holding the operator's client certificate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret_name: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ClientCertificatePolicy {
    Enable,
    Mandatory,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClientCertificatePath {
    /// Certificate field, e.g. `subject.cn` or `san.email`
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum NodeToNodeEncryption {
    ControlPlaneOnly,
    All,
    Strict,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum TlsVersion {
    #[serde(rename = "TLS1.0")]
    Tls10,
    #[serde(rename = "TLS1.1")]
    Tls11,
    #[serde(rename = "TLS1.2")]
    Tls12,
    #[serde(rename = "TLS1.3")]
    Tls13,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Dns {
    /// Domain under which per-pod DNS names are published
    pub domain: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CloudNativeGateway {
    pub image: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<CloudNativeGatewayTls>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CloudNativeGatewayTls {
    pub server_secret_name: String,
}
