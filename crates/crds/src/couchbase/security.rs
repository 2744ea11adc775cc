//! Couchbase authentication and authorization (`spec.security`)

use k8s_openapi::api::core::v1::{PodSecurityContext, SecurityContext};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::common::LabelSelector;

/// Cluster security settings
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Security {
    /// Secret holding the `username` and `password` of the cluster administrator
    pub admin_secret: String,

    /// Role based access control
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rbac: Option<Rbac>,

    /// External LDAP authentication
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ldap: Option<Ldap>,

    /// Idle seconds before a web console session expires; 0 disables the timeout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0, max = 16666))]
    pub ui_session_timeout: Option<i64>,

    /// Security attributes of every Couchbase pod
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_security_context: Option<PodSecurityContext>,

    /// Security attributes of the Couchbase server container
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_context: Option<SecurityContext>,
}

/// Selects the users and groups the operator manages
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Rbac {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,
}

/// LDAP server connection and mapping
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Ldap {
    /// LDAP server host names
    #[schemars(length(min = 1))]
    pub hosts: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0, max = 65535))]
    pub port: Option<i64>,

    /// Distinguished name used to bind to the server
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "bindDN")]
    pub bind_dn: Option<String>,

    /// Secret holding the bind password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind_secret: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption: Option<LdapEncryption>,

    /// Secret holding the CA certificate of the LDAP server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_secret: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_cert_validation: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication_enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_enabled: Option<bool>,

    /// Maps user names to LDAP distinguished names
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "userDNMapping")]
    pub user_dn_mapping: Option<UserDnMapping>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups_query: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested_groups_enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 100))]
    pub nested_groups_max_depth: Option<i64>,

    /// Milliseconds LDAP lookups are cached for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0))]
    pub cache_value_lifetime: Option<i64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum LdapEncryption {
    None,
    #[serde(rename = "StartTLSExtension")]
    StartTlsExtension,
    #[serde(rename = "TLS")]
    Tls,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserDnMapping {
    /// Template such as `uid=%u,ou=users,dc=example,dc=com`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}
