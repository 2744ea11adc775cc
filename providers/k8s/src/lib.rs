//! Kubernetes manifest provider
//!
//! Terraform-style resources that turn a `metadata` and `spec` configuration
//! into the YAML manifest of a custom resource. Supported kinds:
//!
//! - `couchbase.com/v2`: CouchbaseCluster
//! - `gateway.networking.k8s.io/v1`: GatewayClass, Gateway, HTTPRoute
//!
//! Each resource stores the rendered `yaml` with a nanosecond timestamp `id`;
//! nothing is applied to a cluster.

pub mod config;
pub mod error;
pub mod manifest;
#[cfg(test)]
mod manifest_test;
pub mod metadata;
pub mod model;
pub mod resources;

use std::sync::Arc;

use provider_sdk::{Clock, ProviderServer, SystemClock};

pub use config::ProviderConfig;
pub use error::ProviderError;
pub use manifest::ManifestResource;
pub use model::ResourceModel;

/// Build the provider with every resource type registered
pub fn provider_server(config: &ProviderConfig) -> Result<ProviderServer, ProviderError> {
    provider_server_with_clock(config, Arc::new(SystemClock))
}

/// Build the provider with IDs taken from `clock`
pub fn provider_server_with_clock(
    config: &ProviderConfig,
    clock: Arc<dyn Clock>,
) -> Result<ProviderServer, ProviderError> {
    let server = ProviderServer::new(config.type_name.clone());
    Ok(resources::register_all(server, &clock)?)
}
