//! Registry of the resource types served by the provider

use std::sync::Arc;

use crds::{CouchbaseCluster, Gateway, GatewayClass, HTTPRoute};
use provider_sdk::{Clock, ProviderServer, SdkError};

use crate::manifest::ManifestResource;

/// Register every manifest resource on `server`, taking IDs from `clock`
pub fn register_all(mut server: ProviderServer, clock: &Arc<dyn Clock>) -> Result<ProviderServer, SdkError> {
    server.register(Arc::new(ManifestResource::<CouchbaseCluster>::with_clock(Arc::clone(clock))?));
    server.register(Arc::new(ManifestResource::<GatewayClass>::with_clock(Arc::clone(clock))?));
    server.register(Arc::new(ManifestResource::<Gateway>::with_clock(Arc::clone(clock))?));
    server.register(Arc::new(ManifestResource::<HTTPRoute>::with_clock(Arc::clone(clock))?));
    Ok(server)
}
