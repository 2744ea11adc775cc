//! CRD Definitions
//!
//! Typed models of the Kubernetes custom resources the provider renders to
//! YAML manifests:
//! - `couchbase.com/v2`: CouchbaseCluster
//! - `gateway.networking.k8s.io/v1`: GatewayClass, Gateway, HTTPRoute
//!
//! Every optional field is an `Option` that is skipped when unset, so a
//! serialized resource only carries what was configured.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::{CustomResourceExt, Resource};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod common;
pub mod couchbase;
pub mod gateway;

pub use common::*;
pub use couchbase::*;
pub use gateway::*;

/// A custom resource that can be assembled from metadata and a typed spec
///
/// Implemented for every root type generated by `#[derive(CustomResource)]`
/// in this crate.
pub trait Manifest:
    Resource<DynamicType = ()> + CustomResourceExt + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// The `spec` type the resource was derived from
    type Spec: JsonSchema + Serialize + DeserializeOwned + Send + Sync;

    /// Build the resource from its parts
    fn from_parts(metadata: ObjectMeta, spec: Self::Spec) -> Self;

    /// Borrow the spec
    fn spec(&self) -> &Self::Spec;
}

macro_rules! impl_manifest {
    ($($kind:ty => $spec:ty),+ $(,)?) => {
        $(
            impl Manifest for $kind {
                type Spec = $spec;

                fn from_parts(metadata: ObjectMeta, spec: $spec) -> Self {
                    Self { metadata, spec }
                }

                fn spec(&self) -> &$spec {
                    &self.spec
                }
            }
        )+
    };
}

impl_manifest! {
    CouchbaseCluster => CouchbaseClusterSpec,
    GatewayClass => GatewayClassSpec,
    Gateway => GatewaySpec,
    HTTPRoute => HTTPRouteSpec,
}

/// Render the CRDs of every resource in this crate as one YAML stream
pub fn crds_yaml() -> Result<String, serde_yaml::Error> {
    let crds = [
        CouchbaseCluster::crd(),
        GatewayClass::crd(),
        Gateway::crd(),
        HTTPRoute::crd(),
    ];

    let mut out = String::new();
    for crd in &crds {
        out.push_str("---\n");
        out.push_str(&serde_yaml::to_string(crd)?);
    }
    Ok(out)
}
