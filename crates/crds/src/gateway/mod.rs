//! Gateway API CRDs (`gateway.networking.k8s.io/v1`)
//!
//! Resources for describing L7 ingress:
//! - GatewayClass (cluster scoped, names the implementing controller)
//! - Gateway (listeners bound to a class)
//! - HTTPRoute (HTTP routing rules attached to gateways)

pub mod references;
pub mod gateway_class;
pub mod gateway;
pub mod http_route;

pub use references::*;
pub use gateway_class::*;
pub use gateway::*;
pub use http_route::*;
