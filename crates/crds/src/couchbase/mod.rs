//! Couchbase Autonomous Operator CRDs (`couchbase.com/v2`)
//!
//! Only `CouchbaseCluster` is modelled. Its spec is large, so it is split by
//! concern:
//! - Cluster-wide settings (memory quotas, auto-failover, compaction)
//! - Security (admin secret, RBAC, LDAP)
//! - Networking (exposed features, TLS, DNS)
//! - Server classes
//! - Managed features (buckets, XDCR, backup, monitoring)
//! - Logging

pub mod cluster;
pub mod logging;
pub mod networking;
pub mod security;
pub mod servers;
pub mod settings;
pub mod features;

pub use cluster::*;
pub use logging::*;
pub use networking::*;
pub use security::*;
pub use servers::*;
pub use settings::*;
pub use features::*;
