//! Resource trait
//!
//! A resource type plugs into the [`ProviderServer`](crate::server::ProviderServer)
//! by implementing [`Resource`]. Requests and responses carry Terraform
//! values as JSON objects keyed by attribute name; responses never fail,
//! they carry diagnostics instead.

use serde_json::Value;

use crate::diagnostics::Diagnostics;
use crate::schema::Schema;

#[derive(Debug, Clone)]
pub struct MetadataRequest {
    /// Name of the provider, the prefix of every resource type name
    pub provider_type_name: String,
}

#[derive(Debug, Clone)]
pub struct MetadataResponse {
    pub type_name: String,
}

#[derive(Debug, Clone)]
pub struct SchemaResponse {
    pub schema: Option<Schema>,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone)]
pub struct CreateRequest {
    /// Planned state, i.e. the configuration with computed attributes unknown
    pub plan: Value,
}

#[derive(Debug, Clone, Default)]
pub struct CreateResponse {
    /// New state; `None` when creation failed and nothing may be stored
    pub state: Option<Value>,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone)]
pub struct ReadRequest {
    pub state: Value,
}

#[derive(Debug, Clone, Default)]
pub struct ReadResponse {
    pub state: Option<Value>,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone)]
pub struct UpdateRequest {
    pub plan: Value,
    pub prior_state: Value,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateResponse {
    /// New state; `None` when the update failed and the prior state stands
    pub state: Option<Value>,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone)]
pub struct DeleteRequest {
    pub state: Value,
}

#[derive(Debug, Clone, Default)]
pub struct DeleteResponse {
    pub diagnostics: Diagnostics,
}

/// Lifecycle of one resource type
///
/// All async methods must be `Send` so resources can be served from Tokio's
/// work-stealing runtime.
#[async_trait::async_trait]
pub trait Resource: Send + Sync {
    /// Type name, derived from the provider name
    fn metadata(&self, request: &MetadataRequest) -> MetadataResponse;

    fn schema(&self) -> SchemaResponse;

    async fn create(&self, request: CreateRequest) -> CreateResponse;

    async fn read(&self, request: ReadRequest) -> ReadResponse;

    async fn update(&self, request: UpdateRequest) -> UpdateResponse;

    async fn delete(&self, request: DeleteRequest) -> DeleteResponse;
}
