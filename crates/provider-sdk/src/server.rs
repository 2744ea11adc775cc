//! Provider server
//!
//! Registry of resource types keyed by their full type name, and the entry
//! points a host drives: list types, fetch a schema, validate configuration,
//! apply a planned change and refresh state.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::resource::{
    CreateRequest, DeleteRequest, MetadataRequest, ReadRequest, ReadResponse, Resource, SchemaResponse,
    UpdateRequest,
};
use crate::validate::validate_config;

/// Result of applying a planned change
#[derive(Debug, Clone, Default)]
pub struct ApplyResponse {
    /// State to store; `None` means the resource no longer has state
    pub new_state: Option<Value>,
    pub diagnostics: Diagnostics,
}

pub struct ProviderServer {
    type_name: String,
    resources: BTreeMap<String, Arc<dyn Resource>>,
}

impl fmt::Debug for ProviderServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderServer")
            .field("type_name", &self.type_name)
            .field("resources", &self.resources.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ProviderServer {
    /// Create a server for the provider named `type_name`
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            resources: BTreeMap::new(),
        }
    }

    /// Register a resource under the type name it reports
    pub fn with_resource(mut self, resource: Arc<dyn Resource>) -> Self {
        self.register(resource);
        self
    }

    pub fn register(&mut self, resource: Arc<dyn Resource>) {
        let metadata = resource.metadata(&MetadataRequest {
            provider_type_name: self.type_name.clone(),
        });
        debug!(type_name = %metadata.type_name, "Registered resource type");
        if self.resources.insert(metadata.type_name.clone(), resource).is_some() {
            warn!(type_name = %metadata.type_name, "Resource type registered twice, keeping the last one");
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Registered resource type names, sorted
    pub fn resource_types(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    pub fn schema(&self, type_name: &str) -> SchemaResponse {
        match self.resource(type_name) {
            Ok(resource) => resource.schema(),
            Err(diagnostic) => SchemaResponse {
                schema: None,
                diagnostics: diagnostic.into(),
            },
        }
    }

    /// Check a configuration against the resource schema
    #[instrument(skip(self, config))]
    pub fn validate_resource_config(&self, type_name: &str, config: &Value) -> Diagnostics {
        let resource = match self.resource(type_name) {
            Ok(resource) => resource,
            Err(diagnostic) => return diagnostic.into(),
        };
        let response = resource.schema();
        match response.schema {
            Some(schema) => {
                let mut diagnostics = response.diagnostics;
                diagnostics.append(validate_config(&schema.attributes, config));
                diagnostics
            }
            None => response.diagnostics,
        }
    }

    /// Apply a planned change
    ///
    /// No prior state creates, both states update, no planned state deletes.
    /// When create or update reports an error nothing new is stored: the
    /// prior state, if any, stands.
    #[instrument(skip(self, prior_state, planned_state))]
    pub async fn apply(
        &self,
        type_name: &str,
        prior_state: Option<Value>,
        planned_state: Option<Value>,
    ) -> ApplyResponse {
        let resource = match self.resource(type_name) {
            Ok(resource) => resource,
            Err(diagnostic) => {
                return ApplyResponse {
                    new_state: prior_state,
                    diagnostics: diagnostic.into(),
                };
            }
        };

        match (prior_state, planned_state) {
            (None, Some(plan)) => {
                let response = resource.create(CreateRequest { plan }).await;
                let new_state = if response.diagnostics.has_error() { None } else { response.state };
                ApplyResponse {
                    new_state,
                    diagnostics: response.diagnostics,
                }
            }
            (Some(prior_state), Some(plan)) => {
                let response = resource
                    .update(UpdateRequest {
                        plan,
                        prior_state: prior_state.clone(),
                    })
                    .await;
                let new_state = if response.diagnostics.has_error() {
                    Some(prior_state)
                } else {
                    response.state
                };
                ApplyResponse {
                    new_state,
                    diagnostics: response.diagnostics,
                }
            }
            (Some(state), None) => {
                let response = resource.delete(DeleteRequest { state: state.clone() }).await;
                let new_state = if response.diagnostics.has_error() { Some(state) } else { None };
                ApplyResponse {
                    new_state,
                    diagnostics: response.diagnostics,
                }
            }
            (None, None) => ApplyResponse::default(),
        }
    }

    /// Refresh stored state
    #[instrument(skip(self, state))]
    pub async fn read(&self, type_name: &str, state: Value) -> ReadResponse {
        match self.resource(type_name) {
            Ok(resource) => resource.read(ReadRequest { state }).await,
            Err(diagnostic) => ReadResponse {
                state: Some(state),
                diagnostics: diagnostic.into(),
            },
        }
    }

    fn resource(&self, type_name: &str) -> Result<&Arc<dyn Resource>, Diagnostic> {
        self.resources.get(type_name).ok_or_else(|| {
            Diagnostic::error(
                "Resource Type Not Found",
                format!("The resource type \"{type_name}\" is not supported by the {} provider.", self.type_name),
            )
        })
    }
}
