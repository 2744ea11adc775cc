//! Manifest resources
//!
//! One generic resource serves every custom resource kind: the plan is
//! decoded into the Terraform model, its `metadata` and `spec` are
//! translated into the typed CRD object, and the object is rendered to YAML.
//! Nothing is sent to a cluster, so Read and Delete have no work to do.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crds::Manifest;
use provider_sdk::schema::attributes_for;
use provider_sdk::value::to_wire;
use provider_sdk::{
    Attribute, AttributeKind, AttributePath, Attributes, Clock, CreateRequest, CreateResponse, DeleteRequest,
    DeleteResponse, Diagnostics, MetadataRequest, MetadataResponse, ReadRequest, ReadResponse, Requirement,
    Resource, Schema, SchemaResponse, SdkError, SystemClock, UpdateRequest, UpdateResponse,
};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::metadata::{self, ManifestMetadata};
use crate::model::ResourceModel;

const DECODE_FAILED: &str = "Could not decode configuration";
const ID_FAILED: &str = "Could not generate ID";
const YAML_FAILED: &str = "Could not generate YAML";
const STATE_FAILED: &str = "Could not encode state";

/// Terraform resource rendering custom resources of kind `K`
pub struct ManifestResource<K> {
    schema: Schema,
    metadata_attributes: Attributes,
    spec_attributes: Attributes,
    clock: Arc<dyn Clock>,
    kind: PhantomData<fn() -> K>,
}

impl<K: Manifest> fmt::Debug for ManifestResource<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManifestResource")
            .field("api_version", &K::api_version(&()))
            .field("kind", &K::kind(&()))
            .field("clock", &self.clock)
            .finish()
    }
}

impl<K: Manifest> ManifestResource<K> {
    /// Resource using the wall clock for IDs
    pub fn new() -> Result<Self, SdkError> {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Result<Self, SdkError> {
        let metadata_attributes = metadata::attributes(Self::is_namespaced());
        let spec_attributes = attributes_for::<K::Spec>()?;
        Ok(Self {
            schema: manifest_schema::<K>(metadata_attributes.clone(), spec_attributes.clone()),
            metadata_attributes,
            spec_attributes,
            clock,
            kind: PhantomData,
        })
    }

    /// `<provider>_<group>_<kind>_<version>` with dots and dashes of the
    /// group replaced, e.g. `k8s_couchbase_com_couchbase_cluster_v2`
    pub fn type_name(provider_type_name: &str) -> String {
        let group = K::group(&()).replace(['.', '-'], "_");
        let kind = provider_sdk::schema::to_snake_case(&K::kind(&()));
        format!("{provider_type_name}_{group}_{kind}_{}", K::version(&()))
    }

    pub fn is_namespaced() -> bool {
        K::crd().spec.scope == "Namespaced"
    }

    /// Decode the plan, stamp type information, assign an ID and render YAML
    fn render(&self, plan: &Value) -> Result<ResourceModel, Diagnostics> {
        let mut model: ResourceModel = serde_json::from_value(plan.clone())
            .map_err(|e| decode_failed(AttributePath::root(), e.to_string()))?;

        let metadata_path = AttributePath::root().attribute("metadata");
        let metadata_wire = to_wire(&self.metadata_attributes, &model.metadata, &metadata_path)
            .map_err(|e| translation_failed(metadata_path.clone(), e))?;
        let metadata: ManifestMetadata =
            serde_json::from_value(metadata_wire).map_err(|e| decode_failed(metadata_path, e.to_string()))?;

        let spec_path = AttributePath::root().attribute("spec");
        let spec_wire = to_wire(&self.spec_attributes, &model.spec, &spec_path)
            .map_err(|e| translation_failed(spec_path.clone(), e))?;
        let spec: K::Spec =
            serde_json::from_value(spec_wire).map_err(|e| decode_failed(spec_path, e.to_string()))?;

        let object = K::from_parts(metadata.into(), spec);

        model.api_version = Some(K::api_version(&()).into_owned());
        model.kind = Some(K::kind(&()).into_owned());
        model.id = Some(self.clock.now_nanos().map_err(|e| single(ID_FAILED, e.to_string()))?);
        model.yaml = Some(to_yaml(&object, model.spec.is_null()).map_err(|e| single(YAML_FAILED, e))?);

        Ok(model)
    }

    /// Render the plan and encode the result as new state
    fn apply(&self, plan: &Value) -> (Option<Value>, Diagnostics) {
        let model = match self.render(plan) {
            Ok(model) => model,
            Err(diagnostics) => {
                for diagnostic in diagnostics.errors() {
                    warn!(summary = %diagnostic.summary, detail = %diagnostic.detail, "Manifest not rendered");
                }
                return (None, diagnostics);
            }
        };

        match serde_json::to_value(&model) {
            Ok(state) => {
                info!(id = ?model.id, kind = ?model.kind, "Rendered manifest");
                (Some(state), Diagnostics::new())
            }
            Err(e) => (None, single(STATE_FAILED, e.to_string())),
        }
    }
}

#[async_trait::async_trait]
impl<K: Manifest> Resource for ManifestResource<K> {
    fn metadata(&self, request: &MetadataRequest) -> MetadataResponse {
        MetadataResponse {
            type_name: Self::type_name(&request.provider_type_name),
        }
    }

    fn schema(&self) -> SchemaResponse {
        SchemaResponse {
            schema: Some(self.schema.clone()),
            diagnostics: Diagnostics::new(),
        }
    }

    #[instrument(skip_all, fields(kind = %K::kind(&())))]
    async fn create(&self, request: CreateRequest) -> CreateResponse {
        let (state, diagnostics) = self.apply(&request.plan);
        CreateResponse { state, diagnostics }
    }

    #[instrument(skip_all, fields(kind = %K::kind(&())))]
    async fn read(&self, request: ReadRequest) -> ReadResponse {
        debug!("Nothing to refresh, keeping state");
        ReadResponse {
            state: Some(request.state),
            diagnostics: Diagnostics::new(),
        }
    }

    #[instrument(skip_all, fields(kind = %K::kind(&())))]
    async fn update(&self, request: UpdateRequest) -> UpdateResponse {
        let (state, diagnostics) = self.apply(&request.plan);
        UpdateResponse { state, diagnostics }
    }

    #[instrument(skip_all, fields(kind = %K::kind(&())))]
    async fn delete(&self, _request: DeleteRequest) -> DeleteResponse {
        debug!("Nothing to delete, dropping state");
        DeleteResponse::default()
    }
}

/// Schema shared by all manifest resources
fn manifest_schema<K: Manifest>(metadata: Attributes, spec: Attributes) -> Schema {
    let spec_requirement = if spec.any_required() {
        Requirement::Required
    } else {
        Requirement::Optional
    };
    let api_version = K::api_version(&());
    let kind = K::kind(&());

    let attributes = Attributes::new()
        .with(
            "id",
            Attribute::computed("id", AttributeKind::Int64)
                .with_description("Time of the last create or update, in nanoseconds since the Unix epoch"),
        )
        .with(
            "yaml",
            Attribute::computed("yaml", AttributeKind::String).with_description("The generated manifest in YAML format"),
        )
        .with(
            "api_version",
            Attribute::computed("apiVersion", AttributeKind::String)
                .with_description(format!("The API group and version, always {api_version}")),
        )
        .with(
            "kind",
            Attribute::computed("kind", AttributeKind::String).with_description(format!("The resource kind, always {kind}")),
        )
        .with(
            "metadata",
            Attribute::required("metadata", AttributeKind::SingleNested(metadata))
                .with_description("Data that helps uniquely identify the object"),
        )
        .with(
            "spec",
            Attribute::new("spec", AttributeKind::SingleNested(spec), spec_requirement)
                .with_description(format!("Desired state of the {kind}")),
        );

    Schema {
        version: 0,
        description: Some(format!("Creates a {kind} ({api_version}) manifest as YAML without applying it")),
        attributes,
    }
}

/// Serialize the object, leaving out `spec` when it was not configured
fn to_yaml<K: Manifest>(object: &K, omit_spec: bool) -> Result<String, String> {
    if !omit_spec {
        return serde_yaml::to_string(object).map_err(|e| e.to_string());
    }
    let mut value = serde_json::to_value(object).map_err(|e| e.to_string())?;
    if let Some(fields) = value.as_object_mut() {
        fields.remove("spec");
    }
    serde_yaml::to_string(&value).map_err(|e| e.to_string())
}

fn decode_failed(path: AttributePath, detail: String) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    diagnostics.add_attribute_error(path, DECODE_FAILED, detail);
    diagnostics
}

/// Report a translation error at the attribute it names
fn translation_failed(path: AttributePath, error: SdkError) -> Diagnostics {
    match error {
        SdkError::Decode { path, message } => decode_failed(path, message),
        other => decode_failed(path, other.to_string()),
    }
}

fn single(summary: &str, detail: String) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    diagnostics.add_error(summary, detail);
    diagnostics
}
