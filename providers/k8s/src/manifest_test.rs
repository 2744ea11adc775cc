//! Unit tests for the generic manifest resource

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crds::{CouchbaseCluster, GatewayClass, HTTPRoute, Manifest};
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
    use kube::CustomResource;
    use provider_sdk::{
        AttributeKind, BrokenClock, CreateRequest, DeleteRequest, FixedClock, MetadataRequest, ReadRequest,
        Requirement, Resource, UpdateRequest,
    };
    use schemars::JsonSchema;
    use serde::{Deserialize, Serialize, Serializer};
    use serde_json::{Value, json};

    use crate::manifest::ManifestResource;

    /// A kind whose spec can never be encoded
    #[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema)]
    #[kube(group = "example.com", version = "v1", kind = "Sealed", namespaced)]
    pub struct SealedSpec {
        #[serde(serialize_with = "refuse")]
        pub secret: String,
    }

    fn refuse<S: Serializer>(_value: &str, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom("sealed values cannot be encoded"))
    }

    impl Manifest for Sealed {
        type Spec = SealedSpec;

        fn from_parts(metadata: ObjectMeta, spec: SealedSpec) -> Self {
            Self { metadata, spec }
        }

        fn spec(&self) -> &SealedSpec {
            &self.spec
        }
    }

    fn resource<K: Manifest>(id: i64) -> ManifestResource<K> {
        ManifestResource::<K>::with_clock(Arc::new(FixedClock(id))).unwrap()
    }

    fn gateway_class_plan() -> Value {
        json!({
            "metadata": {"name": "internet", "labels": null, "annotations": null},
            "spec": {
                "controller_name": "example.net/gateway-controller",
                "description": null,
                "parameters_ref": null
            }
        })
    }

    #[test]
    fn type_names_follow_group_kind_version() {
        assert_eq!(
            ManifestResource::<CouchbaseCluster>::type_name("k8s"),
            "k8s_couchbase_com_couchbase_cluster_v2"
        );
        assert_eq!(
            ManifestResource::<HTTPRoute>::type_name("k8s"),
            "k8s_gateway_networking_k8s_io_http_route_v1"
        );
        assert_eq!(ManifestResource::<Sealed>::type_name("test"), "test_example_com_sealed_v1");

        let metadata = resource::<GatewayClass>(1).metadata(&MetadataRequest {
            provider_type_name: "k8s".to_string(),
        });
        assert_eq!(metadata.type_name, "k8s_gateway_networking_k8s_io_gateway_class_v1");
    }

    #[test]
    fn schema_declares_computed_and_nested_attributes() {
        let schema = resource::<CouchbaseCluster>(1).schema().schema.unwrap();

        for computed in ["id", "yaml", "api_version", "kind"] {
            assert_eq!(schema.attribute(computed).unwrap().requirement, Requirement::Computed);
        }
        assert_eq!(schema.attribute("id").unwrap().kind, AttributeKind::Int64);
        assert_eq!(schema.attribute("metadata").unwrap().requirement, Requirement::Required);
        assert_eq!(schema.attribute("spec").unwrap().requirement, Requirement::Required);

        let metadata = schema.attribute("metadata").unwrap().nested().unwrap();
        assert!(metadata.contains("namespace"));
    }

    #[test]
    fn cluster_scoped_kinds_have_no_namespace() {
        let schema = resource::<GatewayClass>(1).schema().schema.unwrap();
        let metadata = schema.attribute("metadata").unwrap().nested().unwrap();
        assert!(!metadata.contains("namespace"));
    }

    #[test]
    fn all_optional_spec_is_optional() {
        let schema = resource::<HTTPRoute>(1).schema().schema.unwrap();
        assert_eq!(schema.attribute("spec").unwrap().requirement, Requirement::Optional);
    }

    #[tokio::test]
    async fn create_stamps_type_and_pinned_id() {
        let response = resource::<GatewayClass>(1_700_000_000_000_000_000)
            .create(CreateRequest {
                plan: gateway_class_plan(),
            })
            .await;
        assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);

        let state = response.state.unwrap();
        assert_eq!(state["id"], json!(1_700_000_000_000_000_000_i64));
        assert_eq!(state["api_version"], "gateway.networking.k8s.io/v1");
        assert_eq!(state["kind"], "GatewayClass");
        assert_eq!(state["metadata"], gateway_class_plan()["metadata"]);
        assert_eq!(state["spec"], gateway_class_plan()["spec"]);

        let yaml = state["yaml"].as_str().unwrap();
        assert!(yaml.starts_with("apiVersion: gateway.networking.k8s.io/v1\nkind: GatewayClass\n"));
        assert!(yaml.contains("controllerName: example.net/gateway-controller"));
        assert!(!yaml.contains("description"));
        assert!(!yaml.contains("labels"));
    }

    #[tokio::test]
    async fn configured_type_information_is_overwritten() {
        let mut plan = gateway_class_plan();
        plan["api_version"] = json!("v1");
        plan["kind"] = json!("ConfigMap");

        let state = resource::<GatewayClass>(1)
            .create(CreateRequest { plan })
            .await
            .state
            .unwrap();
        assert_eq!(state["api_version"], "gateway.networking.k8s.io/v1");
        assert_eq!(state["kind"], "GatewayClass");
    }

    #[tokio::test]
    async fn update_renders_fresh_id_from_plan() {
        let prior_state = json!({"id": 1, "yaml": "old", "metadata": {"name": "old"}, "spec": {}});
        let mut plan = gateway_class_plan();
        plan["spec"]["description"] = json!("Public traffic");

        let response = resource::<GatewayClass>(2)
            .update(UpdateRequest { plan, prior_state })
            .await;
        let state = response.state.unwrap();
        assert_eq!(state["id"], json!(2));
        assert!(state["yaml"].as_str().unwrap().contains("description: Public traffic"));
        assert!(state["yaml"].as_str().unwrap().contains("name: internet"));
    }

    #[tokio::test]
    async fn unset_optional_spec_is_left_out() {
        let plan = json!({"metadata": {"name": "catch-all", "namespace": "edge"}});
        let state = resource::<HTTPRoute>(5).create(CreateRequest { plan }).await.state.unwrap();

        assert_eq!(
            state["yaml"],
            "apiVersion: gateway.networking.k8s.io/v1\nkind: HTTPRoute\nmetadata:\n  name: catch-all\n  namespace: edge\n"
        );
    }

    #[tokio::test]
    async fn yaml_failure_writes_no_state() {
        let plan = json!({"metadata": {"name": "vault"}, "spec": {"secret": "hunter2"}});
        let response = resource::<Sealed>(1).create(CreateRequest { plan }).await;

        assert!(response.state.is_none());
        assert_eq!(response.diagnostics.len(), 1);
        let diagnostic = response.diagnostics.iter().next().unwrap();
        assert_eq!(diagnostic.summary, "Could not generate YAML");
        assert!(diagnostic.detail.contains("sealed values cannot be encoded"));
    }

    #[tokio::test]
    async fn clock_failure_writes_no_state() {
        let resource = ManifestResource::<GatewayClass>::with_clock(Arc::new(BrokenClock)).unwrap();
        let response = resource
            .create(CreateRequest {
                plan: gateway_class_plan(),
            })
            .await;

        assert!(response.state.is_none());
        assert_eq!(response.diagnostics.iter().next().unwrap().summary, "Could not generate ID");
    }

    #[tokio::test]
    async fn undecodable_plan_reports_path() {
        let plan = json!({"metadata": {"name": "internet"}, "spec": {"controller": "x"}});
        let response = resource::<GatewayClass>(1).create(CreateRequest { plan }).await;

        assert!(response.state.is_none());
        let diagnostic = response.diagnostics.iter().next().unwrap();
        assert_eq!(diagnostic.summary, "Could not decode configuration");
        assert_eq!(diagnostic.attribute.as_ref().unwrap().to_string(), "spec.controller");
    }

    #[tokio::test]
    async fn cluster_scoped_kinds_reject_namespace() {
        let mut plan = gateway_class_plan();
        plan["metadata"]["namespace"] = json!("default");
        let response = resource::<GatewayClass>(1).create(CreateRequest { plan }).await;

        assert!(response.state.is_none());
        assert_eq!(response.diagnostics.iter().next().unwrap().summary, "Could not decode configuration");
    }

    #[tokio::test]
    async fn read_and_delete_are_no_ops() {
        let resource = resource::<GatewayClass>(1);
        let state = json!({"id": 42, "yaml": "kind: GatewayClass\n", "metadata": {"name": "internet"}});

        let read = resource.read(ReadRequest { state: state.clone() }).await;
        assert_eq!(read.state, Some(state.clone()));
        assert!(read.diagnostics.is_empty());

        let deleted = resource.delete(DeleteRequest { state }).await;
        assert!(deleted.diagnostics.is_empty());
    }
}
