//! Integration tests for the CouchbaseCluster manifest resource
//!
//! Drive the resource through the provider server the way a host would:
//! validate the configuration, then apply it.

use std::sync::Arc;

use crds::{CouchbaseCluster, CouchbaseService, IntOrString};
use provider_sdk::{FixedClock, ProviderServer};
use serde_json::{Value, json};
use terraform_provider_k8s::{ProviderConfig, provider_server_with_clock};

const TYPE_NAME: &str = "k8s_couchbase_com_couchbase_cluster_v2";

fn server() -> ProviderServer {
    provider_server_with_clock(&ProviderConfig::default(), Arc::new(FixedClock(1_712_345_678_901_234_567)))
        .expect("provider should build")
}

fn example_config() -> Value {
    json!({
        "metadata": {"name": "mycluster"},
        "spec": {
            "image": "couchbase/server:7.6.0",
            "servers": [
                {"name": "all_services", "size": 3, "services": ["data", "index", "query"]}
            ]
        }
    })
}

async fn create(server: &ProviderServer, config: Value) -> Value {
    let diagnostics = server.validate_resource_config(TYPE_NAME, &config);
    assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics:?}");
    let response = server.apply(TYPE_NAME, None, Some(config)).await;
    assert!(response.diagnostics.is_empty(), "unexpected diagnostics: {:?}", response.diagnostics);
    response.new_state.expect("state should be stored")
}

fn manifest(state: &Value) -> serde_yaml::Value {
    serde_yaml::from_str(state["yaml"].as_str().expect("yaml should be a string")).expect("yaml should parse")
}

#[tokio::test]
async fn renders_minimal_cluster() {
    let state = create(&server(), example_config()).await;

    assert_eq!(state["id"], json!(1_712_345_678_901_234_567_i64));
    assert_eq!(state["api_version"], "couchbase.com/v2");
    assert_eq!(state["kind"], "CouchbaseCluster");

    let expected: serde_yaml::Value = serde_yaml::from_str(
        r"
apiVersion: couchbase.com/v2
kind: CouchbaseCluster
metadata:
  name: mycluster
spec:
  image: couchbase/server:7.6.0
  servers:
    - name: all_services
      size: 3
      services: [data, index, query]
",
    )
    .unwrap();
    assert_eq!(manifest(&state), expected);
}

#[tokio::test]
async fn manifest_round_trips_into_typed_cluster() {
    let state = create(&server(), example_config()).await;
    let cluster: CouchbaseCluster = serde_yaml::from_str(state["yaml"].as_str().unwrap()).unwrap();

    assert_eq!(cluster.metadata.name.as_deref(), Some("mycluster"));
    assert_eq!(cluster.spec.image, "couchbase/server:7.6.0");
    assert_eq!(cluster.spec.servers.len(), 1);
    assert_eq!(cluster.spec.servers[0].size, 3);
    assert_eq!(
        cluster.spec.servers[0].services,
        Some(vec![CouchbaseService::Data, CouchbaseService::Index, CouchbaseService::Query])
    );
    assert!(cluster.spec.security.is_none());
}

#[tokio::test]
async fn acronym_fields_keep_their_wire_names() {
    let mut config = example_config();
    config["metadata"]["namespace"] = json!("databases");
    config["spec"]["security"] = json!({
        "admin_secret": "cb-admin",
        "ldap": {
            "hosts": ["ldap.example.com"],
            "bind_dn": "cn=admin,dc=example,dc=com",
            "user_dn_mapping": {"template": "uid=%u,ou=users,dc=example,dc=com"}
        }
    });
    config["spec"]["networking"] = json!({
        "disable_ui_over_http": true,
        "tls": {"root_cas": ["ca-cert"], "tls_minimum_version": "TLS1.2"}
    });

    let manifest = manifest(&create(&server(), config).await);
    let spec = &manifest["spec"];
    assert_eq!(manifest["metadata"]["namespace"], "databases");
    assert_eq!(spec["security"]["adminSecret"], "cb-admin");
    assert_eq!(spec["security"]["ldap"]["bindDN"], "cn=admin,dc=example,dc=com");
    assert_eq!(spec["security"]["ldap"]["userDNMapping"]["template"], "uid=%u,ou=users,dc=example,dc=com");
    assert_eq!(spec["networking"]["disableUIOverHTTP"], true);
    assert_eq!(spec["networking"]["tls"]["rootCAs"][0], "ca-cert");
    assert_eq!(spec["networking"]["tls"]["tlsMinimumVersion"], "TLS1.2");
}

#[tokio::test]
async fn memory_quotas_accept_integers_and_quantities() {
    let mut config = example_config();
    config["spec"]["cluster"] = json!({
        "data_service_memory_quota": "256",
        "index_service_memory_quota": "1Gi"
    });

    let state = create(&server(), config).await;
    let cluster: CouchbaseCluster = serde_yaml::from_str(state["yaml"].as_str().unwrap()).unwrap();
    let settings = cluster.spec.cluster.unwrap();
    assert_eq!(settings.data_service_memory_quota, Some(IntOrString::Int(256)));
    assert_eq!(settings.index_service_memory_quota, Some(IntOrString::String("1Gi".to_string())));
    assert!(settings.query_service_memory_quota.is_none());
}

#[tokio::test]
async fn unset_fields_stay_out_of_the_manifest() {
    let mut config = example_config();
    config["spec"]["paused"] = Value::Null;
    config["spec"]["buckets"] = Value::Null;
    config["spec"]["servers"][0]["pod"] = Value::Null;

    let manifest = manifest(&create(&server(), config).await);
    let spec = manifest["spec"].as_mapping().unwrap();
    let keys: Vec<&str> = spec.keys().filter_map(serde_yaml::Value::as_str).collect();
    assert_eq!(keys, vec!["image", "servers"]);
}

#[tokio::test]
async fn pod_overrides_pass_through_unchanged() {
    let mut config = example_config();
    config["spec"]["servers"][0]["pod"] = json!({
        "spec": {"nodeSelector": {"node.kubernetes.io/pool": "db"}, "priorityClassName": "high"}
    });

    let manifest = manifest(&create(&server(), config).await);
    let pod = &manifest["spec"]["servers"][0]["pod"]["spec"];
    assert_eq!(pod["nodeSelector"]["node.kubernetes.io/pool"], "db");
    assert_eq!(pod["priorityClassName"], "high");
}

#[test]
fn validation_reports_every_problem() {
    let config = json!({
        "metadata": {"name": "My_Cluster", "labels": {"app": "bad value"}},
        "spec": {
            "image": "couchbase/server:7.6.0",
            "online_volume_expansion_timeout_in_mins": 45,
            "servers": [{"name": "all services", "size": -1, "services": ["cache"]}]
        }
    });

    let diagnostics = server().validate_resource_config(TYPE_NAME, &config);
    let mut paths: Vec<String> = diagnostics
        .iter()
        .map(|d| d.attribute.as_ref().map(ToString::to_string).unwrap_or_default())
        .collect();
    paths.sort();
    assert_eq!(
        paths,
        vec![
            "metadata.labels",
            "metadata.name",
            "spec.online_volume_expansion_timeout_in_mins",
            "spec.servers[0].name",
            "spec.servers[0].services[0]",
            "spec.servers[0].size",
        ]
    );
    assert!(diagnostics.iter().all(|d| d.summary == "Invalid Attribute Value"));
}

#[test]
fn validation_requires_image_and_servers() {
    let config = json!({"metadata": {"name": "mycluster"}, "spec": {"paused": true}});
    let diagnostics = server().validate_resource_config(TYPE_NAME, &config);

    let missing: Vec<String> = diagnostics
        .iter()
        .filter(|d| d.summary == "Missing required argument")
        .map(|d| d.attribute.as_ref().unwrap().to_string())
        .collect();
    assert_eq!(missing, vec!["spec.image", "spec.servers"]);
}

#[tokio::test]
async fn update_replaces_manifest() {
    let server = server();
    let prior = create(&server, example_config()).await;

    let mut config = example_config();
    config["spec"]["servers"][0]["size"] = json!(5);
    let response = server.apply(TYPE_NAME, Some(prior), Some(config)).await;
    assert!(response.diagnostics.is_empty());

    let manifest = manifest(&response.new_state.unwrap());
    assert_eq!(manifest["spec"]["servers"][0]["size"], 5);
}

#[tokio::test]
async fn core_types_keep_every_field() {
    let mut config = example_config();
    config["spec"]["security_context"] = json!({
        "run_as_user": 1000,
        "fs_group_change_policy": "OnRootMismatch",
        "seccomp_profile": {"type": "RuntimeDefault", "localhost_profile": null},
        "supplemental_groups": [2000],
        "sysctls": [{"name": "net.core.somaxconn", "value": "1024"}]
    });
    config["spec"]["servers"][0]["env_from"] = json!([{"config_map_ref": {"name": "couchbase-env"}}]);
    config["spec"]["volume_claim_templates"] = json!([{
        "metadata": {"name": "couchbase"},
        "spec": {
            "storage_class_name": "fast",
            "access_modes": ["ReadWriteOnce"],
            "resources": {"requests": {"storage": "10Gi"}}
        }
    }]);

    let manifest = manifest(&create(&server(), config).await);
    let context = &manifest["spec"]["securityContext"];
    assert_eq!(context["runAsUser"], 1000);
    assert_eq!(context["fsGroupChangePolicy"], "OnRootMismatch");
    assert_eq!(context["seccompProfile"]["type"], "RuntimeDefault");
    assert!(context["seccompProfile"].get("localhostProfile").is_none());
    assert_eq!(context["supplementalGroups"][0], 2000);
    assert_eq!(context["sysctls"][0]["name"], "net.core.somaxconn");

    assert_eq!(manifest["spec"]["servers"][0]["envFrom"][0]["configMapRef"]["name"], "couchbase-env");

    let claim = &manifest["spec"]["volumeClaimTemplates"][0]["spec"];
    assert_eq!(claim["storageClassName"], "fast");
    assert_eq!(claim["resources"]["requests"]["storage"], "10Gi");
}

#[tokio::test]
async fn quantities_keep_their_spelling() {
    let mut config = example_config();
    config["spec"]["servers"][0]["resources"] = json!({
        "limits": {"cpu": "007", "memory": "4Gi"},
        "requests": {"cpu": "2"}
    });

    let manifest = manifest(&create(&server(), config).await);
    let resources = &manifest["spec"]["servers"][0]["resources"];
    assert_eq!(resources["limits"]["cpu"], "007");
    assert_eq!(resources["limits"]["memory"], "4Gi");
    assert_eq!(resources["requests"]["cpu"], 2);
}
