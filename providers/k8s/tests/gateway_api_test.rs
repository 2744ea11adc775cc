//! Integration tests for the Gateway API manifest resources

use std::sync::Arc;

use crds::{Gateway, HTTPRoute, HttpMethod, PathMatchType};
use provider_sdk::{FixedClock, ProviderServer};
use serde_json::{Value, json};
use terraform_provider_k8s::{ProviderConfig, provider_server_with_clock};

const GATEWAY_CLASS: &str = "k8s_gateway_networking_k8s_io_gateway_class_v1";
const GATEWAY: &str = "k8s_gateway_networking_k8s_io_gateway_v1";
const HTTP_ROUTE: &str = "k8s_gateway_networking_k8s_io_http_route_v1";

fn server() -> ProviderServer {
    provider_server_with_clock(&ProviderConfig::default(), Arc::new(FixedClock(7))).expect("provider should build")
}

async fn render(type_name: &str, config: Value) -> Value {
    let server = server();
    let diagnostics = server.validate_resource_config(type_name, &config);
    assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics:?}");
    let response = server.apply(type_name, None, Some(config)).await;
    assert!(response.diagnostics.is_empty(), "unexpected diagnostics: {:?}", response.diagnostics);
    response.new_state.expect("state should be stored")
}

#[tokio::test]
async fn gateway_class_is_cluster_scoped() {
    let config = json!({
        "metadata": {"name": "internet", "annotations": {"example.net/owner": "platform"}},
        "spec": {"controller_name": "example.net/gateway-controller"}
    });
    let state = render(GATEWAY_CLASS, config).await;

    let yaml = state["yaml"].as_str().unwrap();
    assert!(yaml.starts_with("apiVersion: gateway.networking.k8s.io/v1\nkind: GatewayClass\n"));
    let manifest: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(manifest["metadata"]["annotations"]["example.net/owner"], "platform");
    assert_eq!(manifest["spec"]["controllerName"], "example.net/gateway-controller");

    let with_namespace = json!({
        "metadata": {"name": "internet", "namespace": "default"},
        "spec": {"controller_name": "example.net/gateway-controller"}
    });
    let diagnostics = server().validate_resource_config(GATEWAY_CLASS, &with_namespace);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.iter().next().unwrap().summary, "Unsupported argument");
}

#[tokio::test]
async fn gateway_renders_listeners() {
    let config = json!({
        "metadata": {"name": "edge", "namespace": "infra"},
        "spec": {
            "gateway_class_name": "internet",
            "listeners": [
                {
                    "name": "https",
                    "hostname": "*.example.com",
                    "port": 443,
                    "protocol": "HTTPS",
                    "tls": {"mode": "Terminate", "certificate_refs": [{"name": "wildcard-cert"}]},
                    "allowed_routes": {"namespaces": {"from": "Selector", "selector": {"match_labels": {"shared-gateway-access": "true"}}}}
                }
            ]
        }
    });
    let state = render(GATEWAY, config).await;
    let gateway: Gateway = serde_yaml::from_str(state["yaml"].as_str().unwrap()).unwrap();

    assert_eq!(gateway.metadata.namespace.as_deref(), Some("infra"));
    assert_eq!(gateway.spec.gateway_class_name, "internet");
    let listener = &gateway.spec.listeners[0];
    assert_eq!(listener.port, 443);
    assert_eq!(listener.hostname.as_deref(), Some("*.example.com"));
    let tls = listener.tls.as_ref().unwrap();
    assert_eq!(tls.certificate_refs.as_ref().unwrap()[0].name, "wildcard-cert");

    let manifest: serde_yaml::Value = serde_yaml::from_str(state["yaml"].as_str().unwrap()).unwrap();
    let namespaces = &manifest["spec"]["listeners"][0]["allowedRoutes"]["namespaces"];
    assert_eq!(namespaces["selector"]["matchLabels"]["shared-gateway-access"], "true");
}

#[test]
fn gateway_listener_port_is_bounded() {
    let config = json!({
        "metadata": {"name": "edge"},
        "spec": {
            "gateway_class_name": "internet",
            "listeners": [{"name": "http", "port": 70000, "protocol": "HTTP"}]
        }
    });
    let diagnostics = server().validate_resource_config(GATEWAY, &config);
    assert_eq!(diagnostics.len(), 1);
    let diagnostic = diagnostics.iter().next().unwrap();
    assert_eq!(diagnostic.attribute.as_ref().unwrap().to_string(), "spec.listeners[0].port");
    assert!(diagnostic.detail.contains("between 1 and 65535"));
}

#[tokio::test]
async fn http_route_renders_rules() {
    let config = json!({
        "metadata": {"name": "store", "namespace": "shop", "labels": {"app.kubernetes.io/name": "store"}},
        "spec": {
            "parent_refs": [{"name": "edge", "namespace": "infra", "section_name": "https"}],
            "hostnames": ["store.example.com"],
            "rules": [
                {
                    "matches": [{"path": {"type": "PathPrefix", "value": "/api"}, "method": "GET"}],
                    "filters": [
                        {"type": "URLRewrite", "url_rewrite": {"path": {"type": "ReplacePrefixMatch", "replace_prefix_match": "/"}}}
                    ],
                    "backend_refs": [{"name": "store-api", "port": 8080, "weight": 90}]
                }
            ]
        }
    });
    let state = render(HTTP_ROUTE, config).await;
    let route: HTTPRoute = serde_yaml::from_str(state["yaml"].as_str().unwrap()).unwrap();

    let rule = &route.spec.rules.as_ref().unwrap()[0];
    let matched = &rule.matches.as_ref().unwrap()[0];
    assert_eq!(matched.path.as_ref().unwrap().type_, Some(PathMatchType::PathPrefix));
    assert_eq!(matched.method, Some(HttpMethod::Get));
    assert_eq!(rule.backend_refs.as_ref().unwrap()[0].weight, Some(90));

    let manifest: serde_yaml::Value = serde_yaml::from_str(state["yaml"].as_str().unwrap()).unwrap();
    let rule = &manifest["spec"]["rules"][0];
    assert_eq!(rule["filters"][0]["type"], "URLRewrite");
    assert_eq!(rule["filters"][0]["urlRewrite"]["path"]["replacePrefixMatch"], "/");
    assert_eq!(manifest["spec"]["parentRefs"][0]["sectionName"], "https");
    assert_eq!(manifest["metadata"]["labels"]["app.kubernetes.io/name"], "store");
}

#[tokio::test]
async fn http_route_without_spec_omits_spec() {
    let state = render(HTTP_ROUTE, json!({"metadata": {"name": "catch-all"}, "spec": null})).await;
    let yaml = state["yaml"].as_str().unwrap();
    let manifest: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();

    assert_eq!(manifest["kind"], "HTTPRoute");
    assert_eq!(manifest["metadata"]["name"], "catch-all");
    assert!(!yaml.contains("spec"), "{yaml}");
    assert_eq!(state["spec"], Value::Null);

    let routed = render(HTTP_ROUTE, json!({"metadata": {"name": "catch-all"}, "spec": {"hostnames": null}})).await;
    let manifest: serde_yaml::Value = serde_yaml::from_str(routed["yaml"].as_str().unwrap()).unwrap();
    assert!(manifest["spec"].as_mapping().unwrap().is_empty());
}

#[test]
fn unknown_filter_type_is_rejected() {
    let config = json!({
        "metadata": {"name": "store"},
        "spec": {"rules": [{"filters": [{"type": "Rewrite"}]}]}
    });
    let diagnostics = server().validate_resource_config(HTTP_ROUTE, &config);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics.iter().next().unwrap().attribute.as_ref().unwrap().to_string(),
        "spec.rules[0].filters[0].type"
    );
}
