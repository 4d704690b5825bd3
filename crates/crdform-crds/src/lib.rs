//! crdform CRDs - the custom resources exposed by the provider
//!
//! Each module is named after the API group and version it covers. A CRD is
//! a typed struct derived with `kube::CustomResource` plus a descriptor of
//! its `spec` block (see [`crdform_kube::CustomResourceKind`]).

pub mod common;
pub mod grafana_integreatly_org_v1beta1;
pub mod route_openshift_io_v1;

use crdform_kube::{CrdDataSource, CrdManifest, CrdResource, Provider};

use grafana_integreatly_org_v1beta1::{Grafana, GrafanaDashboard};
use route_openshift_io_v1::Route;

/// Provider version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The provider with every CRD registered
///
/// Each CRD contributes a data source, a resource and a manifest data source.
pub fn provider() -> Provider {
    Provider::new(VERSION)
        .with_data_source(CrdDataSource::<Grafana>::factory)
        .with_data_source(CrdDataSource::<GrafanaDashboard>::factory)
        .with_data_source(CrdDataSource::<Route>::factory)
        .with_data_source(CrdManifest::<Grafana>::factory)
        .with_data_source(CrdManifest::<GrafanaDashboard>::factory)
        .with_data_source(CrdManifest::<Route>::factory)
        .with_resource(CrdResource::<Grafana>::factory)
        .with_resource(CrdResource::<GrafanaDashboard>::factory)
        .with_resource(CrdResource::<Route>::factory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crdform_kube::{
        CreateRequest, MockDynamicClient, ProviderConfig, ReadDataSourceRequest, ReadRequest,
    };
    use kube::api::DynamicObject;
    use serde_json::json;

    #[test]
    fn test_type_names() {
        let provider = provider();
        assert_eq!(
            provider.data_source_type_names(),
            vec![
                "k8s_grafana_integreatly_org_grafana_v1beta1",
                "k8s_grafana_integreatly_org_grafana_dashboard_v1beta1",
                "k8s_route_openshift_io_route_v1",
                "k8s_grafana_integreatly_org_grafana_v1beta1_manifest",
                "k8s_grafana_integreatly_org_grafana_dashboard_v1beta1_manifest",
                "k8s_route_openshift_io_route_v1_manifest",
            ]
        );
        assert_eq!(
            provider.resource_type_names(),
            vec![
                "k8s_grafana_integreatly_org_grafana_v1beta1",
                "k8s_grafana_integreatly_org_grafana_dashboard_v1beta1",
                "k8s_route_openshift_io_route_v1",
            ]
        );
    }

    #[test]
    fn test_schema_names() {
        let provider = provider();
        let schema = provider
            .new_resource("k8s_grafana_integreatly_org_grafana_v1beta1")
            .unwrap()
            .schema();

        let attr = schema
            .attribute_at("spec.deployment.spec.template.spec.host_ipc")
            .unwrap();
        assert_eq!(attr.json_name, "hostIPC");
        assert!(schema.attribute_at("spec.service.spec.external_i_ps").is_some());
        assert!(schema.attribute_at("spec.route.spec.tls.destination_ca_certificate").is_some());
    }

    #[tokio::test]
    async fn test_offline_provider() {
        let mut provider = provider();
        assert!(provider.configure(&json!({"offline": true})).await.is_empty());

        let err = provider
            .data_source("k8s_route_openshift_io_route_v1")
            .err()
            .unwrap();
        assert_eq!(err.summaries(), vec!["Provider in offline mode"]);

        let manifest = provider
            .data_source("k8s_route_openshift_io_route_v1_manifest")
            .ok()
            .unwrap();
        let response = manifest
            .read(ReadDataSourceRequest {
                config: json!({
                    "metadata": {"name": "grafana", "namespace": "monitoring"},
                    "spec": {"to": {"kind": "Service", "name": "grafana-service"}, "port": {"target_port": 3000}}
                }),
            })
            .await;
        assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);

        let yaml = response.state.unwrap()["yaml"].as_str().unwrap().to_string();
        let object: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(object["kind"], serde_yaml::Value::from("Route"));
        assert_eq!(object["spec"]["port"]["targetPort"], serde_yaml::Value::from(3000));
    }

    #[tokio::test]
    async fn test_dashboard_without_spec() {
        let client = MockDynamicClient::new();
        let resource = crdform_kube::adapter::api_resource::<GrafanaDashboard>();
        client.insert(&resource, DynamicObject::new("node-exporter", &resource).within("monitoring"));

        let mut provider = provider();
        provider.configure_with_client(Arc::new(client), &ProviderConfig::default());
        let data_source = provider
            .data_source("k8s_grafana_integreatly_org_grafana_dashboard_v1beta1")
            .ok()
            .unwrap();

        let response = data_source
            .read(ReadDataSourceRequest {
                config: json!({"metadata": {"name": "node-exporter", "namespace": "monitoring"}}),
            })
            .await;
        assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);

        let state = response.state.unwrap();
        assert_eq!(state["id"], "node-exporter/monitoring");
        assert_eq!(state["spec"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_replicas_out_of_int32_range() {
        let client = MockDynamicClient::new();
        let mut provider = provider();
        provider.configure_with_client(Arc::new(client.clone()), &ProviderConfig::default());

        let resource = provider
            .resource("k8s_grafana_integreatly_org_grafana_v1beta1")
            .ok()
            .unwrap();
        let created = resource
            .create(CreateRequest {
                plan: json!({
                    "metadata": {"name": "grafana", "namespace": "monitoring"},
                    "spec": {"deployment": {"spec": {"replicas": 3000000000u64}}}
                }),
            })
            .await;

        assert_eq!(created.diagnostics.summaries(), vec!["Invalid attribute value"]);
        let diag = created.diagnostics.iter().next().unwrap();
        assert_eq!(diag.attribute.as_deref(), Some("spec.deployment.spec.replicas"));
        assert!(created.state.is_none());
        assert_eq!(client.object_count(), 0);
    }

    #[tokio::test]
    async fn test_grafana_lifecycle() {
        let client = MockDynamicClient::new();
        let mut provider = provider();
        provider.configure_with_client(Arc::new(client.clone()), &ProviderConfig::default());

        let resource = provider
            .resource("k8s_grafana_integreatly_org_grafana_v1beta1")
            .ok()
            .unwrap();
        let created = resource
            .create(CreateRequest {
                plan: json!({
                    "metadata": {"name": "grafana", "namespace": "monitoring"},
                    "spec": {
                        "version": "11.3.0",
                        "service": {"spec": {"type": "ClusterIP", "ports": [{"port": 3000, "target_port": "grafana-http"}]}}
                    }
                }),
            })
            .await;
        assert!(created.diagnostics.is_empty(), "{:?}", created.diagnostics);
        assert_eq!(created.state.as_ref().unwrap()["id"], "grafana/monitoring");

        let data_source = provider
            .data_source("k8s_grafana_integreatly_org_grafana_v1beta1")
            .ok()
            .unwrap();
        let read = data_source
            .read(ReadDataSourceRequest {
                config: json!({"metadata": {"name": "grafana", "namespace": "monitoring"}}),
            })
            .await;
        let state = read.state.unwrap();
        assert_eq!(state["spec"]["version"], "11.3.0");
        assert_eq!(state["spec"]["service"]["spec"]["ports"][0]["target_port"], "grafana-http");

        let refreshed = resource
            .read(ReadRequest { state: created.state.unwrap() })
            .await;
        assert_eq!(refreshed.state.unwrap()["kind"], "Grafana");
    }
}
