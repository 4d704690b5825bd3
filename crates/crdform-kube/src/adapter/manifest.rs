use std::marker::PhantomData;

use async_trait::async_trait;
use serde_json::Value;

use crdform_core::{Diagnostics, Schema, SchemaVariant, manifest_type_name, validate_config};

use super::{
    CustomResourceKind, build_typed, marshal_failed, schema, state_from_object,
    type_name, unmarshal_failed,
};
use crate::framework::{DataSource, ProviderData, ReadDataSourceRequest, StateResponse};

/// Data source rendering an object of kind `K` as YAML
///
/// Never talks to the cluster, so it works in offline mode.
pub struct CrdManifest<K> {
    _kind: PhantomData<fn() -> K>,
}

impl<K: CustomResourceKind> CrdManifest<K> {
    pub fn new() -> Self {
        Self { _kind: PhantomData }
    }

    pub fn factory() -> Box<dyn DataSource> {
        Box::new(Self::new())
    }
}

impl<K: CustomResourceKind> Default for CrdManifest<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<K: CustomResourceKind> DataSource for CrdManifest<K> {
    fn type_name(&self, provider_type_name: &str) -> String {
        manifest_type_name(&type_name::<K>(provider_type_name))
    }

    fn schema(&self) -> Schema {
        schema::<K>(SchemaVariant::Manifest)
    }

    fn configure(&mut self, _data: Option<&ProviderData>) -> Diagnostics {
        Diagnostics::new()
    }

    async fn read(&self, request: ReadDataSourceRequest) -> StateResponse {
        let schema = self.schema();
        let diags = validate_config(&schema.attributes, &schema.config_view(&request.config));
        if diags.has_error() {
            return StateResponse::from_diagnostics(diags);
        }

        let typed: K = match build_typed(&schema, &request.config) {
            Ok(typed) => typed,
            Err(e) => return StateResponse::error(marshal_failed(e)),
        };
        let yaml = match serde_yaml::to_string(&typed) {
            Ok(yaml) => yaml,
            Err(e) => return StateResponse::error(marshal_failed(e)),
        };
        let wire = match serde_json::to_value(&typed) {
            Ok(wire) => wire,
            Err(e) => return StateResponse::error(marshal_failed(e)),
        };

        // spec is only rendered back when the config set one
        let wire = match (&wire, request.config.get("spec")) {
            (Value::Object(map), None | Some(Value::Null)) => {
                let mut map = map.clone();
                map.remove("spec");
                Value::Object(map)
            }
            _ => wire,
        };

        match state_from_object::<K>(&schema, &wire) {
            Ok(mut state) => {
                state.insert("yaml".to_string(), Value::String(yaml));
                StateResponse::with_state(Value::Object(state))
            }
            Err(e) => StateResponse::error(unmarshal_failed(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::testing::Widget;
    use serde_json::json;

    fn configured() -> CrdManifest<Widget> {
        let mut manifest = CrdManifest::<Widget>::new();
        assert!(manifest.configure(Some(&ProviderData::offline())).is_empty());
        manifest
    }

    #[test]
    fn test_type_name() {
        assert_eq!(
            CrdManifest::<Widget>::new().type_name("k8s"),
            "k8s_example_com_widget_v1_manifest"
        );
    }

    #[tokio::test]
    async fn test_renders_yaml_offline() {
        let response = configured()
            .read(ReadDataSourceRequest {
                config: json!({
                    "metadata": {"name": "widget", "namespace": "default", "labels": {"app": "demo"}},
                    "spec": {"size": 2, "external_i_ps": ["10.0.0.1"], "target_port": 8080}
                }),
            })
            .await;
        assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);

        let state = response.state.unwrap();
        assert_eq!(state["id"], "widget/default");
        assert_eq!(state["spec"]["target_port"], 8080);

        let yaml = state["yaml"].as_str().unwrap();
        insta::assert_snapshot!(yaml, @r"
        apiVersion: example.com/v1
        kind: Widget
        metadata:
          labels:
            app: demo
          name: widget
          namespace: default
        spec:
          size: 2
          externalIPs:
          - 10.0.0.1
          targetPort: 8080
        ");
    }

    #[tokio::test]
    async fn test_without_spec() {
        let response = configured()
            .read(ReadDataSourceRequest {
                config: json!({"metadata": {"name": "widget", "namespace": "default"}}),
            })
            .await;

        let state = response.state.unwrap();
        assert_eq!(state["spec"], Value::Null);
        assert!(state["yaml"].as_str().unwrap().contains("name: widget"));
    }

    #[tokio::test]
    async fn test_invalid_labels() {
        let response = configured()
            .read(ReadDataSourceRequest {
                config: json!({
                    "metadata": {"name": "widget", "namespace": "default", "labels": {"bad key!": "x"}}
                }),
            })
            .await;
        assert_eq!(response.diagnostics.summaries(), vec!["Invalid attribute value"]);
        assert!(response.state.is_none());
    }
}
