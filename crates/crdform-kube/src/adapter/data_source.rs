use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crdform_core::{Diagnostics, Schema, SchemaVariant, validate_config};

use super::{
    CustomResourceKind, api_resource, get_failed, identity, invalid_identity, not_found, schema,
    state_from_object, type_name, unmarshal_failed,
};
use crate::client::DynamicClient;
use crate::framework::{
    DataSource, ProviderData, ReadDataSourceRequest, StateResponse, require_client,
    unconfigured_client,
};

/// Data source reading one object of kind `K`
pub struct CrdDataSource<K> {
    client: Option<Arc<dyn DynamicClient>>,
    _kind: PhantomData<fn() -> K>,
}

impl<K: CustomResourceKind> CrdDataSource<K> {
    pub fn new() -> Self {
        Self {
            client: None,
            _kind: PhantomData,
        }
    }

    /// Factory for [`crate::Provider::with_data_source`]
    pub fn factory() -> Box<dyn DataSource> {
        Box::new(Self::new())
    }
}

impl<K: CustomResourceKind> Default for CrdDataSource<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<K: CustomResourceKind> DataSource for CrdDataSource<K> {
    fn type_name(&self, provider_type_name: &str) -> String {
        type_name::<K>(provider_type_name)
    }

    fn schema(&self) -> Schema {
        schema::<K>(SchemaVariant::DataSource)
    }

    fn configure(&mut self, data: Option<&ProviderData>) -> Diagnostics {
        // Configure is called once before the provider itself is configured
        if data.is_none() {
            return Diagnostics::new();
        }
        match require_client(data) {
            Ok(client) => {
                self.client = Some(client);
                Diagnostics::new()
            }
            Err(diag) => diag.into(),
        }
    }

    async fn read(&self, request: ReadDataSourceRequest) -> StateResponse {
        let Some(client) = &self.client else {
            return StateResponse::error(unconfigured_client());
        };

        let schema = self.schema();
        let diags = validate_config(&schema.attributes, &request.config);
        if diags.has_error() {
            return StateResponse::from_diagnostics(diags);
        }

        let id = match identity(&request.config) {
            Ok(id) => id,
            Err(e) => return StateResponse::error(invalid_identity(e)),
        };

        let resource = api_resource::<K>();
        tracing::debug!(
            api_version = %resource.api_version,
            kind = %resource.kind,
            namespace = %id.namespace,
            name = %id.name,
            "reading data source"
        );

        let object = match client.get(&resource, &id.namespace, &id.name).await {
            Ok(object) => object,
            Err(e) if e.is_not_found() => return StateResponse::error(not_found(&id)),
            Err(e) => return StateResponse::error(get_failed(e)),
        };

        let wire = match serde_json::to_value(&object) {
            Ok(wire) => wire,
            Err(e) => return StateResponse::error(unmarshal_failed(e)),
        };

        match state_from_object::<K>(&schema, &wire) {
            Ok(state) => StateResponse::with_state(Value::Object(state)),
            Err(e) => StateResponse::error(unmarshal_failed(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::testing::Widget;
    use crate::mock::MockDynamicClient;
    use kube::api::DynamicObject;
    use serde_json::json;

    fn widget_object(name: &str, namespace: &str, spec: Value) -> DynamicObject {
        let mut object = DynamicObject::new(name, &api_resource::<Widget>()).within(namespace);
        object.data = json!({ "spec": spec });
        object
    }

    fn configured(client: &MockDynamicClient) -> CrdDataSource<Widget> {
        let mut data_source = CrdDataSource::<Widget>::new();
        let diags = data_source.configure(Some(&ProviderData::online(Arc::new(client.clone()))));
        assert!(diags.is_empty());
        data_source
    }

    fn read_request(name: &str, namespace: &str) -> ReadDataSourceRequest {
        ReadDataSourceRequest {
            config: json!({"metadata": {"name": name, "namespace": namespace}}),
        }
    }

    #[tokio::test]
    async fn test_read_sets_id_and_spec() {
        let client = MockDynamicClient::new();
        client.insert(
            &api_resource::<Widget>(),
            widget_object("dashboard", "monitoring", json!({"size": 2, "externalIPs": ["1.2.3.4"]})),
        );

        let response = configured(&client).read(read_request("dashboard", "monitoring")).await;
        assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);

        let state = response.state.unwrap();
        assert_eq!(state["id"], "dashboard/monitoring");
        assert_eq!(state["api_version"], "example.com/v1");
        assert_eq!(state["kind"], "Widget");
        assert_eq!(state["metadata"]["name"], "dashboard");
        assert_eq!(state["spec"]["size"], 2);
        assert_eq!(state["spec"]["external_i_ps"], json!(["1.2.3.4"]));
        assert_eq!(client.operation_counts().gets, 1);
    }

    #[tokio::test]
    async fn test_read_not_found() {
        let client = MockDynamicClient::new();
        let response = configured(&client).read(read_request("missing", "monitoring")).await;

        assert!(response.state.is_none());
        assert_eq!(response.diagnostics.summaries(), vec!["Unable to find resource"]);
        let detail = &response.diagnostics.iter().next().unwrap().detail;
        assert!(detail.contains("Name: missing\nNamespace: monitoring"));
    }

    #[tokio::test]
    async fn test_read_api_error() {
        let client = MockDynamicClient::new();
        client.fail_with(500, "InternalError");
        let response = configured(&client).read(read_request("dashboard", "monitoring")).await;

        assert_eq!(response.diagnostics.summaries(), vec!["Unable to GET resource"]);
        let detail = &response.diagnostics.iter().next().unwrap().detail;
        assert!(detail.contains("GET Error:"));
    }

    #[tokio::test]
    async fn test_read_rejects_invalid_name_before_calling_api() {
        let client = MockDynamicClient::new();
        let response = configured(&client).read(read_request("Bad_Name", "monitoring")).await;

        assert!(response.diagnostics.has_error());
        assert_eq!(client.operation_counts().gets, 0);
    }

    #[tokio::test]
    async fn test_read_missing_name() {
        let client = MockDynamicClient::new();
        let response = configured(&client)
            .read(ReadDataSourceRequest {
                config: json!({"metadata": {"namespace": "monitoring"}}),
            })
            .await;

        assert_eq!(response.diagnostics.summaries(), vec!["Missing required argument"]);
    }

    #[tokio::test]
    async fn test_read_malformed_object() {
        let client = MockDynamicClient::new();
        client.insert(
            &api_resource::<Widget>(),
            widget_object("dashboard", "monitoring", json!({"size": "huge"})),
        );

        let response = configured(&client).read(read_request("dashboard", "monitoring")).await;
        assert_eq!(response.diagnostics.summaries(), vec!["Error unmarshalling response"]);
    }

    #[tokio::test]
    async fn test_read_unconfigured() {
        let mut data_source = CrdDataSource::<Widget>::new();
        assert!(data_source.configure(None).is_empty());

        let response = data_source.read(read_request("dashboard", "monitoring")).await;
        assert_eq!(response.diagnostics.summaries(), vec!["Unconfigured HTTP Client"]);
    }

    #[test]
    fn test_configure_offline() {
        let mut data_source = CrdDataSource::<Widget>::new();
        let diags = data_source.configure(Some(&ProviderData::offline()));
        assert_eq!(diags.summaries(), vec!["Provider in offline mode"]);
    }
}
