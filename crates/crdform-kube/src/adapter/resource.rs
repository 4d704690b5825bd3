use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use kube::api::{DynamicObject, PropagationPolicy};
use serde_json::{Map, Value};

use crdform_core::state::null_object;
use crdform_core::{
    Attribute, Diagnostic, Diagnostics, ResourceId, Schema, SchemaVariant, Validator,
    validate_config,
};

use super::{
    CustomResourceKind, api_resource, build_typed, get_failed, identity,
    invalid_identity, marshal_failed, schema, state_from_object, type_name, unmarshal_failed,
};
use crate::client::{ApplyOptions, DEFAULT_FIELD_MANAGER, DynamicClient};
use crate::error::KubeError;
use crate::framework::{
    CreateRequest, DeleteRequest, ImportStateRequest, ManagedResource, ProviderData, ReadRequest,
    StateResponse, UpdateRequest, require_client, unconfigured_client,
};

const FIELD_MANAGER: &str = "field_manager";
const FORCE_CONFLICTS: &str = "force_conflicts";
const DELETION_PROPAGATION: &str = "deletion_propagation";
const WAIT_FOR_DELETION: &str = "wait_for_deletion";

/// Lifecycle options that exist only in Terraform state
pub(crate) fn option_attributes() -> Vec<Attribute> {
    vec![
        Attribute::string("fieldManager").describe(format!(
            "The name of the manager used to track field ownership. Defaults to the provider's \
             'field_manager', or '{}'.",
            DEFAULT_FIELD_MANAGER
        )),
        Attribute::bool("forceConflicts")
            .describe("If true, server-side apply will force the changes against conflicts."),
        Attribute::string("deletionPropagation")
            .validate(Validator::OneOf(vec![
                "Orphan".to_string(),
                "Background".to_string(),
                "Foreground".to_string(),
            ]))
            .describe("Whether and how garbage collection will be performed."),
        Attribute::bool("waitForDeletion")
            .describe("Wait until the object is removed from the cluster before returning."),
    ]
}

fn propagation_policy(value: &str) -> Option<PropagationPolicy> {
    match value {
        "Orphan" => Some(PropagationPolicy::Orphan),
        "Background" => Some(PropagationPolicy::Background),
        "Foreground" => Some(PropagationPolicy::Foreground),
        _ => None,
    }
}

/// Carry the lifecycle options from config or prior state into new state
fn copy_options(from: &Value, state: &mut Map<String, Value>) {
    for key in [FIELD_MANAGER, FORCE_CONFLICTS, DELETION_PROPAGATION, WAIT_FOR_DELETION] {
        if let Some(value) = from.get(key) {
            state.insert(key.to_string(), value.clone());
        }
    }
}

/// Resource managing objects of kind `K` with server-side apply
pub struct CrdResource<K> {
    client: Option<Arc<dyn DynamicClient>>,
    field_manager: String,
    deletion_timeout: Duration,
    _kind: PhantomData<fn() -> K>,
}

impl<K: CustomResourceKind> CrdResource<K> {
    pub fn new() -> Self {
        Self {
            client: None,
            field_manager: DEFAULT_FIELD_MANAGER.to_string(),
            deletion_timeout: Duration::from_secs(5 * 60),
            _kind: PhantomData,
        }
    }

    /// Factory for [`crate::Provider::with_resource`]
    pub fn factory() -> Box<dyn ManagedResource> {
        Box::new(Self::new())
    }

    fn apply_options(&self, plan: &Value) -> ApplyOptions {
        ApplyOptions {
            field_manager: plan
                .get(FIELD_MANAGER)
                .and_then(Value::as_str)
                .unwrap_or(&self.field_manager)
                .to_string(),
            force: plan
                .get(FORCE_CONFLICTS)
                .and_then(Value::as_bool)
                .unwrap_or(false),
        }
    }

    /// Create and Update are the same server-side apply
    async fn apply(&self, plan: &Value) -> StateResponse {
        let Some(client) = &self.client else {
            return StateResponse::error(unconfigured_client());
        };

        let schema = self.schema();
        let diags = validate_config(&schema.attributes, &schema.config_view(plan));
        if diags.has_error() {
            return StateResponse::from_diagnostics(diags);
        }

        let object = match build_typed::<K>(&schema, plan)
            .map_err(|e| e.to_string())
            .and_then(|typed| {
                serde_json::to_value(&typed)
                    .and_then(serde_json::from_value::<DynamicObject>)
                    .map_err(|e| e.to_string())
            }) {
            Ok(object) => object,
            Err(e) => return StateResponse::error(marshal_failed(e)),
        };

        let resource = api_resource::<K>();
        let options = self.apply_options(plan);
        tracing::debug!(
            api_version = %resource.api_version,
            kind = %resource.kind,
            namespace = ?object.metadata.namespace,
            name = ?object.metadata.name,
            field_manager = %options.field_manager,
            "applying resource"
        );

        let applied = match client.apply(&resource, &object, &options).await {
            Ok(applied) => applied,
            Err(e) => return StateResponse::error(patch_failed(e)),
        };

        self.state_from(&schema, &applied, plan)
    }

    fn state_from(&self, schema: &Schema, object: &DynamicObject, options_from: &Value) -> StateResponse {
        let wire = match serde_json::to_value(object) {
            Ok(wire) => wire,
            Err(e) => return StateResponse::error(unmarshal_failed(e)),
        };
        match state_from_object::<K>(schema, &wire) {
            Ok(mut state) => {
                copy_options(options_from, &mut state);
                StateResponse::with_state(Value::Object(state))
            }
            Err(e) => StateResponse::error(unmarshal_failed(e)),
        }
    }
}

impl<K: CustomResourceKind> Default for CrdResource<K> {
    fn default() -> Self {
        Self::new()
    }
}

fn patch_failed(err: impl std::fmt::Display) -> Diagnostic {
    Diagnostic::error(
        "Unable to PATCH resource",
        format!(
            "An unexpected error occurred while applying the resource. Please report this issue \
             to the provider developers.\n\nPATCH Error: {}",
            err
        ),
    )
}

fn delete_failed(err: impl std::fmt::Display) -> Diagnostic {
    Diagnostic::error(
        "Unable to DELETE resource",
        format!(
            "An unexpected error occurred while deleting the resource. Please report this issue \
             to the provider developers.\n\nDELETE Error: {}",
            err
        ),
    )
}

#[async_trait]
impl<K: CustomResourceKind> ManagedResource for CrdResource<K> {
    fn type_name(&self, provider_type_name: &str) -> String {
        type_name::<K>(provider_type_name)
    }

    fn schema(&self) -> Schema {
        schema::<K>(SchemaVariant::Resource)
    }

    fn configure(&mut self, data: Option<&ProviderData>) -> Diagnostics {
        let Some(provider_data) = data else {
            return Diagnostics::new();
        };
        match require_client(data) {
            Ok(client) => {
                self.client = Some(client);
                self.field_manager = provider_data.field_manager.clone();
                self.deletion_timeout = provider_data.deletion_timeout;
                Diagnostics::new()
            }
            Err(diag) => diag.into(),
        }
    }

    async fn create(&self, request: CreateRequest) -> StateResponse {
        self.apply(&request.plan).await
    }

    async fn read(&self, request: ReadRequest) -> StateResponse {
        let Some(client) = &self.client else {
            return StateResponse::error(unconfigured_client());
        };

        let id = match identity(&request.state) {
            Ok(id) => id,
            Err(e) => return StateResponse::error(invalid_identity(e)),
        };

        let resource = api_resource::<K>();
        let object = match client.get(&resource, &id.namespace, &id.name).await {
            Ok(object) => object,
            Err(e) if e.is_not_found() => {
                tracing::info!(id = %id, kind = %resource.kind, "object is gone, removing from state");
                return StateResponse::removed();
            }
            Err(e) => return StateResponse::error(get_failed(e)),
        };

        self.state_from(&self.schema(), &object, &request.state)
    }

    async fn update(&self, request: UpdateRequest) -> StateResponse {
        tracing::debug!(prior_id = ?request.prior_state.get("id"), "updating resource");
        self.apply(&request.plan).await
    }

    async fn delete(&self, request: DeleteRequest) -> Diagnostics {
        let Some(client) = &self.client else {
            return unconfigured_client().into();
        };

        let id = match identity(&request.state) {
            Ok(id) => id,
            Err(e) => return invalid_identity(e).into(),
        };

        let propagation = request
            .state
            .get(DELETION_PROPAGATION)
            .and_then(Value::as_str)
            .and_then(propagation_policy);

        let resource = api_resource::<K>();
        tracing::debug!(id = %id, kind = %resource.kind, ?propagation, "deleting resource");

        match client.delete(&resource, &id.namespace, &id.name, propagation).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => return Diagnostics::new(),
            Err(e) => return delete_failed(e).into(),
        }

        let wait = request
            .state
            .get(WAIT_FOR_DELETION)
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if !wait {
            return Diagnostics::new();
        }

        match client
            .wait_deleted(&resource, &id.namespace, &id.name, self.deletion_timeout)
            .await
        {
            Ok(()) => Diagnostics::new(),
            Err(KubeError::Timeout(_)) => Diagnostic::error(
                "Timed out waiting for deletion",
                format!(
                    "The object {} was not removed within {:?}.",
                    id, self.deletion_timeout
                ),
            )
            .into(),
            Err(e) => delete_failed(e).into(),
        }
    }

    async fn import_state(&self, request: ImportStateRequest) -> StateResponse {
        let id = match request
            .id
            .parse::<ResourceId>()
            .and_then(|id| id.validate().map(|_| id))
        {
            Ok(id) => id,
            Err(e) => {
                return StateResponse::error(Diagnostic::error(
                    "Error parsing ID",
                    format!(
                        "Expected an import id of the form '<name>/<namespace>', got '{}'.\n\nError: {}",
                        request.id, e
                    ),
                ));
            }
        };

        let schema = self.schema();
        let mut state = match null_object(&schema.attributes) {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let mut metadata = match schema.attribute("metadata").and_then(|a| a.attr_type.children()) {
            Some(children) => match null_object(children) {
                Value::Object(map) => map,
                _ => Map::new(),
            },
            None => Map::new(),
        };
        metadata.insert("name".to_string(), Value::String(id.name.clone()));
        metadata.insert("namespace".to_string(), Value::String(id.namespace.clone()));

        state.insert("id".to_string(), Value::String(id.to_string()));
        state.insert("metadata".to_string(), Value::Object(metadata));
        StateResponse::with_state(Value::Object(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::testing::Widget;
    use crate::mock::MockDynamicClient;
    use serde_json::json;

    fn configured(client: &MockDynamicClient) -> CrdResource<Widget> {
        let mut resource = CrdResource::<Widget>::new();
        let mut data = ProviderData::online(Arc::new(client.clone()));
        data.field_manager = "terraform".to_string();
        data.deletion_timeout = Duration::from_secs(1);
        assert!(resource.configure(Some(&data)).is_empty());
        resource
    }

    fn plan() -> Value {
        json!({
            "id": null,
            "api_version": null,
            "kind": null,
            "metadata": {"name": "widget", "namespace": "default", "labels": {"team": "a"}, "annotations": null},
            "spec": {"size": 3, "color": null, "external_i_ps": null, "target_port": "web"},
            "field_manager": null,
            "force_conflicts": true,
            "deletion_propagation": "Foreground",
            "wait_for_deletion": true
        })
    }

    #[tokio::test]
    async fn test_create() {
        let client = MockDynamicClient::new();
        let response = configured(&client).create(CreateRequest { plan: plan() }).await;
        assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);

        let state = response.state.unwrap();
        assert_eq!(state["id"], "widget/default");
        assert_eq!(state["kind"], "Widget");
        assert_eq!(state["metadata"]["labels"], json!({"team": "a"}));
        assert_eq!(state["spec"]["size"], 3);
        assert_eq!(state["spec"]["target_port"], "web");
        assert_eq!(state["force_conflicts"], true);
        assert_eq!(state["deletion_propagation"], "Foreground");

        let options = client.last_apply_options().unwrap();
        assert_eq!(options.field_manager, "terraform");
        assert!(options.force);

        let stored = client.object(&api_resource::<Widget>(), "default", "widget").unwrap();
        assert_eq!(stored.data["spec"], json!({"size": 3, "targetPort": "web"}));
    }

    #[tokio::test]
    async fn test_create_field_manager_override() {
        let client = MockDynamicClient::new();
        let mut plan = plan();
        plan["field_manager"] = json!("argo");

        configured(&client).create(CreateRequest { plan }).await;
        assert_eq!(client.last_apply_options().unwrap().field_manager, "argo");
    }

    #[tokio::test]
    async fn test_create_validation_failure() {
        let client = MockDynamicClient::new();
        let mut plan = plan();
        plan["deletion_propagation"] = json!("Eventually");

        let response = configured(&client).create(CreateRequest { plan }).await;
        assert_eq!(response.diagnostics.summaries(), vec!["Invalid attribute value"]);
        assert_eq!(client.operation_counts().applies, 0);
    }

    #[tokio::test]
    async fn test_create_patch_failure() {
        let client = MockDynamicClient::new();
        client.fail_with(409, "Conflict");

        let response = configured(&client).create(CreateRequest { plan: plan() }).await;
        assert!(response.state.is_none());
        assert_eq!(response.diagnostics.summaries(), vec!["Unable to PATCH resource"]);
    }

    #[tokio::test]
    async fn test_update_bumps_generation() {
        let client = MockDynamicClient::new();
        let resource = configured(&client);
        let created = resource.create(CreateRequest { plan: plan() }).await.state.unwrap();

        let mut plan = plan();
        plan["spec"]["size"] = json!(5);
        let updated = resource
            .update(UpdateRequest { plan, prior_state: created })
            .await;
        assert_eq!(updated.state.unwrap()["spec"]["size"], 5);

        let stored = client.object(&api_resource::<Widget>(), "default", "widget").unwrap();
        assert_eq!(stored.metadata.generation, Some(2));
    }

    #[tokio::test]
    async fn test_read_removes_missing_object() {
        let client = MockDynamicClient::new();
        let response = configured(&client)
            .read(ReadRequest {
                state: json!({"id": "widget/default", "metadata": {"name": "widget", "namespace": "default"}}),
            })
            .await;

        assert!(response.state.is_none());
        assert!(response.diagnostics.is_empty());
    }

    #[tokio::test]
    async fn test_read_keeps_options_from_prior_state() {
        let client = MockDynamicClient::new();
        let resource = configured(&client);
        let created = resource.create(CreateRequest { plan: plan() }).await.state.unwrap();

        let refreshed = resource.read(ReadRequest { state: created.clone() }).await;
        assert_eq!(refreshed.state.unwrap(), created);
    }

    #[tokio::test]
    async fn test_read_api_error() {
        let client = MockDynamicClient::new();
        client.fail_with(403, "Forbidden");
        let response = configured(&client)
            .read(ReadRequest { state: json!({"id": "widget/default"}) })
            .await;
        assert_eq!(response.diagnostics.summaries(), vec!["Unable to GET resource"]);
    }

    #[tokio::test]
    async fn test_delete_waits() {
        let client = MockDynamicClient::new();
        let resource = configured(&client);
        let state = resource.create(CreateRequest { plan: plan() }).await.state.unwrap();

        let diags = resource.delete(DeleteRequest { state }).await;
        assert!(diags.is_empty(), "{:?}", diags);
        assert_eq!(client.object_count(), 0);
        assert_eq!(client.last_propagation(), Some(PropagationPolicy::Foreground));
        assert_eq!(client.operation_counts().waits, 1);
    }

    #[tokio::test]
    async fn test_delete_wait_times_out() {
        let client = MockDynamicClient::new();
        let resource = configured(&client);
        let state = resource.create(CreateRequest { plan: plan() }).await.state.unwrap();
        client.keep_after_delete();

        let diags = resource.delete(DeleteRequest { state }).await;
        assert_eq!(diags.summaries(), vec!["Timed out waiting for deletion"]);
        assert_eq!(client.operation_counts().waits, 1);
        assert_eq!(client.object_count(), 1);
    }

    #[tokio::test]
    async fn test_delete_without_wait() {
        let client = MockDynamicClient::new();
        let resource = configured(&client);
        let mut state = resource.create(CreateRequest { plan: plan() }).await.state.unwrap();
        state["wait_for_deletion"] = json!(false);
        client.keep_after_delete();

        let diags = resource.delete(DeleteRequest { state }).await;
        assert!(diags.is_empty(), "{:?}", diags);
        assert_eq!(client.operation_counts().deletes, 1);
        assert_eq!(client.operation_counts().waits, 0);
    }

    #[tokio::test]
    async fn test_numeric_string_port_is_reapplied_as_string() {
        let client = MockDynamicClient::new();
        let resource = configured(&client);
        let mut plan = plan();
        plan["spec"]["target_port"] = json!("8080");

        let created = resource.create(CreateRequest { plan }).await.state.unwrap();
        assert_eq!(created["spec"]["target_port"], "8080");

        let refreshed = resource.read(ReadRequest { state: created.clone() }).await.state.unwrap();
        resource
            .update(UpdateRequest { plan: refreshed, prior_state: created })
            .await;

        let stored = client.object(&api_resource::<Widget>(), "default", "widget").unwrap();
        assert_eq!(stored.data["spec"]["targetPort"], json!("8080"));
    }

    #[tokio::test]
    async fn test_delete_missing_is_success() {
        let client = MockDynamicClient::new();
        let diags = configured(&client)
            .delete(DeleteRequest { state: json!({"id": "widget/default"}) })
            .await;
        assert!(diags.is_empty());
        assert_eq!(client.operation_counts().waits, 0);
    }

    #[tokio::test]
    async fn test_delete_failure() {
        let client = MockDynamicClient::new();
        client.fail_with(500, "InternalError");
        let diags = configured(&client)
            .delete(DeleteRequest { state: json!({"id": "widget/default"}) })
            .await;
        assert_eq!(diags.summaries(), vec!["Unable to DELETE resource"]);
    }

    #[tokio::test]
    async fn test_import_state() {
        let resource = CrdResource::<Widget>::new();
        let response = resource
            .import_state(ImportStateRequest { id: "widget/default".to_string() })
            .await;

        let state = response.state.unwrap();
        assert_eq!(state["id"], "widget/default");
        assert_eq!(state["metadata"]["name"], "widget");
        assert_eq!(state["metadata"]["namespace"], "default");
        assert_eq!(state["spec"], Value::Null);
    }

    #[tokio::test]
    async fn test_import_state_invalid_id() {
        let resource = CrdResource::<Widget>::new();
        for id in ["widget", "/default", "widget/", "Widget/default"] {
            let response = resource
                .import_state(ImportStateRequest { id: id.to_string() })
                .await;
            assert_eq!(response.diagnostics.summaries(), vec!["Error parsing ID"], "{}", id);
        }
    }

    #[tokio::test]
    async fn test_import_then_read() {
        let client = MockDynamicClient::new();
        let resource = configured(&client);
        resource.create(CreateRequest { plan: plan() }).await;

        let imported = resource
            .import_state(ImportStateRequest { id: "widget/default".to_string() })
            .await
            .state
            .unwrap();
        let state = resource.read(ReadRequest { state: imported }).await.state.unwrap();
        assert_eq!(state["spec"]["size"], 3);
        assert_eq!(state["field_manager"], Value::Null);
    }
}
