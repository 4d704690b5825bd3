//! Dynamic Kubernetes client
//!
//! Adapters talk to the cluster through [`DynamicClient`], which works on
//! untyped `DynamicObject`s addressed by an `ApiResource`
//! (group/version/kind/plural). [`KubeDynamicClient`] is the real
//! implementation on top of `kube::Api<DynamicObject>`; tests use
//! [`crate::MockDynamicClient`].

use std::time::Duration;

use async_trait::async_trait;
use kube::{
    Client,
    api::{Api, DeleteParams, DynamicObject, Patch, PatchParams, PropagationPolicy},
    discovery::ApiResource,
    runtime::wait::{await_condition, conditions},
};

use crate::error::{KubeError, Result};

/// Field manager name for Server-Side Apply
pub const DEFAULT_FIELD_MANAGER: &str = "crdform";

/// Options for a Server-Side Apply request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Field manager owning the applied fields
    pub field_manager: String,
    /// Take ownership of fields managed by someone else
    pub force: bool,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            field_manager: DEFAULT_FIELD_MANAGER.to_string(),
            force: false,
        }
    }
}

/// Verbs the adapters need from the cluster
///
/// Implementations must be Send + Sync, a single handle is shared by every
/// adapter after the provider is configured.
#[async_trait]
pub trait DynamicClient: Send + Sync {
    /// GET a namespaced object
    async fn get(
        &self,
        resource: &ApiResource,
        namespace: &str,
        name: &str,
    ) -> Result<DynamicObject>;

    /// Server-Side Apply an object (create or update)
    async fn apply(
        &self,
        resource: &ApiResource,
        object: &DynamicObject,
        options: &ApplyOptions,
    ) -> Result<DynamicObject>;

    /// DELETE a namespaced object
    async fn delete(
        &self,
        resource: &ApiResource,
        namespace: &str,
        name: &str,
        propagation: Option<PropagationPolicy>,
    ) -> Result<()>;

    /// Block until the object is gone or the timeout elapses
    async fn wait_deleted(
        &self,
        resource: &ApiResource,
        namespace: &str,
        name: &str,
        timeout: Duration,
    ) -> Result<()>;
}

/// [`DynamicClient`] backed by a `kube::Client`
#[derive(Clone)]
pub struct KubeDynamicClient {
    client: Client,
}

impl KubeDynamicClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from a resolved cluster configuration
    pub fn try_from_config(config: kube::Config) -> Result<Self> {
        let client = Client::try_from(config)?;
        Ok(Self { client })
    }

    /// Get the underlying Kubernetes client
    pub fn kube_client(&self) -> &Client {
        &self.client
    }

    fn api(&self, resource: &ApiResource, namespace: &str) -> Api<DynamicObject> {
        Api::namespaced_with(self.client.clone(), namespace, resource)
    }
}

#[async_trait]
impl DynamicClient for KubeDynamicClient {
    async fn get(
        &self,
        resource: &ApiResource,
        namespace: &str,
        name: &str,
    ) -> Result<DynamicObject> {
        tracing::debug!(
            api_version = %resource.api_version,
            kind = %resource.kind,
            namespace,
            name,
            "GET"
        );
        self.api(resource, namespace)
            .get(name)
            .await
            .map_err(KubeError::Api)
    }

    async fn apply(
        &self,
        resource: &ApiResource,
        object: &DynamicObject,
        options: &ApplyOptions,
    ) -> Result<DynamicObject> {
        let name = object.metadata.name.as_deref().ok_or_else(|| {
            KubeError::InvalidConfig("object is missing metadata.name".to_string())
        })?;
        let namespace = object.metadata.namespace.as_deref().ok_or_else(|| {
            KubeError::InvalidConfig("object is missing metadata.namespace".to_string())
        })?;

        tracing::debug!(
            api_version = %resource.api_version,
            kind = %resource.kind,
            namespace,
            name,
            field_manager = %options.field_manager,
            force = options.force,
            "PATCH (server-side apply)"
        );

        let mut params = PatchParams::apply(&options.field_manager);
        if options.force {
            params = params.force();
        }

        self.api(resource, namespace)
            .patch(name, &params, &Patch::Apply(object))
            .await
            .map_err(KubeError::Api)
    }

    async fn delete(
        &self,
        resource: &ApiResource,
        namespace: &str,
        name: &str,
        propagation: Option<PropagationPolicy>,
    ) -> Result<()> {
        tracing::debug!(
            api_version = %resource.api_version,
            kind = %resource.kind,
            namespace,
            name,
            "DELETE"
        );

        let params = DeleteParams {
            propagation_policy: propagation,
            ..Default::default()
        };

        self.api(resource, namespace)
            .delete(name, &params)
            .await
            .map(|_| ())
            .map_err(KubeError::Api)
    }

    async fn wait_deleted(
        &self,
        resource: &ApiResource,
        namespace: &str,
        name: &str,
        timeout: Duration,
    ) -> Result<()> {
        let api = self.api(resource, namespace);

        // The deletion condition is keyed on the uid so a recreated object
        // with the same name does not count as "still there".
        let uid = match api.get_opt(name).await.map_err(KubeError::Api)? {
            None => return Ok(()),
            Some(obj) => obj.metadata.uid.unwrap_or_default(),
        };

        tracing::debug!(namespace, name, ?timeout, "waiting for deletion");

        match tokio::time::timeout(timeout, await_condition(api, name, conditions::is_deleted(&uid)))
            .await
        {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(KubeError::Wait(e.to_string())),
            Err(_) => Err(KubeError::Timeout(format!("{:?}", timeout))),
        }
    }
}
