//! Mock dynamic client for testing
//!
//! Objects live in memory, useful for adapter tests without requiring a
//! Kubernetes cluster. Failures can be injected to exercise error paths.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use kube::api::{DynamicObject, PropagationPolicy};
use kube::discovery::ApiResource;

use crate::client::{ApplyOptions, DynamicClient};
use crate::error::{KubeError, Result};

/// Key: (apiVersion/plural, namespace, name)
type ObjectKey = (String, String, String);

/// In-memory dynamic client for testing
#[derive(Clone, Default)]
pub struct MockDynamicClient {
    objects: Arc<RwLock<HashMap<ObjectKey, DynamicObject>>>,
    /// Track operation counts for assertions
    operations: Arc<RwLock<OperationCounts>>,
    /// Status code and reason every call fails with, if set
    failure: Arc<RwLock<Option<(u16, String)>>>,
    last_apply: Arc<RwLock<Option<ApplyOptions>>>,
    last_propagation: Arc<RwLock<Option<PropagationPolicy>>>,
    /// Deletes are accepted but objects stay, like objects held by a finalizer
    keep_after_delete: Arc<RwLock<bool>>,
}

/// Counts of operations performed for testing assertions
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OperationCounts {
    pub gets: usize,
    pub applies: usize,
    pub deletes: usize,
    pub waits: usize,
}

fn key(resource: &ApiResource, namespace: &str, name: &str) -> ObjectKey {
    (
        format!("{}/{}", resource.api_version, resource.plural),
        namespace.to_string(),
        name.to_string(),
    )
}

fn not_found(resource: &ApiResource, name: &str) -> KubeError {
    let qualified = if resource.group.is_empty() {
        resource.plural.clone()
    } else {
        format!("{}.{}", resource.plural, resource.group)
    };
    KubeError::api_status(404, "NotFound", format!("{} \"{}\" not found", qualified, name))
}

impl MockDynamicClient {
    /// Create a new empty mock client
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an object as if it already existed in the cluster
    pub fn insert(&self, resource: &ApiResource, object: DynamicObject) {
        let namespace = object.metadata.namespace.clone().unwrap_or_default();
        let name = object.metadata.name.clone().unwrap_or_default();
        self.objects
            .write()
            .unwrap()
            .insert(key(resource, &namespace, &name), object);
    }

    /// Fetch a stored object without counting the operation
    pub fn object(&self, resource: &ApiResource, namespace: &str, name: &str) -> Option<DynamicObject> {
        self.objects
            .read()
            .unwrap()
            .get(&key(resource, namespace, name))
            .cloned()
    }

    /// Make every subsequent call fail with the given API status
    pub fn fail_with(&self, code: u16, reason: &str) {
        *self.failure.write().unwrap() = Some((code, reason.to_string()));
    }

    /// Accept deletes without removing the object
    pub fn keep_after_delete(&self) {
        *self.keep_after_delete.write().unwrap() = true;
    }

    /// Stop injecting failures
    pub fn clear_failure(&self) {
        *self.failure.write().unwrap() = None;
    }

    /// Get operation counts for assertions
    pub fn operation_counts(&self) -> OperationCounts {
        self.operations.read().unwrap().clone()
    }

    /// Options passed to the most recent apply
    pub fn last_apply_options(&self) -> Option<ApplyOptions> {
        self.last_apply.read().unwrap().clone()
    }

    /// Propagation policy passed to the most recent delete
    pub fn last_propagation(&self) -> Option<PropagationPolicy> {
        self.last_propagation.read().unwrap().clone()
    }

    /// Count stored objects
    pub fn object_count(&self) -> usize {
        self.objects.read().unwrap().len()
    }

    fn injected_failure(&self) -> Option<KubeError> {
        self.failure
            .read()
            .unwrap()
            .as_ref()
            .map(|(code, reason)| KubeError::api_status(*code, reason, format!("injected {}", reason)))
    }
}

#[async_trait]
impl DynamicClient for MockDynamicClient {
    async fn get(
        &self,
        resource: &ApiResource,
        namespace: &str,
        name: &str,
    ) -> Result<DynamicObject> {
        self.operations.write().unwrap().gets += 1;
        if let Some(err) = self.injected_failure() {
            return Err(err);
        }

        self.object(resource, namespace, name)
            .ok_or_else(|| not_found(resource, name))
    }

    async fn apply(
        &self,
        resource: &ApiResource,
        object: &DynamicObject,
        options: &ApplyOptions,
    ) -> Result<DynamicObject> {
        self.operations.write().unwrap().applies += 1;
        *self.last_apply.write().unwrap() = Some(options.clone());
        if let Some(err) = self.injected_failure() {
            return Err(err);
        }

        let namespace = object.metadata.namespace.clone().unwrap_or_default();
        let name = object.metadata.name.clone().unwrap_or_default();
        let object_key = key(resource, &namespace, &name);

        let mut objects = self.objects.write().unwrap();
        let mut stored = object.clone();
        let generation = match objects.get(&object_key) {
            Some(existing) => {
                stored.metadata.uid = existing.metadata.uid.clone();
                existing.metadata.generation.unwrap_or(1) + 1
            }
            None => {
                stored.metadata.uid = Some(format!("uid-{}-{}", namespace, name));
                1
            }
        };
        stored.metadata.generation = Some(generation);
        stored.metadata.resource_version = Some(generation.to_string());

        objects.insert(object_key, stored.clone());
        Ok(stored)
    }

    async fn delete(
        &self,
        resource: &ApiResource,
        namespace: &str,
        name: &str,
        propagation: Option<PropagationPolicy>,
    ) -> Result<()> {
        self.operations.write().unwrap().deletes += 1;
        *self.last_propagation.write().unwrap() = propagation;
        if let Some(err) = self.injected_failure() {
            return Err(err);
        }

        let object_key = key(resource, namespace, name);
        let mut objects = self.objects.write().unwrap();
        if *self.keep_after_delete.read().unwrap() {
            if objects.contains_key(&object_key) {
                return Ok(());
            }
            return Err(not_found(resource, name));
        }
        objects
            .remove(&object_key)
            .map(|_| ())
            .ok_or_else(|| not_found(resource, name))
    }

    async fn wait_deleted(
        &self,
        resource: &ApiResource,
        namespace: &str,
        name: &str,
        timeout: Duration,
    ) -> Result<()> {
        self.operations.write().unwrap().waits += 1;
        if self.object(resource, namespace, name).is_some() {
            return Err(KubeError::Timeout(format!("{:?}", timeout)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::core::GroupVersionKind;

    fn grafana_resource() -> ApiResource {
        ApiResource::from_gvk_with_plural(
            &GroupVersionKind::gvk("grafana.integreatly.org", "v1beta1", "Grafana"),
            "grafanas",
        )
    }

    fn grafana(name: &str, namespace: &str) -> DynamicObject {
        DynamicObject::new(name, &grafana_resource()).within(namespace)
    }

    #[tokio::test]
    async fn test_mock_get_missing_is_not_found() {
        let client = MockDynamicClient::new();
        let err = client
            .get(&grafana_resource(), "monitoring", "grafana")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("grafanas.grafana.integreatly.org"));
    }

    #[tokio::test]
    async fn test_mock_apply_then_get() {
        let client = MockDynamicClient::new();
        let ar = grafana_resource();

        let created = client
            .apply(&ar, &grafana("grafana", "monitoring"), &ApplyOptions::default())
            .await
            .unwrap();
        assert_eq!(created.metadata.generation, Some(1));
        assert!(created.metadata.uid.is_some());

        let updated = client
            .apply(&ar, &grafana("grafana", "monitoring"), &ApplyOptions::default())
            .await
            .unwrap();
        assert_eq!(updated.metadata.generation, Some(2));
        assert_eq!(updated.metadata.uid, created.metadata.uid);

        let fetched = client.get(&ar, "monitoring", "grafana").await.unwrap();
        assert_eq!(fetched.metadata.name.as_deref(), Some("grafana"));
        assert_eq!(client.object_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_delete() {
        let client = MockDynamicClient::new();
        let ar = grafana_resource();
        client.insert(&ar, grafana("grafana", "monitoring"));

        client
            .delete(&ar, "monitoring", "grafana", Some(PropagationPolicy::Foreground))
            .await
            .unwrap();
        assert_eq!(client.object_count(), 0);
        assert_eq!(client.last_propagation(), Some(PropagationPolicy::Foreground));

        let err = client.delete(&ar, "monitoring", "grafana", None).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_mock_injected_failure() {
        let client = MockDynamicClient::new();
        let ar = grafana_resource();
        client.insert(&ar, grafana("grafana", "monitoring"));
        client.fail_with(500, "InternalError");

        let err = client.get(&ar, "monitoring", "grafana").await.unwrap_err();
        assert!(!err.is_not_found());

        client.clear_failure();
        assert!(client.get(&ar, "monitoring", "grafana").await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_wait_deleted() {
        let client = MockDynamicClient::new();
        let ar = grafana_resource();
        client.insert(&ar, grafana("grafana", "monitoring"));

        let err = client
            .wait_deleted(&ar, "monitoring", "grafana", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, KubeError::Timeout(_)));

        client.delete(&ar, "monitoring", "grafana", None).await.unwrap();
        client
            .wait_deleted(&ar, "monitoring", "grafana", Duration::from_secs(1))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_mock_keep_after_delete() {
        let client = MockDynamicClient::new();
        let ar = grafana_resource();
        client.insert(&ar, grafana("grafana", "monitoring"));
        client.keep_after_delete();

        client.delete(&ar, "monitoring", "grafana", None).await.unwrap();
        assert_eq!(client.object_count(), 1);

        let err = client
            .wait_deleted(&ar, "monitoring", "grafana", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, KubeError::Timeout(_)));

        let err = client.delete(&ar, "monitoring", "other", None).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_operation_counts() {
        let client = MockDynamicClient::new();
        let ar = grafana_resource();

        let _ = client.get(&ar, "ns", "a").await;
        let _ = client.apply(&ar, &grafana("a", "ns"), &ApplyOptions::default()).await;
        let _ = client.delete(&ar, "ns", "a", None).await;

        assert_eq!(
            client.operation_counts(),
            OperationCounts {
                gets: 1,
                applies: 1,
                deletes: 1,
                waits: 0,
            }
        );
    }
}
