//! Provider framework surface
//!
//! The host instantiates a fresh data source or resource per request, hands
//! it the [`ProviderData`] produced by provider configuration, then invokes a
//! single CRUD operation. Operations never fail with a Rust error; problems
//! are reported as [`Diagnostics`] next to the (possibly absent) new state.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crdform_core::{Diagnostic, Diagnostics, Schema};

use crate::client::{DEFAULT_FIELD_MANAGER, DynamicClient};

/// Shared data handed to every adapter after provider configuration
#[derive(Clone)]
pub struct ProviderData {
    /// Cluster client, `None` in offline mode
    pub client: Option<Arc<dyn DynamicClient>>,
    pub offline: bool,
    /// Field manager used when a resource does not set its own
    pub field_manager: String,
    /// Upper bound for `wait_for_deletion`
    pub deletion_timeout: Duration,
}

impl ProviderData {
    /// Provider data backed by a live client
    pub fn online(client: Arc<dyn DynamicClient>) -> Self {
        Self {
            client: Some(client),
            offline: false,
            field_manager: DEFAULT_FIELD_MANAGER.to_string(),
            deletion_timeout: Duration::from_secs(5 * 60),
        }
    }

    /// Provider data without a client
    pub fn offline() -> Self {
        Self {
            client: None,
            offline: true,
            field_manager: DEFAULT_FIELD_MANAGER.to_string(),
            deletion_timeout: Duration::from_secs(5 * 60),
        }
    }
}

impl std::fmt::Debug for ProviderData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderData")
            .field("client", &self.client.as_ref().map(|_| "<dynamic client>"))
            .field("offline", &self.offline)
            .field("field_manager", &self.field_manager)
            .field("deletion_timeout", &self.deletion_timeout)
            .finish()
    }
}

/// Resolve the client for an adapter that needs the cluster
///
/// Offline mode and a missing client are distinct failures.
pub fn require_client(data: Option<&ProviderData>) -> Result<Arc<dyn DynamicClient>, Diagnostic> {
    let Some(data) = data else {
        return Err(unconfigured_client());
    };
    if data.offline {
        return Err(Diagnostic::error(
            "Provider in offline mode",
            "The provider is configured with 'offline = true' and cannot contact the cluster. \
             Only manifest data sources can be used in offline mode.",
        ));
    }
    data.client.clone().ok_or_else(unconfigured_client)
}

/// Diagnostic for an adapter used before Configure
pub fn unconfigured_client() -> Diagnostic {
    Diagnostic::error(
        "Unconfigured HTTP Client",
        "Expected configured HTTP client. Please report this issue to the provider developers.",
    )
}

/// Outcome of an operation that produces state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StateResponse {
    /// New state, `None` when the object is gone or the operation failed
    pub state: Option<Value>,
    pub diagnostics: Diagnostics,
}

impl StateResponse {
    pub fn with_state(state: Value) -> Self {
        Self {
            state: Some(state),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Response with no state and a single error
    pub fn error(diagnostic: Diagnostic) -> Self {
        Self {
            state: None,
            diagnostics: diagnostic.into(),
        }
    }

    pub fn from_diagnostics(diagnostics: Diagnostics) -> Self {
        Self {
            state: None,
            diagnostics,
        }
    }

    /// Object was not found and should be dropped from state
    pub fn removed() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone)]
pub struct ReadDataSourceRequest {
    pub config: Value,
}

#[derive(Debug, Clone)]
pub struct CreateRequest {
    pub plan: Value,
}

#[derive(Debug, Clone)]
pub struct ReadRequest {
    pub state: Value,
}

#[derive(Debug, Clone)]
pub struct UpdateRequest {
    pub plan: Value,
    pub prior_state: Value,
}

#[derive(Debug, Clone)]
pub struct DeleteRequest {
    pub state: Value,
}

#[derive(Debug, Clone)]
pub struct ImportStateRequest {
    pub id: String,
}

/// A read-only entity
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Full type name given the provider's type name
    fn type_name(&self, provider_type_name: &str) -> String;

    fn schema(&self) -> Schema;

    /// Accept the shared provider data; `None` when the provider is not configured yet
    fn configure(&mut self, data: Option<&ProviderData>) -> Diagnostics;

    async fn read(&self, request: ReadDataSourceRequest) -> StateResponse;
}

/// An entity whose lifecycle is managed
#[async_trait]
pub trait ManagedResource: Send + Sync {
    fn type_name(&self, provider_type_name: &str) -> String;

    fn schema(&self) -> Schema;

    fn configure(&mut self, data: Option<&ProviderData>) -> Diagnostics;

    async fn create(&self, request: CreateRequest) -> StateResponse;

    /// Refresh state; a `None` state means the object no longer exists
    async fn read(&self, request: ReadRequest) -> StateResponse;

    async fn update(&self, request: UpdateRequest) -> StateResponse;

    async fn delete(&self, request: DeleteRequest) -> Diagnostics;

    /// Seed state from an import id; a subsequent read fills the rest
    async fn import_state(&self, request: ImportStateRequest) -> StateResponse;
}
