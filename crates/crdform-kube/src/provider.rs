//! Provider: configuration and the registry of data sources and resources

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crdform_core::{Diagnostic, Diagnostics, PROVIDER_TYPE_NAME, Schema, validate_config};

use crate::client::{DynamicClient, KubeDynamicClient};
use crate::config::ProviderConfig;
use crate::framework::{DataSource, ManagedResource, ProviderData};

/// Creates a fresh, unconfigured data source
pub type DataSourceFactory = fn() -> Box<dyn DataSource>;

/// Creates a fresh, unconfigured resource
pub type ResourceFactory = fn() -> Box<dyn ManagedResource>;

/// Provider name and version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderMetadata {
    pub type_name: String,
    pub version: String,
}

/// The provider
///
/// Holds factories rather than instances: every request gets its own
/// adapter, configured from the shared [`ProviderData`].
pub struct Provider {
    version: String,
    data_sources: Vec<DataSourceFactory>,
    resources: Vec<ResourceFactory>,
    data: Option<ProviderData>,
}

impl Provider {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            data_sources: Vec::new(),
            resources: Vec::new(),
            data: None,
        }
    }

    #[must_use]
    pub fn with_data_source(mut self, factory: DataSourceFactory) -> Self {
        self.data_sources.push(factory);
        self
    }

    #[must_use]
    pub fn with_resource(mut self, factory: ResourceFactory) -> Self {
        self.resources.push(factory);
        self
    }

    pub fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            type_name: PROVIDER_TYPE_NAME.to_string(),
            version: self.version.clone(),
        }
    }

    /// Schema of the provider configuration block
    pub fn schema(&self) -> Schema {
        ProviderConfig::schema()
    }

    /// Configure from a provider block in its Terraform shape
    pub async fn configure(&mut self, config: &Value) -> Diagnostics {
        let diags = validate_config(&self.schema().attributes, config);
        if diags.has_error() {
            return diags;
        }

        match ProviderConfig::from_value(config) {
            Ok(config) => self.configure_with(config).await,
            Err(e) => Diagnostic::error(
                "Invalid provider configuration",
                format!("Unable to parse the provider configuration.\n\nError: {}", e),
            )
            .into(),
        }
    }

    /// Configure from an already parsed configuration
    ///
    /// Offline mode creates no client at all.
    pub async fn configure_with(&mut self, config: ProviderConfig) -> Diagnostics {
        if config.offline {
            tracing::info!("provider configured in offline mode");
            self.data = Some(ProviderData {
                client: None,
                offline: true,
                field_manager: config.field_manager,
                deletion_timeout: config.deletion_timeout,
            });
            return Diagnostics::new();
        }

        let client = match config.client_config().await {
            Ok(kube_config) => {
                tracing::debug!(cluster_url = %kube_config.cluster_url, "resolved cluster configuration");
                KubeDynamicClient::try_from_config(kube_config)
            }
            Err(e) => Err(e),
        };

        match client {
            Ok(client) => {
                self.configure_with_client(Arc::new(client), &config);
                Diagnostics::new()
            }
            Err(e) => Diagnostic::error(
                "Unable to create Kubernetes client",
                format!(
                    "The provider could not build a client for the cluster. Check the \
                     kubeconfig and context settings.\n\nError: {}",
                    e
                ),
            )
            .into(),
        }
    }

    /// Configure with an existing client
    pub fn configure_with_client(&mut self, client: Arc<dyn DynamicClient>, config: &ProviderConfig) {
        self.data = Some(ProviderData {
            client: Some(client),
            offline: false,
            field_manager: config.field_manager.clone(),
            deletion_timeout: config.deletion_timeout,
        });
    }

    /// Data shared with adapters, `None` until configured
    pub fn provider_data(&self) -> Option<&ProviderData> {
        self.data.as_ref()
    }

    /// Type names of every data source, in registration order
    pub fn data_source_type_names(&self) -> Vec<String> {
        self.data_sources
            .iter()
            .map(|factory| factory().type_name(PROVIDER_TYPE_NAME))
            .collect()
    }

    /// Type names of every resource, in registration order
    pub fn resource_type_names(&self) -> Vec<String> {
        self.resources
            .iter()
            .map(|factory| factory().type_name(PROVIDER_TYPE_NAME))
            .collect()
    }

    /// Fresh, unconfigured data source by type name
    pub fn new_data_source(&self, type_name: &str) -> Option<Box<dyn DataSource>> {
        self.data_sources
            .iter()
            .map(|factory| factory())
            .find(|ds| ds.type_name(PROVIDER_TYPE_NAME) == type_name)
    }

    /// Fresh, unconfigured resource by type name
    pub fn new_resource(&self, type_name: &str) -> Option<Box<dyn ManagedResource>> {
        self.resources
            .iter()
            .map(|factory| factory())
            .find(|r| r.type_name(PROVIDER_TYPE_NAME) == type_name)
    }

    /// Data source by type name, configured with the provider data
    pub fn data_source(&self, type_name: &str) -> std::result::Result<Box<dyn DataSource>, Diagnostics> {
        let mut data_source = self
            .new_data_source(type_name)
            .ok_or_else(|| unknown_type("data source", type_name))?;
        let diags = data_source.configure(self.data.as_ref());
        if diags.has_error() {
            return Err(diags);
        }
        Ok(data_source)
    }

    /// Resource by type name, configured with the provider data
    pub fn resource(&self, type_name: &str) -> std::result::Result<Box<dyn ManagedResource>, Diagnostics> {
        let mut resource = self
            .new_resource(type_name)
            .ok_or_else(|| unknown_type("resource", type_name))?;
        let diags = resource.configure(self.data.as_ref());
        if diags.has_error() {
            return Err(diags);
        }
        Ok(resource)
    }
}

fn unknown_type(what: &str, type_name: &str) -> Diagnostics {
    Diagnostic::error(
        format!("Unknown {} type", what),
        format!("The provider does not implement a {} named \"{}\".", what, type_name),
    )
    .into()
}
