//! Provider configuration
//!
//! The provider block accepts:
//!
//! ```yaml
//! kubeconfig: ~/.kube/config   # optional, otherwise inferred
//! context: kind-dev            # optional kubeconfig context
//! offline: false               # only manifest data sources work when true
//! field_manager: crdform       # default field manager for resources
//! deletion_timeout: 5m         # bound for wait_for_deletion
//! ```

use std::path::PathBuf;
use std::time::Duration;

use kube::config::{KubeConfigOptions, Kubeconfig};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crdform_core::{Attribute, Schema};

use crate::client::DEFAULT_FIELD_MANAGER;
use crate::error::{KubeError, Result};

/// Provider-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderConfig {
    /// Path to a kubeconfig file
    pub kubeconfig: Option<PathBuf>,
    /// Kubeconfig context to use
    pub context: Option<String>,
    /// Never contact a cluster
    pub offline: bool,
    /// Default field manager for Server-Side Apply
    pub field_manager: String,
    /// How long `wait_for_deletion` blocks before giving up
    #[serde(with = "humantime_serde")]
    pub deletion_timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kubeconfig: None,
            context: None,
            offline: false,
            field_manager: DEFAULT_FIELD_MANAGER.to_string(),
            deletion_timeout: Duration::from_secs(5 * 60),
        }
    }
}

impl ProviderConfig {
    /// Schema of the provider block
    pub fn schema() -> Schema {
        Schema::new("Provider for Kubernetes custom resources.")
            .with_attribute(
                Attribute::string("kubeconfig")
                    .describe("Path to the kubeconfig file. Inferred from KUBECONFIG or the in-cluster environment when unset."),
            )
            .with_attribute(
                Attribute::string("context").describe("Name of the kubeconfig context to use."),
            )
            .with_attribute(Attribute::bool("offline").describe(
                "Do not connect to a cluster. Only manifest data sources can be used.",
            ))
            .with_attribute(
                Attribute::string("fieldManager")
                    .describe("Default field manager used for server-side apply."),
            )
            .with_attribute(Attribute::string("deletionTimeout").describe(
                "How long to wait for objects to disappear when 'wait_for_deletion' is set (e.g. '5m').",
            ))
    }

    /// Parse a provider block in its Terraform shape
    ///
    /// Unset attributes may be present as `null`.
    pub fn from_value(value: &Value) -> Result<Self> {
        let value = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(map) => Value::Object(
                map.iter()
                    .filter(|(_, v)| !v.is_null())
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            ),
            _ => {
                return Err(KubeError::InvalidConfig(
                    "provider configuration must be an object".to_string(),
                ));
            }
        };
        Ok(serde_json::from_value(value)?)
    }

    /// Parse a YAML or JSON provider config file
    pub fn from_yaml(content: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(content)?;
        Self::from_value(&value)
    }

    /// Resolve the cluster configuration
    ///
    /// An explicit kubeconfig path wins, then an explicit context against the
    /// default kubeconfig, then `kube::Config::infer` (KUBECONFIG,
    /// in-cluster, ~/.kube/config).
    pub async fn client_config(&self) -> Result<kube::Config> {
        let options = KubeConfigOptions {
            context: self.context.clone(),
            ..Default::default()
        };

        match (&self.kubeconfig, &self.context) {
            (Some(path), _) => {
                tracing::debug!(path = %path.display(), context = ?self.context, "loading kubeconfig");
                let kubeconfig = Kubeconfig::read_from(path)?;
                Ok(kube::Config::from_custom_kubeconfig(kubeconfig, &options).await?)
            }
            (None, Some(_)) => Ok(kube::Config::from_kubeconfig(&options).await?),
            (None, None) => Ok(kube::Config::infer().await?),
        }
    }
}
