//! CLI commands

pub mod apply;
pub mod delete;
pub mod import;
pub mod list;
pub mod manifest;
pub mod read;
pub mod schema;
pub mod validate;

use std::path::{Path, PathBuf};

use crdform_core::Diagnostics;
use crdform_kube::{DataSource, ManagedResource, Provider, ProviderConfig};
use serde_json::Value;

use crate::display;
use crate::error::{CliError, Result};

/// Cluster connection settings shared by every command
#[derive(Debug, Clone, Default)]
pub struct ConnectionArgs {
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
    pub offline: bool,
    pub provider_config: Option<PathBuf>,
}

impl ConnectionArgs {
    /// Provider configuration from the config file, overridden by flags
    pub fn provider_config(&self) -> Result<ProviderConfig> {
        let mut config = match &self.provider_config {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                ProviderConfig::from_yaml(&content).map_err(|e| CliError::Config {
                    message: format!("{}: {}", path.display(), e),
                })?
            }
            None => ProviderConfig::default(),
        };

        if let Some(kubeconfig) = &self.kubeconfig {
            config.kubeconfig = Some(kubeconfig.clone());
        }
        if let Some(context) = &self.context {
            config.context = Some(context.clone());
        }
        if self.offline {
            config.offline = true;
        }
        Ok(config)
    }
}

/// Build the provider and connect it to the cluster
pub async fn connect(args: &ConnectionArgs) -> Result<Provider> {
    let config = args.provider_config()?;
    tracing::debug!(?config, "configuring provider");

    let mut provider = crdform_crds::provider();
    let diags = provider.configure_with(config).await;
    check("Configure", diags)?;
    Ok(provider)
}

/// Print diagnostics and turn errors into a `CliError`
pub fn check(operation: &str, diagnostics: Diagnostics) -> Result<()> {
    display::print_diagnostics(&diagnostics);
    if diagnostics.has_error() {
        return Err(CliError::from_diagnostics(operation, &diagnostics));
    }
    Ok(())
}

/// Load a YAML or JSON file in the Terraform (snake_case) shape
pub fn load_config(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    let value: Value = serde_yaml::from_str(&content)
        .map_err(|e| CliError::input(format!("{}: {}", path.display(), e)))?;
    if !value.is_object() {
        return Err(CliError::input(format!(
            "{}: expected a mapping at the top level",
            path.display()
        )));
    }
    Ok(value)
}

/// Print a state value as pretty JSON on stdout
pub fn print_state(state: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(state)?);
    Ok(())
}

/// Configured data source registered under `type_name`
pub fn data_source(provider: &Provider, type_name: &str) -> Result<Box<dyn DataSource>> {
    if provider.new_data_source(type_name).is_none() {
        return Err(CliError::unknown_type(type_name));
    }
    provider.data_source(type_name).map_err(configure_failed)
}

/// Configured resource registered under `type_name`
pub fn resource(provider: &Provider, type_name: &str) -> Result<Box<dyn ManagedResource>> {
    if provider.new_resource(type_name).is_none() {
        return Err(CliError::unknown_type(type_name));
    }
    provider.resource(type_name).map_err(configure_failed)
}

fn configure_failed(diagnostics: Diagnostics) -> CliError {
    display::print_diagnostics(&diagnostics);
    CliError::from_diagnostics("Configure", &diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_flags_override_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("provider.yaml");
        std::fs::write(
            &path,
            "context: staging\nfield_manager: platform\ndeletion_timeout: 30s\n",
        )
        .unwrap();

        let args = ConnectionArgs {
            context: Some("production".to_string()),
            offline: true,
            provider_config: Some(path),
            ..Default::default()
        };
        let config = args.provider_config().unwrap();
        assert_eq!(config.context.as_deref(), Some("production"));
        assert_eq!(config.field_manager, "platform");
        assert_eq!(config.deletion_timeout, Duration::from_secs(30));
        assert!(config.offline);
    }

    #[test]
    fn test_invalid_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("provider.yaml");
        std::fs::write(&path, "cluster: nope\n").unwrap();

        let args = ConnectionArgs {
            provider_config: Some(path),
            ..Default::default()
        };
        let err = args.provider_config().unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }

    #[test]
    fn test_load_config_rejects_scalars() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("route.yaml");
        std::fs::write(&path, "just a string\n").unwrap();
        assert!(matches!(load_config(&path), Err(CliError::Input { .. })));

        std::fs::write(&path, "metadata:\n  name: grafana\n  namespace: monitoring\n").unwrap();
        let value = load_config(&path).unwrap();
        assert_eq!(value["metadata"]["name"], "grafana");
    }
}
