//! Manifest command - render a configuration file as a Kubernetes manifest

use std::path::Path;

use crdform_core::manifest_type_name;
use crdform_kube::ReadDataSourceRequest;

use super::{check, data_source, load_config};
use crate::error::{CliError, Result};

/// Run the manifest command
///
/// Accepts either the resource type name or its `_manifest` data source.
/// Never contacts a cluster.
pub async fn run(type_name: &str, file: &Path) -> Result<()> {
    let type_name = if type_name.ends_with("_manifest") {
        type_name.to_string()
    } else {
        manifest_type_name(type_name)
    };

    let provider = crdform_crds::provider();
    let manifest = data_source(&provider, &type_name)?;
    let config = load_config(file)?;

    let response = manifest.read(ReadDataSourceRequest { config }).await;
    check("Manifest", response.diagnostics)?;

    let yaml = response
        .state
        .as_ref()
        .and_then(|state| state.get("yaml"))
        .and_then(|yaml| yaml.as_str())
        .ok_or_else(|| CliError::internal("manifest data source returned no yaml"))?;
    print!("{}", yaml);
    Ok(())
}
