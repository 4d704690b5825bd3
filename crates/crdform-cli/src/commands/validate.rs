//! Validate command - check a configuration file against a type's schema

use std::path::Path;

use console::style;
use crdform_core::validate_config;

use super::load_config;
use crate::display;
use crate::error::{CliError, Result};

/// Run the validate command
///
/// Resources are checked against their resource schema, manifests against
/// the manifest schema. The file may be a state file: computed root
/// attributes (`id`, `api_version`, `kind`, `yaml`) are dropped before
/// validation, as on apply.
pub fn run(type_name: &str, file: &Path) -> Result<()> {
    let provider = crdform_crds::provider();
    let schema = match provider.new_resource(type_name) {
        Some(resource) => resource.schema(),
        None => provider
            .new_data_source(type_name)
            .map(|d| d.schema())
            .ok_or_else(|| CliError::unknown_type(type_name))?,
    };

    let config = schema.config_view(&load_config(file)?);
    let diags = validate_config(&schema.attributes, &config);
    display::print_diagnostics(&diags);

    let errors = diags.errors().count();
    if errors > 0 {
        return Err(CliError::Validation {
            errors,
            help: Some(format!("Run 'crdform schema {}' to see the expected attributes", type_name)),
        });
    }

    println!(
        "{} {} is a valid {} configuration",
        style("✓").green().bold(),
        style(file.display()).cyan(),
        type_name
    );
    Ok(())
}
