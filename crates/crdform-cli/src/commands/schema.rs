//! Schema command - print the schema of a type as JSON

use crdform_kube::Provider;

use crate::error::{CliError, Result};

/// Which schema to print when a name is both a data source and a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SchemaKind {
    DataSource,
    Resource,
    Provider,
}

/// Run the schema command
pub fn run(type_name: Option<&str>, kind: SchemaKind) -> Result<()> {
    let provider = crdform_crds::provider();
    let schema = match (kind, type_name) {
        (SchemaKind::Provider, _) => provider.schema(),
        (_, None) => {
            return Err(CliError::input(
                "a type name is required unless --kind provider is given",
            ));
        }
        (kind, Some(name)) => lookup(&provider, name, kind)?,
    };

    println!("{}", serde_json::to_string_pretty(&schema.document())?);
    Ok(())
}

fn lookup(provider: &Provider, type_name: &str, kind: SchemaKind) -> Result<crdform_core::Schema> {
    let schema = match kind {
        SchemaKind::Resource => provider.new_resource(type_name).map(|r| r.schema()),
        _ => provider.new_data_source(type_name).map(|d| d.schema()),
    };
    schema.ok_or_else(|| CliError::unknown_type(type_name))
}
