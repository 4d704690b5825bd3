//! Delete command - delete the object described by a state or config file

use std::path::Path;

use console::style;
use crdform_kube::DeleteRequest;

use super::{ConnectionArgs, check, connect, load_config, resource};
use crate::error::Result;

/// Run the delete command
pub async fn run(args: &ConnectionArgs, type_name: &str, file: &Path) -> Result<()> {
    let provider = connect(args).await?;
    let resource = resource(&provider, type_name)?;
    let state = load_config(file)?;

    let diags = resource.delete(DeleteRequest { state }).await;
    check("Delete", diags)?;

    eprintln!("{} Deleted {}", style("✓").green().bold(), style(type_name).cyan());
    Ok(())
}
