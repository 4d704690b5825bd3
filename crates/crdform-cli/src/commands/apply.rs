//! Apply command - create or update an object from a configuration file

use std::path::Path;

use console::style;
use crdform_kube::{CreateRequest, ReadRequest, UpdateRequest};

use super::{ConnectionArgs, check, connect, load_config, print_state, resource};
use crate::error::Result;

/// Run the apply command
///
/// The current object is read first: an existing object is updated, a
/// missing one is created.
pub async fn run(args: &ConnectionArgs, type_name: &str, file: &Path) -> Result<()> {
    let provider = connect(args).await?;
    let resource = resource(&provider, type_name)?;
    let plan = load_config(file)?;

    let current = resource.read(ReadRequest { state: plan.clone() }).await;
    check("Read", current.diagnostics)?;

    let response = match current.state {
        Some(prior_state) => {
            tracing::debug!("object exists, updating");
            eprintln!("{} Updating {}", style("→").blue().bold(), style(type_name).cyan());
            resource.update(UpdateRequest { plan, prior_state }).await
        }
        None => {
            tracing::debug!("object not found, creating");
            eprintln!("{} Creating {}", style("→").blue().bold(), style(type_name).cyan());
            resource.create(CreateRequest { plan }).await
        }
    };
    check("Apply", response.diagnostics)?;

    if let Some(state) = response.state {
        print_state(&state)?;
    }
    Ok(())
}
