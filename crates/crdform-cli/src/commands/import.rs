//! Import command - adopt an existing object by its "name/namespace" id

use crdform_kube::{ImportStateRequest, ReadRequest};

use super::{ConnectionArgs, check, connect, print_state, resource};
use crate::error::{CliError, Result};

/// Run the import command
///
/// The imported identity is refreshed with a read, like the first plan
/// after an import would.
pub async fn run(args: &ConnectionArgs, type_name: &str, id: &str) -> Result<()> {
    let provider = connect(args).await?;
    let resource = resource(&provider, type_name)?;

    let imported = resource
        .import_state(ImportStateRequest { id: id.to_string() })
        .await;
    check("Import", imported.diagnostics)?;
    let state = imported
        .state
        .ok_or_else(|| CliError::internal("import returned no state"))?;

    let refreshed = resource.read(ReadRequest { state }).await;
    check("Read", refreshed.diagnostics)?;
    match refreshed.state {
        Some(state) => print_state(&state),
        None => Err(CliError::NotFound {
            message: format!("Cannot import non-existent remote object '{}'", id),
        }),
    }
}
