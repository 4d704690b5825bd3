//! Read command - read an object through a data source

use crdform_kube::ReadDataSourceRequest;
use serde_json::json;

use super::{ConnectionArgs, check, connect, data_source, print_state};
use crate::error::Result;

/// Run the read command
pub async fn run(args: &ConnectionArgs, type_name: &str, name: &str, namespace: &str) -> Result<()> {
    let provider = connect(args).await?;
    let data_source = data_source(&provider, type_name)?;

    let response = data_source
        .read(ReadDataSourceRequest {
            config: json!({"metadata": {"name": name, "namespace": namespace}}),
        })
        .await;
    check("Read", response.diagnostics)?;

    if let Some(state) = response.state {
        print_state(&state)?;
    }
    Ok(())
}
