//! List command - list the registered data sources and resources

use serde_json::json;

use crate::display;
use crate::error::Result;

/// Run the list command
pub fn run(output_json: bool) -> Result<()> {
    let provider = crdform_crds::provider();
    let data_sources = provider.data_source_type_names();
    let resources = provider.resource_type_names();

    if output_json {
        let metadata = provider.metadata();
        let json = json!({
            "provider": metadata.type_name,
            "version": metadata.version,
            "data_sources": data_sources,
            "resources": resources,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    println!("{}", display::render_type_table(&data_sources, &resources));
    Ok(())
}
