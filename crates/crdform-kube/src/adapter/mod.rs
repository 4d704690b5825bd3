//! Generic CRUD adapters over typed custom resources
//!
//! Each CRD contributes a typed struct (derived with `kube::CustomResource`)
//! and a descriptor of its `spec` block by implementing
//! [`CustomResourceKind`]. The adapters in this module turn that pair into a
//! data source, a managed resource and a manifest data source.
//!
//! Every request goes through the same pipeline:
//!
//! ```text
//! config (snake_case) --descriptor--> wire JSON --serde--> K --> API server
//! API server --> DynamicObject --serde--> K --> wire JSON --descriptor--> state
//! ```

mod data_source;
mod manifest;
mod resource;

pub use data_source::CrdDataSource;
pub use manifest::CrdManifest;
pub use resource::CrdResource;

use kube::api::ObjectMeta;
use kube::discovery::ApiResource;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

use crdform_core::metadata::{id_attribute, metadata_attribute, type_attributes};
use crdform_core::state::{from_wire, null_object, to_wire};
use crdform_core::{Attribute, CoreError, Diagnostic, ResourceId, Schema, SchemaVariant};

/// A typed, namespaced custom resource exposed by the provider
pub trait CustomResourceKind:
    kube::Resource<DynamicType = ()> + Serialize + DeserializeOwned + Clone + Send + Sync + 'static
{
    /// Description used for the schemas of this kind
    fn description() -> &'static str;

    /// Attributes of the `spec` block, in their configurable form
    fn spec_attributes() -> Vec<Attribute>;
}

/// Type name of a kind, e.g. `k8s_route_openshift_io_route_v1`
pub fn type_name<K: CustomResourceKind>(provider_type_name: &str) -> String {
    crdform_core::type_name(
        provider_type_name,
        &K::group(&()),
        &K::kind(&()),
        &K::version(&()),
    )
}

/// API coordinates (group/version/kind/plural) of a kind
pub fn api_resource<K: CustomResourceKind>() -> ApiResource {
    ApiResource::erase::<K>(&())
}

/// Schema of a kind for the given variant
///
/// The manifest variant has no `api_version`/`kind` and adds `yaml`; the
/// resource variant adds its lifecycle options.
pub fn schema<K: CustomResourceKind>(variant: SchemaVariant) -> Schema {
    let spec = Attribute::single_nested("spec", K::spec_attributes())
        .describe("Specification of the desired behavior of the resource.");

    let mut schema = Schema::new(K::description()).with_attribute(id_attribute());
    if variant != SchemaVariant::Manifest {
        schema = schema.with_attributes(type_attributes());
    }
    schema = schema.with_attribute(metadata_attribute(variant));

    match variant {
        SchemaVariant::DataSource => schema.with_attribute(spec.into_computed()),
        SchemaVariant::Resource => schema
            .with_attribute(spec)
            .with_attributes(resource::option_attributes()),
        SchemaVariant::Manifest => schema.with_attribute(spec).with_attribute(
            Attribute::string("yaml")
                .computed()
                .describe("The generated manifest in YAML format."),
        ),
    }
}

fn children<'a>(schema: &'a Schema, name: &str) -> &'a [Attribute] {
    schema
        .attribute(name)
        .and_then(|a| a.attr_type.children())
        .unwrap_or(&[])
}

/// Build the typed object from a config or plan value
pub(crate) fn build_typed<K: CustomResourceKind>(schema: &Schema, config: &Value) -> Result<K, CoreError> {
    let metadata = to_wire(
        children(schema, "metadata"),
        config.get("metadata").unwrap_or(&Value::Null),
    )?;

    let mut wire = Map::new();
    wire.insert("apiVersion".to_string(), Value::String(K::api_version(&()).into_owned()));
    wire.insert("kind".to_string(), Value::String(K::kind(&()).into_owned()));
    wire.insert("metadata".to_string(), metadata);
    match config.get("spec") {
        None | Some(Value::Null) => {}
        Some(spec) => {
            wire.insert("spec".to_string(), to_wire(children(schema, "spec"), spec)?);
        }
    }

    Ok(parse_typed(&Value::Object(wire))?)
}

/// Deserialize wire JSON into the typed struct
///
/// The derived root struct requires `spec`; an absent spec is read as empty.
pub(crate) fn parse_typed<K: DeserializeOwned>(wire: &Value) -> serde_json::Result<K> {
    let mut wire = wire.clone();
    if let Value::Object(map) = &mut wire {
        if map.get("spec").is_none_or(Value::is_null) {
            map.insert("spec".to_string(), json!({}));
        }
    }
    serde_json::from_value(wire)
}

/// Build state from an object returned by the API server
///
/// Only attributes declared by `schema` are filled; the rest stay `null`.
/// `spec` stays `null` when the object has none, and is then not parsed into
/// `K` at all: kinds with required spec fields cannot represent it.
pub(crate) fn state_from_object<K: CustomResourceKind>(
    schema: &Schema,
    wire: &Value,
) -> Result<Map<String, Value>, CoreError> {
    let has_spec = wire.get("spec").is_some_and(|spec| !spec.is_null());
    let (meta, spec_wire) = if has_spec {
        let typed: K = parse_typed(wire)?;
        let typed_wire = serde_json::to_value(&typed)?;
        (typed.meta().clone(), typed_wire.get("spec").cloned())
    } else {
        let metadata = wire
            .get("metadata")
            .filter(|m| !m.is_null())
            .cloned()
            .unwrap_or_else(|| json!({}));
        (serde_json::from_value::<ObjectMeta>(metadata)?, None)
    };

    let id = ResourceId::new(
        meta.name.clone().unwrap_or_default(),
        meta.namespace.clone().unwrap_or_default(),
    )?;
    let meta_wire = serde_json::to_value(&meta)?;

    let mut state = match null_object(&schema.attributes) {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    let mut set = |name: &str, value: Value| {
        if let Some(slot) = state.get_mut(name) {
            *slot = value;
        }
    };
    set("id", Value::String(id.to_string()));
    set("api_version", Value::String(K::api_version(&()).into_owned()));
    set("kind", Value::String(K::kind(&()).into_owned()));
    set("metadata", from_wire(children(schema, "metadata"), &meta_wire)?);
    if let Some(spec) = spec_wire {
        set("spec", from_wire(children(schema, "spec"), &spec)?);
    }

    Ok(state)
}

/// Identity taken from `metadata.name`/`metadata.namespace`, falling back to `id`
pub(crate) fn identity(value: &Value) -> Result<ResourceId, CoreError> {
    let metadata = value.get("metadata");
    let field = |name: &str| {
        metadata
            .and_then(|m| m.get(name))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    let id = match (field("name"), field("namespace")) {
        (Some(name), Some(namespace)) => ResourceId::new(name, namespace)?,
        _ => match value.get("id").and_then(Value::as_str) {
            Some(id) => id.parse()?,
            None => return Err(CoreError::MissingField { field: "metadata.name".to_string() }),
        },
    };
    id.validate()?;
    Ok(id)
}

pub(crate) fn not_found(id: &ResourceId) -> Diagnostic {
    Diagnostic::error(
        "Unable to find resource",
        format!(
            "The requested resource cannot be found. Make sure that it exists in your cluster \
             and that you have the correct permissions to read it.\n\nName: {}\nNamespace: {}",
            id.name, id.namespace
        ),
    )
}

pub(crate) fn get_failed(err: impl std::fmt::Display) -> Diagnostic {
    Diagnostic::error(
        "Unable to GET resource",
        format!(
            "An unexpected error occurred while reading the resource. Please report this issue \
             to the provider developers.\n\nGET Error: {}",
            err
        ),
    )
}

pub(crate) fn unmarshal_failed(err: impl std::fmt::Display) -> Diagnostic {
    Diagnostic::error(
        "Error unmarshalling response",
        format!(
            "An unexpected error occurred while parsing the resource read response. Please \
             report this issue to the provider developers.\n\nJSON Error: {}",
            err
        ),
    )
}

pub(crate) fn marshal_failed(err: impl std::fmt::Display) -> Diagnostic {
    Diagnostic::error(
        "Error marshalling resource",
        format!(
            "An unexpected error occurred while encoding the resource. Please report this issue \
             to the provider developers.\n\nJSON Error: {}",
            err
        ),
    )
}

pub(crate) fn invalid_identity(err: impl std::fmt::Display) -> Diagnostic {
    Diagnostic::error(
        "Invalid resource identity",
        format!("Unable to determine the name and namespace of the resource.\n\nError: {}", err),
    )
    .at("metadata")
}
