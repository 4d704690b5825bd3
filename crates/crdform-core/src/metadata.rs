//! Standard attributes shared by every CRD schema
//!
//! Each CRD schema starts with `id`, `api_version`, `kind` and a `metadata`
//! block; only the `spec` block differs between CRDs.

use crate::schema::Attribute;
use crate::validation::Validator;

/// Which flavour of schema is being built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVariant {
    /// Reads an existing object, every field except the identity is computed
    DataSource,
    /// Manages an object's lifecycle
    Resource,
    /// Renders an object as YAML without contacting the cluster
    Manifest,
}

/// The synthetic `id` attribute (`<name>/<namespace>`)
pub fn id_attribute() -> Attribute {
    Attribute::string("id")
        .computed()
        .describe("Contains the value 'metadata.name/metadata.namespace'.")
}

/// `api_version` and `kind`, always computed
pub fn type_attributes() -> Vec<Attribute> {
    vec![
        Attribute::string("apiVersion")
            .computed()
            .describe("The API group of the requested resource."),
        Attribute::string("kind")
            .computed()
            .describe("The type of the requested resource."),
    ]
}

/// The `metadata` block for a namespaced object
pub fn metadata_attribute(variant: SchemaVariant) -> Attribute {
    let name = Attribute::string("name")
        .required()
        .validate(Validator::ResourceName)
        .describe("The name of the resource.");
    let namespace = Attribute::string("namespace")
        .required()
        .validate(Validator::Namespace)
        .describe("The namespace of the resource.");
    let labels = Attribute::string_map("labels").describe(
        "Map of string keys and values that can be used to organize and categorize \
         (scope and select) objects.",
    );
    let annotations = Attribute::string_map("annotations").describe(
        "Unstructured key value map stored with a resource that may be set by external \
         tools to store and retrieve arbitrary metadata.",
    );

    let children = match variant {
        SchemaVariant::DataSource => vec![name, namespace, labels.computed(), annotations.computed()],
        SchemaVariant::Resource | SchemaVariant::Manifest => vec![
            name.requires_replace(),
            namespace.requires_replace(),
            labels.validate(Validator::Labels),
            annotations.validate(Validator::AnnotationKeys),
        ],
    };

    Attribute::single_nested("metadata", children)
        .required()
        .describe("Data that helps uniquely identify this object.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AccessMode;

    #[test]
    fn test_data_source_metadata() {
        let metadata = metadata_attribute(SchemaVariant::DataSource);
        assert_eq!(metadata.child("name").unwrap().mode, AccessMode::Required);
        assert_eq!(metadata.child("namespace").unwrap().mode, AccessMode::Required);
        assert_eq!(metadata.child("labels").unwrap().mode, AccessMode::Computed);
        assert_eq!(metadata.child("annotations").unwrap().mode, AccessMode::Computed);
    }

    #[test]
    fn test_resource_metadata() {
        let metadata = metadata_attribute(SchemaVariant::Resource);
        let name = metadata.child("name").unwrap();
        assert!(name.requires_replace);
        assert_eq!(name.validators, vec![Validator::ResourceName]);
        assert_eq!(metadata.child("labels").unwrap().mode, AccessMode::Optional);
    }

    #[test]
    fn test_type_attributes() {
        let names: Vec<_> = type_attributes().into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["api_version", "kind"]);
    }
}
