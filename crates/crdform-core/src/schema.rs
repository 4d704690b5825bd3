//! Schema descriptors
//!
//! A descriptor is a static tree of attributes mirroring one CRD's OpenAPI
//! structure. Each attribute carries its Terraform name (derived from the
//! JSON name, see [`crate::naming`]), its JSON name on the wire, its type and
//! its access mode.
//!
//! ```ignore
//! let port = Attribute::single_nested(
//!     "port",
//!     vec![Attribute::int_or_string("targetPort").required()],
//! )
//! .describe("If specified, the port to be used by the router.");
//! ```

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::naming::attribute_name;
use crate::validation::Validator;

/// Element type of map and list attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementType {
    String,
    Bool,
    Int64,
    Float64,
    List(Box<ElementType>),
    Map(Box<ElementType>),
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Bool => write!(f, "bool"),
            Self::Int64 => write!(f, "int64"),
            Self::Float64 => write!(f, "float64"),
            Self::List(inner) => write!(f, "list({})", inner),
            Self::Map(inner) => write!(f, "map({})", inner),
        }
    }
}

/// Attribute type
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeType {
    String,
    Bool,
    Int64,
    Float64,
    /// `x-kubernetes-int-or-string`, an integer or a string in state
    IntOrString,
    Map(ElementType),
    List(ElementType),
    SingleNested(Vec<Attribute>),
    ListNested(Vec<Attribute>),
}

impl AttributeType {
    /// Nested attributes of object and list-of-object types
    pub fn children(&self) -> Option<&[Attribute]> {
        match self {
            Self::SingleNested(children) | Self::ListNested(children) => Some(children),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::IntOrString => write!(f, "int_or_string"),
            Self::Bool => write!(f, "bool"),
            Self::Int64 => write!(f, "int64"),
            Self::Float64 => write!(f, "float64"),
            Self::Map(elem) => write!(f, "map({})", elem),
            Self::List(elem) => write!(f, "list({})", elem),
            Self::SingleNested(_) => write!(f, "object"),
            Self::ListNested(_) => write!(f, "list(object)"),
        }
    }
}

/// How an attribute may be set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    Required,
    Optional,
    Computed,
    OptionalComputed,
}

/// A single attribute of a descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Terraform attribute name (snake_case)
    pub name: String,
    /// Field name on the wire (CamelCase)
    pub json_name: String,
    pub description: String,
    pub attr_type: AttributeType,
    pub mode: AccessMode,
    pub sensitive: bool,
    /// Changing the value forces a new resource
    pub requires_replace: bool,
    pub validators: Vec<Validator>,
}

impl Attribute {
    /// Create an optional attribute named after its JSON field
    pub fn new(json_name: &str, attr_type: AttributeType) -> Self {
        Self {
            name: attribute_name(json_name),
            json_name: json_name.to_string(),
            description: String::new(),
            attr_type,
            mode: AccessMode::Optional,
            sensitive: false,
            requires_replace: false,
            validators: Vec::new(),
        }
    }

    pub fn string(json_name: &str) -> Self {
        Self::new(json_name, AttributeType::String)
    }

    pub fn bool(json_name: &str) -> Self {
        Self::new(json_name, AttributeType::Bool)
    }

    pub fn int64(json_name: &str) -> Self {
        Self::new(json_name, AttributeType::Int64)
    }

    /// Integer attribute backed by a Kubernetes `int32` field
    pub fn int32(json_name: &str) -> Self {
        Self::int64(json_name).validate(Validator::Int32)
    }

    pub fn float64(json_name: &str) -> Self {
        Self::new(json_name, AttributeType::Float64)
    }

    pub fn int_or_string(json_name: &str) -> Self {
        Self::new(json_name, AttributeType::IntOrString)
    }

    pub fn string_map(json_name: &str) -> Self {
        Self::new(json_name, AttributeType::Map(ElementType::String))
    }

    pub fn map(json_name: &str, elem: ElementType) -> Self {
        Self::new(json_name, AttributeType::Map(elem))
    }

    pub fn string_list(json_name: &str) -> Self {
        Self::new(json_name, AttributeType::List(ElementType::String))
    }

    pub fn list(json_name: &str, elem: ElementType) -> Self {
        Self::new(json_name, AttributeType::List(elem))
    }

    pub fn single_nested(json_name: &str, children: Vec<Attribute>) -> Self {
        Self::new(json_name, AttributeType::SingleNested(children))
    }

    pub fn list_nested(json_name: &str, children: Vec<Attribute>) -> Self {
        Self::new(json_name, AttributeType::ListNested(children))
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.mode = AccessMode::Required;
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.mode = AccessMode::Optional;
        self
    }

    #[must_use]
    pub fn computed(mut self) -> Self {
        self.mode = AccessMode::Computed;
        self
    }

    #[must_use]
    pub fn optional_computed(mut self) -> Self {
        self.mode = AccessMode::OptionalComputed;
        self
    }

    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    #[must_use]
    pub fn requires_replace(mut self) -> Self {
        self.requires_replace = true;
        self
    }

    #[must_use]
    pub fn validate(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Turn this attribute and all nested attributes into computed ones
    ///
    /// Validators and replacement markers are dropped since computed values
    /// never come from config.
    #[must_use]
    pub fn into_computed(mut self) -> Self {
        self.mode = AccessMode::Computed;
        self.validators.clear();
        self.requires_replace = false;
        self.attr_type = match self.attr_type {
            AttributeType::SingleNested(children) => AttributeType::SingleNested(
                children.into_iter().map(Attribute::into_computed).collect(),
            ),
            AttributeType::ListNested(children) => AttributeType::ListNested(
                children.into_iter().map(Attribute::into_computed).collect(),
            ),
            other => other,
        };
        self
    }

    /// Look up a direct child attribute by Terraform name
    pub fn child(&self, name: &str) -> Option<&Attribute> {
        self.attr_type
            .children()
            .and_then(|children| children.iter().find(|a| a.name == name))
    }

    fn document(&self) -> AttributeDocument<'_> {
        AttributeDocument {
            attr_type: self.attr_type.to_string(),
            json_name: &self.json_name,
            mode: self.mode,
            description: &self.description,
            sensitive: self.sensitive,
            requires_replace: self.requires_replace,
            attributes: self
                .attr_type
                .children()
                .map(|children| children.iter().map(|c| (c.name.as_str(), c.document())).collect()),
        }
    }
}

/// Top-level schema of a data source, resource or provider block
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    pub description: String,
    pub attributes: Vec<Attribute>,
}

impl Schema {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            attributes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    #[must_use]
    pub fn with_attributes(mut self, attributes: impl IntoIterator<Item = Attribute>) -> Self {
        self.attributes.extend(attributes);
        self
    }

    /// Look up a root attribute by Terraform name
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Look up an attribute by dotted path (e.g. `spec.deployment.spec`)
    pub fn attribute_at(&self, path: &str) -> Option<&Attribute> {
        let mut parts = path.split('.');
        let mut current = self.attribute(parts.next()?)?;
        for part in parts {
            current = current.child(part)?;
        }
        Some(current)
    }

    /// Drop root attributes that are computed
    ///
    /// Plans, prior state and state files carry computed values the user
    /// never wrote; only the configurable part is validated.
    pub fn config_view(&self, value: &Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(
                map.iter()
                    .filter(|(key, _)| {
                        self.attribute(key)
                            .is_none_or(|a| a.mode != AccessMode::Computed)
                    })
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    /// Serializable view of the schema, attributes in declaration order
    pub fn document(&self) -> SchemaDocument<'_> {
        SchemaDocument {
            description: &self.description,
            attributes: self
                .attributes
                .iter()
                .map(|a| (a.name.as_str(), a.document()))
                .collect(),
        }
    }
}

/// JSON shape of a schema as printed by tooling
#[derive(Debug, Serialize)]
pub struct SchemaDocument<'a> {
    pub description: &'a str,
    pub attributes: IndexMap<&'a str, AttributeDocument<'a>>,
}

/// JSON shape of a single attribute
#[derive(Debug, Serialize)]
pub struct AttributeDocument<'a> {
    #[serde(rename = "type")]
    pub attr_type: String,
    pub json_name: &'a str,
    pub mode: AccessMode,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub description: &'a str,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub sensitive: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub requires_replace: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<IndexMap<&'a str, AttributeDocument<'a>>>,
}
