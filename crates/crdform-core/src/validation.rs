//! Value validators and config validation
//!
//! Name formats follow the Kubernetes apimachinery rules:
//! - resource names are DNS-1123 subdomains (max 253 characters)
//! - namespaces are DNS-1123 labels (max 63 characters)
//! - label and annotation keys are qualified names with an optional
//!   DNS-1123 subdomain prefix
//!
//! Config validation walks a schema descriptor and reports every problem as
//! a diagnostic pinned to the attribute path, before any API call is made.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::diagnostics::Diagnostics;
use crate::schema::{AccessMode, Attribute, AttributeType, ElementType};

const DNS1123_SUBDOMAIN_MAX_LENGTH: usize = 253;
const DNS1123_LABEL_MAX_LENGTH: usize = 63;
const QUALIFIED_NAME_MAX_LENGTH: usize = 63;
const LABEL_VALUE_MAX_LENGTH: usize = 63;

static DNS1123_SUBDOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
        .expect("valid regex")
});

static DNS1123_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("valid regex"));

static QUALIFIED_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9]$").expect("valid regex")
});

/// A check applied to an attribute value after its type has been verified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validator {
    /// DNS-1123 subdomain
    ResourceName,
    /// DNS-1123 label
    Namespace,
    /// Every map key is a valid label key, every value a valid label value
    Labels,
    /// Every map key is a valid annotation key
    AnnotationKeys,
    /// String must be one of the listed values
    OneOf(Vec<String>),
    /// Integer must fit in 32 bits (Kubernetes `int32` fields)
    Int32,
}

impl Validator {
    /// Check a value, returning one message per violation
    pub fn check(&self, value: &Value) -> Vec<String> {
        match (self, value) {
            (Self::ResourceName, Value::String(s)) => validate_resource_name(s).err().into_iter().collect(),
            (Self::Namespace, Value::String(s)) => validate_namespace(s).err().into_iter().collect(),
            (Self::Labels, Value::Object(map)) => map
                .iter()
                .flat_map(|(key, value)| {
                    let key_err = validate_qualified_key(key).err();
                    let value_err = value
                        .as_str()
                        .and_then(|v| validate_label_value(v).err());
                    key_err.into_iter().chain(value_err)
                })
                .collect(),
            (Self::AnnotationKeys, Value::Object(map)) => map
                .keys()
                .filter_map(|key| validate_qualified_key(key).err())
                .collect(),
            (Self::OneOf(allowed), Value::String(s)) => {
                if allowed.iter().any(|a| a == s) {
                    Vec::new()
                } else {
                    vec![format!(
                        "value '{}' must be one of: {}",
                        s,
                        allowed.join(", ")
                    )]
                }
            }
            (Self::Int32, Value::Number(n)) => {
                let fits = n.as_i64().is_some_and(|v| i32::try_from(v).is_ok());
                if fits {
                    Vec::new()
                } else {
                    vec![format!(
                        "value {} must be between {} and {}",
                        n,
                        i32::MIN,
                        i32::MAX
                    )]
                }
            }
            _ => Vec::new(),
        }
    }
}

/// Validate a resource name (DNS-1123 subdomain)
pub fn validate_resource_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("name must not be empty".to_string());
    }
    if name.len() > DNS1123_SUBDOMAIN_MAX_LENGTH {
        return Err(format!(
            "name '{}' must be no more than {} characters",
            name, DNS1123_SUBDOMAIN_MAX_LENGTH
        ));
    }
    if !DNS1123_SUBDOMAIN.is_match(name) {
        return Err(format!(
            "name '{}' must consist of lower case alphanumeric characters, '-' or '.', \
             and must start and end with an alphanumeric character",
            name
        ));
    }
    Ok(())
}

/// Validate a namespace (DNS-1123 label)
pub fn validate_namespace(namespace: &str) -> Result<(), String> {
    if namespace.is_empty() {
        return Err("namespace must not be empty".to_string());
    }
    if namespace.len() > DNS1123_LABEL_MAX_LENGTH {
        return Err(format!(
            "namespace '{}' must be no more than {} characters",
            namespace, DNS1123_LABEL_MAX_LENGTH
        ));
    }
    if !DNS1123_LABEL.is_match(namespace) {
        return Err(format!(
            "namespace '{}' must consist of lower case alphanumeric characters or '-', \
             and must start and end with an alphanumeric character",
            namespace
        ));
    }
    Ok(())
}

/// Validate a label or annotation key (`[prefix/]name`)
pub fn validate_qualified_key(key: &str) -> Result<(), String> {
    let (prefix, name) = match key.split_once('/') {
        Some((prefix, name)) => (Some(prefix), name),
        None => (None, key),
    };

    if let Some(prefix) = prefix
        && (prefix.is_empty()
            || prefix.len() > DNS1123_SUBDOMAIN_MAX_LENGTH
            || !DNS1123_SUBDOMAIN.is_match(prefix))
    {
        return Err(format!(
            "key '{}' has an invalid prefix: must be a DNS-1123 subdomain",
            key
        ));
    }

    if name.is_empty() || name.len() > QUALIFIED_NAME_MAX_LENGTH || !QUALIFIED_NAME.is_match(name)
    {
        return Err(format!(
            "key '{}' must be 63 characters or less, begin and end with an alphanumeric \
             character, and contain only alphanumerics, '-', '_' or '.'",
            key
        ));
    }

    Ok(())
}

/// Validate a label value (may be empty)
pub fn validate_label_value(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Ok(());
    }
    if value.len() > LABEL_VALUE_MAX_LENGTH || !QUALIFIED_NAME.is_match(value) {
        return Err(format!(
            "label value '{}' must be 63 characters or less, begin and end with an \
             alphanumeric character, and contain only alphanumerics, '-', '_' or '.'",
            value
        ));
    }
    Ok(())
}

/// Validate a configuration object against a list of attributes
///
/// Reports missing required attributes, values set on computed-only
/// attributes, unsupported arguments, type mismatches and validator
/// failures.
pub fn validate_config(attributes: &[Attribute], config: &Value) -> Diagnostics {
    let mut diags = Diagnostics::new();
    validate_object(attributes, config, "", &mut diags);
    diags
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}

fn validate_object(attributes: &[Attribute], value: &Value, path: &str, diags: &mut Diagnostics) {
    let map = match value {
        Value::Null => {
            for attr in attributes.iter().filter(|a| a.mode == AccessMode::Required) {
                diags.add_attribute_error(
                    join_path(path, &attr.name),
                    "Missing required argument",
                    format!("The argument \"{}\" is required, but no definition was found.", attr.name),
                );
            }
            return;
        }
        Value::Object(map) => map,
        other => {
            diags.add_attribute_error(
                if path.is_empty() { "<root>".to_string() } else { path.to_string() },
                "Incorrect attribute value type",
                format!("expected object, got {}", json_type_name(other)),
            );
            return;
        }
    };

    for key in map.keys() {
        if !attributes.iter().any(|a| &a.name == key) {
            diags.add_attribute_error(
                join_path(path, key),
                "Unsupported argument",
                format!("An argument named \"{}\" is not expected here.", key),
            );
        }
    }

    for attr in attributes {
        let attr_path = join_path(path, &attr.name);
        let value = map.get(&attr.name).unwrap_or(&Value::Null);
        validate_attribute(attr, value, &attr_path, diags);
    }
}

fn validate_attribute(attr: &Attribute, value: &Value, path: &str, diags: &mut Diagnostics) {
    if value.is_null() {
        if attr.mode == AccessMode::Required {
            diags.add_attribute_error(
                path,
                "Missing required argument",
                format!("The argument \"{}\" is required, but no definition was found.", attr.name),
            );
        }
        return;
    }

    if attr.mode == AccessMode::Computed {
        diags.add_attribute_error(
            path,
            "Invalid configuration for computed attribute",
            format!("Cannot set value for the computed attribute \"{}\".", attr.name),
        );
        return;
    }

    match &attr.attr_type {
        AttributeType::SingleNested(children) => validate_object(children, value, path, diags),
        AttributeType::ListNested(children) => match value {
            Value::Array(items) => {
                for (idx, item) in items.iter().enumerate() {
                    validate_object(children, item, &format!("{}[{}]", path, idx), diags);
                }
            }
            other => diags.add_attribute_error(
                path,
                "Incorrect attribute value type",
                format!("expected list of objects, got {}", json_type_name(other)),
            ),
        },
        other => {
            if let Err(message) = check_type(other, value) {
                diags.add_attribute_error(path, "Incorrect attribute value type", message);
                return;
            }
        }
    }

    for validator in &attr.validators {
        for message in validator.check(value) {
            diags.add_attribute_error(path, "Invalid attribute value", message);
        }
    }
}

/// Check a non-nested value against its declared type
pub(crate) fn check_type(attr_type: &AttributeType, value: &Value) -> Result<(), String> {
    let ok = match attr_type {
        AttributeType::String => value.is_string(),
        AttributeType::Bool => value.is_boolean(),
        AttributeType::Int64 => value.is_i64() || value.is_u64(),
        AttributeType::Float64 => value.is_number(),
        AttributeType::IntOrString => value.is_string() || value.is_i64(),
        AttributeType::Map(elem) => match value {
            Value::Object(map) => map.values().all(|v| element_matches(elem, v)),
            _ => false,
        },
        AttributeType::List(elem) => match value {
            Value::Array(items) => items.iter().all(|v| element_matches(elem, v)),
            _ => false,
        },
        AttributeType::SingleNested(_) => value.is_object(),
        AttributeType::ListNested(_) => value.is_array(),
    };

    if ok {
        Ok(())
    } else {
        Err(format!("expected {}, got {}", attr_type, json_type_name(value)))
    }
}

fn element_matches(elem: &ElementType, value: &Value) -> bool {
    match elem {
        ElementType::String => value.is_string(),
        ElementType::Bool => value.is_boolean(),
        ElementType::Int64 => value.is_i64() || value.is_u64(),
        ElementType::Float64 => value.is_number(),
        ElementType::List(inner) => value
            .as_array()
            .is_some_and(|items| items.iter().all(|v| element_matches(inner, v))),
        ElementType::Map(inner) => value
            .as_object()
            .is_some_and(|map| map.values().all(|v| element_matches(inner, v))),
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
