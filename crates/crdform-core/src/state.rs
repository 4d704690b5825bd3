//! Transcoding between Terraform state values and Kubernetes wire JSON
//!
//! State values use snake_case attribute names and carry every declared
//! attribute (`null` when unset). Wire values use the upstream JSON names and
//! omit unset fields, like Go's `omitempty`.
//!
//! Fields on the wire that the descriptor does not declare are dropped when
//! building state.
//!
//! Int-or-string values keep their JSON kind in both directions: `8080` and
//! `"8080"` are different values to the API server.

use serde_json::{Map, Value};

use crate::error::{CoreError, Result};
use crate::schema::{Attribute, AttributeType};
use crate::validation::{check_type, json_type_name};

/// Convert a state/config object into its wire form
///
/// Null attributes are omitted. Returns an empty object for `null` input.
pub fn to_wire(attributes: &[Attribute], value: &Value) -> Result<Value> {
    to_wire_at(attributes, value, "")
}

/// Convert a wire object into its state form
///
/// Every declared attribute is present in the result. A `null` or missing
/// wire value produces an object whose attributes are all `null`.
pub fn from_wire(attributes: &[Attribute], wire: &Value) -> Result<Value> {
    from_wire_at(attributes, wire, "")
}

/// State object with every attribute set to `null`
pub fn null_object(attributes: &[Attribute]) -> Value {
    Value::Object(
        attributes
            .iter()
            .map(|a| (a.name.clone(), Value::Null))
            .collect(),
    )
}

fn child_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}

fn expect_object<'a>(value: &'a Value, path: &str) -> Result<Option<&'a Map<String, Value>>> {
    match value {
        Value::Null => Ok(None),
        Value::Object(map) => Ok(Some(map)),
        other => Err(CoreError::TypeMismatch {
            path: if path.is_empty() { "<root>".to_string() } else { path.to_string() },
            expected: "object".to_string(),
            actual: json_type_name(other).to_string(),
        }),
    }
}

fn to_wire_at(attributes: &[Attribute], value: &Value, path: &str) -> Result<Value> {
    let mut wire = Map::new();
    let Some(map) = expect_object(value, path)? else {
        return Ok(Value::Object(wire));
    };

    for attr in attributes {
        let attr_path = child_path(path, &attr.name);
        match map.get(&attr.name) {
            None | Some(Value::Null) => {}
            Some(v) => {
                wire.insert(attr.json_name.clone(), attribute_to_wire(attr, v, &attr_path)?);
            }
        }
    }

    Ok(Value::Object(wire))
}

fn attribute_to_wire(attr: &Attribute, value: &Value, path: &str) -> Result<Value> {
    match &attr.attr_type {
        AttributeType::SingleNested(children) => to_wire_at(children, value, path),
        AttributeType::ListNested(children) => {
            let items = value.as_array().ok_or_else(|| mismatch(path, &attr.attr_type, value))?;
            items
                .iter()
                .enumerate()
                .map(|(idx, item)| to_wire_at(children, item, &format!("{}[{}]", path, idx)))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array)
        }
        other => {
            check_type(other, value).map_err(|_| mismatch(path, other, value))?;
            Ok(value.clone())
        }
    }
}

fn from_wire_at(attributes: &[Attribute], wire: &Value, path: &str) -> Result<Value> {
    let Some(map) = expect_object(wire, path)? else {
        return Ok(null_object(attributes));
    };

    let mut state = Map::new();
    for attr in attributes {
        let attr_path = child_path(path, &attr.name);
        let value = match map.get(&attr.json_name) {
            None | Some(Value::Null) => Value::Null,
            Some(v) => attribute_from_wire(attr, v, &attr_path)?,
        };
        state.insert(attr.name.clone(), value);
    }

    Ok(Value::Object(state))
}

fn attribute_from_wire(attr: &Attribute, value: &Value, path: &str) -> Result<Value> {
    match &attr.attr_type {
        AttributeType::SingleNested(children) => from_wire_at(children, value, path),
        AttributeType::ListNested(children) => {
            let items = value.as_array().ok_or_else(|| mismatch(path, &attr.attr_type, value))?;
            items
                .iter()
                .enumerate()
                .map(|(idx, item)| from_wire_at(children, item, &format!("{}[{}]", path, idx)))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array)
        }
        other => {
            check_type(other, value).map_err(|_| mismatch(path, other, value))?;
            Ok(value.clone())
        }
    }
}

fn mismatch(path: &str, expected: &AttributeType, actual: &Value) -> CoreError {
    CoreError::TypeMismatch {
        path: path.to_string(),
        expected: expected.to_string(),
        actual: json_type_name(actual).to_string(),
    }
}
