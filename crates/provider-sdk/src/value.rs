//! Translate Terraform values into manifest fields
//!
//! Terraform hands over every declared attribute, with `null` for the ones
//! left unset, keyed by snake_case names. Manifests want camelCase field
//! names and no trace of unset fields. [`to_wire`] walks the value alongside
//! its attribute tree to do both, so the result deserializes straight into
//! the typed model.

use serde_json::{Map, Value};

use crate::error::{Result, SdkError};
use crate::path::AttributePath;
use crate::schema::{AttributeKind, Attributes};

/// Convert an object value described by `attributes` into its wire form
///
/// Nulls are dropped, attribute names are replaced by wire names and map
/// keys are kept as written. Computed attributes never reach the wire.
pub fn to_wire(attributes: &Attributes, value: &Value, path: &AttributePath) -> Result<Value> {
    match value {
        Value::Null => Ok(Value::Object(Map::new())),
        _ => object_to_wire(attributes, value, path).map(Value::Object),
    }
}

fn object_to_wire(attributes: &Attributes, value: &Value, path: &AttributePath) -> Result<Map<String, Value>> {
    let fields = value
        .as_object()
        .ok_or_else(|| SdkError::decode(path, format!("expected an object, got {}", json_type(value))))?;

    let mut out = Map::new();
    for (name, field) in fields {
        let field_path = path.attribute(name);
        let attribute = attributes
            .get(name)
            .ok_or_else(|| SdkError::decode(&field_path, "unsupported attribute"))?;
        if attribute.requirement.is_computed() {
            continue;
        }
        if let Some(wire) = kind_to_wire(&attribute.kind, field, &field_path)? {
            out.insert(attribute.wire_name.clone(), wire);
        }
    }
    Ok(out)
}

fn kind_to_wire(kind: &AttributeKind, value: &Value, path: &AttributePath) -> Result<Option<Value>> {
    if value.is_null() {
        return Ok(None);
    }

    let mismatch = || SdkError::decode(path, format!("expected {}, got {}", kind.type_name(), json_type(value)));

    let wire = match kind {
        AttributeKind::String => value.as_str().map(|_| value.clone()).ok_or_else(mismatch)?,
        AttributeKind::IntOrString => match value {
            Value::String(s) => canonical_int(s).map_or_else(|| value.clone(), Value::from),
            Value::Number(n) if n.is_i64() => value.clone(),
            _ => return Err(mismatch()),
        },
        AttributeKind::Int64 => value.as_i64().map(Value::from).ok_or_else(mismatch)?,
        AttributeKind::Float64 => value.as_f64().map(|_| value.clone()).ok_or_else(mismatch)?,
        AttributeKind::Bool => value.as_bool().map(Value::Bool).ok_or_else(mismatch)?,
        AttributeKind::Dynamic => without_nulls(value),
        AttributeKind::List(element) => {
            let items = value.as_array().ok_or_else(mismatch)?;
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                out.push(kind_to_wire(&element.kind, item, &path.index(i))?.unwrap_or(Value::Null));
            }
            Value::Array(out)
        }
        AttributeKind::Map(element) => {
            let entries = value.as_object().ok_or_else(mismatch)?;
            let mut out = Map::new();
            for (key, entry) in entries {
                if let Some(wire) = kind_to_wire(&element.kind, entry, &path.key(key))? {
                    out.insert(key.clone(), wire);
                }
            }
            Value::Object(out)
        }
        AttributeKind::SingleNested(attributes) => Value::Object(object_to_wire(attributes, value, path)?),
        AttributeKind::ListNested(attributes) => {
            let items = value.as_array().ok_or_else(mismatch)?;
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                out.push(Value::Object(object_to_wire(attributes, item, &path.index(i))?));
            }
            Value::Array(out)
        }
        AttributeKind::MapNested(attributes) => {
            let entries = value.as_object().ok_or_else(mismatch)?;
            let mut out = Map::new();
            for (key, entry) in entries {
                out.insert(key.clone(), Value::Object(object_to_wire(attributes, entry, &path.key(key))?));
            }
            Value::Object(out)
        }
    };
    Ok(Some(wire))
}

/// The integer spelled by `s`, if `s` is exactly how that integer prints
fn canonical_int(s: &str) -> Option<i64> {
    s.parse::<i64>().ok().filter(|n| n.to_string() == s)
}

/// Copy of a schema-less value with null object fields removed at any depth
fn without_nulls(value: &Value) -> Value {
    match value {
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .filter(|(_, field)| !field.is_null())
                .map(|(name, field)| (name.clone(), without_nulls(field)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(without_nulls).collect()),
        other => other.clone(),
    }
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
