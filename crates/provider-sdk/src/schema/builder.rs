//! Derive resource attributes from a model's JSON schema
//!
//! Models describe themselves through `schemars`. The generated OpenAPI v3
//! schema is walked once per resource type and turned into an attribute
//! tree: properties become attributes named in snake_case, `required`
//! decides the requirement, and range/length/pattern/enum keywords become
//! validators.

use std::collections::BTreeSet;

use schemars::JsonSchema;
use schemars::generate::SchemaSettings;
use serde_json::{Map, Value};
use tracing::debug;

use super::{Attribute, AttributeKind, Attributes, Element, Requirement, naming::to_snake_case};
use crate::error::{Result, SdkError};
use crate::validators::{Pattern, Validator};

/// Build the attributes of the object type `T`
pub fn attributes_for<T: JsonSchema>() -> Result<Attributes> {
    let generator = SchemaSettings::openapi3()
        .with(|s| s.inline_subschemas = true)
        .into_generator();
    let schema = generator.into_root_schema_for::<T>().to_value();
    let attributes = attributes_from_json_schema(&schema)?;
    debug!(model = %T::schema_name(), attributes = attributes.len(), "Derived attributes from schema");
    Ok(attributes)
}

/// Build attributes from an already generated JSON schema of an object
pub fn attributes_from_json_schema(schema: &Value) -> Result<Attributes> {
    let walker = Walker { root: schema };
    let node = walker.resolve(schema, "")?;
    let object = node
        .as_object()
        .ok_or_else(|| SdkError::schema("", "root schema is not an object"))?;
    walker.object_attributes(object, "")
}

struct Walker<'a> {
    root: &'a Value,
}

impl<'a> Walker<'a> {
    /// Follow `$ref`, single-entry `allOf` and nullable `anyOf`/`oneOf`
    /// wrappers down to the schema that carries the type
    fn resolve(&self, mut node: &'a Value, path: &str) -> Result<&'a Value> {
        for _ in 0..64 {
            if is_int_or_string(node) {
                return Ok(node);
            }
            if let Some(reference) = node.get("$ref").and_then(Value::as_str) {
                let pointer = reference
                    .strip_prefix('#')
                    .ok_or_else(|| SdkError::schema(path, format!("external reference {reference}")))?;
                node = self
                    .root
                    .pointer(pointer)
                    .ok_or_else(|| SdkError::schema(path, format!("dangling reference {reference}")))?;
                continue;
            }
            if let Some([single]) = node.get("allOf").and_then(Value::as_array).map(Vec::as_slice) {
                node = single;
                continue;
            }
            if let Some(inner) = nullable_branch(node) {
                node = inner;
                continue;
            }
            return Ok(node);
        }
        Err(SdkError::schema(path, "reference cycle"))
    }

    fn object_attributes(&self, object: &'a Map<String, Value>, path: &str) -> Result<Attributes> {
        let required: BTreeSet<&str> = object
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let mut attributes = Attributes::new();
        let Some(properties) = object.get("properties").and_then(Value::as_object) else {
            return Ok(attributes);
        };

        for (wire_name, property) in properties {
            let name = to_snake_case(wire_name);
            let child_path = join(path, &name);
            if attributes.contains(&name) {
                return Err(SdkError::schema(&child_path, "two fields map to the same attribute name"));
            }

            let requirement = if required.contains(wire_name.as_str()) {
                Requirement::Required
            } else {
                Requirement::Optional
            };
            let (kind, validators) = self.kind(property, &child_path)?;
            let mut attribute = Attribute::new(wire_name.clone(), kind, requirement);
            attribute.validators = validators;
            attribute.description = self.description(property, &child_path)?;
            attributes.insert(name, attribute);
        }
        Ok(attributes)
    }

    fn description(&self, node: &'a Value, path: &str) -> Result<Option<String>> {
        if let Some(description) = node.get("description").and_then(Value::as_str) {
            return Ok(Some(description.to_string()));
        }
        let resolved = self.resolve(node, path)?;
        Ok(resolved.get("description").and_then(Value::as_str).map(str::to_string))
    }

    fn kind(&self, node: &'a Value, path: &str) -> Result<(AttributeKind, Vec<Validator>)> {
        let node = self.resolve(node, path)?;

        let Some(object) = node.as_object() else {
            // `true` accepts anything
            return match node.as_bool() {
                Some(true) => Ok((AttributeKind::Dynamic, Vec::new())),
                _ => Err(SdkError::schema(path, "schema accepts no value")),
            };
        };

        if is_int_or_string(node) {
            return Ok((AttributeKind::IntOrString, Vec::new()));
        }
        if flag(object, "x-kubernetes-preserve-unknown-fields") {
            return Ok((AttributeKind::Dynamic, Vec::new()));
        }
        if let Some(values) = self.enum_values(object, path)? {
            return Ok((AttributeKind::String, vec![Validator::OneOf(values)]));
        }

        match type_name(object) {
            Some("string") => Ok((AttributeKind::String, string_validators(object, path)?)),
            Some("integer") => {
                let min = object.get("minimum").and_then(as_i64);
                let max = object.get("maximum").and_then(as_i64);
                let validators = if min.is_some() || max.is_some() {
                    vec![Validator::IntBetween { min, max }]
                } else {
                    Vec::new()
                };
                Ok((AttributeKind::Int64, validators))
            }
            Some("number") => {
                let min = object.get("minimum").and_then(Value::as_f64);
                let max = object.get("maximum").and_then(Value::as_f64);
                let validators = if min.is_some() || max.is_some() {
                    vec![Validator::FloatBetween { min, max }]
                } else {
                    Vec::new()
                };
                Ok((AttributeKind::Float64, validators))
            }
            Some("boolean") => Ok((AttributeKind::Bool, Vec::new())),
            Some("array") => self.array_kind(object, path),
            Some("object") | None => self.object_kind(object, path),
            Some(other) => Err(SdkError::schema(path, format!("unsupported type {other}"))),
        }
    }

    fn array_kind(&self, object: &'a Map<String, Value>, path: &str) -> Result<(AttributeKind, Vec<Validator>)> {
        let min = object.get("minItems").and_then(as_usize);
        let max = object.get("maxItems").and_then(as_usize);
        let validators = if min.is_some() || max.is_some() {
            vec![Validator::SizeBetween { min, max }]
        } else {
            Vec::new()
        };

        let items = object
            .get("items")
            .ok_or_else(|| SdkError::schema(path, "array without items"))?;
        let items = self.resolve(items, path)?;
        if let Some(fields) = items.as_object().filter(|o| has_properties(o)) {
            let nested = self.object_attributes(fields, path)?;
            return Ok((AttributeKind::ListNested(nested), validators));
        }

        let (kind, element_validators) = self.kind(items, path)?;
        let element = Element {
            kind,
            validators: element_validators,
        };
        Ok((AttributeKind::List(Box::new(element)), validators))
    }

    fn object_kind(&self, object: &'a Map<String, Value>, path: &str) -> Result<(AttributeKind, Vec<Validator>)> {
        if has_properties(object) {
            let nested = self.object_attributes(object, path)?;
            return Ok((AttributeKind::SingleNested(nested), Vec::new()));
        }

        match object.get("additionalProperties") {
            Some(values) if values.is_object() => {
                let values = self.resolve(values, path)?;
                if let Some(fields) = values.as_object().filter(|o| has_properties(o)) {
                    let nested = self.object_attributes(fields, path)?;
                    return Ok((AttributeKind::MapNested(nested), Vec::new()));
                }
                let (kind, validators) = self.kind(values, path)?;
                Ok((AttributeKind::Map(Box::new(Element { kind, validators })), Vec::new()))
            }
            Some(Value::Bool(true)) | None => Ok((AttributeKind::Dynamic, Vec::new())),
            Some(_) => Err(SdkError::schema(path, "object without properties accepts no fields")),
        }
    }

    /// String values of an `enum`, or of `oneOf`/`anyOf` branches that each
    /// pin one or more string constants
    fn enum_values(&self, object: &'a Map<String, Value>, path: &str) -> Result<Option<Vec<String>>> {
        if let Some(values) = object.get("enum").and_then(Value::as_array) {
            return Ok(string_values(values));
        }
        if let Some(value) = object.get("const").and_then(Value::as_str) {
            return Ok(Some(vec![value.to_string()]));
        }

        let Some(branches) = object
            .get("oneOf")
            .or_else(|| object.get("anyOf"))
            .and_then(Value::as_array)
        else {
            return Ok(None);
        };

        let mut values = Vec::new();
        for branch in branches {
            let branch = self.resolve(branch, path)?;
            if is_null_schema(branch) {
                continue;
            }
            if let Some(value) = branch.get("const").and_then(Value::as_str) {
                values.push(value.to_string());
            } else if let Some(more) = branch.get("enum").and_then(Value::as_array).and_then(|v| string_values(v)) {
                values.extend(more);
            } else {
                return Err(SdkError::schema(path, "union of non-constant types"));
            }
        }
        Ok(Some(values))
    }
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() { name.to_string() } else { format!("{path}.{name}") }
}

fn flag(object: &Map<String, Value>, key: &str) -> bool {
    object.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn is_int_or_string(node: &Value) -> bool {
    node.as_object().is_some_and(|o| flag(o, "x-kubernetes-int-or-string"))
}

fn has_properties(object: &Map<String, Value>) -> bool {
    object.get("properties").and_then(Value::as_object).is_some_and(|p| !p.is_empty())
}

fn is_null_schema(node: &Value) -> bool {
    node.get("type").and_then(Value::as_str) == Some("null")
        || node.get("enum").and_then(Value::as_array).is_some_and(|v| v.iter().all(Value::is_null))
        || node.get("const").is_some_and(Value::is_null)
}

/// The only non-null branch of a union, as produced for `Option<T>`
fn nullable_branch(node: &Value) -> Option<&Value> {
    let branches = node
        .get("anyOf")
        .or_else(|| node.get("oneOf"))
        .and_then(Value::as_array)?;
    let mut non_null = branches.iter().filter(|b| !is_null_schema(b));
    let first = non_null.next()?;
    non_null.next().is_none().then_some(first)
}

/// First non-null entry of `type`, which may be a string or a list
fn type_name(object: &Map<String, Value>) -> Option<&str> {
    match object.get("type")? {
        Value::String(name) => Some(name),
        Value::Array(names) => names.iter().filter_map(Value::as_str).find(|n| *n != "null"),
        _ => None,
    }
}

fn string_values(values: &[Value]) -> Option<Vec<String>> {
    values
        .iter()
        .filter(|v| !v.is_null())
        .map(|v| v.as_str().map(str::to_string))
        .collect()
}

fn string_validators(object: &Map<String, Value>, path: &str) -> Result<Vec<Validator>> {
    let mut validators = Vec::new();
    let min = object.get("minLength").and_then(as_usize);
    let max = object.get("maxLength").and_then(as_usize);
    if min.is_some() || max.is_some() {
        validators.push(Validator::LengthBetween { min, max });
    }
    if let Some(pattern) = object.get("pattern").and_then(Value::as_str) {
        let pattern = Pattern::new(pattern).map_err(|e| SdkError::schema(path, e.to_string()))?;
        validators.push(Validator::RegexMatches(pattern));
    }
    Ok(validators)
}

/// Integer bound; schemars may emit `1.0` for integral limits
fn as_i64(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15)
            .map(|f| f as i64)
    })
}

fn as_usize(value: &Value) -> Option<usize> {
    as_i64(value).and_then(|n| usize::try_from(n).ok())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use schemars::JsonSchema;
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Deserialize, JsonSchema)]
    #[allow(dead_code)]
    #[serde(rename_all = "camelCase")]
    struct Sample {
        /// Container image
        image: String,
        #[serde(default)]
        #[schemars(range(min = 0, max = 30))]
        timeout_in_mins: Option<i64>,
        #[schemars(length(min = 1))]
        servers: Vec<SampleServer>,
        #[serde(default)]
        labels: Option<BTreeMap<String, String>>,
        #[serde(default)]
        mode: Option<SampleMode>,
        #[serde(default, rename = "rootCAs")]
        root_cas: Option<Vec<String>>,
    }

    #[derive(Deserialize, JsonSchema)]
    #[allow(dead_code)]
    struct SampleServer {
        #[schemars(regex(pattern = r"^[a-z]+$"))]
        name: String,
        size: i64,
    }

    #[derive(Deserialize, JsonSchema)]
    #[allow(dead_code)]
    enum SampleMode {
        Fast,
        Slow,
    }

    #[test]
    fn derives_attributes_from_model() {
        let attrs = attributes_for::<Sample>().unwrap();

        let image = attrs.get("image").unwrap();
        assert_eq!(image.requirement, Requirement::Required);
        assert_eq!(image.kind, AttributeKind::String);
        assert_eq!(image.description.as_deref(), Some("Container image"));

        let timeout = attrs.get("timeout_in_mins").unwrap();
        assert_eq!(timeout.wire_name, "timeoutInMins");
        assert_eq!(timeout.requirement, Requirement::Optional);
        assert_eq!(timeout.kind, AttributeKind::Int64);
        assert_eq!(timeout.validators, vec![Validator::IntBetween { min: Some(0), max: Some(30) }]);

        let labels = attrs.get("labels").unwrap();
        assert_eq!(labels.kind, AttributeKind::Map(Box::new(Element::new(AttributeKind::String))));

        let mode = attrs.get("mode").unwrap();
        assert_eq!(mode.kind, AttributeKind::String);
        assert_eq!(mode.validators, vec![Validator::OneOf(vec!["Fast".into(), "Slow".into()])]);

        let root_cas = attrs.get("root_cas").unwrap();
        assert_eq!(root_cas.wire_name, "rootCAs");
        assert_eq!(root_cas.kind, AttributeKind::List(Box::new(Element::new(AttributeKind::String))));
    }

    #[test]
    fn nests_lists_of_objects() {
        let attrs = attributes_for::<Sample>().unwrap();
        let servers = attrs.get("servers").unwrap();
        assert_eq!(servers.validators, vec![Validator::SizeBetween { min: Some(1), max: None }]);

        let AttributeKind::ListNested(fields) = &servers.kind else {
            panic!("servers should be a nested list, got {:?}", servers.kind);
        };
        assert_eq!(fields.get("size").unwrap().requirement, Requirement::Required);
        let name = fields.get("name").unwrap();
        assert_eq!(name.validators, vec![Validator::RegexMatches(Pattern::new("^[a-z]+$").unwrap())]);
    }

    #[test]
    fn follows_references_and_kubernetes_extensions() {
        let schema = json!({
            "type": "object",
            "required": ["quota"],
            "properties": {
                "quota": {"x-kubernetes-int-or-string": true, "anyOf": [{"type": "integer"}, {"type": "string"}]},
                "podSpec": {"type": "object", "x-kubernetes-preserve-unknown-fields": true},
                "tls": {"allOf": [{"$ref": "#/components/schemas/Tls"}], "description": "TLS settings"},
                "policy": {"anyOf": [{"$ref": "#/components/schemas/Policy"}, {"type": "null"}]}
            },
            "components": {
                "schemas": {
                    "Tls": {"type": "object", "properties": {"secretSource": {"type": "string"}}},
                    "Policy": {"oneOf": [{"type": "string", "const": "Always"}, {"type": "string", "enum": ["Never"]}]}
                }
            }
        });

        let attrs = attributes_from_json_schema(&schema).unwrap();
        assert_eq!(attrs.get("quota").unwrap().kind, AttributeKind::IntOrString);
        assert_eq!(attrs.get("quota").unwrap().requirement, Requirement::Required);
        assert_eq!(attrs.get("pod_spec").unwrap().kind, AttributeKind::Dynamic);

        let tls = attrs.get("tls").unwrap();
        assert_eq!(tls.description.as_deref(), Some("TLS settings"));
        assert!(tls.nested().unwrap().contains("secret_source"));

        let policy = attrs.get("policy").unwrap();
        assert_eq!(policy.validators, vec![Validator::OneOf(vec!["Always".into(), "Never".into()])]);
    }

    #[test]
    fn rejects_colliding_names() {
        let schema = json!({
            "type": "object",
            "properties": {"rootCA": {"type": "string"}, "root_ca": {"type": "string"}}
        });
        let err = attributes_from_json_schema(&schema).unwrap_err();
        assert!(err.to_string().contains("root_ca"));
    }
}
