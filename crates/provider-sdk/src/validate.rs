//! Configuration validation
//!
//! Checks a Terraform configuration value against a resource's attributes:
//! unknown arguments, missing required arguments, values set on computed
//! attributes, type mismatches and attribute validators. Every problem is
//! reported, each at the path of the offending attribute.

use serde_json::Value;

use crate::diagnostics::Diagnostics;
use crate::path::AttributePath;
use crate::schema::{AttributeKind, Attributes};
use crate::validators::Validator;
use crate::value::json_type;

/// Validate an object configuration against `attributes`
pub fn validate_config(attributes: &Attributes, config: &Value) -> Diagnostics {
    let mut diags = Diagnostics::new();
    validate_object(attributes, config, &AttributePath::root(), &mut diags);
    diags
}

fn validate_object(attributes: &Attributes, value: &Value, path: &AttributePath, diags: &mut Diagnostics) {
    let fields = match value {
        Value::Null => return,
        Value::Object(fields) => fields,
        other => {
            diags.add_attribute_error(
                path.clone(),
                "Incorrect attribute value type",
                format!("Inappropriate value for attribute: object required, got {}.", json_type(other)),
            );
            return;
        }
    };

    for name in fields.keys() {
        if !attributes.contains(name) {
            diags.add_attribute_error(
                path.attribute(name),
                "Unsupported argument",
                format!("An argument named \"{name}\" is not expected here."),
            );
        }
    }

    for (name, attribute) in attributes.iter() {
        let field = fields.get(name).unwrap_or(&Value::Null);
        let field_path = path.attribute(name);

        if attribute.requirement.is_computed() {
            if !field.is_null() {
                diags.add_attribute_error(
                    field_path,
                    "Invalid Configuration for Read-Only Attribute",
                    format!("Cannot set value for this attribute as the provider has marked it as read-only. Remove the configuration line setting the value. Attribute: {name}"),
                );
            }
            continue;
        }

        if field.is_null() {
            if attribute.requirement.is_required() {
                diags.add_attribute_error(
                    field_path,
                    "Missing required argument",
                    format!("The argument \"{name}\" is required, but no definition was found."),
                );
            }
            continue;
        }

        validate_value(&attribute.kind, &attribute.validators, field, &field_path, diags);
    }
}

fn validate_value(
    kind: &AttributeKind,
    validators: &[Validator],
    value: &Value,
    path: &AttributePath,
    diags: &mut Diagnostics,
) {
    if value.is_null() {
        return;
    }

    if !type_matches(kind, value) {
        diags.add_attribute_error(
            path.clone(),
            "Incorrect attribute value type",
            format!(
                "Inappropriate value for attribute: {} required, got {}.",
                kind.type_name(),
                json_type(value)
            ),
        );
        return;
    }

    for validator in validators {
        if let Err(message) = validator.validate(value) {
            diags.add_attribute_error(path.clone(), "Invalid Attribute Value", message);
        }
    }

    match kind {
        AttributeKind::List(element) => {
            for (i, item) in value.as_array().into_iter().flatten().enumerate() {
                validate_value(&element.kind, &element.validators, item, &path.index(i), diags);
            }
        }
        AttributeKind::Map(element) => {
            for (key, entry) in value.as_object().into_iter().flatten() {
                validate_value(&element.kind, &element.validators, entry, &path.key(key), diags);
            }
        }
        AttributeKind::SingleNested(attributes) => validate_object(attributes, value, path, diags),
        AttributeKind::ListNested(attributes) => {
            for (i, item) in value.as_array().into_iter().flatten().enumerate() {
                validate_object(attributes, item, &path.index(i), diags);
            }
        }
        AttributeKind::MapNested(attributes) => {
            for (key, entry) in value.as_object().into_iter().flatten() {
                validate_object(attributes, entry, &path.key(key), diags);
            }
        }
        _ => {}
    }
}

fn type_matches(kind: &AttributeKind, value: &Value) -> bool {
    match kind {
        AttributeKind::String => value.is_string(),
        AttributeKind::IntOrString => value.is_string() || value.is_i64(),
        AttributeKind::Int64 => value.is_i64(),
        AttributeKind::Float64 => value.is_number(),
        AttributeKind::Bool => value.is_boolean(),
        AttributeKind::Dynamic => true,
        AttributeKind::List(_) | AttributeKind::ListNested(_) => value.is_array(),
        AttributeKind::Map(_) | AttributeKind::MapNested(_) | AttributeKind::SingleNested(_) => value.is_object(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::schema::{Attribute, Element};

    fn attributes() -> Attributes {
        let server = Attributes::new()
            .with("name", Attribute::required("name", AttributeKind::String))
            .with(
                "size",
                Attribute::required("size", AttributeKind::Int64)
                    .with_validator(Validator::IntBetween { min: Some(0), max: None }),
            )
            .with(
                "services",
                Attribute::optional(
                    "services",
                    AttributeKind::List(Box::new(Element {
                        kind: AttributeKind::String,
                        validators: vec![Validator::OneOf(vec!["data".into(), "index".into()])],
                    })),
                ),
            );
        Attributes::new()
            .with("id", Attribute::computed("id", AttributeKind::Int64))
            .with("image", Attribute::required("image", AttributeKind::String))
            .with(
                "servers",
                Attribute::required("servers", AttributeKind::ListNested(server))
                    .with_validator(Validator::SizeBetween { min: Some(1), max: None }),
            )
    }

    fn paths(diags: &Diagnostics) -> Vec<String> {
        diags
            .iter()
            .map(|d| d.attribute.as_ref().map(ToString::to_string).unwrap_or_default())
            .collect()
    }

    #[test]
    fn valid_config_has_no_diagnostics() {
        let config = json!({
            "id": null,
            "image": "couchbase/server:7.6.0",
            "servers": [{"name": "all", "size": 3, "services": ["data", "index"]}]
        });
        assert!(validate_config(&attributes(), &config).is_empty());
    }

    #[test]
    fn reports_missing_and_unknown_arguments() {
        let config = json!({"servers": [{"name": "all", "size": 1}], "imgae": "x"});
        let diags = validate_config(&attributes(), &config);
        assert_eq!(paths(&diags), vec!["imgae", "image"]);
        assert_eq!(diags.iter().next().unwrap().summary, "Unsupported argument");
        assert_eq!(diags.iter().nth(1).unwrap().summary, "Missing required argument");
    }

    #[test]
    fn reports_nested_validator_failures() {
        let config = json!({
            "image": "couchbase/server:7.6.0",
            "servers": [{"name": "all", "size": -1, "services": ["data", "cache"]}]
        });
        let diags = validate_config(&attributes(), &config);
        assert_eq!(paths(&diags), vec!["servers[0].services[1]", "servers[0].size"]);
        assert!(diags.iter().all(|d| d.summary == "Invalid Attribute Value"));
    }

    #[test]
    fn rejects_configured_computed_attributes() {
        let config = json!({"id": 7, "image": "x", "servers": [{"name": "a", "size": 1}]});
        let diags = validate_config(&attributes(), &config);
        assert_eq!(diags.len(), 1);
        assert_eq!(paths(&diags), vec!["id"]);
    }

    #[test]
    fn type_mismatch_stops_descent() {
        let config = json!({"image": 3, "servers": []});
        let diags = validate_config(&attributes(), &config);
        assert_eq!(paths(&diags), vec!["image", "servers"]);
        assert_eq!(diags.iter().next().unwrap().summary, "Incorrect attribute value type");
        assert_eq!(diags.iter().nth(1).unwrap().summary, "Invalid Attribute Value");
    }
}
