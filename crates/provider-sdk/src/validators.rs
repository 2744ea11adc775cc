//! Attribute validators
//!
//! Validators run against the Terraform-side value of an attribute before a
//! manifest is rendered. Most are derived from JSON schema keywords
//! (`enum`, `minimum`, `maxLength`, `pattern`, `minItems`); the Kubernetes
//! object-metadata rules are built in.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Longest DNS-1123 subdomain, used for object names and label prefixes
const DNS1123_SUBDOMAIN_MAX: usize = 253;
/// Longest DNS-1123 label, used for namespaces
const DNS1123_LABEL_MAX: usize = 63;
/// Longest name part of a qualified name and longest label value
const QUALIFIED_NAME_MAX: usize = 63;
/// Total size limit of all annotation keys and values
const ANNOTATIONS_MAX_BYTES: usize = 256 * 1024;

static DNS1123_SUBDOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
        .expect("DNS-1123 subdomain pattern is valid")
});

static DNS1123_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("DNS-1123 label pattern is valid")
});

static QUALIFIED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9]([-A-Za-z0-9_.]*[A-Za-z0-9])?$").expect("qualified name pattern is valid")
});

/// A compiled regular expression compared by its source
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.0.is_match(value)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

/// Constraint on the value of an attribute
#[derive(Debug, Clone, PartialEq)]
pub enum Validator {
    /// String must be one of the listed values
    OneOf(Vec<String>),
    /// Integer within the inclusive bounds
    IntBetween { min: Option<i64>, max: Option<i64> },
    /// Number within the inclusive bounds
    FloatBetween { min: Option<f64>, max: Option<f64> },
    /// String length, in characters, within the inclusive bounds
    LengthBetween { min: Option<usize>, max: Option<usize> },
    /// String matches the pattern
    RegexMatches(Pattern),
    /// Number of list elements within the inclusive bounds
    SizeBetween { min: Option<usize>, max: Option<usize> },
    /// Kubernetes object name (DNS-1123 subdomain)
    ObjectName,
    /// Kubernetes namespace name (DNS-1123 label)
    NamespaceName,
    /// Kubernetes label map
    Labels,
    /// Kubernetes annotation map
    Annotations,
}

impl Validator {
    /// Human-readable description of the constraint
    pub fn description(&self) -> String {
        match self {
            Validator::OneOf(values) => format!("value must be one of: {}", quoted(values)),
            Validator::IntBetween { min, max } => bounds("value", min.as_ref(), max.as_ref()),
            Validator::FloatBetween { min, max } => bounds("value", min.as_ref(), max.as_ref()),
            Validator::LengthBetween { min, max } => bounds("string length", min.as_ref(), max.as_ref()),
            Validator::RegexMatches(pattern) => {
                format!("value must match regular expression '{}'", pattern.as_str())
            }
            Validator::SizeBetween { min, max } => bounds("list size", min.as_ref(), max.as_ref()),
            Validator::ObjectName => "value must be a valid DNS-1123 subdomain".to_string(),
            Validator::NamespaceName => "value must be a valid DNS-1123 label".to_string(),
            Validator::Labels => "keys must be qualified names and values valid label values".to_string(),
            Validator::Annotations => {
                "keys must be qualified names and the total size must not exceed 256KiB".to_string()
            }
        }
    }

    /// Check a known, non-null value
    ///
    /// Values of the wrong JSON type pass: type checking happens before
    /// validators run.
    pub fn validate(&self, value: &Value) -> Result<(), String> {
        match self {
            Validator::OneOf(values) => match value.as_str() {
                Some(s) if !values.iter().any(|v| v == s) => Err(format!(
                    "Attribute value must be one of: {}, got: {s:?}",
                    quoted(values)
                )),
                _ => Ok(()),
            },
            Validator::IntBetween { min, max } => match as_integer(value) {
                Some(n) if out_of_bounds(n, *min, *max) => {
                    Err(format!("{}, got: {n}", capitalize(&self.description())))
                }
                _ => Ok(()),
            },
            Validator::FloatBetween { min, max } => match value.as_f64() {
                Some(n) if out_of_bounds(n, *min, *max) => {
                    Err(format!("{}, got: {n}", capitalize(&self.description())))
                }
                _ => Ok(()),
            },
            Validator::LengthBetween { min, max } => match value.as_str() {
                Some(s) if out_of_bounds(s.chars().count(), *min, *max) => Err(format!(
                    "{}, got: {}",
                    capitalize(&self.description()),
                    s.chars().count()
                )),
                _ => Ok(()),
            },
            Validator::RegexMatches(pattern) => match value.as_str() {
                Some(s) if !pattern.is_match(s) => {
                    Err(format!("{}, got: {s:?}", capitalize(&self.description())))
                }
                _ => Ok(()),
            },
            Validator::SizeBetween { min, max } => match value.as_array() {
                Some(items) if out_of_bounds(items.len(), *min, *max) => Err(format!(
                    "{}, got: {}",
                    capitalize(&self.description()),
                    items.len()
                )),
                _ => Ok(()),
            },
            Validator::ObjectName => match value.as_str() {
                Some(s) => check_dns1123_subdomain(s),
                None => Ok(()),
            },
            Validator::NamespaceName => match value.as_str() {
                Some(s) => check_dns1123_label(s),
                None => Ok(()),
            },
            Validator::Labels => match value.as_object() {
                Some(labels) => {
                    for (key, value) in labels {
                        check_qualified_name(key)?;
                        if let Some(value) = value.as_str() {
                            check_label_value(value)?;
                        }
                    }
                    Ok(())
                }
                None => Ok(()),
            },
            Validator::Annotations => match value.as_object() {
                Some(annotations) => {
                    let mut total = 0;
                    for (key, value) in annotations {
                        check_qualified_name(key)?;
                        total += key.len() + value.as_str().map_or(0, str::len);
                    }
                    if total > ANNOTATIONS_MAX_BYTES {
                        return Err(format!(
                            "Annotations size must not exceed {ANNOTATIONS_MAX_BYTES} bytes, got: {total}"
                        ));
                    }
                    Ok(())
                }
                None => Ok(()),
            },
        }
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

impl Serialize for Validator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}

fn out_of_bounds<T: PartialOrd>(value: T, min: Option<T>, max: Option<T>) -> bool {
    min.is_some_and(|min| value < min) || max.is_some_and(|max| value > max)
}

fn bounds<T: fmt::Display>(subject: &str, min: Option<&T>, max: Option<&T>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("{subject} must be between {min} and {max}"),
        (Some(min), None) => format!("{subject} must be at least {min}"),
        (None, Some(max)) => format!("{subject} must be at most {max}"),
        (None, None) => format!("{subject} is unconstrained"),
    }
}

fn quoted(values: &[String]) -> String {
    values.iter().map(|v| format!("{v:?}")).collect::<Vec<_>>().join(", ")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn check_dns1123_subdomain(value: &str) -> Result<(), String> {
    if value.len() > DNS1123_SUBDOMAIN_MAX {
        return Err(format!("{value:?} must be no more than {DNS1123_SUBDOMAIN_MAX} characters"));
    }
    if !DNS1123_SUBDOMAIN.is_match(value) {
        return Err(format!(
            "{value:?} must consist of lower case alphanumeric characters, '-' or '.', \
             and must start and end with an alphanumeric character"
        ));
    }
    Ok(())
}

fn check_dns1123_label(value: &str) -> Result<(), String> {
    if value.len() > DNS1123_LABEL_MAX {
        return Err(format!("{value:?} must be no more than {DNS1123_LABEL_MAX} characters"));
    }
    if !DNS1123_LABEL.is_match(value) {
        return Err(format!(
            "{value:?} must consist of lower case alphanumeric characters or '-', \
             and must start and end with an alphanumeric character"
        ));
    }
    Ok(())
}

/// `[prefix/]name` where prefix is a DNS-1123 subdomain
fn check_qualified_name(key: &str) -> Result<(), String> {
    let name = match key.split_once('/') {
        Some((prefix, name)) => {
            if prefix.is_empty() {
                return Err(format!("{key:?}: prefix part must be non-empty"));
            }
            check_dns1123_subdomain(prefix).map_err(|e| format!("{key:?}: prefix part {e}"))?;
            name
        }
        None => key,
    };

    if name.is_empty() {
        return Err(format!("{key:?}: name part must be non-empty"));
    }
    if name.len() > QUALIFIED_NAME_MAX {
        return Err(format!("{key:?}: name part must be no more than {QUALIFIED_NAME_MAX} characters"));
    }
    if !QUALIFIED_NAME.is_match(name) {
        return Err(format!(
            "{key:?}: name part must consist of alphanumeric characters, '-', '_' or '.', \
             and must start and end with an alphanumeric character"
        ));
    }
    Ok(())
}

fn check_label_value(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Ok(());
    }
    if value.len() > QUALIFIED_NAME_MAX {
        return Err(format!("label value {value:?} must be no more than {QUALIFIED_NAME_MAX} characters"));
    }
    if !QUALIFIED_NAME.is_match(value) {
        return Err(format!(
            "label value {value:?} must consist of alphanumeric characters, '-', '_' or '.', \
             and must start and end with an alphanumeric character"
        ));
    }
    Ok(())
}
