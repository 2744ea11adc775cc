//! Attribute paths
//!
//! Locate a value inside a resource configuration, e.g. `spec.servers[0].size`
//! or `metadata.labels["app"]`. Diagnostics carry one so users can find the
//! offending attribute.

use std::fmt;

use serde::{Serialize, Serializer};

/// One step into a nested value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    /// Named attribute of an object
    Attribute(String),
    /// Position in a list
    Index(usize),
    /// Key of a map
    Key(String),
}

/// Path from the resource root to a value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributePath {
    steps: Vec<PathStep>,
}

impl AttributePath {
    /// The resource root
    pub fn root() -> Self {
        Self::default()
    }

    /// Child attribute of this path
    pub fn attribute(&self, name: impl Into<String>) -> Self {
        self.push(PathStep::Attribute(name.into()))
    }

    /// List element of this path
    pub fn index(&self, index: usize) -> Self {
        self.push(PathStep::Index(index))
    }

    /// Map entry of this path
    pub fn key(&self, key: impl Into<String>) -> Self {
        self.push(PathStep::Key(key.into()))
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    fn push(&self, step: PathStep) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { steps }
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                PathStep::Attribute(name) if i == 0 => write!(f, "{name}")?,
                PathStep::Attribute(name) => write!(f, ".{name}")?,
                PathStep::Index(index) => write!(f, "[{index}]")?,
                PathStep::Key(key) => write!(f, "[{key:?}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for AttributePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_path() {
        let path = AttributePath::root().attribute("spec").attribute("servers").index(0).attribute("size");
        assert_eq!(path.to_string(), "spec.servers[0].size");
    }

    #[test]
    fn renders_map_keys_quoted() {
        let path = AttributePath::root().attribute("metadata").attribute("labels").key("app");
        assert_eq!(path.to_string(), "metadata.labels[\"app\"]");
    }

    #[test]
    fn root_is_empty() {
        assert!(AttributePath::root().is_root());
        assert_eq!(AttributePath::root().to_string(), "");
    }
}
