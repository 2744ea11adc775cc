//! Provider configuration
//!
//! Read once from the environment at start-up.

use std::env;

use crate::error::ProviderError;

/// Provider name used when `PROVIDER_TYPE_NAME` is unset
pub const DEFAULT_PROVIDER_TYPE_NAME: &str = "k8s";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Prefix of every resource type name, e.g. `k8s`
    pub type_name: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            type_name: DEFAULT_PROVIDER_TYPE_NAME.to_string(),
        }
    }
}

impl ProviderConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ProviderError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps variable names to values
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ProviderError> {
        let type_name = lookup("PROVIDER_TYPE_NAME")
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_PROVIDER_TYPE_NAME.to_string());

        if !is_identifier(&type_name) {
            return Err(ProviderError::InvalidConfig(format!(
                "PROVIDER_TYPE_NAME must start with a lowercase letter and contain only lowercase letters, digits and '_', got {type_name:?}"
            )));
        }

        Ok(Self { type_name })
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_k8s() {
        let config = ProviderConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ProviderConfig::default());
        assert_eq!(config.type_name, "k8s");
    }

    #[test]
    fn reads_type_name() {
        let config = ProviderConfig::from_lookup(|key| (key == "PROVIDER_TYPE_NAME").then(|| "kube2".to_string())).unwrap();
        assert_eq!(config.type_name, "kube2");
    }

    #[test]
    fn rejects_invalid_type_names() {
        for bad in ["K8s", "2k8s", "k8s-io", "k8s.io"] {
            let result = ProviderConfig::from_lookup(|_| Some(bad.to_string()));
            assert!(matches!(result, Err(ProviderError::InvalidConfig(_))), "{bad} should be rejected");
        }
    }
}
