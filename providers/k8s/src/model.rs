//! Terraform-side model of a manifest resource

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Attributes stored in state for every manifest resource
///
/// `metadata` and `spec` keep their Terraform (snake_case) shape; they are
/// translated into manifest fields when the YAML is rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceModel {
    /// Nanoseconds since the Unix epoch at the last create or update
    #[serde(default)]
    pub id: Option<i64>,

    /// The rendered manifest
    #[serde(default)]
    pub yaml: Option<String>,

    #[serde(default)]
    pub api_version: Option<String>,

    #[serde(default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub metadata: Value,

    #[serde(default)]
    pub spec: Value,
}
