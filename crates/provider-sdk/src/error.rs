//! Provider SDK errors

use thiserror::Error;

use crate::path::AttributePath;

/// Errors raised while building schemas or translating resource values
#[derive(Debug, Error)]
pub enum SdkError {
    /// The JSON schema of a model cannot be expressed as resource attributes
    #[error("Unsupported schema at {path}: {message}")]
    Schema { path: String, message: String },

    /// A configuration value does not match the resource schema
    #[error("{path}: {message}")]
    Decode { path: AttributePath, message: String },

    /// The clock cannot produce a timestamp
    #[error("Clock error: {0}")]
    Clock(String),

    /// The tracing subscriber could not be installed
    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl SdkError {
    pub(crate) fn schema(path: &str, message: impl Into<String>) -> Self {
        SdkError::Schema {
            path: if path.is_empty() { "<root>".to_string() } else { path.to_string() },
            message: message.into(),
        }
    }

    pub(crate) fn decode(path: &AttributePath, message: impl Into<String>) -> Self {
        SdkError::Decode {
            path: path.clone(),
            message: message.into(),
        }
    }
}

/// Result alias used across the SDK
pub type Result<T, E = SdkError> = std::result::Result<T, E>;
