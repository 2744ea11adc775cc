//! Provider error types
//!
//! Resource operations report problems as diagnostics; these errors cover
//! start-up and the command line around them.

use provider_sdk::SdkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Schema derivation or another SDK failure
    #[error("Provider SDK error: {0}")]
    Sdk(#[from] SdkError),

    /// A file given on the command line could not be read
    #[error("Could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An operation reported error diagnostics
    #[error("{0} error diagnostic(s) reported")]
    Diagnostics(usize),
}
