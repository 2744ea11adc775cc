//! Tracing setup
//!
//! Logs go to stderr: stdout belongs to command output.

use tracing_subscriber::EnvFilter;

use crate::error::{Result, SdkError};

/// Install the global subscriber, filtered by `RUST_LOG` or `default_filter`
pub fn init_logging(default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|e| SdkError::Logging(e.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| SdkError::Logging(e.to_string()))
}
