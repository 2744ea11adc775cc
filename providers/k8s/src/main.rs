//! Kubernetes manifest provider CLI
//!
//! Drives the provider's resources from the command line: inspect schemas,
//! validate a configuration and render manifests. Configuration and state
//! files hold the resource value as JSON, keyed by attribute name.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use provider_sdk::logging::init_logging;
use provider_sdk::{Diagnostics, ProviderServer};
use serde_json::Value;
use terraform_provider_k8s::{ProviderConfig, ProviderError, provider_server};
use tracing::{debug, info};

/// Render Kubernetes custom resources as YAML manifests
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// List the resource types served by the provider
    Resources,
    /// Print the schema of a resource type as JSON
    Schema { type_name: String },
    /// Validate a configuration against the schema of a resource type
    Validate {
        type_name: String,
        #[clap(long)]
        config: PathBuf,
    },
    /// Create (no state) or update (with state) a resource and print the new state
    Apply {
        type_name: String,
        #[clap(long)]
        config: PathBuf,
        #[clap(long)]
        state: Option<PathBuf>,
    },
    /// Render a configuration and print only the manifest
    Yaml {
        type_name: String,
        #[clap(long)]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging("info")?;
    let args = Args::parse();

    let config = ProviderConfig::from_env()?;
    info!(provider = %config.type_name, "Starting provider");
    let server = provider_server(&config)?;

    match args.command {
        Command::Resources => {
            for type_name in server.resource_types() {
                println!("{type_name}");
            }
        }
        Command::Schema { type_name } => {
            let response = server.schema(&type_name);
            report(&response.diagnostics)?;
            println!("{}", serde_json::to_string_pretty(&response.schema)?);
        }
        Command::Validate { type_name, config } => {
            let diagnostics = server.validate_resource_config(&type_name, &read_json(&config)?);
            println!("{}", serde_json::to_string_pretty(&diagnostics)?);
            fail_on_errors(&diagnostics)?;
        }
        Command::Apply {
            type_name,
            config,
            state,
        } => {
            let prior_state = state.as_deref().map(read_json).transpose()?;
            let new_state = apply(&server, &type_name, &config, prior_state).await?;
            println!("{}", serde_json::to_string_pretty(&new_state)?);
        }
        Command::Yaml { type_name, config } => {
            let new_state = apply(&server, &type_name, &config, None).await?;
            if let Some(yaml) = new_state.get("yaml").and_then(Value::as_str) {
                print!("{yaml}");
            }
        }
    }

    Ok(())
}

/// Validate the configuration, then create or update
async fn apply(
    server: &ProviderServer,
    type_name: &str,
    config: &Path,
    prior_state: Option<Value>,
) -> Result<Value, ProviderError> {
    let planned = read_json(config)?;
    let diagnostics = server.validate_resource_config(type_name, &planned);
    report(&diagnostics)?;

    let response = server.apply(type_name, prior_state, Some(planned)).await;
    report(&response.diagnostics)?;
    debug!(type_name, "Applied configuration");
    Ok(response.new_state.unwrap_or(Value::Null))
}

fn read_json(path: &Path) -> Result<Value, ProviderError> {
    let text = fs::read_to_string(path).map_err(|source| ProviderError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

/// Print diagnostics to stderr and fail when any is an error
fn report(diagnostics: &Diagnostics) -> Result<(), ProviderError> {
    for diagnostic in diagnostics {
        match &diagnostic.attribute {
            Some(path) => eprintln!("{:?}: {} ({path}): {}", diagnostic.severity, diagnostic.summary, diagnostic.detail),
            None => eprintln!("{:?}: {}: {}", diagnostic.severity, diagnostic.summary, diagnostic.detail),
        }
    }
    fail_on_errors(diagnostics)
}

fn fail_on_errors(diagnostics: &Diagnostics) -> Result<(), ProviderError> {
    match diagnostics.errors().count() {
        0 => Ok(()),
        count => Err(ProviderError::Diagnostics(count)),
    }
}
