//! kubestatus - kubectl-compatible status for pods, deployments and services
//!
//! Lists resources from the cluster (or from manifest files) with the same
//! STATUS, READY and RESTARTS columns `kubectl get` prints.

use anyhow::Result;
use clap::Parser;
use kubestatus::cli::{self, Args, Command};
use kubestatus::config::{Config, ConfigLoader};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    cli::init_logging(args.debug);
    tracing::debug!("Debug logging enabled");

    let context = cli::effective_context(args.context.as_deref(), kubestatus::kube::current_context);
    tracing::debug!("Using kubeconfig context {:?}", context);
    let context = context.as_deref();

    match args.command {
        Command::Get(get) => {
            let config = load_config(context);
            cli::handle_get(get, &config, context).await
        }
        Command::Summary(summary) => {
            let config = load_config(context);
            cli::handle_summary(summary, &config, context).await
        }
        Command::Config { subcommand } => cli::handle_config_command(subcommand, context).await,
        Command::Version => {
            cli::display_version();
            Ok(())
        }
    }
}

/// Load layered configuration, falling back to defaults on error
fn load_config(context: Option<&str>) -> Config {
    ConfigLoader::load(context).unwrap_or_else(|e| {
        tracing::warn!("Failed to load configuration: {:#}, using defaults", e);
        ConfigLoader::load_defaults()
    })
}
