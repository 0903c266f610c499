//! CLI command handling module
//!
//! Handles all CLI subcommands and argument parsing.

mod commands;
mod get;
mod logging;
mod version;

use clap::{Parser, Subcommand};

pub use commands::{ConfigSubcommand, handle_config_command};
pub use get::{GetArgs, SourceArgs, SummaryArgs, handle_get, handle_summary, resolve_scope};
pub use logging::init_logging;
pub use version::display_version;

/// kubestatus - kubectl-compatible status for pods, deployments and services
#[derive(Parser, Debug)]
#[command(name = "kubestatus")]
#[command(about = "kubectl-compatible status for pods, deployments and services", long_about = None)]
pub struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd', global = true)]
    pub debug: bool,

    /// Kubeconfig context to use
    #[arg(long, global = true)]
    pub context: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// The kubeconfig context every command works against
///
/// `--context` when given, otherwise the kubeconfig's current context. The
/// same value selects the cluster, the namespace default and the
/// context-specific config layer.
pub fn effective_context(
    flag: Option<&str>,
    current: impl FnOnce() -> Option<String>,
) -> Option<String> {
    flag.map(str::to_string).or_else(current)
}

/// Main commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List resources with their derived status
    Get(GetArgs),
    /// Count resources by status
    Summary(SummaryArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
    /// Show version information
    Version,
}
