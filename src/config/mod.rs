//! Configuration system for kubestatus
//!
//! Layered YAML configuration (defaults, root file, per-context file,
//! environment) with dotted-key access for the `config` subcommands.

mod defaults;
pub mod loader;
pub mod paths;
pub mod schema;

use anyhow::Context;

pub use loader::ConfigLoader;
pub use schema::{Config, OutputConfig, OutputFormat};

/// Keys accepted by `config get` / `config set`
pub const CONFIG_KEYS: &[&str] = &[
    "defaultNamespace",
    "allNamespaces",
    "output.format",
    "output.wide",
    "output.noHeaders",
];

/// Get a configuration value by key (dot notation)
pub fn get_config_value(config: &Config, key: &str) -> anyhow::Result<String> {
    match key {
        "defaultNamespace" => Ok(config.default_namespace.clone()),
        "allNamespaces" => Ok(config.all_namespaces.to_string()),
        "output.format" => Ok(config.output.format.to_string()),
        "output.wide" => Ok(config.output.wide.to_string()),
        "output.noHeaders" => Ok(config.output.no_headers.to_string()),
        _ => Err(unknown_key(key)),
    }
}

/// Set a configuration value by key (dot notation)
pub fn set_config_value(config: &mut Config, key: &str, value: &str) -> anyhow::Result<()> {
    match key {
        "defaultNamespace" => {
            if value.is_empty() {
                return Err(anyhow::anyhow!("defaultNamespace cannot be empty"));
            }
            config.default_namespace = value.to_string();
        }
        "allNamespaces" => {
            config.all_namespaces = value
                .parse()
                .context("allNamespaces must be 'true' or 'false'")?;
        }
        "output.format" => {
            config.output.format = value.parse().map_err(|e: String| anyhow::anyhow!(e))?;
        }
        "output.wide" => {
            config.output.wide = value
                .parse()
                .context("output.wide must be 'true' or 'false'")?;
        }
        "output.noHeaders" => {
            config.output.no_headers = value
                .parse()
                .context("output.noHeaders must be 'true' or 'false'")?;
        }
        _ => return Err(unknown_key(key)),
    }

    Ok(())
}

fn unknown_key(key: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Unknown configuration key: {} (known keys: {})",
        key,
        CONFIG_KEYS.join(", ")
    )
}
