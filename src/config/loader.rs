//! Configuration loading and merging logic
//!
//! Handles loading configuration from multiple sources and merging them
//! according to precedence rules.

use super::{defaults, paths, schema::Config};
use anyhow::{Context, Result};
use serde_yaml::Value;
use std::path::Path;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers merged
    ///
    /// Precedence order (highest to lowest):
    /// 1. Environment variable overrides
    /// 2. Context-specific config
    /// 3. Root config
    /// 4. Built-in defaults
    pub fn load(context: Option<&str>) -> Result<Config> {
        let root = paths::root_config_path();
        let context_path = context.map(paths::context_config_path);
        let config = Self::load_from(&root, context_path.as_deref())?;
        Ok(Self::apply_env_overrides(config))
    }

    /// Load and merge the given config files; missing files are skipped
    ///
    /// Layers are merged key by key, so a context file only needs the keys
    /// it changes.
    pub fn load_from(root: &Path, context: Option<&Path>) -> Result<Config> {
        let mut merged = Value::Mapping(Default::default());

        for path in std::iter::once(root).chain(context) {
            if let Some(layer) = Self::read_layer(path)? {
                tracing::debug!("Applying config layer {}", path.display());
                merge_values(&mut merged, layer);
            }
        }

        let config: Config =
            serde_yaml::from_value(merged).context("Failed to parse merged configuration")?;
        Ok(config)
    }

    /// Load configuration from a single file
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the root and context config files
    ///
    /// Fails on invalid YAML syntax, invalid value types and read errors.
    pub fn validate(context: Option<&str>) -> Result<()> {
        let root = paths::root_config_path();
        if root.exists() {
            Self::load_file(&root)?;
        }
        if let Some(context) = context {
            let path = paths::context_config_path(context);
            if path.exists() {
                Self::load_file(&path)?;
            }
        }

        Self::load(context).context("Failed to load merged configuration")?;
        Ok(())
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        defaults::default_config()
    }

    fn read_layer(path: &Path) -> Result<Option<Value>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let value: Value = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(match value {
            Value::Null => None,
            other => Some(other),
        })
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: Config) -> Config {
        // KUBESTATUS_NAMESPACE override
        if let Ok(namespace) = std::env::var("KUBESTATUS_NAMESPACE") {
            if !namespace.is_empty() {
                config.default_namespace = namespace;
            }
        }

        // KUBESTATUS_OUTPUT override
        if let Ok(format) = std::env::var("KUBESTATUS_OUTPUT") {
            match format.parse() {
                Ok(format) => config.output.format = format,
                Err(e) => tracing::warn!("Ignoring KUBESTATUS_OUTPUT: {}", e),
            }
        }

        config
    }

    /// Save configuration to a file
    pub fn save(config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent)?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Save root configuration
    pub fn save_root(config: &Config) -> Result<()> {
        Self::save(config, &paths::root_config_path())
    }

    /// Save context-specific configuration
    pub fn save_context(config: &Config, context: &str) -> Result<()> {
        Self::save(config, &paths::context_config_path(context))
    }
}

/// Recursively merge `overlay` into `base`; mappings merge, everything else replaces
fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base), Value::Mapping(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.default_namespace, "default");
    }

    #[test]
    fn test_load_from_missing_files_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigLoader::load_from(&dir.path().join("config.yaml"), None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_context_layer_overrides_only_its_keys() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("root.yaml");
        let context = dir.path().join("context.yaml");
        std::fs::write(
            &root,
            "defaultNamespace: apps\noutput:\n  format: yaml\n  wide: true\n",
        )
        .unwrap();
        std::fs::write(&context, "output:\n  format: json\n").unwrap();

        let config = ConfigLoader::load_from(&root, Some(&context)).unwrap();
        assert_eq!(config.default_namespace, "apps");
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.wide);
    }

    #[test]
    fn test_invalid_layer_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("config.yaml");
        std::fs::write(&root, "allNamespaces: maybe\n").unwrap();
        assert!(ConfigLoader::load_from(&root, None).is_err());
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let config = Config {
            default_namespace: "kube-system".to_string(),
            ..Default::default()
        };
        ConfigLoader::save(&config, &path).unwrap();
        assert_eq!(ConfigLoader::load_file(&path).unwrap(), config);
    }

    #[test]
    fn test_env_overrides() {
        // SAFETY: set_var is unsafe in Rust 2024 due to potential data races.
        // No other test reads these variables.
        unsafe {
            std::env::set_var("KUBESTATUS_NAMESPACE", "from-env");
            std::env::set_var("KUBESTATUS_OUTPUT", "yaml");
        }

        let config = ConfigLoader::apply_env_overrides(Config::default());

        assert_eq!(config.default_namespace, "from-env");
        assert_eq!(config.output.format, OutputFormat::Yaml);

        // SAFETY: as above.
        unsafe {
            std::env::remove_var("KUBESTATUS_NAMESPACE");
            std::env::remove_var("KUBESTATUS_OUTPUT");
        }
    }
}
