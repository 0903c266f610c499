//! Output formatting
//!
//! Rows are rendered either as a kubectl-style table or serialized as JSON
//! or YAML.

mod table;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::OutputFormat;

pub use table::TableFormatter;

/// A row that knows its table columns
pub trait TableRow: Serialize {
    /// Column headers, without NAMESPACE
    fn headers(wide: bool) -> Vec<&'static str>;

    /// Cell values in header order, without the namespace
    fn cells(&self, wide: bool) -> Vec<String>;

    fn namespace(&self) -> &str;
}

/// Table rendering switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableOptions {
    pub wide: bool,
    pub no_headers: bool,
    /// Prefix a NAMESPACE column (used when listing all namespaces)
    pub show_namespace: bool,
}

/// Render rows in the requested format
pub fn render<T: TableRow>(rows: &[T], format: OutputFormat, options: TableOptions) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(TableFormatter::format(rows, options)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(rows).context("Failed to serialize rows to JSON")
        }
        OutputFormat::Yaml => serde_yaml::to_string(rows).context("Failed to serialize rows to YAML"),
    }
}
