use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use verbline_model::FieldOrder;

/// `[defaults]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Defaults {
    pub include_defaults: Option<bool>,
    pub executable: Option<String>,
    pub field_order: Option<FieldOrder>,
    pub verbose: Option<bool>,
}

/// `[catalog]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogSettings {
    pub path: Option<PathBuf>,
}

/// Where a configuration value came from.
///
/// Serializes to lowercase strings: `"cli"`, `"config"`, `"programmatic"`, `"default"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    /// Command-line flag (highest precedence).
    Cli,
    /// Configuration file.
    Config,
    /// [`ConfigBuilder`](super::ConfigBuilder).
    Programmatic,
    /// Built-in default (lowest precedence).
    Default,
}
