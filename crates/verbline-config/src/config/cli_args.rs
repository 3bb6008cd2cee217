use std::path::PathBuf;

use verbline_model::FieldOrder;

/// Configuration values supplied on the command line. `None` defers to the
/// config file, then to built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config_path: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
    pub include_defaults: Option<bool>,
    pub executable: Option<String>,
    pub field_order: Option<FieldOrder>,
    pub verbose: Option<bool>,
}
