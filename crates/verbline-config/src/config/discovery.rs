use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use verbline_utils::ConfigError;

use super::{CatalogSettings, CliArgs, Config, ConfigSource, Defaults};

/// TOML configuration file structure
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    defaults: Option<Defaults>,
    catalog: Option<CatalogSettings>,
}

impl Config {
    /// Discover and load configuration with precedence: CLI > file > defaults
    ///
    /// Uses the current working directory for config file discovery when no
    /// explicit path is provided in `cli_args`.
    pub fn discover(cli_args: &CliArgs) -> Result<Self> {
        let start_dir = std::env::current_dir().context("Failed to get current directory")?;
        Self::discover_from(&start_dir, cli_args)
    }

    /// Discover and load configuration starting from a specific directory
    ///
    /// This is the path-driven variant used by tests to avoid process-global state.
    pub fn discover_from(start_dir: &Path, cli_args: &CliArgs) -> Result<Self> {
        let mut source_attribution = HashMap::new();
        let mut defaults = Defaults::default();
        let mut catalog = CatalogSettings::default();

        for key in ["include_defaults", "field_order", "verbose"] {
            source_attribution.insert(key.to_string(), ConfigSource::Default);
        }

        let config_path = match &cli_args.config_path {
            Some(explicit) => Some(explicit.clone()),
            None => Self::discover_config_file_from(start_dir)?,
        };

        if let Some(path) = &config_path {
            let file_config = Self::load_config_file(path)
                .with_context(|| format!("Failed to load config file: {}", path.display()))?;

            if let Some(file_defaults) = file_config.defaults {
                if file_defaults.include_defaults.is_some() {
                    defaults.include_defaults = file_defaults.include_defaults;
                    source_attribution.insert("include_defaults".to_string(), ConfigSource::Config);
                }
                if file_defaults.executable.is_some() {
                    defaults.executable = file_defaults.executable;
                    source_attribution.insert("executable".to_string(), ConfigSource::Config);
                }
                if file_defaults.field_order.is_some() {
                    defaults.field_order = file_defaults.field_order;
                    source_attribution.insert("field_order".to_string(), ConfigSource::Config);
                }
                if file_defaults.verbose.is_some() {
                    defaults.verbose = file_defaults.verbose;
                    source_attribution.insert("verbose".to_string(), ConfigSource::Config);
                }
            }

            if let Some(catalog_path) = file_config.catalog.and_then(|c| c.path) {
                let base = path.parent().unwrap_or_else(|| Path::new("."));
                catalog.path = Some(base.join(catalog_path));
                source_attribution.insert("catalog_path".to_string(), ConfigSource::Config);
            }
        }

        // CLI arguments override everything
        if cli_args.catalog_path.is_some() {
            catalog.path = cli_args.catalog_path.clone();
            source_attribution.insert("catalog_path".to_string(), ConfigSource::Cli);
        }
        if cli_args.include_defaults.is_some() {
            defaults.include_defaults = cli_args.include_defaults;
            source_attribution.insert("include_defaults".to_string(), ConfigSource::Cli);
        }
        if cli_args.executable.is_some() {
            defaults.executable = cli_args.executable.clone();
            source_attribution.insert("executable".to_string(), ConfigSource::Cli);
        }
        if cli_args.field_order.is_some() {
            defaults.field_order = cli_args.field_order;
            source_attribution.insert("field_order".to_string(), ConfigSource::Cli);
        }
        if cli_args.verbose.is_some() {
            defaults.verbose = cli_args.verbose;
            source_attribution.insert("verbose".to_string(), ConfigSource::Cli);
        }

        let config = Config {
            defaults,
            catalog,
            config_path,
            source_attribution,
        };

        config.validate()?;
        debug!(config_path = ?config.config_path, "configuration resolved");
        Ok(config)
    }

    /// Discover config file by searching upward from a given directory
    ///
    /// Walks up the directory tree looking for `.verbline/config.toml`,
    /// stopping at repository root markers (.git, .hg, .svn) or the
    /// filesystem root.
    pub fn discover_config_file_from(start_dir: &Path) -> Result<Option<PathBuf>> {
        let mut current_dir = start_dir.to_path_buf();

        loop {
            let config_path = current_dir.join(".verbline").join("config.toml");
            if config_path.exists() {
                return Ok(Some(config_path));
            }

            if current_dir.join(".git").exists()
                || current_dir.join(".hg").exists()
                || current_dir.join(".svn").exists()
            {
                break;
            }

            match current_dir.parent() {
                Some(parent) => current_dir = parent.to_path_buf(),
                None => break,
            }
        }

        Ok(None)
    }

    /// Load configuration from TOML file
    fn load_config_file(path: &Path) -> Result<TomlConfig> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::NotFound {
            path: path.display().to_string(),
        })?;
        let config: TomlConfig = toml::from_str(&content)
            .map_err(|err| ConfigError::InvalidFile(err.to_string()))
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;
        Ok(config)
    }
}
