//! Configuration model with source attribution

mod builder;
mod cli_args;
mod discovery;
mod model;
mod sources;
mod validation;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub use builder::ConfigBuilder;
pub use cli_args::CliArgs;
pub use model::{CatalogSettings, ConfigSource, Defaults};
use verbline_model::FieldOrder;

/// Resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub defaults: Defaults,
    pub catalog: CatalogSettings,
    /// The config file that was loaded, if any.
    pub config_path: Option<PathBuf>,
    pub source_attribution: HashMap<String, ConfigSource>,
}

impl Config {
    /// Build mode used when the command line does not say.
    #[must_use]
    pub fn include_defaults(&self) -> bool {
        self.defaults.include_defaults.unwrap_or(false)
    }

    #[must_use]
    pub fn executable(&self) -> Option<&str> {
        self.defaults.executable.as_deref()
    }

    #[must_use]
    pub fn field_order(&self) -> FieldOrder {
        self.defaults.field_order.unwrap_or_default()
    }

    #[must_use]
    pub fn verbose(&self) -> bool {
        self.defaults.verbose.unwrap_or(false)
    }

    /// Verb catalog location, already resolved against the config file's
    /// directory when it came from the file.
    #[must_use]
    pub fn catalog_path(&self) -> Option<&Path> {
        self.catalog.path.as_deref()
    }

    /// Where a setting came from. Unset keys report `Default`.
    #[must_use]
    pub fn source_of(&self, key: &str) -> ConfigSource {
        self.source_attribution
            .get(key)
            .cloned()
            .unwrap_or(ConfigSource::Default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(root: &Path, body: &str) -> PathBuf {
        let dir = root.join(".verbline");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_config_file() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();

        let config = Config::discover_from(temp.path(), &CliArgs::default()).unwrap();
        assert!(config.config_path.is_none());
        assert!(!config.include_defaults());
        assert_eq!(config.executable(), None);
        assert_eq!(config.field_order(), FieldOrder::SourceCode);
        assert_eq!(config.source_of("include_defaults"), ConfigSource::Default);
    }

    #[test]
    fn test_file_values_are_loaded_and_attributed() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();
        write_config(
            temp.path(),
            r#"
[defaults]
include_defaults = true
executable = "docker"
field_order = "required-first"

[catalog]
path = "verbs.toml"
"#,
        );

        let config = Config::discover_from(temp.path(), &CliArgs::default()).unwrap();
        assert!(config.include_defaults());
        assert_eq!(config.executable(), Some("docker"));
        assert_eq!(config.field_order(), FieldOrder::RequiredFirst);
        assert_eq!(
            config.catalog_path(),
            Some(temp.path().join(".verbline").join("verbs.toml").as_path())
        );
        assert_eq!(config.source_of("executable"), ConfigSource::Config);
    }

    #[test]
    fn test_discovery_searches_upward() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();
        write_config(temp.path(), "[defaults]\nverbose = true\n");
        let nested = temp.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let config = Config::discover_from(&nested, &CliArgs::default()).unwrap();
        assert!(config.verbose());
    }

    #[test]
    fn test_cli_overrides_file() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();
        write_config(temp.path(), "[defaults]\nexecutable = \"docker\"\n");

        let cli = CliArgs {
            executable: Some("podman".to_string()),
            catalog_path: Some(PathBuf::from("/tmp/verbs.toml")),
            ..CliArgs::default()
        };
        let config = Config::discover_from(temp.path(), &cli).unwrap();
        assert_eq!(config.executable(), Some("podman"));
        assert_eq!(config.source_of("executable"), ConfigSource::Cli);
        assert_eq!(config.catalog_path(), Some(Path::new("/tmp/verbs.toml")));
        assert_eq!(config.source_of("catalog_path"), ConfigSource::Cli);
    }

    #[test]
    fn test_explicit_config_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.toml");
        fs::write(&path, "[defaults]\ninclude_defaults = true\n").unwrap();

        let cli = CliArgs {
            config_path: Some(path.clone()),
            ..CliArgs::default()
        };
        let config = Config::discover_from(temp.path(), &cli).unwrap();
        assert!(config.include_defaults());
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();
        write_config(temp.path(), "[defaults\n");

        let err = Config::discover_from(temp.path(), &CliArgs::default()).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to load config file"));
    }

    #[test]
    fn test_empty_executable_fails_validation() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();
        write_config(temp.path(), "[defaults]\nexecutable = \"  \"\n");

        assert!(Config::discover_from(temp.path(), &CliArgs::default()).is_err());
    }
}
