use std::collections::HashMap;
use std::path::PathBuf;

use verbline_model::FieldOrder;
use verbline_utils::VerblineError;

use super::{CatalogSettings, Config, ConfigSource, Defaults};

impl Config {
    /// Create a builder for programmatic configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use verbline_config::Config;
    ///
    /// let config = Config::builder()
    ///     .executable("docker")
    ///     .include_defaults(true)
    ///     .build()
    ///     .expect("valid config");
    /// assert_eq!(config.executable(), Some("docker"));
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Builder for programmatic configuration, bypassing file discovery.
///
/// All values set via the builder are attributed to
/// [`ConfigSource::Programmatic`].
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    include_defaults: Option<bool>,
    executable: Option<String>,
    field_order: Option<FieldOrder>,
    verbose: Option<bool>,
    catalog_path: Option<PathBuf>,
}

impl ConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn include_defaults(mut self, include: bool) -> Self {
        self.include_defaults = Some(include);
        self
    }

    #[must_use]
    pub fn executable(mut self, name: impl Into<String>) -> Self {
        self.executable = Some(name.into());
        self
    }

    #[must_use]
    pub fn field_order(mut self, order: FieldOrder) -> Self {
        self.field_order = Some(order);
        self
    }

    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    #[must_use]
    pub fn catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`VerblineError::Config`] if a value is invalid.
    pub fn build(self) -> Result<Config, VerblineError> {
        let mut source_attribution = HashMap::new();
        let mut attribute = |key: &str, set: bool| {
            let source = if set {
                ConfigSource::Programmatic
            } else {
                ConfigSource::Default
            };
            source_attribution.insert(key.to_string(), source);
        };

        attribute("include_defaults", self.include_defaults.is_some());
        attribute("field_order", self.field_order.is_some());
        attribute("verbose", self.verbose.is_some());
        if self.executable.is_some() {
            attribute("executable", true);
        }
        if self.catalog_path.is_some() {
            attribute("catalog_path", true);
        }

        let config = Config {
            defaults: Defaults {
                include_defaults: self.include_defaults,
                executable: self.executable,
                field_order: self.field_order,
                verbose: self.verbose,
            },
            catalog: CatalogSettings {
                path: self.catalog_path,
            },
            config_path: None,
            source_attribution,
        };

        config.validate()?;
        Ok(config)
    }
}
