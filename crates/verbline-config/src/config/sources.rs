use std::collections::BTreeMap;

use super::{Config, ConfigSource};

fn source_label(source: &ConfigSource) -> &'static str {
    match source {
        ConfigSource::Cli => "cli",
        ConfigSource::Config => "config",
        ConfigSource::Programmatic => "programmatic",
        ConfigSource::Default => "default",
    }
}

impl Config {
    /// Effective configuration as `key -> (value, source)`.
    ///
    /// Unset optional values are left out.
    #[must_use]
    pub fn effective_config(&self) -> BTreeMap<String, (String, String)> {
        let mut config = BTreeMap::new();
        let mut add = |key: &str, value: String| {
            let source = source_label(&self.source_of(key)).to_string();
            config.insert(key.to_string(), (value, source));
        };

        add("include_defaults", self.include_defaults().to_string());
        add("field_order", self.field_order().to_string());
        add("verbose", self.verbose().to_string());
        if let Some(executable) = self.executable() {
            add("executable", executable.to_string());
        }
        if let Some(path) = self.catalog_path() {
            add("catalog_path", path.display().to_string());
        }

        config
    }
}
