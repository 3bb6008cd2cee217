use verbline_utils::{ConfigError, VerblineError};

use super::Config;

impl Config {
    /// Validate configuration values
    pub(crate) fn validate(&self) -> Result<(), VerblineError> {
        if let Some(executable) = &self.defaults.executable
            && executable.trim().is_empty()
        {
            return Err(VerblineError::Config(ConfigError::InvalidValue {
                key: "executable".to_string(),
                value: "must not be empty".to_string(),
            }));
        }

        if let Some(path) = &self.catalog.path
            && path.as_os_str().is_empty()
        {
            return Err(VerblineError::Config(ConfigError::InvalidValue {
                key: "catalog.path".to_string(),
                value: "must not be empty".to_string(),
            }));
        }

        Ok(())
    }
}
