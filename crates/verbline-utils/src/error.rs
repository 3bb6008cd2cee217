use std::fmt;
use thiserror::Error;

/// Library-level error type with rich context and user-friendly reporting.
///
/// `VerblineError` is the error type returned by the verbline library
/// surface. Data-quality problems (missing or malformed values) never reach
/// this type: the builder and the pre-fill resolver degrade them to absent or
/// zero values. What remains are programmer errors and configuration problems.
///
/// # Exit Code Mapping
///
/// | Exit Code | Error Type |
/// |-----------|------------|
/// | 2 | Configuration, catalog or CLI argument errors |
/// | 3 | Validation suite reported issues |
/// | 4 | Unknown verb name |
/// | 1 | Other errors |
///
/// Library code returns `VerblineError` and does NOT call `std::process::exit()`.
#[derive(Error, Debug)]
pub enum VerblineError {
    #[error("Verb error: {0}")]
    Verb(#[from] VerbError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation failed: {issue_count} issue(s)")]
    ValidationFailed {
        issues: Vec<String>,
        issue_count: usize,
    },
}

/// Errors raised while resolving verbs and fields by name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerbError {
    #[error("Unknown verb '{name}'")]
    UnknownVerb { name: String },

    #[error("Verb '{verb}' has no field '{field}'")]
    UnknownField { verb: String, field: String },

    #[error("Verb '{name}' is registered more than once")]
    DuplicateVerb { name: String },

    #[error("Verb '{verb}' references unknown capability contract '{contract}'")]
    UnknownContract { verb: String, contract: String },

    #[error("Cannot parse command line: {reason}")]
    InvalidCommandLine { reason: String },
}

/// Errors raised while loading a declarative verb catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Invalid catalog file: {0}")]
    InvalidFile(String),

    #[error("Catalog file not found at {path}")]
    NotFound { path: String },

    #[error("Unknown kind '{kind}' on {owner}.{field}")]
    UnknownKind {
        owner: String,
        field: String,
        kind: String,
    },

    #[error("Invalid value for {owner}.{field}: {reason}")]
    InvalidValue {
        owner: String,
        field: String,
        reason: String,
    },
}

/// Errors raised while discovering or validating configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration file: {0}")]
    InvalidFile(String),

    #[error("Invalid configuration value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found at {path}")]
    NotFound { path: String },

    #[error("Configuration discovery failed: {reason}")]
    DiscoveryFailed { reason: String },

    #[error("No verb catalog configured")]
    MissingCatalog,
}

/// Trait for providing user-friendly error reporting with context and suggestions
pub trait UserFriendlyError {
    /// Get a user-friendly error message
    fn user_message(&self) -> String;

    /// Get contextual information about the error
    fn context(&self) -> Option<String>;

    /// Get suggested actions to resolve the error
    fn suggestions(&self) -> Vec<String>;

    /// Get the error category for grouping similar errors
    fn category(&self) -> ErrorCategory;
}

/// Categories of errors for better organization and handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Catalog,
    Lookup,
    FileSystem,
    Validation,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::Catalog => write!(f, "Catalog"),
            Self::Lookup => write!(f, "Lookup"),
            Self::FileSystem => write!(f, "File System"),
            Self::Validation => write!(f, "Validation"),
        }
    }
}

impl UserFriendlyError for VerbError {
    fn user_message(&self) -> String {
        match self {
            Self::UnknownVerb { name } => format!("No verb named '{name}' is registered"),
            Self::UnknownField { verb, field } => {
                format!("Verb '{verb}' does not declare a field '{field}'")
            }
            Self::DuplicateVerb { name } => {
                format!("Verb '{name}' is declared more than once")
            }
            Self::UnknownContract { verb, contract } => {
                format!("Verb '{verb}' uses contract '{contract}', which is not declared")
            }
            Self::InvalidCommandLine { reason } => {
                format!("Could not parse command line: {reason}")
            }
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::UnknownVerb { .. } => {
                Some("Verb names are matched exactly against the loaded catalog.".to_string())
            }
            Self::UnknownField { .. } => {
                Some(
                    "Field identifiers are the names declared with `id` in the catalog."
                        .to_string(),
                )
            }
            Self::InvalidCommandLine { .. } => Some(
                "The first token names the verb; values with spaces must be double-quoted."
                    .to_string(),
            ),
            Self::DuplicateVerb { .. } | Self::UnknownContract { .. } => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownVerb { .. } => {
                vec!["Run 'verbline verbs' to list known verbs".to_string()]
            }
            Self::UnknownField { verb, .. } => {
                vec![format!("Run 'verbline describe {verb}' to list its fields")]
            }
            Self::DuplicateVerb { .. } => vec!["Rename or remove one of the verbs".to_string()],
            Self::UnknownContract { .. } => {
                vec!["Declare the contract in a [[contract]] table".to_string()]
            }
            Self::InvalidCommandLine { .. } => vec!["Check for unbalanced quotes".to_string()],
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownVerb { .. }
            | Self::UnknownField { .. }
            | Self::InvalidCommandLine { .. } => ErrorCategory::Lookup,
            Self::DuplicateVerb { .. } | Self::UnknownContract { .. } => ErrorCategory::Catalog,
        }
    }
}

impl UserFriendlyError for CatalogError {
    fn user_message(&self) -> String {
        match self {
            Self::InvalidFile(reason) => format!("Verb catalog has invalid format: {reason}"),
            Self::NotFound { path } => format!("Verb catalog not found: {path}"),
            Self::UnknownKind { owner, field, kind } => {
                format!("Field '{owner}.{field}' has unknown kind '{kind}'")
            }
            Self::InvalidValue {
                owner,
                field,
                reason,
            } => format!("Field '{owner}.{field}' has an invalid value: {reason}"),
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::UnknownKind { .. } => Some(
                "Kinds are: boolean, nullable-boolean, integer, floating-point, string, enum, \
                 nullable-enum, list-of-string, list-of-enum, nullable-list-of-enum."
                    .to_string(),
            ),
            _ => Some("Catalogs are TOML files with [[verb]] and [[contract]] tables.".to_string()),
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NotFound { .. } => vec![
                "Pass --catalog <path>".to_string(),
                "Set [catalog] path in .verbline/config.toml".to_string(),
            ],
            _ => vec!["Check the TOML syntax and field keys".to_string()],
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::FileSystem,
            _ => ErrorCategory::Catalog,
        }
    }
}

impl UserFriendlyError for ConfigError {
    fn user_message(&self) -> String {
        match self {
            Self::InvalidFile(reason) => {
                format!("Configuration file has invalid format: {reason}")
            }
            Self::InvalidValue { key, value } => {
                format!("Configuration '{key}' has invalid value: {value}")
            }
            Self::NotFound { path } => format!("Configuration file not found: {path}"),
            Self::DiscoveryFailed { reason } => {
                format!("Failed to discover configuration: {reason}")
            }
            Self::MissingCatalog => "No verb catalog was given or configured".to_string(),
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::NotFound { .. } | Self::DiscoveryFailed { .. } => Some(
                "verbline searches upward from the current directory for .verbline/config.toml."
                    .to_string(),
            ),
            Self::MissingCatalog => {
                Some("Every command except `config` needs a verb catalog.".to_string())
            }
            _ => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingCatalog => vec![
                "Pass --catalog <path>".to_string(),
                "Add a [catalog] section with a path to .verbline/config.toml".to_string(),
            ],
            _ => vec!["Check the TOML syntax using a TOML validator".to_string()],
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Configuration
    }
}

impl UserFriendlyError for VerblineError {
    fn user_message(&self) -> String {
        match self {
            Self::Verb(err) => err.user_message(),
            Self::Catalog(err) => err.user_message(),
            Self::Config(err) => err.user_message(),
            Self::Io(err) => format!("File operation failed: {err}"),
            Self::ValidationFailed { issue_count, .. } => {
                format!("Verb catalog failed validation with {issue_count} issue(s)")
            }
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::Verb(err) => err.context(),
            Self::Catalog(err) => err.context(),
            Self::Config(err) => err.context(),
            Self::Io(_) => None,
            Self::ValidationFailed { issues, .. } => Some(issues.join("\n")),
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Verb(err) => err.suggestions(),
            Self::Catalog(err) => err.suggestions(),
            Self::Config(err) => err.suggestions(),
            Self::Io(_) => vec!["Check file permissions and paths".to_string()],
            Self::ValidationFailed { .. } => {
                vec![
                    "Fix the reported descriptor issues and re-run 'verbline validate'".to_string(),
                ]
            }
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Verb(err) => err.category(),
            Self::Catalog(err) => err.category(),
            Self::Config(err) => err.category(),
            Self::Io(_) => ErrorCategory::FileSystem,
            Self::ValidationFailed { .. } => ErrorCategory::Validation,
        }
    }
}

impl VerblineError {
    /// Get a user-friendly error message with context and actionable suggestions.
    #[must_use]
    pub fn display_for_user(&self) -> String {
        let mut output = format!("Error: {}\n", self.user_message());

        if let Some(ctx) = self.context() {
            output.push_str(&format!("\nContext: {ctx}\n"));
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for suggestion in suggestions {
                output.push_str(&format!("  • {suggestion}\n"));
            }
        }

        output
    }

    /// Map this error to the CLI exit code table.
    #[must_use]
    pub fn to_exit_code(&self) -> crate::exit_codes::ExitCode {
        use crate::exit_codes::ExitCode;

        match self {
            Self::Verb(VerbError::UnknownVerb { .. }) => ExitCode::UNKNOWN_VERB,
            Self::Verb(_) | Self::Catalog(_) | Self::Config(_) => ExitCode::CLI_ARGS,
            Self::ValidationFailed { .. } => ExitCode::VALIDATION_FAILED,
            Self::Io(_) => ExitCode::INTERNAL,
        }
    }
}
