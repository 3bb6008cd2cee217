//! Foundation utilities shared by every verbline crate
//!
//! - `error`: typed error enums and user-facing reporting
//! - `exit_codes`: process exit codes for the CLI
//! - `logging`: tracing subscriber setup
//! - `naming`: flag-name derivation from field identifiers
//! - `quoting`: shell-safe token quoting and its inverse

pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod naming;
pub mod quoting;

pub use error::{
    CatalogError, ConfigError, ErrorCategory, UserFriendlyError, VerbError, VerblineError,
};
pub use exit_codes::ExitCode;
pub use naming::kebab;
pub use quoting::{quote_if_needed, split_quoted, unquote};
