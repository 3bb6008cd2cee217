//! verbline - typed verb models serialized to shell-safe command lines
//!
//! A host program describes each subcommand ("verb") of an external tool as
//! a [`VerbDescriptor`]: a set of typed [`OptionField`]s with flag names,
//! positional indices and declared defaults. A [`VerbInstance`] holds the
//! values a user chose, and [`ArgumentBuilder`] turns it into the token list
//! (or joined command string) the tool expects.
//!
//! verbline can be used in two ways:
//! - **CLI**: load a TOML verb catalog and build, pre-fill or validate from
//!   the command line
//! - **Library**: describe verbs in code and embed the builder in your host
//!
//! # Quick Start (CLI)
//!
//! ```bash
//! # List the verbs of a catalog
//! verbline --catalog verbs.toml verbs
//!
//! # Build a command line from flag values
//! verbline --catalog verbs.toml build build --set tag=web:1 --set context=. --exe docker
//!
//! # Parse a command line back into a verb instance
//! verbline --catalog verbs.toml prefill 'build --tag web:1 .' --json
//!
//! # Check the catalog for conflicting flag names
//! verbline --catalog verbs.toml validate
//! ```
//!
//! # Quick Start (Library)
//!
//! ```rust
//! use verbline::{ArgumentBuilder, OptionField, OptionKind, VerbCatalog, VerbDescriptor};
//!
//! let catalog = VerbCatalog::new()
//!     .with_verb(
//!         VerbDescriptor::builder("commit")
//!             .field(OptionField::flag("message", OptionKind::String).short('m'))
//!             .field(OptionField::flag("amend", OptionKind::Boolean))
//!             .build(),
//!     )
//!     .expect("unique verb names");
//!
//! let mut commit = catalog.instantiate("commit").expect("registered verb");
//! commit.set("message", "fix parser").expect("known field");
//! commit.set("amend", true).expect("known field");
//!
//! let line = ArgumentBuilder::new().command_line("git", &commit);
//! assert_eq!(line, r#"git commit --message "fix parser" --amend"#);
//! ```
//!
//! # Stable Public API
//!
//! - Model: [`VerbCatalog`], [`VerbDescriptor`], [`OptionField`], [`OptionKind`],
//!   [`OptionValue`], [`VerbInstance`], [`FieldOrder`]
//! - Serialization: [`ArgumentBuilder`], [`ArgumentList`], [`kebab`]
//! - Pre-fill: [`prefill`], [`prefill_by_name`], [`prefill_command_line`]
//! - Validation: [`VerbValidator`], [`ValidationResult`], [`ValidationReport`]
//! - Configuration: [`Config`], [`ConfigBuilder`], [`load_catalog`]
//! - Errors: [`VerblineError`], [`ExitCode`]

// ============================================================================
// Stable Public API - covered by semver guarantees for 1.x
// ============================================================================

pub use verbline_model::{
    Binding, CapabilityContract, DEFAULT_SEPARATOR, DeclaredDefaults, DefaultPolicy, FieldOrder,
    OptionField, OptionKind, OptionValue, PathHint, PathKind, PostAction, RunOutcome,
    VerbCatalog, VerbDescriptor, VerbDescriptorBuilder, VerbInstance,
};

pub use verbline_builder::{ArgumentBuilder, ArgumentList, build, command_string};

pub use verbline_prefill::{
    Invocation, parse_bool, parse_invocation, prefill, prefill_by_name, prefill_command_line,
    prefill_invocation, split_command_line,
};

pub use verbline_validation::{ValidationReport, ValidationResult, VerbValidator};

/// Configuration with CLI > file > default precedence.
///
/// See [`verbline_config::Config`] for discovery rules.
pub use verbline_config::{CliArgs, Config, ConfigBuilder, ConfigSource};

pub use verbline_config::{load_catalog, parse_catalog};

/// Library error type; map to process exit codes with
/// [`VerblineError::to_exit_code`].
pub use verbline_utils::{
    CatalogError, ConfigError, ErrorCategory, ExitCode, UserFriendlyError, VerbError,
    VerblineError,
};

pub use verbline_utils::{kebab, quote_if_needed, unquote};

// ============================================================================
// CLI surface
// ============================================================================

#[doc(hidden)]
pub mod cli;
