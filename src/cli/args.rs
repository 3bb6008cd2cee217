//! CLI argument definitions and parsing structures
//!
//! This module defines the command-line interface structure using clap,
//! including the main `Cli` struct and the `Commands` enum.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use verbline_model::FieldOrder;

/// verbline - build and parse command lines for cataloged verbs
#[derive(Parser, Debug)]
#[command(name = "verbline")]
#[command(about = "Serialize typed verb models into shell-safe command lines")]
#[command(long_about = r#"
verbline turns a catalog of typed verb descriptions (TOML) into command lines
for the tool they describe, and parses such command lines back.

EXAMPLES:
  # List the verbs of a catalog
  verbline --catalog verbs.toml verbs

  # Show the fields of a verb, required ones first
  verbline --catalog verbs.toml describe build --order required-first

  # Build a command line; keys are flag names
  verbline --catalog verbs.toml build build --set tag=web:1 --set no-cache=true --exe docker

  # Parse a command line back into field values
  verbline --catalog verbs.toml prefill 'build --tag web:1 --no-cache .' --json

  # Check the catalog for conflicting names and bad defaults
  verbline --catalog verbs.toml validate

CONFIGURATION:
  Configuration is loaded with precedence: CLI flags > config file > defaults
  Config file is discovered by searching upward from CWD for .verbline/config.toml
  Use --config to specify an explicit config file path
"#)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the verb catalog (overrides the config file)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the verbs in the catalog
    Verbs {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the fields of a verb
    Describe {
        /// Verb name
        verb: String,

        /// Display order (source-code, by-name, by-kind-then-name,
        /// required-first, required-first-then-name, required-first-then-kind)
        #[arg(long)]
        order: Option<FieldOrder>,
    },

    /// Build a command line from flag values
    Build {
        /// Verb name
        verb: String,

        /// Field value as FLAG=VALUE, keyed by long flag name; a bare FLAG
        /// means FLAG=true (repeatable)
        #[arg(long = "set", value_name = "FLAG=VALUE")]
        set: Vec<String>,

        /// Emit values equal to their declared default
        #[arg(long)]
        include_defaults: bool,

        /// Fill unset fields with their declared default before building
        #[arg(long)]
        apply_defaults: bool,

        /// Executable name to prefix to the command string
        #[arg(long)]
        exe: Option<String>,

        /// Output the token list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse a command string into a populated verb instance
    Prefill {
        /// Command string, verb first (e.g. 'build --tag web .')
        command: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate every verb in the catalog
    Validate,

    /// Show the effective configuration and where each value came from
    Config,
}

/// Build the clap command, for help rendering and tests.
#[must_use]
pub fn build_cli() -> clap::Command {
    <Cli as clap::CommandFactory>::command()
}
