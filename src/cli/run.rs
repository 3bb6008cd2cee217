//! CLI entry point and dispatch logic
//!
//! This module owns the `run()` function which:
//! - Parses CLI arguments
//! - Builds CliArgs and discovers Config
//! - Installs the tracing subscriber
//! - Dispatches to command handlers
//! - Handles all error output

use anyhow::Result;
use clap::Parser;

use super::args::{Cli, Commands};
use super::commands;

use crate::{CliArgs, Config, ConfigError, ExitCode, UserFriendlyError, VerblineError};

/// Main CLI execution function.
///
/// Handles ALL output including errors and returns `Result<(), ExitCode>`:
/// - On success: `Ok(())` after printing any output
/// - On error: prints the error report to stderr, returns `Err(ExitCode)`
///
/// main.rs only calls `std::process::exit(code.as_i32())` on error.
pub fn run() -> Result<(), ExitCode> {
    let cli = Cli::parse();
    let cli_args = cli_args_from(&cli);

    let config = match Config::discover(&cli_args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", render_error(&err));
            return Err(exit_code_for(&err));
        }
    };

    if let Err(err) = verbline_utils::logging::init_tracing(config.verbose()) {
        eprintln!("warning: failed to initialize logging: {err}");
    }

    if let Err(err) = dispatch(cli.command, &config) {
        eprintln!("{}", render_error(&err));
        return Err(exit_code_for(&err));
    }

    Ok(())
}

/// Map parsed flags onto the configuration layer.
///
/// Only flags the user actually passed are set, so config file values are not
/// shadowed by clap defaults.
pub(crate) fn cli_args_from(cli: &Cli) -> CliArgs {
    let mut args = CliArgs {
        config_path: cli.config.clone(),
        catalog_path: cli.catalog.clone(),
        verbose: cli.verbose.then_some(true),
        ..CliArgs::default()
    };

    match &cli.command {
        Commands::Build {
            include_defaults,
            exe,
            ..
        } => {
            args.include_defaults = include_defaults.then_some(true);
            args.executable = exe.clone();
        }
        Commands::Describe { order, .. } => args.field_order = *order,
        _ => {}
    }

    args
}

fn dispatch(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Verbs { json } => commands::execute_verbs_command(config, json),
        Commands::Describe { verb, .. } => commands::execute_describe_command(config, &verb),
        Commands::Build {
            verb,
            set,
            apply_defaults,
            json,
            ..
        } => commands::execute_build_command(config, &verb, &set, apply_defaults, json),
        Commands::Prefill { command, json } => {
            commands::execute_prefill_command(config, &command, json)
        }
        Commands::Validate => commands::execute_validate_command(config),
        Commands::Config => commands::execute_config_command(config),
    }
}

/// Render an error for stderr, using the structured report when available.
pub(crate) fn render_error(err: &anyhow::Error) -> String {
    if let Some(err) = err.downcast_ref::<VerblineError>() {
        return err.display_for_user();
    }
    if let Some(config_err) = err.downcast_ref::<ConfigError>() {
        let mut output = format!("Error: {}\n", config_err.user_message());
        if let Some(ctx) = config_err.context() {
            output.push_str(&format!("\nContext: {ctx}\n"));
        }
        for suggestion in config_err.suggestions() {
            output.push_str(&format!("  • {suggestion}\n"));
        }
        return output;
    }
    format!("Error: {err:#}\n")
}

pub(crate) fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    if let Some(err) = err.downcast_ref::<VerblineError>() {
        err.to_exit_code()
    } else if err.downcast_ref::<ConfigError>().is_some() {
        ExitCode::CLI_ARGS
    } else {
        ExitCode::INTERNAL
    }
}
