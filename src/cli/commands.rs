//! Command implementations
//!
//! Every command writes its output to stdout and returns errors to `run`,
//! which renders them on stderr.

use std::collections::HashMap;
use std::fmt::Write as _;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    ArgumentBuilder, Binding, Config, ConfigError, DeclaredDefaults, DefaultPolicy, FieldOrder,
    OptionField, VerbCatalog, VerbDescriptor, VerbError, VerbValidator, VerblineError,
    load_catalog, prefill, prefill_command_line,
};

/// Load the catalog named by the configuration.
pub(crate) fn load_configured_catalog(config: &Config) -> Result<VerbCatalog> {
    let path = config
        .catalog_path()
        .ok_or(VerblineError::Config(ConfigError::MissingCatalog))?;
    let catalog = load_catalog(path)?;
    Ok(catalog)
}

#[derive(Serialize)]
struct VerbSummary<'a> {
    name: &'a str,
    help: Option<&'a str>,
    fields: usize,
}

/// Execute the `verbs` command
pub(crate) fn execute_verbs_command(config: &Config, json: bool) -> Result<()> {
    let catalog = load_configured_catalog(config)?;

    if json {
        let summaries: Vec<VerbSummary<'_>> = catalog
            .descriptors()
            .iter()
            .map(|d| VerbSummary {
                name: d.name(),
                help: d.help(),
                fields: d.fields().len(),
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&summaries).context("Failed to serialize verb list")?
        );
        return Ok(());
    }

    let width = catalog.names().map(str::len).max().unwrap_or(0);
    for descriptor in catalog.descriptors() {
        match descriptor.help() {
            Some(help) => println!("{:<width$}  {help}", descriptor.name()),
            None => println!("{}", descriptor.name()),
        }
    }
    Ok(())
}

/// Execute the `describe` command
pub(crate) fn execute_describe_command(config: &Config, verb: &str) -> Result<()> {
    let catalog = load_configured_catalog(config)?;
    let descriptor = catalog.require(verb).map_err(VerblineError::from)?;
    print!("{}", describe(descriptor, config.field_order()));
    Ok(())
}

/// Render the field listing for one verb.
pub(crate) fn describe(descriptor: &VerbDescriptor, order: FieldOrder) -> String {
    let mut out = String::new();
    match descriptor.help() {
        Some(help) => {
            let _ = writeln!(out, "{} - {help}", descriptor.name());
        }
        None => {
            let _ = writeln!(out, "{}", descriptor.name());
        }
    }

    let fields = descriptor.ordered_fields(order);
    let labels: Vec<String> = fields.iter().map(|f| binding_label(f)).collect();
    let width = labels.iter().map(String::len).max().unwrap_or(0);

    for (field, label) in fields.iter().zip(&labels) {
        let mut line = format!("  {label:<width$}  {}", field.kind);
        if field.required {
            line.push_str("  required");
        }
        if let Some(default) = &field.default {
            let _ = write!(line, "  default: {default}");
        }
        if !field.choices.is_empty() {
            let _ = write!(line, "  [{}]", field.choices.join("|"));
        }
        if let Some(help) = &field.help {
            let _ = write!(line, "  {help}");
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

fn binding_label(field: &OptionField) -> String {
    match &field.binding {
        Some(Binding::Positional { index }) => format!("<{}> #{index}", field.resolved_name()),
        Some(Binding::Flag { .. }) => {
            let long = field.long_name().unwrap_or_else(|| field.resolved_name());
            match field.short_name() {
                Some(short) => format!("--{long}, -{short}"),
                None => format!("--{long}"),
            }
        }
        None => format!("({}: unbound)", field.identifier),
    }
}

/// Execute the `build` command
pub(crate) fn execute_build_command(
    config: &Config,
    verb: &str,
    assignments: &[String],
    apply_defaults: bool,
    json: bool,
) -> Result<()> {
    let catalog = load_configured_catalog(config)?;
    let descriptor = catalog.require(verb).map_err(VerblineError::from)?;
    let raw = parse_assignments(descriptor, assignments).map_err(VerblineError::from)?;

    let mut instance = prefill(descriptor, &raw);
    if apply_defaults {
        instance = DeclaredDefaults.apply_defaults(instance);
    }

    let missing = instance.missing_required();
    if !missing.is_empty() {
        warn!(verb, missing = %missing.join(", "), "required fields have no value");
    }

    let builder = ArgumentBuilder::new().include_defaults(config.include_defaults());
    if json {
        let args = builder.arguments(&instance);
        println!(
            "{}",
            serde_json::to_string(&args).context("Failed to serialize argument list")?
        );
        return Ok(());
    }

    let line = match config.executable() {
        Some(exe) => builder.command_line(exe, &instance),
        None => builder.command_string(&instance),
    };
    println!("{line}");
    Ok(())
}

/// Turn `FLAG=VALUE` pairs into the raw map the pre-fill resolver takes.
///
/// A bare `FLAG` means `FLAG=true`. Keys must name a field of the verb.
pub(crate) fn parse_assignments(
    descriptor: &VerbDescriptor,
    assignments: &[String],
) -> Result<HashMap<String, String>, VerbError> {
    let mut raw = HashMap::new();
    for assignment in assignments {
        let (key, value) = assignment
            .split_once('=')
            .unwrap_or((assignment.as_str(), "true"));
        let key = key.trim().trim_start_matches("--");
        if descriptor.field_by_name(key).is_none() {
            return Err(VerbError::UnknownField {
                verb: descriptor.name().to_string(),
                field: key.to_string(),
            });
        }
        debug!(field = key, "assignment");
        raw.insert(key.to_string(), value.to_string());
    }
    Ok(raw)
}

/// Execute the `prefill` command
pub(crate) fn execute_prefill_command(config: &Config, command: &str, json: bool) -> Result<()> {
    let catalog = load_configured_catalog(config)?;
    let instance = prefill_command_line(&catalog, command).map_err(VerblineError::from)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&instance).context("Failed to serialize verb instance")?
        );
        return Ok(());
    }

    println!("{}", instance.verb());
    for (field, value) in instance.values() {
        println!("  {} = {value}", field.identifier);
    }
    Ok(())
}

/// Execute the `validate` command
pub(crate) fn execute_validate_command(config: &Config) -> Result<()> {
    let catalog = load_configured_catalog(config)?;
    let report = VerbValidator::validate_catalog(&catalog);

    println!("{}", report.issues);
    for warning in &report.warnings {
        println!("warning: {warning}");
    }

    report.issues.into_result()?;
    Ok(())
}

/// Execute the `config` command
pub(crate) fn execute_config_command(config: &Config) -> Result<()> {
    match &config.config_path {
        Some(path) => println!("config file: {}", path.display()),
        None => println!("config file: (none)"),
    }
    for (key, (value, source)) in config.effective_config() {
        println!("{key} = {value} ({source})");
    }
    Ok(())
}
