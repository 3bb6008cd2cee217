//! Declarative TOML verb catalogs
//!
//! ```toml
//! [[contract]]
//! name = "output"
//! [[contract.field]]
//! id = "quiet"
//! kind = "boolean"
//! short = "q"
//!
//! [[verb]]
//! name = "build"
//! help = "Build an image from a Dockerfile"
//! contracts = ["output"]
//! [[verb.field]]
//! id = "tags"
//! kind = "list-of-string"
//! long = "tag"
//! short = "t"
//! ```
//!
//! Field keys: `id`, `kind`, `long`, `short`, `index`, `unbound`, `required`,
//! `default`, `initial`, `separator`, `help`, `choices`, `path`, `filter`.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};
use verbline_model::{
    CapabilityContract, OptionField, OptionKind, OptionValue, PathKind, VerbCatalog,
    VerbDescriptor,
};
use verbline_utils::{CatalogError, VerbError, VerblineError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    contract: Vec<ContractTable>,
    #[serde(default)]
    verb: Vec<VerbTable>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ContractTable {
    name: String,
    #[serde(default)]
    field: Vec<FieldTable>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct VerbTable {
    name: String,
    help: Option<String>,
    #[serde(default)]
    contracts: Vec<String>,
    #[serde(default)]
    field: Vec<FieldTable>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldTable {
    id: String,
    kind: String,
    long: Option<String>,
    short: Option<String>,
    index: Option<u32>,
    #[serde(default)]
    unbound: bool,
    #[serde(default)]
    required: bool,
    default: Option<toml::Value>,
    initial: Option<toml::Value>,
    separator: Option<String>,
    help: Option<String>,
    #[serde(default)]
    choices: Vec<String>,
    path: Option<String>,
    filter: Option<String>,
}

/// Load a catalog file from disk.
///
/// # Errors
///
/// [`CatalogError::NotFound`] if the file does not exist, plus everything
/// [`parse_catalog`] reports.
pub fn load_catalog(path: &Path) -> Result<VerbCatalog, VerblineError> {
    if !path.exists() {
        return Err(CatalogError::NotFound {
            path: path.display().to_string(),
        }
        .into());
    }
    let text = std::fs::read_to_string(path)?;
    let catalog = parse_catalog(&text)?;
    info!(path = %path.display(), verbs = catalog.len(), "loaded verb catalog");
    Ok(catalog)
}

/// Parse catalog TOML into a registry.
///
/// Contract fields are composed into each verb at this point.
///
/// # Errors
///
/// [`CatalogError`] for malformed TOML, unknown kinds and values that do not
/// fit their kind; [`VerbError`] for unknown contracts and duplicate verbs.
pub fn parse_catalog(text: &str) -> Result<VerbCatalog, VerblineError> {
    let file: CatalogFile =
        toml::from_str(text).map_err(|err| CatalogError::InvalidFile(err.to_string()))?;

    let mut contracts = HashMap::new();
    for table in file.contract {
        let mut contract = CapabilityContract::new(&table.name);
        for field in table.field {
            contract = contract.field(field_from_table(&table.name, field)?);
        }
        if contracts.insert(table.name.clone(), contract).is_some() {
            return Err(CatalogError::InvalidFile(format!(
                "contract '{}' is declared more than once",
                table.name
            ))
            .into());
        }
    }

    let mut catalog = VerbCatalog::new();
    for table in file.verb {
        let mut builder = VerbDescriptor::builder(&table.name);
        if let Some(help) = &table.help {
            builder = builder.help(help);
        }
        for field in table.field {
            builder = builder.field(field_from_table(&table.name, field)?);
        }
        for name in &table.contracts {
            let contract = contracts.get(name).ok_or_else(|| VerbError::UnknownContract {
                verb: table.name.clone(),
                contract: name.clone(),
            })?;
            builder = builder.contract(contract);
        }
        catalog.register(builder.build())?;
    }

    debug!(verbs = catalog.len(), contracts = contracts.len(), "parsed catalog");
    Ok(catalog)
}

fn field_from_table(owner: &str, table: FieldTable) -> Result<OptionField, CatalogError> {
    let invalid = |reason: String| CatalogError::InvalidValue {
        owner: owner.to_string(),
        field: table.id.clone(),
        reason,
    };

    let kind: OptionKind = table.kind.parse().map_err(|_| CatalogError::UnknownKind {
        owner: owner.to_string(),
        field: table.id.clone(),
        kind: table.kind.clone(),
    })?;

    let named = table.long.is_some() || table.short.is_some();
    let mut field = match (table.index, table.unbound) {
        (Some(_), true) => return Err(invalid("`index` and `unbound` are exclusive".to_string())),
        (Some(_), false) if named => {
            return Err(invalid("positional fields take no `long` or `short`".to_string()));
        }
        (Some(index), false) => OptionField::positional(&table.id, kind, index),
        (None, true) if named => {
            return Err(invalid("unbound fields take no `long` or `short`".to_string()));
        }
        (None, true) => OptionField::unbound(&table.id, kind),
        (None, false) => OptionField::flag(&table.id, kind),
    };

    if let Some(long) = &table.long {
        field = field.long(long);
    }
    if let Some(short) = &table.short {
        field = field.short(single_char(short).ok_or_else(|| {
            invalid(format!("`short` must be one character, got '{short}'"))
        })?);
    }
    if let Some(separator) = &table.separator {
        field = field.separator(single_char(separator).ok_or_else(|| {
            invalid(format!("`separator` must be one character, got '{separator}'"))
        })?);
    }
    if table.required {
        field = field.required();
    }
    if let Some(value) = &table.default {
        let value = coerce(kind, value).map_err(|r| invalid(format!("default: {r}")))?;
        field = field.default_value(value);
    }
    if let Some(value) = &table.initial {
        let value = coerce(kind, value).map_err(|r| invalid(format!("initial: {r}")))?;
        field = field.initial_value(value);
    }
    if let Some(help) = &table.help {
        field = field.help(help);
    }
    if !table.choices.is_empty() {
        field = field.choices(table.choices.iter().cloned());
    }
    if let Some(path) = &table.path {
        let path_kind: PathKind = path
            .parse()
            .map_err(|_| invalid(format!("unknown path kind '{path}'")))?;
        field = field.path(path_kind);
    }
    if let Some(filter) = &table.filter {
        field = field.path_filter(filter);
    }

    Ok(field)
}

fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Convert a TOML value to the shape `kind` expects.
fn coerce(kind: OptionKind, value: &toml::Value) -> Result<OptionValue, String> {
    use toml::Value;

    match (kind, value) {
        (OptionKind::Boolean | OptionKind::NullableBoolean, Value::Boolean(b)) => {
            Ok(OptionValue::Bool(*b))
        }
        (OptionKind::Integer, Value::Integer(i)) => Ok(OptionValue::Int(*i)),
        (OptionKind::FloatingPoint, Value::Float(f)) => Ok(OptionValue::Float(*f)),
        (OptionKind::FloatingPoint, Value::Integer(i)) => Ok(OptionValue::Float(*i as f64)),
        (OptionKind::String | OptionKind::Enum | OptionKind::NullableEnum, Value::String(s)) => {
            Ok(OptionValue::Text(s.clone()))
        }
        (kind, Value::Array(items)) if kind.is_list() => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| format!("list items must be strings, got {}", item.type_str()))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(OptionValue::List),
        (kind, other) => Err(format!(
            "a {} value does not fit kind {kind}",
            other.type_str()
        )),
    }
}
