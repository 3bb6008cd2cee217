use std::collections::HashMap;

use tracing::debug;
use verbline_model::{OptionField, VerbCatalog, VerbDescriptor, VerbInstance};
use verbline_utils::{VerbError, split_quoted, unquote};

use crate::resolver::prefill;

/// A captured command line resolved against a catalog: the verb name plus
/// the raw value of every field it mentions, keyed by resolved field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub verb: String,
    pub values: HashMap<String, String>,
}

/// Split a joined command string into unquoted tokens.
///
/// This is the inverse of the builder's quoting: spaces separate tokens,
/// `\"` is the only escape inside double quotes and backslashes are
/// otherwise literal, so Windows paths survive unchanged.
///
/// # Errors
///
/// Returns [`VerbError::InvalidCommandLine`] on an unterminated quote.
pub fn split_command_line(line: &str) -> Result<Vec<String>, VerbError> {
    split_quoted(line).ok_or_else(|| VerbError::InvalidCommandLine {
        reason: "missing closing quote".to_string(),
    })
}

/// Recover the verb name and raw value map from a token list.
///
/// The first token names the verb. `--long`, `--long=value` and `-s` select a
/// field; boolean fields take no value token and read as `"true"`, every
/// other field consumes the next token. Other tokens, including negative
/// numbers such as `-5`, fill positional fields in index order, a list
/// positional taking all remaining ones. Quotes added by the builder are
/// removed. Unknown flags and surplus positional tokens are skipped.
///
/// # Errors
///
/// Returns [`VerbError::InvalidCommandLine`] for an empty token list and
/// [`VerbError::UnknownVerb`] if the first token is not a registered verb.
pub fn parse_invocation<S: AsRef<str>>(
    catalog: &VerbCatalog,
    tokens: &[S],
) -> Result<Invocation, VerbError> {
    parse_tokens(catalog, tokens, unquote)
}

/// [`parse_invocation`] followed by [`prefill`].
///
/// # Errors
///
/// See [`parse_invocation`].
pub fn prefill_invocation<S: AsRef<str>>(
    catalog: &VerbCatalog,
    tokens: &[S],
) -> Result<VerbInstance, VerbError> {
    let invocation = parse_invocation(catalog, tokens)?;
    prefill_parsed(catalog, &invocation)
}

/// [`split_command_line`] followed by [`prefill_invocation`].
///
/// # Errors
///
/// See [`split_command_line`] and [`parse_invocation`].
pub fn prefill_command_line(catalog: &VerbCatalog, line: &str) -> Result<VerbInstance, VerbError> {
    let tokens = split_command_line(line)?;
    // Splitting already removed the quotes.
    let invocation = parse_tokens(catalog, &tokens, str::to_string)?;
    prefill_parsed(catalog, &invocation)
}

fn prefill_parsed(
    catalog: &VerbCatalog,
    invocation: &Invocation,
) -> Result<VerbInstance, VerbError> {
    let descriptor = catalog.require(&invocation.verb)?;
    Ok(prefill(descriptor, &invocation.values))
}

/// Token walk shared by the quoted-token and split-line paths; `value_of`
/// turns a value token into its raw value.
fn parse_tokens<S, F>(
    catalog: &VerbCatalog,
    tokens: &[S],
    value_of: F,
) -> Result<Invocation, VerbError>
where
    S: AsRef<str>,
    F: Fn(&str) -> String,
{
    let (verb, rest) = tokens
        .split_first()
        .ok_or_else(|| VerbError::InvalidCommandLine {
            reason: "no verb given".to_string(),
        })?;
    let descriptor = catalog.require(verb.as_ref())?;

    let mut values = HashMap::new();
    let mut bare = Vec::new();
    let mut rest = rest.iter().map(|token| token.as_ref());

    while let Some(token) = rest.next() {
        if !is_flag_shaped(token) {
            bare.push(value_of(token));
            continue;
        }
        let Some((field, inline)) = flag_field(descriptor, token) else {
            debug!(verb = descriptor.name(), token, "ignoring unknown flag");
            continue;
        };

        let value = match inline {
            Some(value) => value_of(value),
            None if field.kind.is_boolean() => "true".to_string(),
            None => rest.next().map(&value_of).unwrap_or_default(),
        };
        values.insert(field.resolved_name(), value);
    }

    assign_positionals(descriptor, bare, &mut values);

    Ok(Invocation {
        verb: descriptor.name().to_string(),
        values,
    })
}

/// `--name`, `--name=value`, or `-` followed by one non-digit character.
fn is_flag_shaped(token: &str) -> bool {
    if token.starts_with("--") {
        return true;
    }
    let mut chars = token.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some('-'), Some(c), None) if !c.is_ascii_digit()
    )
}

/// The field a `--long`, `--long=value` or `-s` token refers to.
fn flag_field<'d, 't>(
    descriptor: &'d VerbDescriptor,
    token: &'t str,
) -> Option<(&'d OptionField, Option<&'t str>)> {
    if let Some(name) = token.strip_prefix("--") {
        let (name, inline) = match name.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (name, None),
        };
        return descriptor
            .flag_fields()
            .find(|f| f.long_name().as_deref() == Some(name))
            .map(|f| (f, inline));
    }

    let short = token.strip_prefix('-')?;
    let mut chars = short.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => descriptor.field_by_short(c).map(|f| (f, None)),
        _ => None,
    }
}

fn assign_positionals(
    descriptor: &VerbDescriptor,
    bare: Vec<String>,
    values: &mut HashMap<String, String>,
) {
    let mut bare = bare.into_iter();
    for field in descriptor.positional_fields() {
        if field.kind.is_list() {
            let items: Vec<String> = bare.by_ref().collect();
            if !items.is_empty() {
                values.insert(field.resolved_name(), items.join(&field.separator.to_string()));
            }
            break;
        }
        match bare.next() {
            Some(value) => {
                values.insert(field.resolved_name(), value);
            }
            None => break,
        }
    }

    let surplus = bare.count();
    if surplus > 0 {
        debug!(verb = descriptor.name(), surplus, "ignoring surplus positional values");
    }
}
