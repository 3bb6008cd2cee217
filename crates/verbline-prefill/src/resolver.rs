use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};
use verbline_model::{
    OptionField, OptionKind, OptionValue, VerbCatalog, VerbDescriptor, VerbInstance,
};
use verbline_utils::VerbError;

/// Case-insensitive `true`/`false`, surrounding whitespace ignored.
pub fn parse_bool(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Populate a fresh instance of `descriptor` from `raw_values`.
///
/// Keys are resolved field names: the long name of a flag, the kebab-case
/// identifier of a positional or unbound field. Fields without a key keep the
/// value a fresh instance holds. Never fails:
///
/// - `boolean`: unparseable text gives `false`
/// - `nullable-boolean`: blank or unparseable text gives absent
/// - `integer`/`floating-point`: unparseable text gives `0`
/// - enum kinds: the raw text as-is; blank text gives absent
/// - list kinds: split on the field's separator; blank text gives an empty list
/// - `string`: the raw text
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use std::sync::Arc;
/// use verbline_model::{OptionField, OptionKind, OptionValue, VerbDescriptor};
/// use verbline_prefill::prefill;
///
/// let add = Arc::new(
///     VerbDescriptor::builder("add")
///         .field(OptionField::flag("files", OptionKind::ListOfString))
///         .build(),
/// );
/// let raw = HashMap::from([("files".to_string(), "a.txt,b.txt".to_string())]);
///
/// let instance = prefill(&add, &raw);
/// assert_eq!(instance.get("files"), Some(&OptionValue::list(["a.txt", "b.txt"])));
/// ```
pub fn prefill(
    descriptor: &Arc<VerbDescriptor>,
    raw_values: &HashMap<String, String>,
) -> VerbInstance {
    let mut instance = VerbInstance::new(Arc::clone(descriptor));

    for field in descriptor.fields() {
        let Some(raw) = raw_values.get(&field.resolved_name()) else {
            continue;
        };

        let result = match parse_raw(field, raw) {
            Some(value) => instance.set(&field.identifier, value).map(drop),
            None => instance.clear(&field.identifier).map(drop),
        };
        if let Err(err) = result {
            warn!(%err, "pre-fill skipped field");
        }
    }

    debug!(
        verb = descriptor.name(),
        keys = raw_values.len(),
        "pre-filled instance"
    );
    instance
}

/// [`prefill`] for a verb looked up by name.
///
/// # Errors
///
/// Returns [`VerbError::UnknownVerb`] if the catalog has no such verb.
pub fn prefill_by_name(
    catalog: &VerbCatalog,
    verb: &str,
    raw_values: &HashMap<String, String>,
) -> Result<VerbInstance, VerbError> {
    let descriptor = catalog.require(verb)?;
    Ok(prefill(descriptor, raw_values))
}

/// Typed value for one raw string, or `None` for absent.
fn parse_raw(field: &OptionField, raw: &str) -> Option<OptionValue> {
    match field.kind {
        OptionKind::Boolean => Some(OptionValue::Bool(parse_bool(raw).unwrap_or(false))),
        OptionKind::NullableBoolean => parse_bool(raw).map(OptionValue::Bool),
        OptionKind::Integer => Some(OptionValue::Int(raw.trim().parse().unwrap_or(0))),
        OptionKind::FloatingPoint => Some(OptionValue::Float(raw.trim().parse().unwrap_or(0.0))),
        OptionKind::Enum | OptionKind::NullableEnum => {
            (!raw.trim().is_empty()).then(|| OptionValue::Text(raw.to_string()))
        }
        OptionKind::ListOfString | OptionKind::ListOfEnum | OptionKind::NullableListOfEnum => {
            if raw.is_empty() {
                Some(OptionValue::List(Vec::new()))
            } else {
                Some(OptionValue::list(raw.split(field.separator)))
            }
        }
        OptionKind::String => Some(OptionValue::Text(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn push_verb() -> Arc<VerbDescriptor> {
        Arc::new(
            VerbDescriptor::builder("push")
                .field(OptionField::flag("force", OptionKind::Boolean).short('f'))
                .field(OptionField::flag("verify", OptionKind::NullableBoolean))
                .field(OptionField::flag("depth", OptionKind::Integer))
                .field(OptionField::flag("ratio", OptionKind::FloatingPoint))
                .field(OptionField::flag("mode", OptionKind::Enum).choices(["fast", "safe"]))
                .field(
                    OptionField::flag("pushOptions", OptionKind::ListOfString)
                        .long("push-option")
                        .separator(';'),
                )
                .field(OptionField::flag("repo", OptionKind::String))
                .field(OptionField::positional("remote", OptionKind::String, 0))
                .build(),
        )
    }

    #[test]
    fn test_list_split_on_separator() {
        let add = Arc::new(
            VerbDescriptor::builder("add")
                .field(OptionField::flag("files", OptionKind::ListOfString))
                .build(),
        );
        let instance = prefill(&add, &raw(&[("files", "a.txt,b.txt")]));
        assert_eq!(
            instance.get("files"),
            Some(&OptionValue::list(["a.txt", "b.txt"]))
        );
    }

    #[test]
    fn test_custom_separator_and_explicit_long_name() {
        let instance = prefill(&push_verb(), &raw(&[("push-option", "ci.skip;merge")]));
        assert_eq!(
            instance.get("pushOptions"),
            Some(&OptionValue::list(["ci.skip", "merge"]))
        );
    }

    #[test]
    fn test_boolean_parsing() {
        let instance = prefill(&push_verb(), &raw(&[("force", " TRUE ")]));
        assert_eq!(instance.get("force"), Some(&OptionValue::Bool(true)));

        let instance = prefill(&push_verb(), &raw(&[("force", "yes")]));
        assert_eq!(instance.get("force"), Some(&OptionValue::Bool(false)));
    }

    #[test]
    fn test_nullable_boolean_tri_state() {
        let verb = push_verb();
        assert_eq!(
            prefill(&verb, &raw(&[("verify", "false")])).get("verify"),
            Some(&OptionValue::Bool(false))
        );
        assert_eq!(
            prefill(&verb, &raw(&[("verify", "True")])).get("verify"),
            Some(&OptionValue::Bool(true))
        );
        assert_eq!(prefill(&verb, &raw(&[("verify", "")])).get("verify"), None);
        assert_eq!(prefill(&verb, &raw(&[("verify", "maybe")])).get("verify"), None);
    }

    #[test]
    fn test_malformed_numbers_degrade_to_zero() {
        let instance = prefill(&push_verb(), &raw(&[("depth", "deep"), ("ratio", "n/a")]));
        assert_eq!(instance.get("depth"), Some(&OptionValue::Int(0)));
        assert_eq!(instance.get("ratio"), Some(&OptionValue::Float(0.0)));

        let instance = prefill(&push_verb(), &raw(&[("depth", "3"), ("ratio", "0.5")]));
        assert_eq!(instance.get("depth"), Some(&OptionValue::Int(3)));
        assert_eq!(instance.get("ratio"), Some(&OptionValue::Float(0.5)));
    }

    #[test]
    fn test_enum_keeps_raw_case() {
        let instance = prefill(&push_verb(), &raw(&[("mode", "FAST")]));
        assert_eq!(instance.get("mode"), Some(&OptionValue::from("FAST")));
    }

    #[test]
    fn test_empty_raw_list_is_empty_list() {
        let instance = prefill(&push_verb(), &raw(&[("push-option", "")]));
        assert_eq!(instance.get("pushOptions"), Some(&OptionValue::List(vec![])));
    }

    #[test]
    fn test_positional_keyed_by_kebab_identifier() {
        let instance = prefill(&push_verb(), &raw(&[("remote", "origin")]));
        assert_eq!(instance.get("remote"), Some(&OptionValue::from("origin")));
    }

    #[test]
    fn test_unmatched_keys_are_ignored() {
        let instance = prefill(&push_verb(), &raw(&[("pushOptions", "x"), ("unknown", "y")]));
        assert_eq!(instance.get("pushOptions"), None);
        assert_eq!(instance.get("force"), Some(&OptionValue::Bool(false)));
    }

    #[test]
    fn test_prefill_by_name_unknown_verb() {
        let catalog = VerbCatalog::new();
        let err = prefill_by_name(&catalog, "push", &HashMap::new()).unwrap_err();
        assert_eq!(
            err,
            VerbError::UnknownVerb {
                name: "push".to_string()
            }
        );
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("False"), Some(false));
        assert_eq!(parse_bool("1"), None);
        assert_eq!(parse_bool(""), None);
    }
}
