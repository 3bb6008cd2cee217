use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use verbline_utils::kebab;

use crate::kind::OptionKind;
use crate::value::OptionValue;

/// Separator used to join and split list values when a field declares none.
pub const DEFAULT_SEPARATOR: char = ',';

/// How a field appears on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Binding {
    /// `--long value`; the long name defaults to the kebab-case identifier.
    Flag {
        long: Option<String>,
        short: Option<char>,
    },
    /// Bare value emitted after all flags, ordered by `index`.
    Positional { index: u32 },
}

/// What a path-valued field points at. Informational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PathKind {
    #[default]
    Any,
    File,
    Directory,
}

/// Path hint attached to a string field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathHint {
    pub kind: PathKind,
    pub filter: String,
}

impl Default for PathHint {
    fn default() -> Self {
        Self {
            kind: PathKind::Any,
            filter: "All Files|*.*".to_string(),
        }
    }
}

/// A single option of a verb, with its command-line binding and metadata.
///
/// Fields without a binding are "unbound": they are valid model state but are
/// never serialized.
///
/// # Example
///
/// ```rust
/// use verbline_model::{OptionField, OptionKind};
///
/// let tags = OptionField::flag("tags", OptionKind::ListOfString)
///     .long("tag")
///     .short('t')
///     .separator(';');
/// assert_eq!(tags.long_name().as_deref(), Some("tag"));
/// assert_eq!(tags.short_name(), Some('t'));
///
/// let no_cache = OptionField::flag("noCache", OptionKind::Boolean);
/// assert_eq!(no_cache.long_name().as_deref(), Some("no-cache"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionField {
    pub identifier: String,
    pub kind: OptionKind,
    pub binding: Option<Binding>,
    pub required: bool,
    pub default: Option<OptionValue>,
    pub initial: Option<OptionValue>,
    pub separator: char,
    pub help: Option<String>,
    pub choices: Vec<String>,
    pub path: Option<PathHint>,
}

impl OptionField {
    fn new(identifier: impl Into<String>, kind: OptionKind, binding: Option<Binding>) -> Self {
        Self {
            identifier: identifier.into(),
            kind,
            binding,
            required: false,
            default: None,
            initial: None,
            separator: DEFAULT_SEPARATOR,
            help: None,
            choices: Vec::new(),
            path: None,
        }
    }

    /// A `--flag` field. Long name derived from the identifier until
    /// [`long`](Self::long) overrides it.
    pub fn flag(identifier: impl Into<String>, kind: OptionKind) -> Self {
        Self::new(
            identifier,
            kind,
            Some(Binding::Flag {
                long: None,
                short: None,
            }),
        )
    }

    pub fn positional(identifier: impl Into<String>, kind: OptionKind, index: u32) -> Self {
        Self::new(identifier, kind, Some(Binding::Positional { index }))
    }

    pub fn unbound(identifier: impl Into<String>, kind: OptionKind) -> Self {
        Self::new(identifier, kind, None)
    }

    /// Set an explicit long name. Turns an unbound field into a flag.
    #[must_use]
    pub fn long(mut self, name: impl Into<String>) -> Self {
        let name = Some(name.into());
        match &mut self.binding {
            Some(Binding::Flag { long, .. }) => *long = name,
            _ => {
                self.binding = Some(Binding::Flag {
                    long: name,
                    short: None,
                })
            }
        }
        self
    }

    /// Set a short name. Turns an unbound field into a flag.
    #[must_use]
    pub fn short(mut self, name: char) -> Self {
        match &mut self.binding {
            Some(Binding::Flag { short, .. }) => *short = Some(name),
            _ => {
                self.binding = Some(Binding::Flag {
                    long: None,
                    short: Some(name),
                })
            }
        }
        self
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<OptionValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    #[must_use]
    pub fn initial_value(mut self, value: impl Into<OptionValue>) -> Self {
        self.initial = Some(value.into());
        self
    }

    #[must_use]
    pub fn separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    #[must_use]
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    #[must_use]
    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn path(mut self, kind: PathKind) -> Self {
        self.path = Some(PathHint {
            kind,
            ..PathHint::default()
        });
        self
    }

    #[must_use]
    pub fn path_filter(mut self, filter: impl Into<String>) -> Self {
        let hint = self.path.get_or_insert_with(PathHint::default);
        hint.filter = filter.into();
        self
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    pub fn is_positional(&self) -> bool {
        matches!(self.binding, Some(Binding::Positional { .. }))
    }

    /// Resolved long name for flag fields: the explicit name, else the
    /// kebab-case identifier. `None` for positional and unbound fields.
    pub fn long_name(&self) -> Option<String> {
        match &self.binding {
            Some(Binding::Flag { long, .. }) => {
                Some(long.clone().unwrap_or_else(|| kebab(&self.identifier)))
            }
            _ => None,
        }
    }

    pub fn short_name(&self) -> Option<char> {
        match &self.binding {
            Some(Binding::Flag { short, .. }) => *short,
            _ => None,
        }
    }

    pub fn index(&self) -> Option<u32> {
        match &self.binding {
            Some(Binding::Positional { index }) => Some(*index),
            _ => None,
        }
    }

    /// The name the pre-fill resolver keys raw values by: the long name of a
    /// flag, the kebab-case identifier otherwise.
    pub fn resolved_name(&self) -> String {
        self.long_name().unwrap_or_else(|| kebab(&self.identifier))
    }

    /// The declared default, or the kind's zero value when none is declared.
    ///
    /// Numeric and boolean kinds cannot distinguish "unset" from zero, so zero
    /// acts as their implicit default.
    pub fn effective_default(&self) -> Option<OptionValue> {
        self.default.clone().or_else(|| self.kind.zero_value())
    }

    /// Whether `value` equals this field's effective default.
    ///
    /// Enum kinds compare variant names case-insensitively.
    pub fn matches_default(&self, value: &OptionValue) -> bool {
        self.effective_default()
            .is_some_and(|default| same_value(self.kind, value, &default))
    }
}

fn same_value(kind: OptionKind, left: &OptionValue, right: &OptionValue) -> bool {
    match (left, right) {
        (OptionValue::Text(a), OptionValue::Text(b)) if kind.has_choices() => {
            a.eq_ignore_ascii_case(b)
        }
        (OptionValue::List(a), OptionValue::List(b)) if kind.has_choices() => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.eq_ignore_ascii_case(y))
        }
        (OptionValue::Int(a), OptionValue::Float(b))
        | (OptionValue::Float(b), OptionValue::Int(a)) => (*a as f64) == *b,
        _ => left == right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_name_defaults_to_kebab_identifier() {
        let field = OptionField::flag("noCache", OptionKind::Boolean);
        assert_eq!(field.long_name().as_deref(), Some("no-cache"));
        assert_eq!(field.resolved_name(), "no-cache");
    }

    #[test]
    fn test_explicit_long_name_wins() {
        let field = OptionField::flag("tags", OptionKind::ListOfString).long("tag");
        assert_eq!(field.long_name().as_deref(), Some("tag"));
    }

    #[test]
    fn test_positional_has_no_long_name() {
        let field = OptionField::positional("context", OptionKind::String, 0);
        assert_eq!(field.long_name(), None);
        assert_eq!(field.index(), Some(0));
        assert_eq!(field.resolved_name(), "context");
    }

    #[test]
    fn test_unbound_field() {
        let field = OptionField::unbound("scratch", OptionKind::String);
        assert!(!field.is_bound());
        assert_eq!(field.long_name(), None);
        assert_eq!(field.short_name(), None);
    }

    #[test]
    fn test_short_on_unbound_makes_flag() {
        let field = OptionField::unbound("quiet", OptionKind::Boolean).short('q');
        assert_eq!(field.short_name(), Some('q'));
        assert_eq!(field.long_name().as_deref(), Some("quiet"));
    }

    #[test]
    fn test_numeric_zero_is_implicit_default() {
        let field = OptionField::flag("parallel", OptionKind::Integer);
        assert!(field.matches_default(&OptionValue::Int(0)));
        assert!(!field.matches_default(&OptionValue::Int(2)));

        let flag = OptionField::flag("noCache", OptionKind::Boolean);
        assert!(flag.matches_default(&OptionValue::Bool(false)));
        assert!(!flag.matches_default(&OptionValue::Bool(true)));
    }

    #[test]
    fn test_string_without_default_never_matches() {
        let field = OptionField::flag("file", OptionKind::String);
        assert!(!field.matches_default(&OptionValue::from("")));
    }

    #[test]
    fn test_enum_default_compares_case_insensitively() {
        let field = OptionField::flag("progress", OptionKind::Enum)
            .choices(["Auto", "Plain", "Tty"])
            .default_value("Auto");
        assert!(field.matches_default(&OptionValue::from("auto")));
        assert!(!field.matches_default(&OptionValue::from("plain")));
    }

    #[test]
    fn test_string_default_compares_exactly() {
        let field = OptionField::flag("platform", OptionKind::String).default_value("Linux");
        assert!(!field.matches_default(&OptionValue::from("linux")));
        assert!(field.matches_default(&OptionValue::from("Linux")));
    }

    #[test]
    fn test_path_hint_defaults() {
        let field = OptionField::flag("file", OptionKind::String).path(PathKind::File);
        let hint = field.path.expect("path hint set");
        assert_eq!(hint.kind, PathKind::File);
        assert_eq!(hint.filter, "All Files|*.*");
    }
}
