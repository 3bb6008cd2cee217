use tracing::{debug, trace};
use verbline_model::{OptionField, OptionKind, OptionValue, VerbInstance};
use verbline_utils::quote_if_needed;

use crate::argument_list::ArgumentList;

/// Serializes verb instances into command-line tokens.
///
/// With `include_defaults` off (the default), values equal to a field's
/// declared default are left out, and numeric and boolean fields without a
/// declared default are left out at zero. The builder never mutates its input.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use verbline_builder::ArgumentBuilder;
/// use verbline_model::{OptionField, OptionKind, VerbDescriptor, VerbInstance};
///
/// let descriptor = VerbDescriptor::builder("run")
///     .field(OptionField::flag("image", OptionKind::String).required())
///     .build();
/// let mut instance = VerbInstance::new(Arc::new(descriptor));
/// instance.set("image", "nginx 1.2").unwrap();
///
/// let line = ArgumentBuilder::new().command_string(&instance);
/// assert_eq!(line, "run --image \"nginx 1.2\"");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ArgumentBuilder {
    include_defaults: bool,
}

impl ArgumentBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn include_defaults(mut self, include: bool) -> Self {
        self.include_defaults = include;
        self
    }

    /// Build the argument list for `instance`.
    pub fn arguments(&self, instance: &VerbInstance) -> ArgumentList {
        let descriptor = instance.descriptor();
        let mut args = ArgumentList::new().arg(descriptor.name());

        for field in descriptor.flag_fields() {
            let Some(value) = self.emitted_value(instance, field) else {
                continue;
            };
            let Some(long) = field.long_name() else {
                continue;
            };
            args = flag_tokens(args, field, &long, value);
        }

        for field in descriptor.positional_fields() {
            let Some(value) = self.emitted_value(instance, field) else {
                continue;
            };
            args = match value {
                OptionValue::List(items) => {
                    args.args(items.iter().map(|item| quote_if_needed(item)))
                }
                other => args.arg(quote_if_needed(&other.render(field.separator))),
            };
        }

        debug!(
            verb = descriptor.name(),
            tokens = args.len(),
            include_defaults = self.include_defaults,
            "built argument list"
        );
        args
    }

    /// Ordered token sequence, verb name first.
    pub fn build(&self, instance: &VerbInstance) -> Vec<String> {
        self.arguments(instance).into_tokens()
    }

    /// Tokens joined by single spaces.
    pub fn command_string(&self, instance: &VerbInstance) -> String {
        self.arguments(instance).to_command_string()
    }

    /// Full command line: `executable` (quoted if needed) followed by the
    /// command string.
    pub fn command_line(&self, executable: &str, instance: &VerbInstance) -> String {
        format!(
            "{} {}",
            quote_if_needed(executable),
            self.command_string(instance)
        )
    }

    /// The value to serialize for `field`, or `None` when it is skipped.
    fn emitted_value<'a>(
        &self,
        instance: &'a VerbInstance,
        field: &OptionField,
    ) -> Option<&'a OptionValue> {
        let value = instance.get(&field.identifier)?;
        if value.is_blank() {
            trace!(field = %field.identifier, "skipping blank value");
            return None;
        }
        if !self.include_defaults && field.matches_default(value) {
            trace!(field = %field.identifier, "skipping default value");
            return None;
        }
        Some(value)
    }
}

/// Append the tokens for one flag field.
fn flag_tokens(
    args: ArgumentList,
    field: &OptionField,
    long: &str,
    value: &OptionValue,
) -> ArgumentList {
    match (field.kind, value) {
        (OptionKind::Boolean | OptionKind::NullableBoolean, OptionValue::Bool(set)) => {
            if *set {
                args.switch(long)
            } else {
                args
            }
        }
        (OptionKind::Enum | OptionKind::NullableEnum, OptionValue::Text(variant)) => {
            args.flag(long, variant.to_lowercase())
        }
        (kind, OptionValue::List(items)) if kind.is_list() => {
            args.flag(long, items.join(&field.separator.to_string()))
        }
        (kind, value) => {
            if !kind.accepts(value) {
                debug!(
                    field = %field.identifier,
                    kind = %kind,
                    "value does not match kind, emitting as text"
                );
            }
            args.flag(long, quote_if_needed(&value.render(field.separator)))
        }
    }
}

/// Shorthand for `ArgumentBuilder::new().include_defaults(..).build(..)`.
pub fn build(instance: &VerbInstance, include_defaults: bool) -> Vec<String> {
    ArgumentBuilder::new()
        .include_defaults(include_defaults)
        .build(instance)
}

/// Shorthand for `ArgumentBuilder::new().include_defaults(..).command_string(..)`.
pub fn command_string(instance: &VerbInstance, include_defaults: bool) -> String {
    ArgumentBuilder::new()
        .include_defaults(include_defaults)
        .command_string(instance)
}
