//! Host hooks around a verb invocation
//!
//! A [`DefaultPolicy`] fills in values before an instance is serialized; a
//! [`PostAction`] observes the outcome after the host has executed the
//! command line. Neither is invoked by the builder itself.

use crate::instance::VerbInstance;
use crate::value::OptionValue;

/// Mutates an instance before serialization, typically filling absent
/// fields. Plain closures `Fn(VerbInstance) -> VerbInstance` qualify.
pub trait DefaultPolicy {
    fn apply_defaults(&self, instance: VerbInstance) -> VerbInstance;
}

impl<F> DefaultPolicy for F
where
    F: Fn(VerbInstance) -> VerbInstance,
{
    fn apply_defaults(&self, instance: VerbInstance) -> VerbInstance {
        self(instance)
    }
}

/// Fills every absent or blank field with its declared default.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredDefaults;

impl DefaultPolicy for DeclaredDefaults {
    fn apply_defaults(&self, mut instance: VerbInstance) -> VerbInstance {
        let fills: Vec<(String, OptionValue)> = instance
            .descriptor()
            .fields()
            .iter()
            .filter(|field| instance.get(&field.identifier).is_none_or(OptionValue::is_blank))
            .filter_map(|field| {
                field
                    .default
                    .clone()
                    .map(|default| (field.identifier.clone(), default))
            })
            .collect();

        for (identifier, value) in fills {
            if let Err(err) = instance.set(&identifier, value) {
                tracing::warn!("skipping default: {err}");
            }
        }
        instance
    }
}

/// What the host observed when it ran a command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutcome {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Runs after the host has executed a verb's command line.
pub trait PostAction: Send + Sync {
    fn after_run(&self, instance: &VerbInstance, outcome: &RunOutcome);
}

impl<F> PostAction for F
where
    F: Fn(&VerbInstance, &RunOutcome) + Send + Sync,
{
    fn after_run(&self, instance: &VerbInstance, outcome: &RunOutcome) {
        self(instance, outcome)
    }
}
