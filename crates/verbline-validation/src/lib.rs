//! Validation suite for verb descriptor sets
//!
//! Offline checks that catch descriptor bugs before a catalog ships: fields
//! that are not zero on creation, fields with no command-line binding,
//! colliding names or positional indices, and defaults that do not fit their
//! kind. Checks never fail; they return human-readable issue strings.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use tracing::{debug, warn};
use verbline_model::{OptionField, OptionValue, VerbCatalog, VerbDescriptor, VerbInstance};
use verbline_utils::VerblineError;

/// Issues reported by one or more checks. Empty means pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    issues: Vec<String>,
}

impl ValidationResult {
    pub fn new(issues: Vec<String>) -> Self {
        Self { issues }
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[String] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<String> {
        self.issues
    }

    /// `Ok(())` when valid, otherwise [`VerblineError::ValidationFailed`].
    ///
    /// # Errors
    ///
    /// Returns [`VerblineError::ValidationFailed`] carrying every issue.
    pub fn into_result(self) -> Result<(), VerblineError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(VerblineError::ValidationFailed {
                issue_count: self.issues.len(),
                issues: self.issues,
            })
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return f.write_str("All validations passed");
        }
        write!(
            f,
            "Validation failed with {} issue(s):\n{}",
            self.issues.len(),
            self.issues.join("\n")
        )
    }
}

/// Failures plus advisory warnings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub issues: ValidationResult,
    pub warnings: Vec<String>,
}

/// Static checks over a set of verb descriptors.
pub struct VerbValidator;

impl VerbValidator {
    /// Every field of a fresh instance must hold its kind's zero value:
    /// `false`, `0`, or absent.
    pub fn validate_zero_on_creation(descriptors: &[Arc<VerbDescriptor>]) -> ValidationResult {
        let mut issues = Vec::new();

        for descriptor in descriptors {
            let instance = VerbInstance::new(Arc::clone(descriptor));
            for field in descriptor.fields() {
                let value = instance.get(&field.identifier);
                match (field.kind.zero_value(), value) {
                    (Some(zero), Some(value)) if *value != zero => issues.push(format!(
                        "{}.{} is not default value on creation (was: {value})",
                        descriptor.name(),
                        field.identifier
                    )),
                    (None, Some(value)) => issues.push(format!(
                        "{}.{} is not absent on creation (was: {value})",
                        descriptor.name(),
                        field.identifier
                    )),
                    _ => {}
                }
            }
        }

        ValidationResult::new(issues)
    }

    /// Every field must carry flag naming or a positional index.
    pub fn validate_bindings(descriptors: &[Arc<VerbDescriptor>]) -> ValidationResult {
        let issues = descriptors
            .iter()
            .flat_map(|descriptor| {
                descriptor
                    .fields()
                    .iter()
                    .filter(|field| !field.is_bound())
                    .map(move |field| {
                        format!(
                            "{}.{} is missing a flag name or positional index",
                            descriptor.name(),
                            field.identifier
                        )
                    })
            })
            .collect();

        ValidationResult::new(issues)
    }

    /// Short names unique per verb.
    pub fn validate_short_names(descriptors: &[Arc<VerbDescriptor>]) -> ValidationResult {
        let mut issues = Vec::new();
        for descriptor in descriptors {
            let keyed = descriptor
                .fields()
                .iter()
                .filter_map(|f| f.short_name().map(|short| (short, f)));
            for (short, fields) in duplicates(keyed) {
                issues.push(format!(
                    "{}: Duplicate short name '-{short}' on fields: {}",
                    descriptor.name(),
                    identifiers(&fields)
                ));
            }
        }
        ValidationResult::new(issues)
    }

    /// Resolved long names (explicit or derived) unique per verb.
    pub fn validate_long_names(descriptors: &[Arc<VerbDescriptor>]) -> ValidationResult {
        let mut issues = Vec::new();
        for descriptor in descriptors {
            let keyed = descriptor
                .fields()
                .iter()
                .filter_map(|f| f.long_name().map(|long| (long, f)));
            for (long, fields) in duplicates(keyed) {
                issues.push(format!(
                    "{}: Duplicate long name '--{long}' on fields: {}",
                    descriptor.name(),
                    identifiers(&fields)
                ));
            }
        }
        ValidationResult::new(issues)
    }

    /// Positional indices unique per verb.
    pub fn validate_positional_indices(descriptors: &[Arc<VerbDescriptor>]) -> ValidationResult {
        let mut issues = Vec::new();
        for descriptor in descriptors {
            let keyed = descriptor
                .fields()
                .iter()
                .filter_map(|f| f.index().map(|index| (index, f)));
            for (index, fields) in duplicates(keyed) {
                issues.push(format!(
                    "{}: Duplicate positional index '{index}' on fields: {}",
                    descriptor.name(),
                    identifiers(&fields)
                ));
            }
        }
        ValidationResult::new(issues)
    }

    /// Short names, long names and positional indices, in that order.
    pub fn validate_no_duplicates(descriptors: &[Arc<VerbDescriptor>]) -> ValidationResult {
        let mut issues = Self::validate_short_names(descriptors).into_issues();
        issues.extend(Self::validate_long_names(descriptors).into_issues());
        issues.extend(Self::validate_positional_indices(descriptors).into_issues());
        ValidationResult::new(issues)
    }

    /// Declared defaults must fit the field kind, and enum defaults must be
    /// among the declared choices (ignoring case) when choices are given.
    pub fn validate_declared_defaults(descriptors: &[Arc<VerbDescriptor>]) -> ValidationResult {
        let mut issues = Vec::new();

        for descriptor in descriptors {
            for field in descriptor.fields() {
                let Some(default) = &field.default else {
                    continue;
                };
                if !field.kind.accepts(default) {
                    issues.push(format!(
                        "{}.{} declares default '{default}' which does not fit kind {}",
                        descriptor.name(),
                        field.identifier,
                        field.kind
                    ));
                    continue;
                }
                if let Some(unknown) = unknown_choice(field, default) {
                    issues.push(format!(
                        "{}.{} declares default '{unknown}' which is not one of: {}",
                        descriptor.name(),
                        field.identifier,
                        field.choices.join(", ")
                    ));
                }
            }
        }

        ValidationResult::new(issues)
    }

    /// Required fields of a nullable value kind. Advisory only.
    pub fn required_nullable_warnings(descriptors: &[Arc<VerbDescriptor>]) -> Vec<String> {
        descriptors
            .iter()
            .flat_map(|descriptor| {
                descriptor
                    .fields()
                    .iter()
                    .filter(|field| field.required && field.kind.is_nullable())
                    .map(move |field| {
                        format!(
                            "{}.{} is required but has nullable kind {}",
                            descriptor.name(),
                            field.identifier,
                            field.kind
                        )
                    })
            })
            .collect()
    }

    /// Every failing check concatenated: bindings, duplicates, zero on
    /// creation, declared defaults.
    pub fn validate_all(descriptors: &[Arc<VerbDescriptor>]) -> ValidationResult {
        let mut issues = Self::validate_bindings(descriptors).into_issues();
        issues.extend(Self::validate_no_duplicates(descriptors).into_issues());
        issues.extend(Self::validate_zero_on_creation(descriptors).into_issues());
        issues.extend(Self::validate_declared_defaults(descriptors).into_issues());

        debug!(
            verbs = descriptors.len(),
            issues = issues.len(),
            "validated descriptors"
        );
        ValidationResult::new(issues)
    }

    /// [`validate_all`](Self::validate_all) plus warnings, which are also
    /// logged.
    pub fn validate_report(descriptors: &[Arc<VerbDescriptor>]) -> ValidationReport {
        let warnings = Self::required_nullable_warnings(descriptors);
        for warning in &warnings {
            warn!("{warning}");
        }
        ValidationReport {
            issues: Self::validate_all(descriptors),
            warnings,
        }
    }

    /// [`validate_report`](Self::validate_report) over every verb in a catalog.
    pub fn validate_catalog(catalog: &VerbCatalog) -> ValidationReport {
        Self::validate_report(catalog.descriptors())
    }
}

/// Groups of fields sharing a key, in order of first occurrence. Only groups
/// with more than one field are returned.
fn duplicates<'a, K, I>(keyed: I) -> Vec<(K, Vec<&'a OptionField>)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = (K, &'a OptionField)>,
{
    let mut position: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&OptionField>)> = Vec::new();

    for (key, field) in keyed {
        match position.get(&key) {
            Some(&at) => groups[at].1.push(field),
            None => {
                position.insert(key.clone(), groups.len());
                groups.push((key, vec![field]));
            }
        }
    }

    groups.retain(|(_, fields)| fields.len() > 1);
    groups
}

fn identifiers(fields: &[&OptionField]) -> String {
    fields
        .iter()
        .map(|f| f.identifier.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// First enum value in `default` that is not a declared choice.
fn unknown_choice<'v>(field: &OptionField, default: &'v OptionValue) -> Option<&'v str> {
    if !field.kind.has_choices() || field.choices.is_empty() {
        return None;
    }
    let known = |value: &str| field.choices.iter().any(|c| c.eq_ignore_ascii_case(value));

    match default {
        OptionValue::Text(value) if !known(value) => Some(value),
        OptionValue::List(items) => items.iter().map(String::as_str).find(|item| !known(item)),
        _ => None,
    }
}
