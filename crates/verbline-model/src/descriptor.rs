use std::collections::HashSet;

use tracing::debug;

use crate::field::OptionField;
use crate::order::FieldOrder;

/// A named group of fields shared by several verbs.
#[derive(Debug, Clone, PartialEq)]
pub struct CapabilityContract {
    pub name: String,
    pub fields: Vec<OptionField>,
}

impl CapabilityContract {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, field: OptionField) -> Self {
        self.fields.push(field);
        self
    }
}

/// Static description of a verb: its name and ordered field list.
///
/// The field list is composed once by [`VerbDescriptorBuilder::build`]: the
/// verb's own fields in declaration order, then the fields of each contract
/// in the order the contracts were attached. Fields are de-duplicated by
/// identifier, first occurrence wins.
#[derive(Debug, Clone, PartialEq)]
pub struct VerbDescriptor {
    name: String,
    help: Option<String>,
    contracts: Vec<String>,
    fields: Vec<OptionField>,
}

impl VerbDescriptor {
    pub fn builder(name: impl Into<String>) -> VerbDescriptorBuilder {
        VerbDescriptorBuilder {
            name: name.into(),
            help: None,
            fields: Vec::new(),
            contracts: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Names of the contracts this verb was composed with.
    pub fn contracts(&self) -> &[String] {
        &self.contracts
    }

    pub fn fields(&self) -> &[OptionField] {
        &self.fields
    }

    pub fn field(&self, identifier: &str) -> Option<&OptionField> {
        self.fields.iter().find(|f| f.identifier == identifier)
    }

    /// Look up a field by its resolved name (see [`OptionField::resolved_name`]).
    pub fn field_by_name(&self, name: &str) -> Option<&OptionField> {
        self.fields.iter().find(|f| f.resolved_name() == name)
    }

    /// Look up a flag field by its short name.
    pub fn field_by_short(&self, short: char) -> Option<&OptionField> {
        self.fields.iter().find(|f| f.short_name() == Some(short))
    }

    /// Flag fields in declaration order.
    pub fn flag_fields(&self) -> impl Iterator<Item = &OptionField> {
        self.fields.iter().filter(|f| f.long_name().is_some())
    }

    /// Positional fields sorted by ascending index.
    pub fn positional_fields(&self) -> Vec<&OptionField> {
        let mut positionals: Vec<&OptionField> =
            self.fields.iter().filter(|f| f.is_positional()).collect();
        positionals.sort_by_key(|f| f.index());
        positionals
    }

    /// All fields in the requested display order.
    pub fn ordered_fields(&self, order: FieldOrder) -> Vec<&OptionField> {
        let mut fields: Vec<&OptionField> = self.fields.iter().collect();
        order.sort(&mut fields);
        fields
    }
}

/// Builder for [`VerbDescriptor`].
///
/// # Example
///
/// ```rust
/// use verbline_model::{CapabilityContract, OptionField, OptionKind, VerbDescriptor};
///
/// let output = CapabilityContract::new("output")
///     .field(OptionField::flag("quiet", OptionKind::Boolean).short('q'));
///
/// let descriptor = VerbDescriptor::builder("build")
///     .field(OptionField::flag("noCache", OptionKind::Boolean))
///     .contract(&output)
///     .build();
///
/// let ids: Vec<&str> = descriptor.fields().iter().map(|f| f.identifier.as_str()).collect();
/// assert_eq!(ids, ["noCache", "quiet"]);
/// ```
#[derive(Debug, Clone)]
pub struct VerbDescriptorBuilder {
    name: String,
    help: Option<String>,
    fields: Vec<OptionField>,
    contracts: Vec<CapabilityContract>,
}

impl VerbDescriptorBuilder {
    #[must_use]
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    #[must_use]
    pub fn field(mut self, field: OptionField) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn fields<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = OptionField>,
    {
        self.fields.extend(fields);
        self
    }

    #[must_use]
    pub fn contract(mut self, contract: &CapabilityContract) -> Self {
        self.contracts.push(contract.clone());
        self
    }

    pub fn build(self) -> VerbDescriptor {
        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(self.fields.len());

        let contract_fields = self.contracts.iter().flat_map(|c| c.fields.iter().cloned());
        for field in self.fields.into_iter().chain(contract_fields) {
            if seen.insert(field.identifier.clone()) {
                fields.push(field);
            } else {
                debug!(
                    verb = %self.name,
                    field = %field.identifier,
                    "dropping duplicate field identifier"
                );
            }
        }

        VerbDescriptor {
            name: self.name,
            help: self.help,
            contracts: self.contracts.into_iter().map(|c| c.name).collect(),
            fields,
        }
    }
}
