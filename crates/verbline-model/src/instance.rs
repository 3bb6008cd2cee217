use std::collections::BTreeMap;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};
use verbline_utils::VerbError;

use crate::descriptor::VerbDescriptor;
use crate::field::OptionField;
use crate::value::OptionValue;

/// A verb with concrete values assigned to its fields.
///
/// A fresh instance holds `false` for booleans, `0` for numbers and nothing
/// for every other field, overlaid with each field's declared initial value.
/// Fields are addressed by identifier.
#[derive(Debug, Clone)]
pub struct VerbInstance {
    descriptor: Arc<VerbDescriptor>,
    values: BTreeMap<String, OptionValue>,
}

impl VerbInstance {
    pub fn new(descriptor: Arc<VerbDescriptor>) -> Self {
        let values = descriptor
            .fields()
            .iter()
            .filter_map(|field| {
                field
                    .initial
                    .clone()
                    .or_else(|| field.kind.zero_value())
                    .map(|value| (field.identifier.clone(), value))
            })
            .collect();

        Self { descriptor, values }
    }

    pub fn verb(&self) -> &str {
        self.descriptor.name()
    }

    pub fn descriptor(&self) -> &VerbDescriptor {
        &self.descriptor
    }

    pub fn shared_descriptor(&self) -> Arc<VerbDescriptor> {
        Arc::clone(&self.descriptor)
    }

    pub fn get(&self, identifier: &str) -> Option<&OptionValue> {
        self.values.get(identifier)
    }

    /// Assign a value. Any value shape is accepted; the builder degrades
    /// mismatched shapes to their textual form.
    ///
    /// # Errors
    ///
    /// Returns [`VerbError::UnknownField`] if the verb has no such field.
    pub fn set(
        &mut self,
        identifier: &str,
        value: impl Into<OptionValue>,
    ) -> Result<&mut Self, VerbError> {
        self.require_field(identifier)?;
        self.values.insert(identifier.to_string(), value.into());
        Ok(self)
    }

    /// Make a field absent.
    ///
    /// # Errors
    ///
    /// Returns [`VerbError::UnknownField`] if the verb has no such field.
    pub fn clear(&mut self, identifier: &str) -> Result<&mut Self, VerbError> {
        self.require_field(identifier)?;
        self.values.remove(identifier);
        Ok(self)
    }

    /// Fields with their values, in descriptor order. Absent fields are skipped.
    pub fn values(&self) -> impl Iterator<Item = (&OptionField, &OptionValue)> {
        self.descriptor
            .fields()
            .iter()
            .filter_map(|field| self.values.get(&field.identifier).map(|value| (field, value)))
    }

    /// Identifiers of required fields that are absent or blank.
    pub fn missing_required(&self) -> Vec<&str> {
        self.descriptor
            .fields()
            .iter()
            .filter(|field| field.required)
            .filter(|field| self.get(&field.identifier).is_none_or(OptionValue::is_blank))
            .map(|field| field.identifier.as_str())
            .collect()
    }

    fn require_field(&self, identifier: &str) -> Result<&OptionField, VerbError> {
        self.descriptor
            .field(identifier)
            .ok_or_else(|| VerbError::UnknownField {
                verb: self.verb().to_string(),
                field: identifier.to_string(),
            })
    }
}

struct OrderedValues<'a>(&'a VerbInstance);

impl Serialize for OrderedValues<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (field, value) in self.0.values() {
            map.serialize_entry(&field.identifier, value)?;
        }
        map.end()
    }
}

/// Serializes as `{"verb": name, "values": {identifier: value, ...}}` with
/// values in descriptor order.
impl Serialize for VerbInstance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("VerbInstance", 2)?;
        state.serialize_field("verb", self.verb())?;
        state.serialize_field("values", &OrderedValues(self))?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::OptionKind;

    fn build_descriptor() -> Arc<VerbDescriptor> {
        Arc::new(
            VerbDescriptor::builder("build")
                .field(OptionField::flag("noCache", OptionKind::Boolean))
                .field(OptionField::flag("parallel", OptionKind::Integer))
                .field(OptionField::flag("ratio", OptionKind::FloatingPoint))
                .field(OptionField::flag("pull", OptionKind::NullableBoolean))
                .field(OptionField::flag("tags", OptionKind::ListOfString).long("tag"))
                .field(OptionField::flag("platform", OptionKind::String).initial_value("linux"))
                .field(OptionField::positional("context", OptionKind::String, 0).required())
                .build(),
        )
    }

    #[test]
    fn test_fresh_instance_holds_zero_values() {
        let instance = VerbInstance::new(build_descriptor());
        assert_eq!(instance.get("noCache"), Some(&OptionValue::Bool(false)));
        assert_eq!(instance.get("parallel"), Some(&OptionValue::Int(0)));
        assert_eq!(instance.get("ratio"), Some(&OptionValue::Float(0.0)));
        assert_eq!(instance.get("pull"), None);
        assert_eq!(instance.get("tags"), None);
        assert_eq!(instance.get("context"), None);
    }

    #[test]
    fn test_initial_value_overlays_zero() {
        let instance = VerbInstance::new(build_descriptor());
        assert_eq!(instance.get("platform"), Some(&OptionValue::from("linux")));
    }

    #[test]
    fn test_set_unknown_field_fails() {
        let mut instance = VerbInstance::new(build_descriptor());
        let err = instance.set("missing", true).unwrap_err();
        assert_eq!(
            err,
            VerbError::UnknownField {
                verb: "build".to_string(),
                field: "missing".to_string(),
            }
        );
    }

    #[test]
    fn test_set_and_clear() {
        let mut instance = VerbInstance::new(build_descriptor());
        instance.set("tags", vec!["a", "b"]).unwrap().set("noCache", true).unwrap();
        assert_eq!(instance.get("tags"), Some(&OptionValue::list(["a", "b"])));
        instance.clear("tags").unwrap();
        assert_eq!(instance.get("tags"), None);
    }

    #[test]
    fn test_missing_required_counts_blank_as_missing() {
        let mut instance = VerbInstance::new(build_descriptor());
        assert_eq!(instance.missing_required(), ["context"]);
        instance.set("context", "  ").unwrap();
        assert_eq!(instance.missing_required(), ["context"]);
        instance.set("context", ".").unwrap();
        assert!(instance.missing_required().is_empty());
    }

    #[test]
    fn test_serializes_values_in_descriptor_order() {
        let mut instance = VerbInstance::new(build_descriptor());
        instance.set("context", ".").unwrap();
        let json = serde_json::to_string(&instance).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"verb":"build","values":{"noCache":false,"parallel":0,"ratio":0.0,"#,
                r#""platform":"linux","context":"."}}"#
            )
        );
    }
}
