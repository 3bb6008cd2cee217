use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

use crate::value::OptionValue;

/// The closed set of value shapes an option field can hold.
///
/// The kind is fixed when a field is registered and selects the
/// serialization branch in the argument builder and the parsing rule in the
/// pre-fill resolver. Textual names are kebab-case (`list-of-string`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    VariantNames,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum OptionKind {
    Boolean,
    NullableBoolean,
    Integer,
    FloatingPoint,
    String,
    Enum,
    NullableEnum,
    ListOfString,
    ListOfEnum,
    NullableListOfEnum,
}

impl OptionKind {
    /// `boolean` or `nullable-boolean`
    #[must_use]
    pub fn is_boolean(self) -> bool {
        matches!(self, Self::Boolean | Self::NullableBoolean)
    }

    /// Scalar enum kinds (`enum`, `nullable-enum`)
    #[must_use]
    pub fn is_enum(self) -> bool {
        matches!(self, Self::Enum | Self::NullableEnum)
    }

    /// Any of the list kinds
    #[must_use]
    pub fn is_list(self) -> bool {
        matches!(
            self,
            Self::ListOfString | Self::ListOfEnum | Self::NullableListOfEnum
        )
    }

    /// Kinds whose values are enum variant names, scalar or listed
    #[must_use]
    pub fn has_choices(self) -> bool {
        self.is_enum() || matches!(self, Self::ListOfEnum | Self::NullableListOfEnum)
    }

    /// Nullable value kinds: an explicit "unset" state on top of a value type.
    #[must_use]
    pub fn is_nullable(self) -> bool {
        matches!(
            self,
            Self::NullableBoolean | Self::NullableEnum | Self::NullableListOfEnum
        )
    }

    /// The value a freshly constructed instance holds for this kind.
    ///
    /// `false` for booleans, `0` for numbers, absent (`None`) for everything
    /// else.
    #[must_use]
    pub fn zero_value(self) -> Option<OptionValue> {
        match self {
            Self::Boolean => Some(OptionValue::Bool(false)),
            Self::Integer => Some(OptionValue::Int(0)),
            Self::FloatingPoint => Some(OptionValue::Float(0.0)),
            _ => None,
        }
    }

    /// Whether `value` has the shape this kind expects.
    #[must_use]
    pub fn accepts(self, value: &OptionValue) -> bool {
        match (self, value) {
            (Self::Boolean | Self::NullableBoolean, OptionValue::Bool(_)) => true,
            (Self::Integer, OptionValue::Int(_)) => true,
            (Self::FloatingPoint, OptionValue::Float(_) | OptionValue::Int(_)) => true,
            (Self::String | Self::Enum | Self::NullableEnum, OptionValue::Text(_)) => true,
            (k, OptionValue::List(_)) => k.is_list(),
            _ => false,
        }
    }

    /// Rank used by the "by kind" display orders: booleans, enums, integers,
    /// floats, strings, lists of enums, other lists.
    #[must_use]
    pub(crate) fn display_rank(self) -> u8 {
        match self {
            Self::Boolean | Self::NullableBoolean => 1,
            Self::Enum | Self::NullableEnum => 2,
            Self::Integer => 3,
            Self::FloatingPoint => 4,
            Self::String => 5,
            Self::ListOfEnum | Self::NullableListOfEnum => 6,
            Self::ListOfString => 7,
        }
    }
}
