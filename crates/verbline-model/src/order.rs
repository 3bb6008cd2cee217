use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

use crate::field::OptionField;

/// Display orders for listing a verb's fields.
///
/// Names compare by resolved name (long name, or kebab identifier for
/// positionals). Sorting is stable: fields that compare equal keep
/// declaration order.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    VariantNames,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FieldOrder {
    /// Declaration order
    #[default]
    SourceCode,
    ByName,
    ByKindThenName,
    RequiredFirst,
    RequiredFirstThenName,
    RequiredFirstThenKind,
}

impl FieldOrder {
    /// Sort `fields` in place.
    pub fn sort(self, fields: &mut [&OptionField]) {
        match self {
            Self::SourceCode => {}
            Self::ByName => fields.sort_by_cached_key(|f| f.resolved_name()),
            Self::ByKindThenName => {
                fields.sort_by_cached_key(|f| (f.kind.display_rank(), f.resolved_name()))
            }
            Self::RequiredFirst => fields.sort_by_key(|f| !f.required),
            Self::RequiredFirstThenName => {
                fields.sort_by_cached_key(|f| (!f.required, f.resolved_name()))
            }
            Self::RequiredFirstThenKind => fields.sort_by(|a, b| {
                (!a.required)
                    .cmp(&!b.required)
                    .then_with(|| a.kind.display_rank().cmp(&b.kind.display_rank()))
            }),
        }
    }
}
