//! Option metadata and verb model for verbline
//!
//! A [`VerbDescriptor`] is a named command with an ordered list of
//! [`OptionField`]s, composed once at registration time from its own fields
//! and the fields of any [`CapabilityContract`]s it declares. A
//! [`VerbInstance`] assigns typed [`OptionValue`]s to those fields, and a
//! [`VerbCatalog`] is the host's registry of descriptors.

mod catalog;
mod descriptor;
mod field;
mod hooks;
mod instance;
mod kind;
mod order;
mod value;

pub use catalog::VerbCatalog;
pub use descriptor::{CapabilityContract, VerbDescriptor, VerbDescriptorBuilder};
pub use field::{Binding, DEFAULT_SEPARATOR, OptionField, PathHint, PathKind};
pub use hooks::{DeclaredDefaults, DefaultPolicy, PostAction, RunOutcome};
pub use instance::VerbInstance;
pub use kind::OptionKind;
pub use order::FieldOrder;
pub use value::OptionValue;
