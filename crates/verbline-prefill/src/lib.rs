//! Pre-fill resolver for verbline
//!
//! The inverse of the argument builder: [`prefill`] turns a flat map of
//! flag name to raw text into a typed [`VerbInstance`](verbline_model::VerbInstance),
//! and [`parse_invocation`] recovers that map from a captured token list.
//! Malformed raw values degrade to zero or absent; only unknown verb names
//! and unparseable command lines are errors.

mod invocation;
mod resolver;

pub use invocation::{
    Invocation, parse_invocation, prefill_command_line, prefill_invocation, split_command_line,
};
pub use resolver::{parse_bool, prefill, prefill_by_name};
