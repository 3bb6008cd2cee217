//! Argument building for verbline
//!
//! [`ArgumentBuilder`] turns a [`VerbInstance`](verbline_model::VerbInstance)
//! into an [`ArgumentList`]: the verb name, then `--flag value` pairs in
//! descriptor order, then positional values by ascending index.

mod argument_list;
mod builder;

pub use argument_list::ArgumentList;
pub use builder::{ArgumentBuilder, build, command_string};
