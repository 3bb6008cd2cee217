//! Configuration and verb catalogs for verbline
//!
//! [`Config`] resolves settings with precedence CLI > config file > defaults
//! and records where each value came from. [`catalog`] loads declarative
//! TOML verb catalogs into a [`VerbCatalog`](verbline_model::VerbCatalog).

pub mod catalog;
mod config;

pub use catalog::{load_catalog, parse_catalog};
pub use config::{CatalogSettings, CliArgs, Config, ConfigBuilder, ConfigSource, Defaults};
