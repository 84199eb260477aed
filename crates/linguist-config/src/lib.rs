//! # Linguist Config
//!
//! Typed configuration for catalog loading.
//!
//! Configuration is read from TOML or YAML, overridden from `LINGUIST_*`
//! environment variables, validated, and can be shared through a lock-free
//! [`ConfigCache`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use cache::ConfigCache;
pub use loader::{ConfigError, ConfigFormat, ConfigLoader, ConfigResult};
pub use schema::{CatalogConfig, Config};
pub use validator::ConfigValidator;
