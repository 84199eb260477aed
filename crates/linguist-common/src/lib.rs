//! # Linguist Common
//!
//! Shared error type, logging setup and common types for linguist-rs.
//!
//! This crate provides the foundational pieces used by the configuration and
//! catalog crates of the workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{LinguistError, Result};
pub use logging::{init_default_logging, init_dev_logging, init_logging, LogFormat, LoggingConfig};
pub use types::*;
