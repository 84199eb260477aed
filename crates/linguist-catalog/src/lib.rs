//! Qt Linguist translation catalogs
//!
//! This crate reads Qt Linguist `.ts` catalogs and turns source strings into
//! display text. It includes:
//!
//! - A tolerant TS parser that keeps unknown metadata
//! - A per-language lookup index over (context, source, disambiguation)
//! - Resolution with source-text fallback that never fails
//! - A store of loaded catalogs with an atomically swapped active language
//! - Coverage statistics for translators
//!
//! # Example
//!
//! ```rust,no_run
//! use linguist_catalog::{CatalogStore, LanguageTag, Translate};
//! use linguist_common::MergePolicy;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = CatalogStore::new(MergePolicy::Replace);
//! store.load_dir("translations", "qmidiarp", false)?;
//! store.set_active(&LanguageTag::parse("cs_CZ")?)?;
//!
//! let label = store.translate("LogWidget", "&Clear", None);
//! println!("{}", label);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod error;
pub mod language;
pub mod loader;
pub mod parser;
pub mod resolver;
pub mod stats;
pub mod store;
pub mod unit;

pub use catalog::{Catalog, CatalogMetadata};
pub use error::{CatalogError, CatalogResult};
pub use language::LanguageTag;
pub use loader::{load_catalog, load_catalog_async, load_catalog_with_prefix};
pub use parser::{parse_catalog, CatalogParser};
pub use resolver::{resolve, ResolveStatus, Resolution, ResolvedText, Translate};
pub use stats::{CatalogStats, CoverageReport};
pub use store::{CatalogStore, LoadReport};
pub use unit::{Location, MessageKey, TranslationStatus, TranslationUnit};
