//! Configuration schema definitions using serde.

use linguist_common::{LoggingConfig, MergePolicy};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog loading configuration.
    pub catalogs: CatalogConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Where translation catalogs live and how they are combined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directory holding `<file_prefix>_<language>.ts` files.
    pub directory: PathBuf,
    /// File name prefix shared by every catalog, e.g. `qmidiarp`.
    pub file_prefix: String,
    /// Language to activate after loading; none leaves the store inactive.
    pub language: Option<String>,
    /// Policy for catalogs that repeat a language tag.
    pub merge_policy: MergePolicy,
    /// Abort a directory load on the first malformed catalog.
    pub strict: bool,
}
