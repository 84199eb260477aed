//! Default values for the configuration schema.

use crate::schema::CatalogConfig;
use linguist_common::MergePolicy;
use std::path::PathBuf;

/// Default catalog directory, relative to the working directory.
pub const DEFAULT_DIRECTORY: &str = "translations";

/// Default catalog file prefix.
pub const DEFAULT_FILE_PREFIX: &str = "qmidiarp";

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            language: None,
            merge_policy: MergePolicy::Replace,
            strict: false,
        }
    }
}
