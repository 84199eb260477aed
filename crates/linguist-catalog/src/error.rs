//! Error types for catalog loading and selection

use linguist_common::LinguistError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or selecting catalogs
///
/// A missing translation is never an error: resolution always produces
/// displayable text and reports the miss through its status instead.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The document is not a well-formed TS catalog
    #[error("Malformed catalog {origin}: {reason}")]
    MalformedCatalog {
        /// File path or other label of the document
        origin: String,
        /// What the parser rejected
        reason: String,
    },

    /// The catalog file could not be read
    #[error("Failed to load catalog file {}: {source}", path.display())]
    ResourceLoad {
        /// File that failed to load
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A language code could not be parsed
    #[error("Invalid language tag: {0}")]
    InvalidLanguageTag(String),

    /// No catalog is loaded for the language or any of its fallbacks
    #[error("No catalog loaded for language {0}")]
    NotLoaded(String),
}

impl CatalogError {
    /// Build a `MalformedCatalog` error
    pub fn malformed(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedCatalog {
            origin: origin.into(),
            reason: reason.into(),
        }
    }

    /// True for structural parse failures
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedCatalog { .. })
    }
}

impl From<CatalogError> for LinguistError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotLoaded(language) => {
                LinguistError::catalog_with_language("No catalog loaded", language)
            }
            CatalogError::InvalidLanguageTag(tag) => {
                LinguistError::validation_field(format!("Invalid language tag '{tag}'"), "language")
            }
            other => LinguistError::catalog_with_source("Catalog loading failed", other),
        }
    }
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
