//! Error types and utilities for linguist-rs

use thiserror::Error;

/// Result type alias for workspace-level operations
pub type Result<T> = std::result::Result<T, LinguistError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Workspace-wide error type
///
/// Crate-specific errors (catalog parsing, configuration loading) convert into
/// this type so application code can handle a single error enum.
#[derive(Error, Debug)]
pub enum LinguistError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Catalog loading and lookup errors
    #[error("Catalog error: {message}")]
    Catalog {
        message: String,
        language: Option<String>,
        #[source]
        source: Option<BoxedSource>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation errors for configuration values or language codes
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },
}

impl LinguistError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog {
            message: msg.into(),
            language: None,
            source: None,
        }
    }

    /// Create a new catalog error tied to a language
    pub fn catalog_with_language(msg: impl Into<String>, language: impl Into<String>) -> Self {
        Self::Catalog {
            message: msg.into(),
            language: Some(language.into()),
            source: None,
        }
    }

    /// Create a new catalog error with source
    pub fn catalog_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Catalog {
            message: msg.into(),
            language: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_creation() {
        let error = LinguistError::new("test message");
        assert!(error.to_string().contains("test message"));

        let config_error = LinguistError::config("config issue");
        assert_eq!(config_error.to_string(), "Configuration error: config issue");

        let catalog_error = LinguistError::catalog_with_language("not loaded", "cs_CZ");
        assert_eq!(catalog_error.to_string(), "Catalog error: not loaded");
        match catalog_error {
            LinguistError::Catalog { language, .. } => assert_eq!(language.as_deref(), Some("cs_CZ")),
            other => panic!("unexpected variant: {other:?}"),
        }

        let validation_error = LinguistError::validation_field("must not be empty", "directory");
        assert!(validation_error.to_string().contains("Validation error"));
    }

    #[test]
    fn test_error_with_source() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let wrapped = LinguistError::catalog_with_source("Failed to read catalog", io_error);

        assert!(wrapped.to_string().contains("Failed to read catalog"));
        assert!(wrapped.source().is_some());

        let generic = LinguistError::new("no source");
        assert!(generic.source().is_none());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "Access denied");
        let error: LinguistError = io_error.into();

        assert!(error.to_string().contains("I/O error"));
        assert!(error.source().is_some());
    }
}
