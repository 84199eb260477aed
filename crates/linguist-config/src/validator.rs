//! Runtime validation of loaded configuration.

use crate::loader::{ConfigError, ConfigResult};
use crate::Config;
use linguist_common::logging::is_valid_level;
use unic_langid::LanguageIdentifier;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first offending field.
    pub fn validate(config: &Config) -> ConfigResult<()> {
        let catalogs = &config.catalogs;

        if catalogs.directory.as_os_str().is_empty() {
            return Err(invalid("catalogs.directory", "must not be empty"));
        }

        let prefix = catalogs.file_prefix.trim();
        if prefix.is_empty() {
            return Err(invalid("catalogs.file_prefix", "must not be empty"));
        }
        if prefix.contains(['/', '\\']) {
            return Err(invalid("catalogs.file_prefix", "must be a file name, not a path"));
        }

        if let Some(language) = &catalogs.language {
            Self::validate_language(language)?;
        }

        if !is_valid_level(&config.logging.level) {
            return Err(invalid(
                "logging.level",
                format!("'{}' is not a valid log filter", config.logging.level),
            ));
        }

        Ok(())
    }

    /// Checks that `language` is a Qt (`cs_CZ`) or BCP-47 (`cs-CZ`) code.
    pub fn validate_language(language: &str) -> ConfigResult<()> {
        // Locale suffixes such as `.UTF-8` or `@euro` are not part of the tag.
        let normalized = language
            .trim()
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .replace('_', "-");
        if normalized.is_empty() {
            return Err(invalid("catalogs.language", "must not be empty"));
        }
        normalized
            .parse::<LanguageIdentifier>()
            .map(|_| ())
            .map_err(|_| invalid("catalogs.language", format!("'{language}' is not a language code")))
    }
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        field: field.to_string(),
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_language_codes() {
        assert!(ConfigValidator::validate_language("cs_CZ").is_ok());
        assert!(ConfigValidator::validate_language("de").is_ok());
        assert!(ConfigValidator::validate_language("pt-BR").is_ok());
        assert!(ConfigValidator::validate_language("cs_CZ.UTF-8").is_ok());
        assert!(ConfigValidator::validate_language("de_DE@euro").is_ok());
        assert!(ConfigValidator::validate_language(".UTF-8").is_err());
        assert!(ConfigValidator::validate_language("not a language").is_err());
        assert!(ConfigValidator::validate_language("").is_err());
    }

    #[test]
    fn test_rejects_empty_directory_and_prefix() {
        let mut config = Config::default();
        config.catalogs.directory = PathBuf::new();
        match ConfigValidator::validate(&config) {
            Err(ConfigError::Validation { field, .. }) => assert_eq!(field, "catalogs.directory"),
            other => panic!("expected validation error, got {other:?}"),
        }

        let mut config = Config::default();
        config.catalogs.file_prefix = "translations/qmidiarp".to_string();
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_rejects_bad_log_level() {
        let mut config = Config::default();
        config.logging.level = String::new();
        match ConfigValidator::validate(&config) {
            Err(ConfigError::Validation { field, .. }) => assert_eq!(field, "logging.level"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
