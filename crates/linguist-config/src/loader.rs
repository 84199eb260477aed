//! Configuration loading utilities

use crate::validator::ConfigValidator;
use crate::Config;
use linguist_common::{LinguistError, MergePolicy};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_VAR: &str = "LINGUIST_CONFIG_PATH";

/// Files probed in the working directory when no path is given.
const DEFAULT_CONFIG_FILES: [&str; 3] = ["linguist.toml", "linguist.yaml", "linguist.yml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// File extension is neither TOML nor YAML
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParse {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration validation error
    #[error("Invalid configuration value for '{field}': {message}")]
    Validation { field: String, message: String },
}

impl From<ConfigError> for LinguistError {
    fn from(err: ConfigError) -> Self {
        LinguistError::config_with_source("Configuration loading failed", err)
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Serialization formats accepted for configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.yaml` / `.yml`
    Yaml,
}

impl ConfigFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("toml") => Ok(Self::Toml),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML or YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> ConfigResult<Config> {
        let path = path.as_ref();
        debug!("Loading configuration from {:?}", path);

        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::parse_str(&content, format)?;
        Self::apply_env_overrides(&mut config)?;
        ConfigValidator::validate(&config)?;

        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Load configuration from the environment and well-known files
    ///
    /// Order: `LINGUIST_CONFIG_PATH`, then `linguist.toml`, `linguist.yaml`
    /// and `linguist.yml` in the working directory, then defaults. Environment
    /// overrides apply in every case.
    pub fn load() -> ConfigResult<Config> {
        if let Ok(path) = env::var(CONFIG_PATH_VAR) {
            return Self::load_config(path);
        }

        if let Some(path) = DEFAULT_CONFIG_FILES.iter().map(Path::new).find(|p| p.exists()) {
            return Self::load_config(path);
        }

        debug!("No configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Parse configuration text without overrides or validation
    pub fn parse_str(content: &str, format: ConfigFormat) -> ConfigResult<Config> {
        let config = match format {
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
        };
        Ok(config)
    }

    /// Apply `LINGUIST_*` environment variable overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) -> ConfigResult<()> {
        Self::apply_overrides_from(config, |var| env::var(var).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("LINGUIST_TRANSLATIONS_DIR") {
            config.catalogs.directory = PathBuf::from(dir);
        }

        if let Some(prefix) = lookup("LINGUIST_FILE_PREFIX") {
            config.catalogs.file_prefix = prefix;
        }

        if let Some(language) = lookup("LINGUIST_LANGUAGE") {
            let language = language.trim().to_string();
            config.catalogs.language = (!language.is_empty()).then_some(language);
        }

        if let Some(policy) = lookup("LINGUIST_MERGE_POLICY") {
            config.catalogs.merge_policy =
                policy.parse::<MergePolicy>().map_err(|e| ConfigError::EnvParse {
                    var: "LINGUIST_MERGE_POLICY".to_string(),
                    source: Box::new(e),
                })?;
        }

        if let Some(strict) = lookup("LINGUIST_STRICT") {
            config.catalogs.strict = strict.trim().parse().map_err(|e| ConfigError::EnvParse {
                var: "LINGUIST_STRICT".to_string(),
                source: Box::new(e),
            })?;
        }

        if let Some(level) = lookup("LINGUIST_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.toml")).unwrap(), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("a.YML")).unwrap(), ConfigFormat::Yaml);
        assert!(matches!(
            ConfigFormat::from_path(Path::new("a.ini")),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_parse_toml() {
        let config = ConfigLoader::parse_str(
            r#"
[catalogs]
directory = "src/translations"
language = "cs_CZ"
merge_policy = "keep_first"

[logging]
level = "debug"
format = "compact"
"#,
            ConfigFormat::Toml,
        )
        .unwrap();

        assert_eq!(config.catalogs.directory, PathBuf::from("src/translations"));
        assert_eq!(config.catalogs.file_prefix, "qmidiarp");
        assert_eq!(config.catalogs.language.as_deref(), Some("cs_CZ"));
        assert_eq!(config.catalogs.merge_policy, MergePolicy::KeepFirst);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_parse_yaml() {
        let config = ConfigLoader::parse_str(
            "catalogs:\n  file_prefix: app\n  strict: true\n",
            ConfigFormat::Yaml,
        )
        .unwrap();

        assert_eq!(config.catalogs.file_prefix, "app");
        assert!(config.catalogs.strict);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_rejects_unknown_policy() {
        let result = ConfigLoader::parse_str(
            "[catalogs]\nmerge_policy = \"overwrite\"\n",
            ConfigFormat::Toml,
        );
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        let lookup = lookup_from(&[
            ("LINGUIST_TRANSLATIONS_DIR", "/usr/share/qmidiarp/translations"),
            ("LINGUIST_LANGUAGE", "de"),
            ("LINGUIST_MERGE_POLICY", "merge"),
            ("LINGUIST_STRICT", "true"),
            ("LINGUIST_LOG_LEVEL", "warn"),
        ]);

        ConfigLoader::apply_overrides_from(&mut config, lookup).unwrap();

        assert_eq!(
            config.catalogs.directory,
            PathBuf::from("/usr/share/qmidiarp/translations")
        );
        assert_eq!(config.catalogs.language.as_deref(), Some("de"));
        assert_eq!(config.catalogs.merge_policy, MergePolicy::Merge);
        assert!(config.catalogs.strict);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_blank_language_override_clears_language() {
        let mut config = Config::default();
        config.catalogs.language = Some("fr".to_string());

        ConfigLoader::apply_overrides_from(&mut config, lookup_from(&[("LINGUIST_LANGUAGE", "  ")]))
            .unwrap();

        assert!(config.catalogs.language.is_none());
    }

    #[test]
    fn test_env_override_parse_errors() {
        let mut config = Config::default();
        let result =
            ConfigLoader::apply_overrides_from(&mut config, lookup_from(&[("LINGUIST_STRICT", "maybe")]));
        match result {
            Err(ConfigError::EnvParse { var, .. }) => assert_eq!(var, "LINGUIST_STRICT"),
            other => panic!("expected EnvParse error, got {other:?}"),
        }

        let result = ConfigLoader::apply_overrides_from(
            &mut config,
            lookup_from(&[("LINGUIST_MERGE_POLICY", "sometimes")]),
        );
        assert!(matches!(result, Err(ConfigError::EnvParse { .. })));
    }
}
