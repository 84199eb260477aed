//! Integration tests for linguist-config crate.

use linguist_common::MergePolicy;
use linguist_config::{Config, ConfigCache, ConfigError, ConfigLoader};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_load_toml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("linguist.toml");
    fs::write(
        &path,
        r#"
[catalogs]
directory = "src/translations"
file_prefix = "qmidiarp"
language = "es"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_config(&path).unwrap();
    assert_eq!(config.catalogs.directory, PathBuf::from("src/translations"));
    assert_eq!(config.catalogs.language.as_deref(), Some("es"));
}

#[test]
fn test_load_yaml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("linguist.yaml");
    fs::write(
        &path,
        "catalogs:\n  merge_policy: merge\nlogging:\n  level: debug\n  format: json\n",
    )
    .unwrap();

    let config = ConfigLoader::load_config(&path).unwrap();
    assert_eq!(config.catalogs.merge_policy, MergePolicy::Merge);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_invalid_language_fails_validation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("linguist.toml");
    fs::write(&path, "[catalogs]\nlanguage = \"not a language\"\n").unwrap();

    let result = ConfigLoader::load_config(&path);
    assert!(matches!(result, Err(ConfigError::Validation { .. })));
}

#[test]
fn test_missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    match ConfigLoader::load_config(&path) {
        Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected I/O error, got {other:?}"),
    }
}

#[test]
fn test_config_error_converts_to_workspace_error() {
    let error: linguist_common::LinguistError =
        ConfigError::UnsupportedFormat("linguist.ini".to_string()).into();
    assert!(error.to_string().contains("Configuration error"));
}

#[test]
fn test_config_cache() {
    let cache = ConfigCache::new(Config::default());
    assert!(cache.get().catalogs.language.is_none());

    let mut new_config = Config::default();
    new_config.catalogs.language = Some("fr".to_string());
    cache.update(new_config).unwrap();
    assert_eq!(cache.get().catalogs.language.as_deref(), Some("fr"));
}

#[test]
fn test_config_cache_rejects_invalid_update() {
    let cache = ConfigCache::default();
    let snapshot = cache.get();

    let mut invalid = Config::default();
    invalid.catalogs.file_prefix = String::new();
    assert!(cache.update(invalid).is_err());

    assert_eq!(*cache.get(), *snapshot);
}
