//! Loading catalogs from TS files

use crate::catalog::Catalog;
use crate::error::{CatalogError, CatalogResult};
use crate::language::LanguageTag;
use crate::parser::CatalogParser;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Load and parse one TS file
///
/// The file name supplies a fallback language for catalogs whose `<TS>`
/// element carries none, e.g. `qmidiarp_cs.ts` yields `cs`.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> CatalogResult<Catalog> {
    load_catalog_with_prefix(path, None)
}

/// Load and parse one TS file whose name starts with `<prefix>_`
pub fn load_catalog_with_prefix<P: AsRef<Path>>(path: P, prefix: Option<&str>) -> CatalogResult<Catalog> {
    let path = path.as_ref();
    debug!("Loading catalog file: {:?}", path);

    let content = fs::read_to_string(path).map_err(|source| CatalogError::ResourceLoad {
        path: path.to_path_buf(),
        source,
    })?;

    parse_loaded(path, prefix, &content)
}

/// Load and parse one TS file without blocking the async runtime
pub async fn load_catalog_async<P: AsRef<Path>>(path: P) -> CatalogResult<Catalog> {
    let path = path.as_ref();
    debug!("Loading catalog file asynchronously: {:?}", path);

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CatalogError::ResourceLoad {
            path: path.to_path_buf(),
            source,
        })?;

    parse_loaded(path, None, &content)
}

fn parse_loaded(path: &Path, prefix: Option<&str>, content: &str) -> CatalogResult<Catalog> {
    let mut parser = CatalogParser::new(path.display().to_string());
    if let Some(hint) = LanguageTag::from_file_name(path, prefix) {
        parser = parser.with_language_hint(hint);
    }

    let catalog = parser.parse_str(content)?;
    info!(
        "Loaded catalog {} from {:?} ({} units)",
        catalog.language(),
        path,
        catalog.len()
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const DOCUMENT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.0">
<context>
    <name>LogWidget</name>
    <message>
        <source>&amp;Clear</source>
        <translation>&amp;Smazat</translation>
    </message>
</context>
</TS>
"#;

    #[test]
    fn test_load_catalog_uses_file_name_language() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("qmidiarp_cs.ts");
        fs::File::create(&path)
            .unwrap()
            .write_all(DOCUMENT.as_bytes())
            .unwrap();

        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.language().as_str(), "cs");
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("qmidiarp_xx.ts");

        match load_catalog(&path) {
            Err(CatalogError::ResourceLoad { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("expected ResourceLoad, got {other:?}"),
        }
    }
}
