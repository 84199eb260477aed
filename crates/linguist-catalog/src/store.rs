//! Loaded catalogs and the active-language switch
//!
//! [`CatalogStore`] keeps every loaded catalog as an immutable `Arc<Catalog>`
//! and one of them active behind an [`ArcSwapOption`]. Switching languages
//! swaps that pointer; readers holding the previous snapshot keep using it
//! until they drop it.

use crate::catalog::Catalog;
use crate::error::{CatalogError, CatalogResult};
use crate::language::LanguageTag;
use crate::loader::{load_catalog, load_catalog_with_prefix};
use crate::resolver::{ResolveStatus, ResolvedText, Translate};
use crate::stats::CoverageReport;
use arc_swap::ArcSwapOption;
use linguist_common::MergePolicy;
use linguist_config::CatalogConfig;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Outcome of a directory load
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Languages loaded, in file name order
    pub loaded: Vec<LanguageTag>,
    /// Files that could not be loaded, with the reason
    pub failed: Vec<(PathBuf, CatalogError)>,
}

impl LoadReport {
    /// True when every matching file loaded
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Every loaded catalog plus the one currently active
#[derive(Debug)]
pub struct CatalogStore {
    catalogs: RwLock<HashMap<LanguageTag, Arc<Catalog>>>,
    active: ArcSwapOption<Catalog>,
    merge_policy: MergePolicy,
}

impl CatalogStore {
    /// Create an empty store
    pub fn new(merge_policy: MergePolicy) -> Self {
        Self {
            catalogs: RwLock::new(HashMap::new()),
            active: ArcSwapOption::empty(),
            merge_policy,
        }
    }

    /// Build a store from configuration
    ///
    /// Loads the configured directory and activates the configured language,
    /// if any.
    pub fn from_config(config: &CatalogConfig) -> CatalogResult<Self> {
        let store = Self::new(config.merge_policy);
        let report = store.load_dir(&config.directory, &config.file_prefix, config.strict)?;
        info!(
            "Loaded {} catalogs from {:?} ({} failed)",
            report.loaded.len(),
            config.directory,
            report.failed.len()
        );

        if let Some(language) = &config.language {
            let tag = LanguageTag::parse(language)?;
            store.set_active(&tag)?;
        }

        Ok(store)
    }

    /// Policy applied when a language is loaded twice
    pub fn merge_policy(&self) -> MergePolicy {
        self.merge_policy
    }

    /// Add a catalog, combining it with an existing one for the same language
    ///
    /// Returns the catalog now stored for that language. If the language was
    /// active, the active pointer moves to the stored catalog.
    pub fn insert(&self, catalog: Catalog) -> Arc<Catalog> {
        let tag = catalog.language().clone();
        let mut catalogs = self.catalogs.write();

        let stored = match catalogs.get(&tag) {
            None => Arc::new(catalog),
            Some(existing) => match self.merge_policy {
                MergePolicy::Replace => {
                    warn!("Replacing catalog {} with a later load", tag);
                    Arc::new(catalog)
                }
                MergePolicy::KeepFirst => {
                    warn!("Ignoring repeated catalog {}; keeping the first load", tag);
                    return Arc::clone(existing);
                }
                MergePolicy::Merge => {
                    info!("Merging repeated catalog {}", tag);
                    Arc::new(existing.merged_with(&catalog))
                }
            },
        };

        catalogs.insert(tag.clone(), Arc::clone(&stored));

        // Refreshed under the write lock so a concurrent `set_active` is not overwritten.
        if self
            .active
            .load()
            .as_ref()
            .is_some_and(|active| active.language() == &tag)
        {
            self.active.store(Some(Arc::clone(&stored)));
            debug!("Refreshed active catalog {}", tag);
        }
        drop(catalogs);

        stored
    }

    /// Load one TS file into the store
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> CatalogResult<Arc<Catalog>> {
        let catalog = load_catalog(path)?;
        Ok(self.insert(catalog))
    }

    /// Load every `<prefix>_*.ts` file of a directory, in file name order
    ///
    /// A file that fails to load is logged and recorded in the report, unless
    /// `strict` is set, in which case the first failure is returned. Catalogs
    /// loaded before the failure stay in the store either way.
    pub fn load_dir<P: AsRef<Path>>(&self, dir: P, prefix: &str, strict: bool) -> CatalogResult<LoadReport> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|source| CatalogError::ResourceLoad {
            path: dir.to_path_buf(),
            source,
        })?;

        let file_prefix = format!("{prefix}_");
        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.is_file())
            .filter(|path| path.extension().is_some_and(|ext| ext == "ts"))
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&file_prefix))
            })
            .collect();
        paths.sort();
        debug!("Found {} catalog files in {:?}", paths.len(), dir);

        let mut report = LoadReport::default();
        for path in paths {
            match load_catalog_with_prefix(&path, Some(prefix)) {
                Ok(catalog) => {
                    let stored = self.insert(catalog);
                    report.loaded.push(stored.language().clone());
                }
                Err(e) if strict => return Err(e),
                Err(e) => {
                    error!("Skipping catalog {:?}: {}", path, e);
                    report.failed.push((path, e));
                }
            }
        }

        Ok(report)
    }

    /// The catalog stored for exactly this language
    pub fn catalog(&self, tag: &LanguageTag) -> Option<Arc<Catalog>> {
        self.catalogs.read().get(tag).cloned()
    }

    /// The catalog to use for a language
    ///
    /// Walks the fallback chain (`cs_CZ`, then `cs`). If nothing matches, a
    /// catalog for a regional variant of the same primary language is used,
    /// so `cs` finds a catalog declared as `cs_CZ`.
    pub fn active_catalog(&self, tag: &LanguageTag) -> CatalogResult<Arc<Catalog>> {
        Self::select(&self.catalogs.read(), tag)
    }

    fn select(catalogs: &HashMap<LanguageTag, Arc<Catalog>>, tag: &LanguageTag) -> CatalogResult<Arc<Catalog>> {
        for candidate in tag.fallback_chain() {
            if let Some(catalog) = catalogs.get(&candidate) {
                if &candidate != tag {
                    debug!("Using catalog {} for requested language {}", candidate, tag);
                }
                return Ok(Arc::clone(catalog));
            }
        }

        catalogs
            .iter()
            .filter(|(loaded, _)| loaded.language() == tag.language())
            .min_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(loaded, catalog)| {
                debug!("Using catalog {} for requested language {}", loaded, tag);
                Arc::clone(catalog)
            })
            .ok_or_else(|| CatalogError::NotLoaded(tag.to_string()))
    }

    /// Make the catalog for a language active
    ///
    /// On error the previously active catalog stays active.
    pub fn set_active(&self, tag: &LanguageTag) -> CatalogResult<Arc<Catalog>> {
        // Held across the swap so `insert` cannot replace the catalog in between.
        let catalogs = self.catalogs.read();
        let catalog = Self::select(&catalogs, tag)?;
        self.active.store(Some(Arc::clone(&catalog)));
        drop(catalogs);
        info!("Activated catalog {} for language {}", catalog.language(), tag);
        Ok(catalog)
    }

    /// Snapshot of the active catalog
    pub fn active(&self) -> Option<Arc<Catalog>> {
        self.active.load_full()
    }

    /// Loaded languages, sorted
    pub fn loaded_languages(&self) -> Vec<LanguageTag> {
        let mut languages: Vec<LanguageTag> = self.catalogs.read().keys().cloned().collect();
        languages.sort();
        languages
    }

    /// Resolve against the active catalog
    ///
    /// With no active catalog every lookup is a miss.
    pub fn resolve(&self, context: &str, source: &str, disambiguation: Option<&str>) -> ResolvedText {
        let active = self.active.load();
        match &*active {
            Some(catalog) => catalog.resolve(context, source, disambiguation).into_owned(),
            None => ResolvedText {
                text: source.to_string(),
                status: ResolveStatus::NotFound,
            },
        }
    }

    /// Coverage of every loaded language, sorted by language tag
    pub fn coverage(&self) -> CoverageReport {
        let mut catalogs: Vec<(LanguageTag, Arc<Catalog>)> = self
            .catalogs
            .read()
            .iter()
            .map(|(tag, catalog)| (tag.clone(), Arc::clone(catalog)))
            .collect();
        catalogs.sort_by(|(a, _), (b, _)| a.cmp(b));

        CoverageReport {
            languages: catalogs.iter().map(|(_, catalog)| catalog.stats()).collect(),
        }
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new(MergePolicy::default())
    }
}

impl Translate for CatalogStore {
    fn translate(&self, context: &str, source: &str, disambiguation: Option<&str>) -> String {
        self.resolve(context, source, disambiguation).text
    }
}
