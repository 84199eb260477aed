//! Catalogs and their lookup index
//!
//! A [`Catalog`] keeps every unit in declaration order (obsolete ones
//! included, for audit) next to an index over the live units. The index maps
//! context → source → disambiguation variants, so lookups borrow `&str` keys
//! and never allocate.
//!
//! When several live units share the full key, one logical unit stands for
//! all of them: the first finished unit in declaration order, otherwise the
//! first unfinished one. Its siblings only contribute locations.

use crate::language::LanguageTag;
use crate::unit::{Location, MessageKey, TranslationStatus, TranslationUnit};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Document-level attributes of a catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogMetadata {
    /// `version` attribute of the root element
    pub version: Option<String>,
    /// `sourcelanguage` attribute of the root element
    pub source_language: Option<String>,
    /// Context names in declaration order, including contexts without messages
    pub contexts: Vec<String>,
}

#[derive(Debug, Clone)]
struct Variant {
    disambiguation: Option<String>,
    chosen: usize,
    members: Vec<usize>,
}

type SourceIndex = HashMap<String, Vec<Variant>>;

/// All translation units of one language, indexed for lookup
#[derive(Debug, Clone)]
pub struct Catalog {
    language: LanguageTag,
    metadata: CatalogMetadata,
    units: Vec<TranslationUnit>,
    index: HashMap<String, SourceIndex>,
}

impl Catalog {
    /// Build a catalog from units in declaration order
    pub fn new(language: LanguageTag, units: Vec<TranslationUnit>) -> Self {
        Self::with_metadata(language, CatalogMetadata::default(), units)
    }

    /// Build a catalog with document metadata
    pub fn with_metadata(language: LanguageTag, metadata: CatalogMetadata, units: Vec<TranslationUnit>) -> Self {
        let mut catalog = Self {
            language,
            metadata,
            units,
            index: HashMap::new(),
        };
        catalog.build_index();
        catalog
    }

    fn build_index(&mut self) {
        let mut declared: HashSet<String> = self.metadata.contexts.iter().cloned().collect();
        for unit in &self.units {
            if declared.insert(unit.context.clone()) {
                self.metadata.contexts.push(unit.context.clone());
            }
        }

        for (position, unit) in self.units.iter().enumerate() {
            if !unit.is_live() {
                continue;
            }

            let variants = self
                .index
                .entry(unit.context.clone())
                .or_default()
                .entry(unit.source.clone())
                .or_default();

            match variants
                .iter_mut()
                .find(|variant| variant.disambiguation == unit.disambiguation)
            {
                Some(variant) => {
                    if variant.members.len() == 1 {
                        warn!(
                            "Duplicate translation unit {} in catalog {}; keeping one logical unit",
                            unit.key(),
                            self.language
                        );
                    }
                    variant.members.push(position);
                    let current = &self.units[variant.chosen];
                    if current.status != TranslationStatus::Finished
                        && unit.status == TranslationStatus::Finished
                    {
                        variant.chosen = position;
                    }
                }
                None => variants.push(Variant {
                    disambiguation: unit.disambiguation.clone(),
                    chosen: position,
                    members: vec![position],
                }),
            }
        }

        debug!(
            "Indexed catalog {}: {} units in {} contexts",
            self.language,
            self.units.len(),
            self.metadata.contexts.len()
        );
    }

    /// Language of this catalog
    pub fn language(&self) -> &LanguageTag {
        &self.language
    }

    /// Document metadata
    pub fn metadata(&self) -> &CatalogMetadata {
        &self.metadata
    }

    /// Context names in declaration order
    pub fn contexts(&self) -> impl Iterator<Item = &str> {
        self.metadata.contexts.iter().map(String::as_str)
    }

    /// Every unit in declaration order, obsolete ones included
    pub fn units(&self) -> &[TranslationUnit] {
        &self.units
    }

    /// Units of one context in declaration order, obsolete ones included
    pub fn units_in<'a>(&'a self, context: &'a str) -> impl Iterator<Item = &'a TranslationUnit> + 'a {
        self.units.iter().filter(move |unit| unit.context == context)
    }

    /// One unit per live key, in declaration order
    pub fn live_units(&self) -> impl Iterator<Item = &TranslationUnit> {
        let mut chosen: Vec<usize> = self
            .index
            .values()
            .flat_map(HashMap::values)
            .flatten()
            .map(|variant| variant.chosen)
            .collect();
        chosen.sort_unstable();
        chosen.into_iter().map(move |position| &self.units[position])
    }

    /// Live unfinished units, in declaration order
    pub fn pending(&self) -> impl Iterator<Item = &TranslationUnit> {
        self.live_units()
            .filter(|unit| unit.status == TranslationStatus::Unfinished)
    }

    /// Number of units, obsolete ones included
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// True when the catalog has no units at all
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Keys shared by more than one live unit
    pub fn duplicate_keys(&self) -> Vec<MessageKey> {
        let mut keys: Vec<MessageKey> = self
            .variants()
            .filter(|variant| variant.members.len() > 1)
            .map(|variant| self.units[variant.chosen].key())
            .collect();
        keys.sort();
        keys
    }

    fn variants(&self) -> impl Iterator<Item = &Variant> {
        self.index.values().flat_map(HashMap::values).flatten()
    }

    fn variants_for(&self, context: &str, source: &str) -> Option<&[Variant]> {
        self.index
            .get(context)
            .and_then(|sources| sources.get(source))
            .map(Vec::as_slice)
    }

    fn find_variant(&self, context: &str, source: &str, disambiguation: Option<&str>) -> Option<&Variant> {
        self.variants_for(context, source)?
            .iter()
            .find(|variant| variant.disambiguation.as_deref() == disambiguation)
    }

    /// The live unit with exactly this key
    ///
    /// An empty disambiguation is the same as none.
    pub fn get_exact(&self, context: &str, source: &str, disambiguation: Option<&str>) -> Option<&TranslationUnit> {
        let disambiguation = disambiguation.filter(|d| !d.is_empty());
        self.find_variant(context, source, disambiguation)
            .map(|variant| &self.units[variant.chosen])
    }

    /// The live unit a lookup for this key should use
    ///
    /// - With a disambiguation: the unit carrying it, else the unit with no
    ///   disambiguation. Units with a different disambiguation never match.
    /// - Without one: the unit with no disambiguation, else the first unit
    ///   for (context, source) in declaration order.
    pub fn lookup(&self, context: &str, source: &str, disambiguation: Option<&str>) -> Option<&TranslationUnit> {
        let variants = self.variants_for(context, source)?;
        let variant = match disambiguation.filter(|d| !d.is_empty()) {
            Some(wanted) => variants
                .iter()
                .find(|variant| variant.disambiguation.as_deref() == Some(wanted))
                .or_else(|| variants.iter().find(|variant| variant.disambiguation.is_none())),
            None => variants
                .iter()
                .find(|variant| variant.disambiguation.is_none())
                .or_else(|| variants.iter().min_by_key(|variant| variant.members[0])),
        }?;
        Some(&self.units[variant.chosen])
    }

    /// Locations of every live unit collapsed into this key
    pub fn locations_for(&self, context: &str, source: &str, disambiguation: Option<&str>) -> Vec<&Location> {
        let disambiguation = disambiguation.filter(|d| !d.is_empty());
        self.find_variant(context, source, disambiguation)
            .map(|variant| {
                variant
                    .members
                    .iter()
                    .flat_map(|&position| self.units[position].locations.iter())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Combine with a catalog loaded later for the same language
    ///
    /// Every unit of `newer` is kept. Units of `self` are added only for keys
    /// without a live unit in `newer`, so the earlier catalog fills gaps.
    pub fn merged_with(&self, newer: &Catalog) -> Catalog {
        let newer_keys: HashSet<MessageKey> = newer
            .units
            .iter()
            .filter(|unit| unit.is_live())
            .map(TranslationUnit::key)
            .collect();

        let mut units = newer.units.clone();
        units.extend(
            self.units
                .iter()
                .filter(|unit| !newer_keys.contains(&unit.key()))
                .cloned(),
        );

        let mut metadata = newer.metadata.clone();
        for context in &self.metadata.contexts {
            if !metadata.contexts.contains(context) {
                metadata.contexts.push(context.clone());
            }
        }
        if metadata.version.is_none() {
            metadata.version.clone_from(&self.metadata.version);
        }
        if metadata.source_language.is_none() {
            metadata.source_language.clone_from(&self.metadata.source_language);
        }

        Catalog::with_metadata(newer.language.clone(), metadata, units)
    }
}
