//! Translation coverage statistics

use crate::catalog::Catalog;
use crate::unit::TranslationStatus;
use serde::Serialize;

/// Per-catalog coverage counts
///
/// `total` and `obsolete` count units as declared. The status counts cover
/// live keys, so duplicates collapsed into one logical unit count once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogStats {
    /// Language as written in the catalog
    pub language: String,
    /// Every declared unit, obsolete ones included
    pub total: usize,
    /// Live keys
    pub live: usize,
    /// Live keys with a finished translation, blank ones included
    pub finished: usize,
    /// Live keys finished with an intentionally empty translation
    pub blank_finished: usize,
    /// Live keys still awaiting translation
    pub unfinished: usize,
    /// Declared obsolete units
    pub obsolete: usize,
    /// Contexts, including ones holding only obsolete units
    pub contexts: usize,
    /// Live keys declared more than once
    pub duplicates: usize,
    /// Finished share of live keys (0.0 to 100.0)
    pub completion_percent: f32,
}

impl CatalogStats {
    /// Whether every live key is finished
    pub fn is_complete(&self) -> bool {
        self.unfinished == 0
    }
}

impl Catalog {
    /// Coverage counts for this catalog
    pub fn stats(&self) -> CatalogStats {
        let mut live = 0;
        let mut finished = 0;
        let mut blank_finished = 0;
        let mut unfinished = 0;

        for unit in self.live_units() {
            live += 1;
            match unit.status {
                TranslationStatus::Finished => {
                    finished += 1;
                    if unit.translation.is_empty() {
                        blank_finished += 1;
                    }
                }
                TranslationStatus::Unfinished => unfinished += 1,
                TranslationStatus::Obsolete => {}
            }
        }

        let completion_percent = if live == 0 {
            100.0
        } else {
            (finished as f32 / live as f32) * 100.0
        };

        CatalogStats {
            language: self.language().to_string(),
            total: self.len(),
            live,
            finished,
            blank_finished,
            unfinished,
            obsolete: self
                .units()
                .iter()
                .filter(|unit| unit.status == TranslationStatus::Obsolete)
                .count(),
            contexts: self.contexts().count(),
            duplicates: self.duplicate_keys().len(),
            completion_percent,
        }
    }
}

/// Coverage of every loaded language, sorted by language tag
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CoverageReport {
    /// Per-language statistics
    pub languages: Vec<CatalogStats>,
}

impl CoverageReport {
    /// Statistics for one language, by the spelling it was loaded with
    pub fn get(&self, language: &str) -> Option<&CatalogStats> {
        self.languages.iter().find(|stats| stats.language == language)
    }

    /// Languages with untranslated keys left
    pub fn incomplete(&self) -> impl Iterator<Item = &CatalogStats> {
        self.languages.iter().filter(|stats| !stats.is_complete())
    }
}
