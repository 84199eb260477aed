//! Translation resolution with source-text fallback
//!
//! Resolution never fails. The worst case is the untranslated source text
//! with [`ResolveStatus::NotFound`], so the UI always has something to show.

use crate::catalog::Catalog;
use crate::unit::TranslationStatus;
use serde::Serialize;
use std::fmt;

/// How a resolved text was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveStatus {
    /// A finished translation, possibly deliberately blank
    Found,
    /// The matching unit is unfinished; text is its provisional translation or the source
    Degraded,
    /// No live unit matched; text is the source
    NotFound,
}

/// Text to display together with how it was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution<'a> {
    /// Text to display
    pub text: &'a str,
    /// Outcome of the lookup
    pub status: ResolveStatus,
}

impl<'a> Resolution<'a> {
    /// A source-text fallback for a miss
    pub const fn not_found(source: &'a str) -> Self {
        Self {
            text: source,
            status: ResolveStatus::NotFound,
        }
    }

    /// True for finished translations
    pub fn is_found(&self) -> bool {
        self.status == ResolveStatus::Found
    }
}

impl Resolution<'_> {
    /// Detach the text from the catalog it was resolved against
    pub fn into_owned(self) -> ResolvedText {
        ResolvedText {
            text: self.text.to_string(),
            status: self.status,
        }
    }
}

impl fmt::Display for Resolution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

/// A [`Resolution`] that owns its text
///
/// Returned where the catalog is only borrowed for the duration of the call,
/// such as lookups through the active catalog of a store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedText {
    /// Text to display
    pub text: String,
    /// Outcome of the lookup
    pub status: ResolveStatus,
}

impl From<Resolution<'_>> for ResolvedText {
    fn from(resolution: Resolution<'_>) -> Self {
        resolution.into_owned()
    }
}

impl Catalog {
    /// Resolve the text to display for (context, source, disambiguation)
    ///
    /// See [`Catalog::lookup`] for how units are matched.
    pub fn resolve<'a>(&'a self, context: &str, source: &'a str, disambiguation: Option<&str>) -> Resolution<'a> {
        let Some(unit) = self.lookup(context, source, disambiguation) else {
            return Resolution::not_found(source);
        };

        match unit.status {
            TranslationStatus::Finished => Resolution {
                text: &unit.translation,
                status: ResolveStatus::Found,
            },
            TranslationStatus::Unfinished => Resolution {
                text: if unit.translation.is_empty() {
                    source
                } else {
                    &unit.translation
                },
                status: ResolveStatus::Degraded,
            },
            // Obsolete units never reach the index.
            TranslationStatus::Obsolete => Resolution::not_found(source),
        }
    }
}

/// Resolve against an explicit catalog
pub fn resolve<'a>(
    catalog: &'a Catalog,
    context: &str,
    source: &'a str,
    disambiguation: Option<&str>,
) -> Resolution<'a> {
    catalog.resolve(context, source, disambiguation)
}

/// What UI code depends on to turn source strings into display text
pub trait Translate {
    /// Text to display for (context, source, disambiguation); never fails
    fn translate(&self, context: &str, source: &str, disambiguation: Option<&str>) -> String;
}

impl Translate for Catalog {
    fn translate(&self, context: &str, source: &str, disambiguation: Option<&str>) -> String {
        self.resolve(context, source, disambiguation).text.to_string()
    }
}
