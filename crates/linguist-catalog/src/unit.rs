//! Translation units and their metadata

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Readiness of a translation unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationStatus {
    /// Ready for display; also the status of a deliberately blank translation
    #[default]
    Finished,
    /// Translation missing or provisional
    Unfinished,
    /// No longer matches any live source string; kept for translators
    Obsolete,
}

impl TranslationStatus {
    /// Map the `type` attribute of a `<translation>` element
    ///
    /// Returns `None` for values this crate does not know.
    pub fn from_type_attr(value: Option<&str>) -> Option<Self> {
        match value {
            None | Some("") => Some(Self::Finished),
            Some("unfinished") => Some(Self::Unfinished),
            Some("obsolete" | "vanished") => Some(Self::Obsolete),
            Some(_) => None,
        }
    }

    /// Whether units with this status take part in lookups
    pub const fn is_live(self) -> bool {
        !matches!(self, Self::Obsolete)
    }
}

impl fmt::Display for TranslationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Finished => "finished",
            Self::Unfinished => "unfinished",
            Self::Obsolete => "obsolete",
        })
    }
}

/// Where a source string was found; provenance only
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Originating file as written in the catalog, e.g. `../arpwidget.cpp`
    pub file: String,
    /// Line number, when the catalog carries a usable one
    pub line: Option<u32>,
}

impl Location {
    /// Create a location
    pub fn new(file: impl Into<String>, line: Option<u32>) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{line}", self.file),
            None => f.write_str(&self.file),
        }
    }
}

/// Lookup key of a unit: context, source and optional disambiguation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageKey {
    /// Context name
    pub context: String,
    /// Untranslated source text
    pub source: String,
    /// Disambiguation comment
    pub disambiguation: Option<String>,
}

impl MessageKey {
    /// Create a key
    pub fn new(context: &str, source: &str, disambiguation: Option<&str>) -> Self {
        Self {
            context: context.to_string(),
            source: source.to_string(),
            disambiguation: disambiguation.map(str::to_string),
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{:?}", self.context, self.source)?;
        if let Some(disambiguation) = &self.disambiguation {
            write!(f, " [{disambiguation}]")?;
        }
        Ok(())
    }
}

/// One source-to-translation record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationUnit {
    /// Context grouping this unit, usually a widget class name
    pub context: String,
    /// Untranslated source text
    pub source: String,
    /// Distinguishes units sharing context and source
    pub disambiguation: Option<String>,
    /// Translated text; may be empty
    pub translation: String,
    /// Readiness of `translation`
    pub status: TranslationStatus,
    /// Provenance, in declaration order
    pub locations: Vec<Location>,
    /// Message id for id-based catalogs
    pub id: Option<String>,
    /// Whether this is a plural message
    pub numerus: bool,
    /// Plural forms of a numerus message; the first equals `translation`
    pub numerus_forms: Vec<String>,
    /// Unrecognized metadata kept as-is: child elements by name, attributes as `@name`
    pub extras: BTreeMap<String, String>,
}

impl TranslationUnit {
    /// A finished unit with the given translation and no metadata
    pub fn new(context: impl Into<String>, source: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            source: source.into(),
            disambiguation: None,
            translation: translation.into(),
            status: TranslationStatus::Finished,
            locations: Vec::new(),
            id: None,
            numerus: false,
            numerus_forms: Vec::new(),
            extras: BTreeMap::new(),
        }
    }

    /// Set the disambiguation comment
    pub fn with_disambiguation(mut self, disambiguation: impl Into<String>) -> Self {
        self.disambiguation = Some(disambiguation.into());
        self
    }

    /// Set the status
    pub fn with_status(mut self, status: TranslationStatus) -> Self {
        self.status = status;
        self
    }

    /// Append a location
    pub fn with_location(mut self, location: Location) -> Self {
        self.locations.push(location);
        self
    }

    /// The lookup key of this unit
    pub fn key(&self) -> MessageKey {
        MessageKey::new(&self.context, &self.source, self.disambiguation.as_deref())
    }

    /// Whether this unit takes part in lookups
    pub fn is_live(&self) -> bool {
        self.status.is_live()
    }

    /// Finished with an intentionally empty translation
    pub fn is_blank_finished(&self) -> bool {
        self.status == TranslationStatus::Finished && self.translation.is_empty()
    }
}
