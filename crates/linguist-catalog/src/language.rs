//! Language tags as written in TS files and catalog file names

use crate::error::{CatalogError, CatalogResult};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// A catalog language such as `cs_CZ` or `de`
///
/// Keeps the spelling it was created from for display, while equality and
/// hashing go through the canonical BCP-47 identifier, so `cs_CZ`, `cs-CZ`
/// and `cs_cz` name the same catalog.
#[derive(Debug, Clone)]
pub struct LanguageTag {
    raw: String,
    id: LanguageIdentifier,
}

impl LanguageTag {
    /// Parse a Qt (`cs_CZ`), BCP-47 (`cs-CZ`) or POSIX (`cs_CZ.UTF-8`) code
    pub fn parse(code: &str) -> CatalogResult<Self> {
        let raw = code.trim();
        let bare = raw
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .replace('_', "-");
        if bare.is_empty() {
            return Err(CatalogError::InvalidLanguageTag(code.to_string()));
        }

        let id = bare
            .parse::<LanguageIdentifier>()
            .map_err(|_| CatalogError::InvalidLanguageTag(code.to_string()))?;

        Ok(Self {
            raw: raw.to_string(),
            id,
        })
    }

    /// Derive the language from a catalog file name
    ///
    /// With a prefix, `qmidiarp_cs.ts` and prefix `qmidiarp` yield `cs`.
    /// Without one, the Qt naming convention `<name>_<lang>[_<COUNTRY>].ts`
    /// is assumed.
    pub fn from_file_name(path: &Path, prefix: Option<&str>) -> Option<Self> {
        let stem = path.file_stem()?.to_str()?;

        if let Some(prefix) = prefix {
            let code = stem.strip_prefix(prefix)?.strip_prefix('_')?;
            return Self::parse(code).ok();
        }

        let segments: Vec<&str> = stem.split('_').collect();
        let code = match segments.as_slice() {
            [.., _, lang, country]
                if country.len() == 2 && country.chars().all(|c| c.is_ascii_uppercase()) =>
            {
                format!("{lang}_{country}")
            }
            [_, .., last] => (*last).to_string(),
            _ => return None,
        };
        Self::parse(&code).ok()
    }

    /// The spelling this tag was created from
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The canonical identifier
    pub fn identifier(&self) -> &LanguageIdentifier {
        &self.id
    }

    /// The primary language subtag, e.g. `cs` for `cs_CZ`
    pub fn language(&self) -> &str {
        self.id.language.as_str()
    }

    /// Canonical BCP-47 form, e.g. `cs-CZ`
    pub fn canonical(&self) -> String {
        self.id.to_string()
    }

    /// Tags to try for this language, most specific first
    ///
    /// `cs_CZ` yields `cs_CZ`, then `cs`.
    pub fn fallback_chain(&self) -> Vec<LanguageTag> {
        let mut chain = vec![self.clone()];
        let mut id = self.id.clone();

        if id.variants().next().is_some() {
            id.clear_variants();
            push_unique(&mut chain, id.clone());
        }
        if id.region.is_some() {
            id.region = None;
            push_unique(&mut chain, id.clone());
        }
        if id.script.is_some() {
            id.script = None;
            push_unique(&mut chain, id);
        }

        chain
    }
}

fn push_unique(chain: &mut Vec<LanguageTag>, id: LanguageIdentifier) {
    if chain.iter().all(|tag| tag.id != id) {
        chain.push(LanguageTag {
            raw: id.to_string(),
            id,
        });
    }
}

impl PartialEq for LanguageTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for LanguageTag {}

impl Hash for LanguageTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for LanguageTag {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LanguageTag {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.canonical().cmp(&other.canonical())
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for LanguageTag {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
