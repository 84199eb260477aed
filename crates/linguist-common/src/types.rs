//! Common type definitions shared by the configuration and catalog crates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What to do when a catalog is loaded for a language that already has one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// The most recently loaded catalog replaces the previous one.
    #[default]
    Replace,
    /// The first loaded catalog is kept; later ones are ignored.
    KeepFirst,
    /// Units of the later catalog take precedence, the earlier one fills gaps.
    Merge,
}

impl MergePolicy {
    /// Configuration spelling of this policy.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Replace => "replace",
            Self::KeepFirst => "keep_first",
            Self::Merge => "merge",
        }
    }
}

impl fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown merge policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown merge policy '{0}' (expected replace, keep_first or merge)")]
pub struct ParseMergePolicyError(pub String);

impl FromStr for MergePolicy {
    type Err = ParseMergePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "replace" | "last_wins" => Ok(Self::Replace),
            "keep_first" | "first_wins" => Ok(Self::KeepFirst),
            "merge" => Ok(Self::Merge),
            _ => Err(ParseMergePolicyError(s.to_string())),
        }
    }
}
