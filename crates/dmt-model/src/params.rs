//! Run parameters gathered before derivation starts.
//!
//! Prompts and command-line flags produce a [`DerivationParams`] bundle once;
//! the derivation pipeline only ever reads it.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::part::PartDetails;

/// Which rollup pipeline a source file goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportType {
    #[default]
    Variant,
    Attribute,
}

impl ImportType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Variant => "Variant",
            Self::Attribute => "Attribute",
        }
    }
}

impl fmt::Display for ImportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the operator wants the playlist to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    #[default]
    Add,
    Delete,
    Both,
}

impl Operation {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Add => "Add only",
            Self::Delete => "Delete only",
            Self::Both => "Delete & Add",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Role of a single input file within an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileRole {
    Add,
    Delete,
}

impl FileRole {
    /// Prefix used in playlist names.
    pub const fn playlist_prefix(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Delete => "DEL",
        }
    }
}

/// Operator-chosen `Number01` ranks keyed by dropdown value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortAssignment(BTreeMap<String, u32>);

impl SortAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a rank, replacing any previous rank for the value.
    pub fn assign(&mut self, value: impl Into<String>, rank: u32) {
        self.0.insert(value.into(), rank);
    }

    pub fn get(&self, value: &str) -> Option<u32> {
        self.0.get(value).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(value, rank)| (value.as_str(), *rank))
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for SortAssignment {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Error returned for a malformed `VALUE=RANK` sort entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortEntryError {
    #[error("expected VALUE=RANK, got '{0}'")]
    MissingSeparator(String),
    #[error("rank for '{value}' must be an integer from 1 to {max}, got '{rank}'", max = MAX_RANK)]
    InvalidRank { value: String, rank: String },
}

/// One `VALUE=RANK` sort entry as typed on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortEntry {
    pub value: String,
    pub rank: u32,
}

impl FromStr for SortEntry {
    type Err = SortEntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (value, rank) = s
            .rsplit_once('=')
            .ok_or_else(|| SortEntryError::MissingSeparator(s.to_string()))?;
        let rank = parse_rank(rank).ok_or_else(|| SortEntryError::InvalidRank {
            value: value.to_string(),
            rank: rank.to_string(),
        })?;
        Ok(Self {
            value: value.to_string(),
            rank,
        })
    }
}

/// Highest rank an operator may assign.
pub const MAX_RANK: u32 = 1_000_000;

/// Parses a rank in `1..=MAX_RANK`; `None` for anything else.
pub fn parse_rank(text: &str) -> Option<u32> {
    text.trim()
        .parse::<u32>()
        .ok()
        .filter(|rank| (1..=MAX_RANK).contains(rank))
}

/// Part file request for a Variant build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartOptions {
    /// Variant parent part number.
    pub parent_part: String,
    /// Website code written to `Character13`.
    pub website: String,
    /// Present when the parent is a new part number.
    pub new_part: Option<PartDetails>,
}

impl PartOptions {
    pub fn is_new(&self) -> bool {
        self.new_part.is_some()
    }
}

/// Category assignment request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOptions {
    /// Website code written to `Key2`.
    pub website: String,
    /// Category strings, one UD08/UD11 pair each.
    pub categories: Vec<String>,
    /// Also emit UD08 definitions (new categories).
    pub create_definitions: bool,
    /// Part number the categories are assigned to.
    pub parent_part: String,
}

/// Everything the derivation pipeline needs besides the source rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivationParams {
    pub import_type: ImportType,
    pub sort: Option<SortAssignment>,
    pub part: Option<PartOptions>,
    pub categories: Option<CategoryOptions>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_entry_parses_value_and_rank() {
        let entry: SortEntry = "Shiny=2".parse().unwrap();
        assert_eq!(entry.value, "Shiny");
        assert_eq!(entry.rank, 2);
    }

    #[test]
    fn sort_entry_splits_on_last_separator() {
        let entry: SortEntry = "a=b=3".parse().unwrap();
        assert_eq!(entry.value, "a=b");
        assert_eq!(entry.rank, 3);
    }

    #[test]
    fn sort_entry_rejects_non_positive_rank() {
        assert!(matches!(
            "Shiny=0".parse::<SortEntry>(),
            Err(SortEntryError::InvalidRank { .. })
        ));
        assert!(matches!(
            "Shiny=x".parse::<SortEntry>(),
            Err(SortEntryError::InvalidRank { .. })
        ));
        assert!(matches!(
            "Shiny".parse::<SortEntry>(),
            Err(SortEntryError::MissingSeparator(_))
        ));
    }

    #[test]
    fn sort_entry_rejects_rank_above_max() {
        assert_eq!(parse_rank("1000000"), Some(MAX_RANK));
        assert_eq!(parse_rank("1000001"), None);
        assert!(matches!(
            "A=4294967295".parse::<SortEntry>(),
            Err(SortEntryError::InvalidRank { .. })
        ));
    }

    #[test]
    fn sort_assignment_collects() {
        let sort: SortAssignment = [("Red", 2), ("Blue", 1)].into_iter().collect();
        assert_eq!(sort.get("Red"), Some(2));
        assert_eq!(sort.get("Green"), None);
        assert_eq!(sort.len(), 2);
    }

    #[test]
    fn playlist_prefixes() {
        assert_eq!(FileRole::Add.playlist_prefix(), "ADD");
        assert_eq!(FileRole::Delete.playlist_prefix(), "DEL");
    }
}
