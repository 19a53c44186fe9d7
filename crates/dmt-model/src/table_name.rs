//! Names of the tables a build can produce.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A derived table.
///
/// The file suffix doubles as the table's identity on disk; the playlist
/// import name is the part of that suffix after the last underscore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TableName {
    #[serde(rename = "UD08")]
    Ud08,
    #[serde(rename = "UD09")]
    Ud09,
    #[serde(rename = "UD10")]
    Ud10,
    #[serde(rename = "UD11")]
    Ud11,
    Part,
    #[serde(rename = "Categories_UD08")]
    CategoriesUd08,
    #[serde(rename = "Categories_UD11")]
    CategoriesUd11,
}

impl TableName {
    /// The rollup tables an operator can include in a playlist.
    pub const UD_TABLES: [TableName; 4] = [Self::Ud08, Self::Ud09, Self::Ud10, Self::Ud11];

    /// Suffix appended to the input stem to build the output file name.
    pub const fn file_suffix(self) -> &'static str {
        match self {
            Self::Ud08 => "UD08",
            Self::Ud09 => "UD09",
            Self::Ud10 => "UD10",
            Self::Ud11 => "UD11",
            Self::Part => "Part",
            Self::CategoriesUd08 => "Categories_UD08",
            Self::CategoriesUd11 => "Categories_UD11",
        }
    }

    /// Name of the destination table this file imports into.
    pub fn import_name(self) -> &'static str {
        let suffix = self.file_suffix();
        suffix.rsplit('_').next().unwrap_or(suffix)
    }

    /// Output file name for a given input stem, e.g. `Widgets_UD09.csv`.
    pub fn file_name(self, stem: &str) -> String {
        format!("{stem}_{}.csv", self.file_suffix())
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_suffix())
    }
}

/// Error returned when a table name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown table '{0}' (expected UD08, UD09, UD10, UD11, Part, Categories_UD08 or Categories_UD11)")]
pub struct ParseTableNameError(pub String);

impl FromStr for TableName {
    type Err = ParseTableNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "UD08" => Ok(Self::Ud08),
            "UD09" => Ok(Self::Ud09),
            "UD10" => Ok(Self::Ud10),
            "UD11" => Ok(Self::Ud11),
            "PART" => Ok(Self::Part),
            "CATEGORIES_UD08" => Ok(Self::CategoriesUd08),
            "CATEGORIES_UD11" => Ok(Self::CategoriesUd11),
            _ => Err(ParseTableNameError(s.to_string())),
        }
    }
}
