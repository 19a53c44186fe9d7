//! Normalized source rows.

use serde::{Deserialize, Serialize};

/// Positional names given to the first six input columns.
pub const KEY_COLUMNS: [&str; 6] = ["Company", "Key1", "Key2", "Key3", "Key4", "Key5"];

/// Number of input columns the builder requires.
pub const REQUIRED_COLUMNS: usize = KEY_COLUMNS.len();

/// Company used when neither the source nor the operator supplies one.
pub const DEFAULT_COMPANY: &str = "SAINC";

/// One leaf relationship of the key hierarchy.
///
/// All fields are plain strings; missing cells are normalized to `""` during
/// ingestion so downstream code never sees a null. The same shape is reused
/// for the key block of every derived UD row.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SourceRow {
    pub company: String,
    pub key1: String,
    pub key2: String,
    pub key3: String,
    pub key4: String,
    pub key5: String,
}

impl SourceRow {
    /// Builds a row from the six key values in column order.
    pub fn new(
        company: impl Into<String>,
        key1: impl Into<String>,
        key2: impl Into<String>,
        key3: impl Into<String>,
        key4: impl Into<String>,
        key5: impl Into<String>,
    ) -> Self {
        Self {
            company: company.into(),
            key1: key1.into(),
            key2: key2.into(),
            key3: key3.into(),
            key4: key4.into(),
            key5: key5.into(),
        }
    }

    /// Builds a row from positional cell values. Missing trailing cells become `""`.
    pub fn from_cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut values = cells.into_iter().map(Into::into);
        let mut next = || values.next().unwrap_or_default();
        Self {
            company: next(),
            key1: next(),
            key2: next(),
            key3: next(),
            key4: next(),
            key5: next(),
        }
    }

    /// Key values in column order.
    pub fn keys(&self) -> [&str; 6] {
        [
            &self.company,
            &self.key1,
            &self.key2,
            &self.key3,
            &self.key4,
            &self.key5,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_cells_pads_missing_values() {
        let row = SourceRow::from_cells(["C1", "Variant", "Red"]);
        assert_eq!(row.key2, "Red");
        assert_eq!(row.key3, "");
        assert_eq!(row.key5, "");
    }

    #[test]
    fn from_cells_ignores_extra_values() {
        let row = SourceRow::from_cells(["C1", "V", "A", "B", "P1", "S1", "extra"]);
        assert_eq!(row.keys(), ["C1", "V", "A", "B", "P1", "S1"]);
    }

    #[test]
    fn serializes_with_column_names() {
        let row = SourceRow::new("C1", "Variant", "Red", "Shiny", "P100", "S1");
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["Company"], "C1");
        assert_eq!(json["Key5"], "S1");
    }
}
