//! Rendering of typed rows into header + string-cell tables.

use crate::source::{KEY_COLUMNS, SourceRow};
use crate::table_name::TableName;

/// A row type with a fixed column layout.
pub trait TableRecord {
    /// Column names in output order.
    fn headers() -> Vec<&'static str>;

    /// Cell values in the same order as [`TableRecord::headers`].
    fn values(&self) -> Vec<String>;
}

/// Renders a boolean cell the way the import tool expects.
pub fn format_bool(value: bool) -> String {
    if value { "True" } else { "False" }.to_string()
}

impl TableRecord for SourceRow {
    fn headers() -> Vec<&'static str> {
        KEY_COLUMNS.to_vec()
    }

    fn values(&self) -> Vec<String> {
        self.keys().iter().map(|value| (*value).to_string()).collect()
    }
}

/// A row carrying a `Number01` sort rank after its own columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranked<R> {
    pub row: R,
    pub number01: u32,
}

impl<R: TableRecord> TableRecord for Ranked<R> {
    fn headers() -> Vec<&'static str> {
        let mut headers = R::headers();
        headers.push("Number01");
        headers
    }

    fn values(&self) -> Vec<String> {
        let mut values = self.row.values();
        values.push(self.number01.to_string());
        values
    }
}

/// A rendered output table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: TableName,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Renders typed records under the given table name.
    pub fn from_records<R: TableRecord>(name: TableName, records: &[R]) -> Self {
        Self {
            name,
            headers: R::headers().into_iter().map(String::from).collect(),
            rows: records.iter().map(TableRecord::values).collect(),
        }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of a named column, or `None` if the column is absent.
    pub fn column(&self, header: &str) -> Option<Vec<&str>> {
        let index = self.headers.iter().position(|h| h == header)?;
        Some(self.rows.iter().map(|row| row[index].as_str()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_bool_uses_title_case() {
        assert_eq!(format_bool(true), "True");
        assert_eq!(format_bool(false), "False");
    }

    #[test]
    fn ranked_appends_number01() {
        let ranked = Ranked {
            row: SourceRow::new("C1", "Variant", "Red", "Shiny", "", ""),
            number01: 3,
        };
        assert_eq!(
            Ranked::<SourceRow>::headers(),
            vec!["Company", "Key1", "Key2", "Key3", "Key4", "Key5", "Number01"]
        );
        assert_eq!(ranked.values().last().map(String::as_str), Some("3"));
    }

    #[test]
    fn table_column_lookup() {
        let rows = vec![
            SourceRow::new("C1", "V", "A", "", "", ""),
            SourceRow::new("C1", "V", "B", "", "", ""),
        ];
        let table = Table::from_records(TableName::Ud11, &rows);
        assert_eq!(table.len(), 2);
        assert_eq!(table.column("Key2"), Some(vec!["A", "B"]));
        assert_eq!(table.column("Number01"), None);
    }
}
