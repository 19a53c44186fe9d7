//! Derived UD row types.

use crate::record::{TableRecord, format_bool};
use crate::source::{KEY_COLUMNS, SourceRow};

/// Placeholder for fields an operator must fill in before importing.
pub const COPY_NEEDED: &str = "COPY NEEDED";

/// Key block plus a display label and an active flag.
///
/// Variant UD08 and Attribute UD10 share this shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledRow {
    pub keys: SourceRow,
    pub character01: String,
    pub checkbox01: bool,
}

impl TableRecord for LabeledRow {
    fn headers() -> Vec<&'static str> {
        let mut headers = KEY_COLUMNS.to_vec();
        headers.extend(["Character01", "Checkbox01"]);
        headers
    }

    fn values(&self) -> Vec<String> {
        let mut values = self.keys.values();
        values.push(self.character01.clone());
        values.push(format_bool(self.checkbox01));
        values
    }
}

/// Attribute-mode UD09 row: a group label with five feature flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeGroupRow {
    pub keys: SourceRow,
    pub character01: String,
    pub checkboxes: [bool; 5],
}

impl TableRecord for AttributeGroupRow {
    fn headers() -> Vec<&'static str> {
        let mut headers = KEY_COLUMNS.to_vec();
        headers.extend([
            "Character01",
            "Checkbox01",
            "Checkbox02",
            "Checkbox03",
            "Checkbox04",
            "Checkbox05",
        ]);
        headers
    }

    fn values(&self) -> Vec<String> {
        let mut values = self.keys.values();
        values.push(self.character01.clone());
        values.extend(self.checkboxes.iter().copied().map(format_bool));
        values
    }
}

/// Category definition row (UD08). `Key4` holds the parent category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDefinitionRow {
    pub keys: SourceRow,
    pub character01: String,
    pub character04: String,
    pub checkbox01: bool,
}

impl TableRecord for CategoryDefinitionRow {
    fn headers() -> Vec<&'static str> {
        let mut headers = KEY_COLUMNS.to_vec();
        headers.extend(["Character01", "Character04", "Checkbox01"]);
        headers
    }

    fn values(&self) -> Vec<String> {
        let mut values = self.keys.values();
        values.push(self.character01.clone());
        values.push(self.character04.clone());
        values.push(format_bool(self.checkbox01));
        values
    }
}
