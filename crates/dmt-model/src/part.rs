//! Part records.
//!
//! A Part file has one of two shapes for the whole run: existing parts carry
//! only the listing columns, new parts additionally carry the descriptive
//! bundle (`PartDescription`, `ClassID`, `ProdCode`, `UserChar1`). The two
//! shapes are separate types so a table can never mix them.

use crate::record::{Table, TableRecord, format_bool};
use crate::table_name::TableName;

/// Listing value written to `Character12` for every part.
pub const SHOW_LISTING: &str = "show";

/// Listing columns shared by every Part row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartRow {
    pub company: String,
    pub part_num: String,
    pub character05: String,
    pub character06: String,
    pub character08: String,
    pub checkbox11: bool,
    pub character10: String,
    pub character11: String,
    pub character12: String,
    pub character13: String,
}

impl TableRecord for PartRow {
    fn headers() -> Vec<&'static str> {
        vec![
            "Company",
            "PartNum",
            "Character05",
            "Character06",
            "Character08",
            "Checkbox11",
            "Character10",
            "Character11",
            "Character12",
            "Character13",
        ]
    }

    fn values(&self) -> Vec<String> {
        vec![
            self.company.clone(),
            self.part_num.clone(),
            self.character05.clone(),
            self.character06.clone(),
            self.character08.clone(),
            format_bool(self.checkbox11),
            self.character10.clone(),
            self.character11.clone(),
            self.character12.clone(),
            self.character13.clone(),
        ]
    }
}

/// Default `ClassID` for new parts (finished good).
pub const DEFAULT_CLASS_ID: &str = "FG";

/// Default lifecycle stage written to `UserChar1` for new parts.
pub const DEFAULT_LIFECYCLE_STAGE: &str = "Introduction";

/// Descriptive defaults attached to every row of a new-part run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartDetails {
    pub part_description: String,
    pub class_id: String,
    pub prod_code: String,
    pub user_char1: String,
}

impl PartDetails {
    /// Details with the default class and lifecycle stage.
    pub fn new(part_description: impl Into<String>, prod_code: impl Into<String>) -> Self {
        Self {
            part_description: part_description.into(),
            class_id: DEFAULT_CLASS_ID.to_string(),
            prod_code: prod_code.into(),
            user_char1: DEFAULT_LIFECYCLE_STAGE.to_string(),
        }
    }

    #[must_use]
    pub fn with_class_id(mut self, class_id: impl Into<String>) -> Self {
        self.class_id = class_id.into();
        self
    }

    #[must_use]
    pub fn with_lifecycle_stage(mut self, stage: impl Into<String>) -> Self {
        self.user_char1 = stage.into();
        self
    }
}

/// A Part row for a part number that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPartRow {
    pub part: PartRow,
    pub details: PartDetails,
}

impl TableRecord for NewPartRow {
    fn headers() -> Vec<&'static str> {
        let mut headers = PartRow::headers();
        headers.extend(["PartDescription", "ClassID", "ProdCode", "UserChar1"]);
        headers
    }

    fn values(&self) -> Vec<String> {
        let mut values = self.part.values();
        values.extend([
            self.details.part_description.clone(),
            self.details.class_id.clone(),
            self.details.prod_code.clone(),
            self.details.user_char1.clone(),
        ]);
        values
    }
}

/// The Part table for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartTable {
    Existing(Vec<PartRow>),
    New(Vec<NewPartRow>),
}

impl PartTable {
    /// Whether rows carry the new-part descriptive columns.
    pub fn is_new(&self) -> bool {
        matches!(self, Self::New(_))
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Existing(rows) => rows.len(),
            Self::New(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Listing columns of every row regardless of shape.
    pub fn parts(&self) -> Vec<&PartRow> {
        match self {
            Self::Existing(rows) => rows.iter().collect(),
            Self::New(rows) => rows.iter().map(|row| &row.part).collect(),
        }
    }

    pub fn to_table(&self) -> Table {
        match self {
            Self::Existing(rows) => Table::from_records(TableName::Part, rows),
            Self::New(rows) => Table::from_records(TableName::Part, rows),
        }
    }
}
