//! Tests for dmt-model types.

use dmt_model::{
    ImportType, NewPartRow, Operation, PartDetails, PartRow, PartTable, SourceRow, TableName,
};

fn part_row(part_num: &str) -> PartRow {
    PartRow {
        company: "C1".to_string(),
        part_num: part_num.to_string(),
        character05: part_num.to_string(),
        character06: String::new(),
        character08: String::new(),
        checkbox11: true,
        character10: "Red".to_string(),
        character11: "PARENT".to_string(),
        character12: "show".to_string(),
        character13: "SA".to_string(),
    }
}

#[test]
fn existing_part_table_has_listing_columns_only() {
    let table = PartTable::Existing(vec![part_row("P100")]).to_table();
    assert_eq!(table.name, TableName::Part);
    assert_eq!(table.headers.len(), 10);
    assert!(!table.headers.iter().any(|h| h == "PartDescription"));
    assert_eq!(table.column("Checkbox11"), Some(vec!["True"]));
}

#[test]
fn new_part_table_appends_descriptive_columns() {
    let rows = vec![NewPartRow {
        part: part_row("P100"),
        details: PartDetails::new("Widget", "WID"),
    }];
    let table = PartTable::New(rows).to_table();
    assert_eq!(
        &table.headers[10..],
        ["PartDescription", "ClassID", "ProdCode", "UserChar1"]
    );
    assert_eq!(table.column("ClassID"), Some(vec!["FG"]));
    assert_eq!(table.column("UserChar1"), Some(vec!["Introduction"]));
}

#[test]
fn part_details_overrides() {
    let details = PartDetails::new("Widget", "WID")
        .with_class_id("RM")
        .with_lifecycle_stage("Active");
    assert_eq!(details.class_id, "RM");
    assert_eq!(details.user_char1, "Active");
}

#[test]
fn params_serialize_lowercase() {
    assert_eq!(
        serde_json::to_string(&ImportType::Attribute).unwrap(),
        "\"attribute\""
    );
    assert_eq!(serde_json::to_string(&Operation::Both).unwrap(), "\"both\"");
}

#[test]
fn source_row_round_trips_through_json() {
    let row = SourceRow::new("C1", "Variant", "Red", "Shiny", "P100", "S1");
    let json = serde_json::to_string(&row).unwrap();
    let back: SourceRow = serde_json::from_str(&json).unwrap();
    assert_eq!(back, row);
}
