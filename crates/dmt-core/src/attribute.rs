//! Attribute-mode rollup.
//!
//! Attribute builds have no grouping label above `Key2`, so there is no UD08.
//! UD09 is derived straight from the source rather than from UD10.

use tracing::debug;

use dmt_model::{
    AttributeGroupRow, LabeledRow, Ranked, SortAssignment, SourceRow, Table, TableName,
};

use crate::dedupe::distinct_by;
use crate::sort_order::reconcile_ranks;

/// Attribute UD09, with or without `Number01`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeUd09 {
    Plain(Vec<AttributeGroupRow>),
    Ranked(Vec<Ranked<AttributeGroupRow>>),
}

impl AttributeUd09 {
    pub fn len(&self) -> usize {
        match self {
            Self::Plain(rows) => rows.len(),
            Self::Ranked(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Group rows regardless of ranking.
    pub fn groups(&self) -> Vec<&AttributeGroupRow> {
        match self {
            Self::Plain(rows) => rows.iter().collect(),
            Self::Ranked(rows) => rows.iter().map(|ranked| &ranked.row).collect(),
        }
    }

    pub fn to_table(&self) -> Table {
        match self {
            Self::Plain(rows) => Table::from_records(TableName::Ud09, rows),
            Self::Ranked(rows) => Table::from_records(TableName::Ud09, rows),
        }
    }
}

/// Derived tables for an Attribute build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeTables {
    pub ud11: Vec<SourceRow>,
    pub ud10: Vec<LabeledRow>,
    pub ud09: AttributeUd09,
}

impl AttributeTables {
    /// Rendered tables in write order (UD11 first).
    pub fn to_tables(&self) -> Vec<Table> {
        vec![
            Table::from_records(TableName::Ud11, &self.ud11),
            Table::from_records(TableName::Ud10, &self.ud10),
            self.ud09.to_table(),
        ]
    }
}

/// Builds UD11, UD10 and UD09 from Attribute source rows.
///
/// When `sort` is given (even empty) UD09 carries `Number01` ranked by `Key2`.
pub fn build_attribute_tables(
    rows: &[SourceRow],
    sort: Option<&SortAssignment>,
) -> AttributeTables {
    let ud11 = rows.to_vec();
    let ud10 = attribute_ud10(rows);
    let groups = attribute_groups(rows);
    let ud09 = match sort {
        Some(sort) => {
            let ranks = reconcile_ranks(groups.iter().map(|g| g.keys.key2.as_str()), Some(sort));
            AttributeUd09::Ranked(
                groups
                    .into_iter()
                    .map(|row| Ranked {
                        number01: ranks.number01(&row.keys.key2),
                        row,
                    })
                    .collect(),
            )
        }
        None => AttributeUd09::Plain(groups),
    };
    debug!(
        ud11 = ud11.len(),
        ud10 = ud10.len(),
        ud09 = ud09.len(),
        ranked = sort.is_some(),
        "built attribute tables"
    );
    AttributeTables { ud11, ud10, ud09 }
}

/// One labeled row per attribute value.
fn attribute_ud10(rows: &[SourceRow]) -> Vec<LabeledRow> {
    let projected = rows.iter().map(|row| LabeledRow {
        keys: SourceRow::new(&row.company, &row.key1, &row.key2, &row.key3, "", ""),
        character01: row.key3.clone(),
        checkbox01: true,
    });
    distinct_by(projected, |row| {
        (
            row.keys.company.clone(),
            row.keys.key1.clone(),
            row.keys.key2.clone(),
            row.keys.key3.clone(),
        )
    })
}

/// One flagged row per attribute group.
fn attribute_groups(rows: &[SourceRow]) -> Vec<AttributeGroupRow> {
    let projected = rows.iter().map(|row| AttributeGroupRow {
        keys: SourceRow::new(&row.company, &row.key1, &row.key2, "", "", ""),
        character01: row.key2.clone(),
        checkboxes: [true; 5],
    });
    distinct_by(projected, |row| {
        (
            row.keys.company.clone(),
            row.keys.key1.clone(),
            row.keys.key2.clone(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<SourceRow> {
        vec![
            SourceRow::new("C1", "Attribute", "Color", "Red", "", ""),
            SourceRow::new("C1", "Attribute", "Color", "Blue", "", ""),
            SourceRow::new("C1", "Attribute", "Color", "Red", "x", ""),
            SourceRow::new("C1", "Attribute", "Size", "Large", "", ""),
        ]
    }

    #[test]
    fn ud10_has_one_row_per_value() {
        let tables = build_attribute_tables(&rows(), None);
        let values: Vec<_> = tables
            .ud10
            .iter()
            .map(|r| (r.keys.key3.as_str(), r.character01.as_str()))
            .collect();
        assert_eq!(
            values,
            vec![("Red", "Red"), ("Blue", "Blue"), ("Large", "Large")]
        );
        assert!(tables.ud10.iter().all(|r| r.keys.key4.is_empty()));
    }

    #[test]
    fn ud09_without_sort_has_no_number01() {
        let tables = build_attribute_tables(&rows(), None);
        let table = tables.ud09.to_table();
        assert_eq!(table.len(), 2);
        assert!(table.column("Number01").is_none());
        assert_eq!(table.column("Checkbox05"), Some(vec!["True", "True"]));
        assert_eq!(table.column("Character01"), Some(vec!["Color", "Size"]));
    }

    #[test]
    fn ud09_with_sort_is_ranked_by_key2() {
        let sort: SortAssignment = [("Size", 1)].into_iter().collect();
        let tables = build_attribute_tables(&rows(), Some(&sort));
        let AttributeUd09::Ranked(ranked) = &tables.ud09 else {
            panic!("expected ranked UD09");
        };
        let ranks: Vec<_> = ranked
            .iter()
            .map(|r| (r.row.keys.key2.as_str(), r.number01))
            .collect();
        assert_eq!(ranks, vec![("Color", 2), ("Size", 1)]);
    }

    #[test]
    fn empty_sort_still_adds_number01() {
        let tables = build_attribute_tables(&rows(), Some(&SortAssignment::new()));
        let table = tables.ud09.to_table();
        assert_eq!(table.column("Number01"), Some(vec!["1", "2"]));
    }

    #[test]
    fn only_three_tables_are_rendered() {
        let names: Vec<_> = build_attribute_tables(&rows(), None)
            .to_tables()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec![TableName::Ud11, TableName::Ud10, TableName::Ud09]);
    }
}
