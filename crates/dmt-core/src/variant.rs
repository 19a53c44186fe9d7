//! Variant-mode rollup.
//!
//! ```text
//! UD11  Company Key1 Key2 Key3 Key4 Key5      every source row
//! UD10  Company Key1 Key2 Key3 Key5->Key4     distinct on the first five keys
//! UD09  Company Key1 Key2 Key3 + Number01     distinct on the first four keys
//! UD08  Company Key1 Key2 + label, active     distinct on the first three keys
//! ```
//!
//! Each level is derived from the one above it, never from the source.

use tracing::debug;

use dmt_model::{LabeledRow, Ranked, SortAssignment, SourceRow, Table, TableName};

use crate::dedupe::distinct_by;
use crate::sort_order::reconcile_ranks;

/// Derived tables for a Variant build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantTables {
    pub ud11: Vec<SourceRow>,
    pub ud10: Vec<SourceRow>,
    pub ud09: Vec<Ranked<SourceRow>>,
    pub ud08: Vec<LabeledRow>,
}

impl VariantTables {
    /// Rendered tables in write order (UD11 first).
    pub fn to_tables(&self) -> Vec<Table> {
        vec![
            Table::from_records(TableName::Ud11, &self.ud11),
            Table::from_records(TableName::Ud10, &self.ud10),
            Table::from_records(TableName::Ud09, &self.ud09),
            Table::from_records(TableName::Ud08, &self.ud08),
        ]
    }
}

/// Builds UD11..UD08 from Variant source rows.
///
/// `sort` ranks UD09 by `Key3`; values it does not cover are numbered after
/// the highest assigned rank.
pub fn build_variant_tables(rows: &[SourceRow], sort: Option<&SortAssignment>) -> VariantTables {
    let ud11 = rows.to_vec();
    let ud10 = variant_ud10(rows);
    let ud09 = variant_ud09(&ud10, sort);
    let ud08 = variant_ud08(&ud09);
    debug!(
        ud11 = ud11.len(),
        ud10 = ud10.len(),
        ud09 = ud09.len(),
        ud08 = ud08.len(),
        "built variant tables"
    );
    VariantTables {
        ud11,
        ud10,
        ud09,
        ud08,
    }
}

/// Secondary leaf (`Key5`) moved into `Key4`, one row per leaf under each value.
fn variant_ud10(rows: &[SourceRow]) -> Vec<SourceRow> {
    let projected = rows.iter().map(|row| SourceRow {
        company: row.company.clone(),
        key1: row.key1.clone(),
        key2: row.key2.clone(),
        key3: row.key3.clone(),
        key4: row.key5.clone(),
        key5: String::new(),
    });
    distinct_by(projected, |row| {
        (
            row.company.clone(),
            row.key1.clone(),
            row.key2.clone(),
            row.key3.clone(),
            row.key4.clone(),
        )
    })
}

/// One ranked row per dropdown value.
fn variant_ud09(ud10: &[SourceRow], sort: Option<&SortAssignment>) -> Vec<Ranked<SourceRow>> {
    let projected = ud10.iter().map(|row| SourceRow {
        company: row.company.clone(),
        key1: row.key1.clone(),
        key2: row.key2.clone(),
        key3: row.key3.clone(),
        key4: String::new(),
        key5: String::new(),
    });
    let distinct = distinct_by(projected, |row| {
        (
            row.company.clone(),
            row.key1.clone(),
            row.key2.clone(),
            row.key3.clone(),
        )
    });
    let ranks = reconcile_ranks(distinct.iter().map(|row| row.key3.as_str()), sort);
    distinct
        .into_iter()
        .map(|row| Ranked {
            number01: ranks.number01(&row.key3),
            row,
        })
        .collect()
}

/// One labeled, active row per group.
fn variant_ud08(ud09: &[Ranked<SourceRow>]) -> Vec<LabeledRow> {
    let projected = ud09.iter().map(|ranked| {
        let row = &ranked.row;
        LabeledRow {
            keys: SourceRow::new(&row.company, &row.key1, &row.key2, "", "", ""),
            character01: row.key2.clone(),
            checkbox01: true,
        }
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
            SourceRow::new("C1", "Variant", "Red", "Shiny", "P100", "S1"),
            SourceRow::new("C1", "Variant", "Red", "Shiny", "P101", "S1"),
            SourceRow::new("C1", "Variant", "Blue", "Matte", "P102", "S2"),
        ]
    }

    #[test]
    fn ud11_is_the_source_unchanged() {
        let input = rows();
        let tables = build_variant_tables(&input, None);
        assert_eq!(tables.ud11, input);
    }

    #[test]
    fn ud10_moves_key5_into_key4() {
        let tables = build_variant_tables(&rows(), None);
        assert_eq!(
            tables.ud10,
            vec![
                SourceRow::new("C1", "Variant", "Red", "Shiny", "S1", ""),
                SourceRow::new("C1", "Variant", "Blue", "Matte", "S2", ""),
            ]
        );
    }

    #[test]
    fn ud09_ranks_in_first_seen_order() {
        let tables = build_variant_tables(&rows(), None);
        let ranked: Vec<_> = tables
            .ud09
            .iter()
            .map(|r| (r.row.key3.as_str(), r.number01))
            .collect();
        assert_eq!(ranked, vec![("Shiny", 1), ("Matte", 2)]);
        assert!(tables.ud09.iter().all(|r| r.row.key4.is_empty()));
    }

    #[test]
    fn ud09_uses_operator_ranks() {
        let sort: SortAssignment = [("Matte", 1), ("Shiny", 2)].into_iter().collect();
        let tables = build_variant_tables(&rows(), Some(&sort));
        assert_eq!(tables.ud09[0].number01, 2);
        assert_eq!(tables.ud09[1].number01, 1);
    }

    #[test]
    fn shared_dropdown_value_keeps_one_rank() {
        let input = vec![
            SourceRow::new("C1", "Variant", "Red", "Large", "P1", "S1"),
            SourceRow::new("C1", "Variant", "Blue", "Large", "P2", "S2"),
            SourceRow::new("C1", "Variant", "Blue", "Small", "P3", "S3"),
        ];
        let tables = build_variant_tables(&input, None);
        let ranks: Vec<u32> = tables.ud09.iter().map(|r| r.number01).collect();
        assert_eq!(ranks, vec![1, 1, 2]);
    }

    #[test]
    fn ud08_labels_each_group() {
        let tables = build_variant_tables(&rows(), None);
        let labels: Vec<_> = tables
            .ud08
            .iter()
            .map(|r| (r.keys.key2.as_str(), r.character01.as_str(), r.checkbox01))
            .collect();
        assert_eq!(labels, vec![("Red", "Red", true), ("Blue", "Blue", true)]);
        assert!(tables.ud08.iter().all(|r| r.keys.key3.is_empty()));
    }

    #[test]
    fn empty_source_gives_empty_tables() {
        let tables = build_variant_tables(&[], None);
        assert!(tables.ud11.is_empty());
        assert!(tables.ud10.is_empty());
        assert!(tables.ud09.is_empty());
        assert!(tables.ud08.is_empty());
    }
}
