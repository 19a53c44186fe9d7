//! Run-level derivation: every table one input file produces.

use tracing::{debug, info_span};

use dmt_model::{
    CategoryOptions, DEFAULT_COMPANY, DerivationParams, FileRole, ImportType, SourceRow, Table,
    TableName,
};

use crate::attribute::build_attribute_tables;
use crate::category::{build_category_assignments, build_category_definitions};
use crate::part::build_part_table;
use crate::variant::build_variant_tables;

/// Derives all tables for one input file, in write order.
///
/// The UD rollups come first (UD11 leading). In Variant mode the Part table
/// follows for add files when a part was requested, then the category
/// definition and assignment tables when categories were requested. Table
/// selection is left to the caller.
pub fn derive_run(rows: &[SourceRow], params: &DerivationParams, role: FileRole) -> Vec<Table> {
    let span = info_span!("derive_run", import_type = %params.import_type, ?role);
    let _guard = span.enter();

    let mut tables = match params.import_type {
        ImportType::Variant => build_variant_tables(rows, params.sort.as_ref()).to_tables(),
        ImportType::Attribute => build_attribute_tables(rows, params.sort.as_ref()).to_tables(),
    };

    if params.import_type == ImportType::Variant {
        if let Some(part) = params.part.as_ref().filter(|_| role == FileRole::Add) {
            tables.push(build_part_table(rows, part).to_table());
        }
        if let Some(categories) = &params.categories {
            tables.extend(category_tables(source_company(rows), categories));
        }
    }

    debug!(
        tables = tables.len(),
        names = ?tables.iter().map(|t| t.name).collect::<Vec<_>>(),
        "derived run tables"
    );
    tables
}

/// Category tables for the given company: definitions (when new) then assignments.
pub fn category_tables(company: &str, options: &CategoryOptions) -> Vec<Table> {
    let mut tables = Vec::with_capacity(2);
    if options.create_definitions {
        let definitions =
            build_category_definitions(company, &options.website, &options.categories);
        tables.push(Table::from_records(TableName::CategoriesUd08, &definitions));
    }
    let assignments = build_category_assignments(
        company,
        &options.parent_part,
        &options.website,
        &options.categories,
    );
    tables.push(Table::from_records(TableName::CategoriesUd11, &assignments));
    tables
}

/// Company of the first source row, or the default company.
pub fn source_company(rows: &[SourceRow]) -> &str {
    rows.first()
        .map(|row| row.company.as_str())
        .filter(|company| !company.trim().is_empty())
        .unwrap_or(DEFAULT_COMPANY)
}

#[cfg(test)]
mod tests {
    use dmt_model::{PartDetails, PartOptions, SortAssignment};

    use super::*;

    fn rows() -> Vec<SourceRow> {
        vec![
            SourceRow::new("C1", "Variant", "Red", "Shiny", "P100", "S1"),
            SourceRow::new("C1", "Variant", "Blue", "Matte", "P102", "S2"),
        ]
    }

    fn names(tables: &[Table]) -> Vec<TableName> {
        tables.iter().map(|t| t.name).collect()
    }

    fn full_params() -> DerivationParams {
        DerivationParams {
            import_type: ImportType::Variant,
            sort: None,
            part: Some(PartOptions {
                parent_part: "VP-1".to_string(),
                website: "SA".to_string(),
                new_part: Some(PartDetails::new("Widget", "WID")),
            }),
            categories: Some(CategoryOptions {
                website: "SW".to_string(),
                categories: vec!["ELEC-PHONES".to_string()],
                create_definitions: true,
                parent_part: "VP-1".to_string(),
            }),
        }
    }

    #[test]
    fn variant_add_run_produces_everything_in_order() {
        let tables = derive_run(&rows(), &full_params(), FileRole::Add);
        assert_eq!(
            names(&tables),
            vec![
                TableName::Ud11,
                TableName::Ud10,
                TableName::Ud09,
                TableName::Ud08,
                TableName::Part,
                TableName::CategoriesUd08,
                TableName::CategoriesUd11,
            ]
        );
    }

    #[test]
    fn delete_run_skips_part() {
        let tables = derive_run(&rows(), &full_params(), FileRole::Delete);
        assert!(!names(&tables).contains(&TableName::Part));
        assert!(names(&tables).contains(&TableName::CategoriesUd11));
    }

    #[test]
    fn attribute_run_ignores_part_and_categories() {
        let params = DerivationParams {
            import_type: ImportType::Attribute,
            sort: Some(SortAssignment::new()),
            ..full_params()
        };
        let tables = derive_run(&rows(), &params, FileRole::Add);
        assert_eq!(
            names(&tables),
            vec![TableName::Ud11, TableName::Ud10, TableName::Ud09]
        );
    }

    #[test]
    fn existing_categories_only_get_assignments() {
        let options = CategoryOptions {
            website: "SA".to_string(),
            categories: vec!["A-B".to_string(), "C".to_string()],
            create_definitions: false,
            parent_part: "VP-1".to_string(),
        };
        let tables = category_tables("C1", &options);
        assert_eq!(names(&tables), vec![TableName::CategoriesUd11]);
        assert_eq!(tables[0].len(), 2);
    }

    #[test]
    fn company_falls_back_to_default() {
        assert_eq!(source_company(&[]), DEFAULT_COMPANY);
        assert_eq!(source_company(&rows()), "C1");
    }
}
