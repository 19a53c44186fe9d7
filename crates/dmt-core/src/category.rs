//! Category definition and assignment rows.

use dmt_model::{COPY_NEEDED, CategoryDefinitionRow, DEFAULT_COMPANY, SourceRow};

/// `Key1` value shared by all category rows.
pub const CATEGORY_KEY1: &str = "Category";

/// Parent of a `-`-delimited category path: everything but the last segment.
///
/// Empty segments are ignored, so `"A--B"` has parent `"A"`. A string without
/// `-` has no parent.
pub fn category_parent(category: &str) -> String {
    if !category.contains('-') {
        return String::new();
    }
    let segments: Vec<&str> = category.split('-').filter(|s| !s.is_empty()).collect();
    match segments.split_last() {
        Some((_, parents)) => parents.join("-"),
        None => String::new(),
    }
}

fn company_or_default(company: &str) -> &str {
    if company.trim().is_empty() {
        DEFAULT_COMPANY
    } else {
        company
    }
}

/// Definition row for one category (UD08).
pub fn build_category_ud08(company: &str, website: &str, category: &str) -> CategoryDefinitionRow {
    CategoryDefinitionRow {
        keys: SourceRow::new(
            company_or_default(company),
            CATEGORY_KEY1,
            website,
            category,
            category_parent(category),
            "",
        ),
        character01: COPY_NEEDED.to_string(),
        character04: COPY_NEEDED.to_string(),
        checkbox01: true,
    }
}

/// Assignment row linking one category to a part number (UD11).
pub fn build_category_ud11_for_parent(
    company: &str,
    parent_part_num: &str,
    website: &str,
    category: &str,
) -> SourceRow {
    SourceRow::new(
        company_or_default(company),
        CATEGORY_KEY1,
        website,
        category,
        parent_part_num,
        "",
    )
}

/// Definition rows for several categories, one per category in order.
pub fn build_category_definitions<S: AsRef<str>>(
    company: &str,
    website: &str,
    categories: &[S],
) -> Vec<CategoryDefinitionRow> {
    categories
        .iter()
        .map(|category| build_category_ud08(company, website, category.as_ref()))
        .collect()
}

/// Assignment rows for several categories, all linked to the same part.
pub fn build_category_assignments<S: AsRef<str>>(
    company: &str,
    parent_part_num: &str,
    website: &str,
    categories: &[S],
) -> Vec<SourceRow> {
    categories
        .iter()
        .map(|category| {
            build_category_ud11_for_parent(company, parent_part_num, website, category.as_ref())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_drops_last_segment() {
        assert_eq!(category_parent("A-B-C"), "A-B");
        assert_eq!(category_parent("A"), "");
        assert_eq!(category_parent(""), "");
        assert_eq!(category_parent("A-"), "");
        assert_eq!(category_parent("A--B"), "A");
    }

    #[test]
    fn definition_row_carries_placeholders() {
        let row = build_category_ud08("", "SA", "ELEC-PHONES-CASES");
        assert_eq!(row.keys.company, DEFAULT_COMPANY);
        assert_eq!(row.keys.key1, "Category");
        assert_eq!(row.keys.key2, "SA");
        assert_eq!(row.keys.key3, "ELEC-PHONES-CASES");
        assert_eq!(row.keys.key4, "ELEC-PHONES");
        assert_eq!(row.character01, "COPY NEEDED");
        assert_eq!(row.character04, "COPY NEEDED");
        assert!(row.checkbox01);
    }

    #[test]
    fn assignment_row_links_part() {
        let row = build_category_ud11_for_parent("C1", "VP-1", "SW", "ELEC-PHONES");
        assert_eq!(
            row,
            SourceRow::new("C1", "Category", "SW", "ELEC-PHONES", "VP-1", "")
        );
    }

    #[test]
    fn one_row_per_category() {
        let categories = ["A-B", "C"];
        assert_eq!(build_category_definitions("C1", "SA", &categories).len(), 2);
        let assignments = build_category_assignments("C1", "VP-1", "SA", &categories);
        assert_eq!(assignments.len(), 2);
        assert!(assignments.iter().all(|row| row.key4 == "VP-1"));
    }
}
