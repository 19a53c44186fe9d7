//! Part file derivation.

use tracing::debug;

use dmt_model::{
    COPY_NEEDED, DEFAULT_COMPANY, NewPartRow, PartDetails, PartOptions, PartRow, PartTable,
    SHOW_LISTING, SourceRow,
};

use crate::dedupe::distinct_by;

/// Builds the Part table for a Variant build.
///
/// A new parent gets its own row with `COPY NEEDED` placeholders; every
/// distinct non-empty `Key4` becomes a child row linked to the parent through
/// `Character11`. The descriptive columns are present on every row exactly
/// when the parent is new.
pub fn build_part_table(rows: &[SourceRow], options: &PartOptions) -> PartTable {
    let mut parts = Vec::new();
    if options.is_new() {
        let first_key2 = rows.first().map(|row| row.key2.clone()).unwrap_or_default();
        parts.push(listing_row(
            DEFAULT_COMPANY,
            &options.parent_part,
            placeholder(&options.parent_part),
            first_key2,
            String::new(),
            &options.website,
        ));
    }

    let children = distinct_by(rows.iter().filter(|row| !row.key4.is_empty()), |row| {
        (row.company.clone(), row.key4.clone())
    });
    parts.extend(children.into_iter().map(|row| {
        listing_row(
            &row.company,
            &row.key4,
            String::new(),
            row.key2.clone(),
            options.parent_part.clone(),
            &options.website,
        )
    }));
    debug!(
        rows = parts.len(),
        is_new = options.is_new(),
        parent = %options.parent_part,
        "built part table"
    );

    with_details(parts, options.new_part.as_ref())
}

/// Builds a one-row Part table for a standalone part number.
pub fn build_single_part(
    company: &str,
    part_id: &str,
    website: &str,
    new_part: Option<&PartDetails>,
) -> PartTable {
    let copy = if new_part.is_some() {
        placeholder(part_id)
    } else {
        String::new()
    };
    let company = if company.trim().is_empty() {
        DEFAULT_COMPANY
    } else {
        company
    };
    let row = listing_row(company, part_id, copy, String::new(), String::new(), website);
    with_details(vec![row], new_part)
}

fn placeholder(part_num: &str) -> String {
    format!("{part_num} {COPY_NEEDED}")
}

fn listing_row(
    company: &str,
    part_num: &str,
    copy: String,
    character10: String,
    character11: String,
    website: &str,
) -> PartRow {
    PartRow {
        company: company.to_string(),
        part_num: part_num.to_string(),
        character05: part_num.to_string(),
        character06: copy.clone(),
        character08: copy,
        checkbox11: true,
        character10,
        character11,
        character12: SHOW_LISTING.to_string(),
        character13: website.to_string(),
    }
}

fn with_details(parts: Vec<PartRow>, details: Option<&PartDetails>) -> PartTable {
    match details {
        Some(details) => PartTable::New(
            parts
                .into_iter()
                .map(|part| NewPartRow {
                    part,
                    details: details.clone(),
                })
                .collect(),
        ),
        None => PartTable::Existing(parts),
    }
}
