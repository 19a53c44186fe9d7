//! Import type detection from the Key1 discriminator.

use dmt_model::{ImportType, SourceRow};

/// Guesses the import type from the first non-empty `Key1`.
///
/// Values starting with "attr" (any case, surrounding whitespace ignored)
/// mean Attribute; anything else, including an empty file, means Variant.
pub fn detect_import_type(rows: &[SourceRow]) -> ImportType {
    let first = rows
        .iter()
        .map(|row| row.key1.trim())
        .find(|key1| !key1.is_empty());
    match first {
        Some(key1) if key1.to_lowercase().starts_with("attr") => ImportType::Attribute,
        _ => ImportType::Variant,
    }
}
