//! CSV writing.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use dmt_model::Table;

/// Byte-order mark written at the start of every CSV file.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes a rendered table to `path`, header row included even when empty.
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    write_csv(path, &table.headers, &table.rows)
        .with_context(|| format!("write {} table", table.name))?;
    debug!(
        table = %table.name,
        rows = table.len(),
        path = %path.display(),
        "wrote table"
    );
    Ok(())
}

/// Writes a header row and data rows as BOM-prefixed UTF-8 CSV.
pub fn write_csv<H: AsRef<str>>(path: &Path, headers: &[H], rows: &[Vec<String>]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut sink = BufWriter::new(file);
    sink.write_all(UTF8_BOM)
        .with_context(|| format!("write {}", path.display()))?;

    let mut writer = csv::Writer::from_writer(sink);
    writer
        .write_record(headers.iter().map(|header| header.as_ref()))
        .with_context(|| format!("write header to {}", path.display()))?;
    for row in rows {
        writer
            .write_record(row)
            .with_context(|| format!("write row to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use dmt_model::{SourceRow, TableName};

    use super::*;

    #[test]
    fn table_is_written_with_bom_and_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x_UD11.csv");
        let rows = vec![SourceRow::new("C1", "Variant", "Red", "Shiny, bright", "P1", "")];
        write_table(&path, &Table::from_records(TableName::Ud11, &rows)).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(
            text,
            "Company,Key1,Key2,Key3,Key4,Key5\nC1,Variant,Red,\"Shiny, bright\",P1,\n"
        );
    }

    #[test]
    fn empty_table_still_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x_UD10.csv");
        let table = Table::from_records::<SourceRow>(TableName::Ud10, &[]);
        write_table(&path, &table).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.trim_start_matches('\u{feff}'), "Company,Key1,Key2,Key3,Key4,Key5\n");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("x.csv");
        let err = write_csv(&path, &["A"], &[]).unwrap_err();
        assert!(format!("{err:#}").contains("create"));
    }
}
