//! Source file reading for CSV and spreadsheet inputs.

use std::path::Path;

use calamine::{Reader, open_workbook_auto};
use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use tracing::info;

use crate::cell::data_to_string;
use crate::error::{IngestError, Result};
use crate::normalize::{SourceTable, normalize_frame, normalize_grid};

/// Input formats the builder accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Workbook,
}

impl SourceFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Self::Workbook),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

/// Reads and normalizes a source file.
///
/// Only the first six columns are kept and renamed to Company, Key1..Key5.
pub fn read_source(path: &Path) -> Result<SourceTable> {
    let format = SourceFormat::from_path(path)?;
    std::fs::metadata(path).map_err(|err| IngestError::open(path, err))?;
    let table = match format {
        SourceFormat::Csv => {
            let df = read_csv_frame(path)?;
            normalize_frame(path, &df)?
        }
        SourceFormat::Workbook => normalize_grid(path, read_workbook_grid(path)?)?,
    };
    info!(
        path = %path.display(),
        rows = table.len(),
        "loaded source file"
    );
    Ok(table)
}

/// Reads a CSV file into a DataFrame with every column typed as string.
pub fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Reads the first worksheet of a workbook as rows of string cells.
pub fn read_workbook_grid(path: &Path) -> Result<Vec<Vec<String>>> {
    let workbook_error = |message: String| IngestError::Workbook {
        path: path.to_path_buf(),
        message,
    };
    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::EmptyWorkbook {
            path: path.to_path_buf(),
        })?
        .map_err(|e| workbook_error(e.to_string()))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(data_to_string).collect())
        .collect())
}
