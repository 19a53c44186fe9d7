//! Error types for source ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a source file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Source file not found.
    #[error("source file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Extension is neither CSV nor a spreadsheet format.
    #[error("unsupported source format '{extension}' for {path} (expected .csv, .xlsx, .xlsm, .xls or .ods)")]
    UnsupportedFormat { path: PathBuf, extension: String },

    // === Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Failed to open or read a workbook.
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// Workbook contains no worksheets.
    #[error("workbook has no worksheets: {path}")]
    EmptyWorkbook { path: PathBuf },

    // === Shape Errors ===
    /// Fewer columns than the key hierarchy needs.
    #[error("expected at least {required} columns in {path}, found {found}")]
    TooFewColumns {
        path: PathBuf,
        found: usize,
        required: usize,
    },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl IngestError {
    pub(crate) fn open(path: &std::path::Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source: err,
            }
        }
    }
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
