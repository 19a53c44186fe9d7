//! Source ingestion for DMT builds.
//!
//! Reads an operator's export (CSV via Polars, spreadsheets via calamine),
//! keeps the first six columns, renames them positionally to
//! Company, Key1..Key5, and replaces missing cells with `""`.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use dmt_ingest::{detect_import_type, read_source};
//!
//! let table = read_source(Path::new("exports/Widgets.xlsx"))?;
//! let import_type = detect_import_type(&table.rows);
//! ```

mod cell;
mod detect;
mod error;
mod normalize;
mod reader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Reading ===
pub use reader::{SourceFormat, read_csv_frame, read_source, read_workbook_grid};

// === Normalization ===
pub use normalize::{SourceTable, ensure_key_columns, normalize_frame, normalize_grid};

// === Detection ===
pub use detect::detect_import_type;

// === Cell Conversion ===
pub use cell::{any_to_string, data_to_string, format_numeric};
