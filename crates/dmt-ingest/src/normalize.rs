//! Positional normalization of loaded data into [`SourceRow`]s.

use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use tracing::{debug, warn};

use dmt_model::{REQUIRED_COLUMNS, SourceRow};

use crate::cell::any_to_string;
use crate::error::{IngestError, Result};

/// A source file after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTable {
    /// File the rows were read from.
    pub path: PathBuf,
    /// Original headers of the six key columns, before renaming.
    pub original_headers: Vec<String>,
    /// Normalized rows in file order.
    pub rows: Vec<SourceRow>,
}

impl SourceTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Checks that at least [`REQUIRED_COLUMNS`] columns are present.
pub fn ensure_key_columns(path: &Path, width: usize) -> Result<()> {
    if width < REQUIRED_COLUMNS {
        return Err(IngestError::TooFewColumns {
            path: path.to_path_buf(),
            found: width,
            required: REQUIRED_COLUMNS,
        });
    }
    if width > REQUIRED_COLUMNS {
        warn!(
            path = %path.display(),
            columns = width,
            "ignoring columns beyond the first {REQUIRED_COLUMNS}"
        );
    }
    Ok(())
}

/// True when every key cell is empty or whitespace.
fn is_blank_row<S: AsRef<str>>(cells: &[S]) -> bool {
    cells
        .iter()
        .take(REQUIRED_COLUMNS)
        .all(|cell| cell.as_ref().trim().is_empty())
}

/// Normalizes a frame: the first six columns become Company, Key1..Key5
/// regardless of their headers, nulls become `""`. Rows with every key cell
/// blank are dropped.
pub fn normalize_frame(path: &Path, df: &DataFrame) -> Result<SourceTable> {
    ensure_key_columns(path, df.width())?;
    let columns = &df.get_columns()[..REQUIRED_COLUMNS];
    let original_headers = columns.iter().map(|c| c.name().to_string()).collect();

    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let mut cells = Vec::with_capacity(REQUIRED_COLUMNS);
        for column in columns {
            cells.push(column.get(idx).map(any_to_string)?);
        }
        if !is_blank_row(&cells) {
            rows.push(SourceRow::from_cells(cells));
        }
    }
    debug!(path = %path.display(), rows = rows.len(), "normalized frame");

    Ok(SourceTable {
        path: path.to_path_buf(),
        original_headers,
        rows,
    })
}

/// Normalizes a grid of string cells whose first row is the header row.
///
/// Rows shorter than six cells are padded with `""`; rows with every key cell
/// blank are dropped, as in [`normalize_frame`].
pub fn normalize_grid(path: &Path, grid: Vec<Vec<String>>) -> Result<SourceTable> {
    let mut lines = grid.into_iter();
    let header = lines.next().unwrap_or_default();
    ensure_key_columns(path, header.len())?;
    let original_headers = header.into_iter().take(REQUIRED_COLUMNS).collect();

    let rows: Vec<SourceRow> = lines
        .filter(|cells| !is_blank_row(cells))
        .map(SourceRow::from_cells)
        .collect();
    debug!(path = %path.display(), rows = rows.len(), "normalized grid");

    Ok(SourceTable {
        path: path.to_path_buf(),
        original_headers,
        rows,
    })
}
