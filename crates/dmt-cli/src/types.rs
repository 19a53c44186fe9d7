//! Run requests and results shared by the pipeline, prompts and summaries.

use std::collections::BTreeSet;
use std::path::PathBuf;

use dmt_model::{
    CategoryOptions, DerivationParams, FileRole, Operation, PartDetails, TableName,
};

/// One source file and the pass it feeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    pub role: FileRole,
}

/// A fully answered `build` run.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub operation: Operation,
    /// Inputs in processing order; delete passes come first.
    pub inputs: Vec<InputFile>,
    /// UD tables the operator selected for the playlist.
    pub include: BTreeSet<TableName>,
    pub params: DerivationParams,
    /// Base directory for output folders; `None` writes next to each input.
    pub output_dir: Option<PathBuf>,
}

impl BuildRequest {
    /// Playlist import names for the selected tables.
    pub fn include_names(&self) -> BTreeSet<String> {
        import_names(&self.include)
    }
}

/// A fully answered `part` run.
#[derive(Debug, Clone)]
pub struct PartRequest {
    pub company: String,
    pub part_id: String,
    pub website: String,
    /// Present when the part number is new.
    pub details: Option<PartDetails>,
    pub categories: Option<CategoryOptions>,
    pub output_dir: PathBuf,
}

/// Playlist import names for a set of tables.
pub fn import_names(tables: &BTreeSet<TableName>) -> BTreeSet<String> {
    tables
        .iter()
        .map(|table| table.import_name().to_string())
        .collect()
}

/// A CSV file written during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub table: TableName,
    pub path: PathBuf,
    pub rows: usize,
    /// Some cell still carries a `COPY NEEDED` placeholder.
    pub copy_needed: bool,
}

/// Everything written for one input (or one part number).
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub source: Option<PathBuf>,
    pub stem: String,
    pub role: FileRole,
    pub output_dir: PathBuf,
    pub written: Vec<WrittenFile>,
}

/// Result of a complete run.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub files: Vec<FileOutcome>,
    pub playlist: PathBuf,
    pub playlist_entries: usize,
}

impl RunResult {
    /// Written files that still need placeholder text replaced.
    pub fn copy_needed(&self) -> Vec<&WrittenFile> {
        self.files
            .iter()
            .flat_map(|file| &file.written)
            .filter(|written| written.copy_needed)
            .collect()
    }

    /// Whether a Part file was written.
    pub fn has_part(&self) -> bool {
        self.files
            .iter()
            .flat_map(|file| &file.written)
            .any(|written| written.table == TableName::Part)
    }
}
