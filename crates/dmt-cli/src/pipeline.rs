//! Build pipeline with explicit stages.
//!
//! For every input file, in processing order:
//! 1. **Ingest**: read and normalize the source rows
//! 2. **Derive**: build every table the parameters call for
//! 3. **Write**: write the selected tables into `<stem>_OUTPUT/`
//!
//! Once all inputs are written the playlist is assembled from the written
//! files and placed next to the output folders.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use indicatif::ProgressBar;
use tracing::{info, info_span};

use dmt_core::{build_single_part, category_tables, derive_run};
use dmt_ingest::read_source;
use dmt_model::{COPY_NEEDED, FileRole, Table, TableName};
use dmt_output::{
    build_playlist, ensure_output_dir, output_dir_name, playlist_name, sanitize_filename,
    stem_and_dir, write_playlist, write_table,
};

use crate::types::{
    BuildRequest, FileOutcome, InputFile, PartRequest, RunResult, WrittenFile, import_names,
};

/// Whether a derived table is written for the given selection.
///
/// UD11 is always written. UD08..UD10 only when selected. Part and category
/// tables are written whenever they were derived.
pub fn should_write(table: TableName, include: &BTreeSet<TableName>) -> bool {
    match table {
        TableName::Ud11 => true,
        TableName::Ud08 | TableName::Ud09 | TableName::Ud10 => include.contains(&table),
        TableName::Part | TableName::CategoriesUd08 | TableName::CategoriesUd11 => true,
    }
}

/// Runs every input of a build request and writes the playlist.
pub fn run_build(request: &BuildRequest, progress: &ProgressBar) -> Result<RunResult> {
    let Some(first) = request.inputs.first() else {
        bail!("no input files given");
    };
    let playlist_dir = request
        .output_dir
        .clone()
        .unwrap_or_else(|| stem_and_dir(&first.path).dir);

    let mut files = Vec::with_capacity(request.inputs.len());
    for input in &request.inputs {
        files.push(process_file(input, request, progress)?);
    }

    let runs: Vec<(FileRole, &str)> = files
        .iter()
        .map(|file| (file.role, file.stem.as_str()))
        .collect();
    let name = playlist_name(&runs);
    finish(files, &playlist_dir, &name, &request.include_names())
}

/// Ingest, derive and write one input file.
pub fn process_file(
    input: &InputFile,
    request: &BuildRequest,
    progress: &ProgressBar,
) -> Result<FileOutcome> {
    let span = info_span!("file", path = %input.path.display(), role = ?input.role);
    let _guard = span.enter();

    progress.set_message(format!("reading {}", input.path.display()));
    let source = read_source(&input.path)
        .with_context(|| format!("read source {}", input.path.display()))?;
    progress.inc(1);

    progress.set_message("deriving tables");
    let tables = derive_run(&source.rows, &request.params, input.role);
    progress.inc(1);

    let location = stem_and_dir(&input.path);
    let base = request.output_dir.as_deref().unwrap_or(&location.dir);
    let output_dir = ensure_output_dir(base, &output_dir_name(&location.stem))?;

    progress.set_message(format!("writing {}", location.stem));
    let written = write_tables(&output_dir, &location.stem, &tables, &request.include)?;
    progress.inc(1);

    info!(
        stem = %location.stem,
        rows = source.len(),
        files = written.len(),
        output = %output_dir.display(),
        "processed source file"
    );
    Ok(FileOutcome {
        source: Some(input.path.clone()),
        stem: location.stem,
        role: input.role,
        output_dir,
        written,
    })
}

/// Builds the Part (and category) files for a single part number.
pub fn run_part(request: &PartRequest) -> Result<RunResult> {
    let span = info_span!("part", part_id = %request.part_id);
    let _guard = span.enter();

    let stem = sanitize_filename(&request.part_id);
    let output_dir = ensure_output_dir(&request.output_dir, &output_dir_name(&stem))?;

    let mut tables = vec![
        build_single_part(
            &request.company,
            &request.part_id,
            &request.website,
            request.details.as_ref(),
        )
        .to_table(),
    ];
    if let Some(categories) = &request.categories {
        tables.extend(category_tables(&request.company, categories));
    }

    let include: BTreeSet<TableName> = [TableName::Ud08, TableName::Ud11].into_iter().collect();
    let written = write_tables(&output_dir, &stem, &tables, &include)?;
    let name = playlist_name(&[(FileRole::Add, stem.as_str())]);
    let file = FileOutcome {
        source: None,
        stem,
        role: FileRole::Add,
        output_dir,
        written,
    };
    finish(vec![file], &request.output_dir, &name, &import_names(&include))
}

fn write_tables(
    output_dir: &Path,
    stem: &str,
    tables: &[Table],
    include: &BTreeSet<TableName>,
) -> Result<Vec<WrittenFile>> {
    let mut written = Vec::new();
    for table in tables.iter().filter(|t| should_write(t.name, include)) {
        let path = output_dir.join(table.name.file_name(stem));
        write_table(&path, table)?;
        written.push(WrittenFile {
            table: table.name,
            path,
            rows: table.len(),
            copy_needed: has_placeholder(table),
        });
    }
    Ok(written)
}

fn has_placeholder(table: &Table) -> bool {
    table
        .rows
        .iter()
        .flatten()
        .any(|cell| cell.contains(COPY_NEEDED))
}

fn finish(
    files: Vec<FileOutcome>,
    playlist_dir: &Path,
    name: &str,
    include: &BTreeSet<String>,
) -> Result<RunResult> {
    let entries: Vec<(PathBuf, FileRole)> = files
        .iter()
        .flat_map(|file| {
            file.written
                .iter()
                .map(move |written| (written.path.clone(), file.role))
        })
        .collect();
    let rows = build_playlist(
        entries.iter().map(|(path, role)| (path.as_path(), *role)),
        include,
    );
    let playlist = write_playlist(playlist_dir, name, &rows)?;
    Ok(RunResult {
        files,
        playlist,
        playlist_entries: rows.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ud11_and_extras_are_always_written() {
        let none = BTreeSet::new();
        assert!(should_write(TableName::Ud11, &none));
        assert!(should_write(TableName::Part, &none));
        assert!(should_write(TableName::CategoriesUd08, &none));
        assert!(!should_write(TableName::Ud09, &none));

        let selected: BTreeSet<_> = [TableName::Ud09].into_iter().collect();
        assert!(should_write(TableName::Ud09, &selected));
        assert!(!should_write(TableName::Ud08, &selected));
    }
}
