//! Import playlist assembly.
//!
//! A playlist tells the import tool which files to load, in which order, and
//! with which operation flags. Rows follow the order files were written.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

use dmt_model::{FileRole, TableRecord, format_bool};

use crate::writer::write_csv;

/// Suffix appended to a playlist name to form its file name.
pub const PLAYLIST_SUFFIX: &str = "_PLAYLIST";

/// Import name that is listed regardless of table selection.
const ALWAYS_LISTED: &str = "Part";

/// One line of the playlist manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistRow {
    pub import: String,
    pub source: String,
    pub add: bool,
    pub update: bool,
    pub delete: bool,
    pub wait: bool,
}

impl PlaylistRow {
    fn new(import: String, source: &Path, role: FileRole) -> Self {
        let adds = role == FileRole::Add;
        Self {
            import,
            source: source.display().to_string(),
            add: adds,
            update: adds,
            delete: !adds,
            wait: true,
        }
    }
}

impl TableRecord for PlaylistRow {
    fn headers() -> Vec<&'static str> {
        vec!["Import", "Source", "Add", "Update", "Delete", "Wait"]
    }

    fn values(&self) -> Vec<String> {
        vec![
            self.import.clone(),
            self.source.clone(),
            format_bool(self.add),
            format_bool(self.update),
            format_bool(self.delete),
            format_bool(self.wait),
        ]
    }
}

/// Import name of an output file: the part of its stem after the last `_`.
///
/// `Widgets_Categories_UD08.csv` imports as `UD08`.
pub fn import_name_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();
    match stem.rsplit_once('_') {
        Some((_, suffix)) => suffix.to_string(),
        None => stem.to_string(),
    }
}

/// Builds playlist rows for written files.
///
/// A file is listed when its import name is `Part` or appears in `include`.
pub fn build_playlist<'a, I>(entries: I, include: &BTreeSet<String>) -> Vec<PlaylistRow>
where
    I: IntoIterator<Item = (&'a Path, FileRole)>,
{
    entries
        .into_iter()
        .filter_map(|(path, role)| {
            let import = import_name_from_path(path);
            (import == ALWAYS_LISTED || include.contains(&import))
                .then(|| PlaylistRow::new(import, path, role))
        })
        .collect()
}

/// Playlist name for a run: `<PREFIX>_<stem>` per input, joined with `_`.
///
/// Runs are listed in processing order, so a delete-and-add run produces
/// `DEL_<delete stem>_ADD_<add stem>`.
pub fn playlist_name(runs: &[(FileRole, &str)]) -> String {
    runs.iter()
        .map(|(role, stem)| format!("{}_{stem}", role.playlist_prefix()))
        .collect::<Vec<_>>()
        .join("_")
}

/// File name of a playlist.
pub fn playlist_file_name(name: &str) -> String {
    format!("{name}{PLAYLIST_SUFFIX}.csv")
}

/// Writes the playlist into `dir` and returns its path.
pub fn write_playlist(dir: &Path, name: &str, rows: &[PlaylistRow]) -> Result<PathBuf> {
    let path = dir.join(playlist_file_name(name));
    let values: Vec<Vec<String>> = rows.iter().map(TableRecord::values).collect();
    write_csv(&path, &PlaylistRow::headers(), &values)?;
    info!(path = %path.display(), entries = rows.len(), "wrote playlist");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn include(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn import_name_is_the_last_stem_segment() {
        assert_eq!(import_name_from_path(Path::new("out/W_UD09.csv")), "UD09");
        assert_eq!(
            import_name_from_path(Path::new("out/W_Categories_UD08.csv")),
            "UD08"
        );
        assert_eq!(import_name_from_path(Path::new("out/Part.csv")), "Part");
    }

    #[test]
    fn part_is_listed_without_selection() {
        let entries = [
            (Path::new("o/W_UD11.csv"), FileRole::Add),
            (Path::new("o/W_UD10.csv"), FileRole::Add),
            (Path::new("o/W_Part.csv"), FileRole::Add),
        ];
        let rows = build_playlist(entries, &include(&["UD11"]));
        let imports: Vec<_> = rows.iter().map(|r| r.import.as_str()).collect();
        assert_eq!(imports, vec!["UD11", "Part"]);
    }

    #[test]
    fn flags_follow_the_file_role() {
        let entries = [
            (Path::new("o/D_UD11.csv"), FileRole::Delete),
            (Path::new("o/A_UD11.csv"), FileRole::Add),
        ];
        let rows = build_playlist(entries, &include(&["UD11"]));
        assert!(!rows[0].add && !rows[0].update && rows[0].delete);
        assert!(rows[1].add && rows[1].update && !rows[1].delete);
        assert!(rows.iter().all(|r| r.wait));
    }

    #[test]
    fn names_follow_processing_order() {
        assert_eq!(playlist_name(&[(FileRole::Add, "W")]), "ADD_W");
        assert_eq!(playlist_name(&[(FileRole::Delete, "W")]), "DEL_W");
        assert_eq!(
            playlist_name(&[(FileRole::Delete, "Old"), (FileRole::Add, "New")]),
            "DEL_Old_ADD_New"
        );
        assert_eq!(playlist_file_name("ADD_W"), "ADD_W_PLAYLIST.csv");
    }
}
