//! Output folder and file naming.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Suffix appended to a stem to name its output folder.
pub const OUTPUT_DIR_SUFFIX: &str = "_OUTPUT";

/// File stem and containing directory of an input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub stem: String,
    pub dir: PathBuf,
}

/// Splits an input path into its stem and directory.
pub fn stem_and_dir(path: &Path) -> SourceLocation {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    SourceLocation { stem, dir }
}

/// Folder name holding every file built from `stem`.
pub fn output_dir_name(stem: &str) -> String {
    format!("{stem}{OUTPUT_DIR_SUFFIX}")
}

/// Ensure an output subdirectory exists and return its path.
pub fn ensure_output_dir(base_dir: &Path, name: &str) -> Result<PathBuf> {
    let dir = base_dir.join(name);
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Replaces characters that are not allowed in file names with `_`.
///
/// Leading and trailing dots and spaces are trimmed; an empty result becomes `_`.
pub fn sanitize_filename(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let trimmed = replaced.trim_matches(|c| c == '.' || c == ' ');
    if trimmed.is_empty() {
        "_".to_string()
    } else {
        trimmed.to_string()
    }
}
