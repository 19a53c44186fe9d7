//! Integration tests for writing tables and playlists.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use insta::assert_snapshot;

use dmt_model::{FileRole, SourceRow, Table, TableName};
use dmt_output::{
    UTF8_BOM, build_playlist, ensure_output_dir, output_dir_name, playlist_name, write_playlist,
    write_table,
};

#[test]
fn delete_and_add_run_writes_ordered_playlist() {
    let base = tempfile::tempdir().unwrap();
    let rows = vec![SourceRow::new("C1", "Variant", "Red", "Shiny", "P1", "S1")];
    let mut written: Vec<(PathBuf, FileRole)> = Vec::new();

    for (stem, role) in [("Old", FileRole::Delete), ("New", FileRole::Add)] {
        let dir = ensure_output_dir(base.path(), &output_dir_name(stem)).unwrap();
        for name in [TableName::Ud11, TableName::Ud10] {
            let path = dir.join(name.file_name(stem));
            write_table(&path, &Table::from_records(name, &rows)).unwrap();
            written.push((path, role));
        }
    }

    let include: BTreeSet<String> = ["UD11".to_string()].into_iter().collect();
    let playlist = build_playlist(
        written.iter().map(|(path, role)| (path.as_path(), *role)),
        &include,
    );
    let name = playlist_name(&[(FileRole::Delete, "Old"), (FileRole::Add, "New")]);
    let path = write_playlist(base.path(), &name, &playlist).unwrap();
    assert!(path.ends_with("DEL_Old_ADD_New_PLAYLIST.csv"));

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(UTF8_BOM));
    let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
    let prefix = base.path().display().to_string();
    let text = text.replace(&prefix, "<base>").replace('\\', "/");
    assert_snapshot!(text.trim_end(), @r"
    Import,Source,Add,Update,Delete,Wait
    UD11,<base>/Old_OUTPUT/Old_UD11.csv,False,False,True,True
    UD11,<base>/New_OUTPUT/New_UD11.csv,True,True,False,True
    ");
}
