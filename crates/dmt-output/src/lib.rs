//! Output generation for DMT builds.
//!
//! Tables are written as UTF-8 CSV with a byte-order mark so spreadsheet
//! tools and the import tool agree on the encoding. The playlist manifest
//! lists the written files in import order.

pub mod paths;
pub mod playlist;
pub mod writer;

pub use paths::{
    OUTPUT_DIR_SUFFIX, SourceLocation, ensure_output_dir, output_dir_name, sanitize_filename,
    stem_and_dir,
};
pub use playlist::{
    PLAYLIST_SUFFIX, PlaylistRow, build_playlist, import_name_from_path, playlist_file_name,
    playlist_name, write_playlist,
};
pub use writer::{UTF8_BOM, write_csv, write_table};
