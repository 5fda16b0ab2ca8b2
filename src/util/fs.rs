//! Filesystem utilities.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Ensure a directory exists, creating it and any missing ancestors.
///
/// Succeeds when the directory is already there.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}

/// Walk `root` and return the first regular file named `file_name`.
///
/// Sibling order is whatever the directory traversal yields. Unreadable
/// entries are skipped; a missing root yields `None`.
pub fn find_file_named(root: &Path, file_name: &str) -> Option<PathBuf> {
    let wanted = OsStr::new(file_name);

    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .find(|entry| entry.file_type().is_file() && entry.file_name() == wanted)
        .map(|entry| entry.into_path())
}
