//! Snapshot file discovery.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Collects every `*.csv` file under `dir`, recursively, in sorted order.
///
/// An empty result is not an error; callers decide whether zero snapshot
/// files is acceptable.
///
/// # Errors
///
/// Returns an error when a directory cannot be read.
pub fn snapshot_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    walk(dir, &mut files)?;
    files.sort();
    Ok(files)
}

fn walk(dir: &Path, out: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk(&path, out)?;
        } else if path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
        {
            out.push(path);
        }
    }
    Ok(())
}
