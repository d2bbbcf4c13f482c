//! Input list construction with recursive directory expansion.
//!
//! Given a mixed list of file and directory paths, [`create_file_list`] returns
//! a flat `Vec<PathBuf>`. Directories are walked recursively with [`walkdir`]
//! and contribute only regular files carrying the compressed-file suffix;
//! paths given directly are forwarded untouched, so a misnamed file named on
//! the command line is still reported rather than silently dropped.
//!
//! Symlinks are never followed during traversal (`follow_links(false)`), so a
//! cyclic link cannot loop the walk.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Expand `inputs` into a flat list of files to decode.
///
/// Entries found by walking a directory are kept only if their file name ends
/// with `suffix`; pass `""` to keep every regular file. Any unreadable
/// directory entry aborts the walk with its `io::Error`.
pub fn create_file_list(inputs: &[&Path], suffix: &str) -> io::Result<Vec<PathBuf>> {
    let mut result = Vec::new();
    for input in inputs {
        if !input.is_dir() {
            result.push(input.to_path_buf());
            continue;
        }
        for entry in WalkDir::new(input).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                e.io_error()
                    .map(|io| io::Error::new(io.kind(), io.to_string()))
                    .unwrap_or_else(|| io::Error::other(e.to_string()))
            })?;
            if entry.file_type().is_file() && has_suffix(entry.path(), suffix) {
                result.push(entry.into_path());
            }
        }
    }
    Ok(result)
}

fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.len() > suffix.len() && n.ends_with(suffix))
}
