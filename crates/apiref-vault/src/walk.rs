//! Recursive directory listing.

use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use apiref_core::error::{ApirefError, Result};

/// All regular files under `root`, depth-first in lexical order.
///
/// The order is stable across platforms, so "first match" and prompt order
/// do not depend on the file system.
///
/// # Errors
///
/// Returns [`ApirefError::Io`] if `root` is missing or any entry cannot be read.
pub fn list_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| ApirefError::Io(e.into()))?;
        if !entry.file_type().is_dir() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Render a path with `/` separators regardless of platform.
pub fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::CurDir => None,
            Component::RootDir => Some(String::new()),
            other => Some(other.as_os_str().to_string_lossy().into_owned()),
        })
        .collect::<Vec<_>>()
        .join("/")
}
