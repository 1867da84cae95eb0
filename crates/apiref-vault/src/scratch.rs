//! Removal of the scratch directory when a run ends.

use std::io;
use std::path::{Path, PathBuf};

/// Deletes the scratch directory when dropped, on success and on every
/// early return alike.
#[derive(Debug)]
pub struct ScratchGuard {
    dir: PathBuf,
}

impl ScratchGuard {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }
}

impl Drop for ScratchGuard {
    fn drop(&mut self) {
        match std::fs::remove_dir_all(&self.dir) {
            Ok(()) => tracing::debug!(dir = %self.dir.display(), "removed scratch directory"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(dir = %self.dir.display(), error = %e, "failed to remove scratch directory")
            }
        }
    }
}
