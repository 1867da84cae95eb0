//! Stage 1: sort scraped pages into duplicates and new pages.
//!
//! A scraped page whose bytes equal a page already in the target tree is
//! deleted from scratch and the target page is marked as seen. Everything
//! else is new and goes on to the renamer.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use apiref_core::error::{ApirefError, Result};
use apiref_core::{ContentDigest, ReconcileConfig};

use crate::walk::list_files;

/// Target pages keyed by content digest.
///
/// Candidates under one digest keep walk order and are confirmed with a byte
/// comparison, so the first identical page in walk order always wins.
#[derive(Debug, Default)]
pub struct TargetIndex {
    by_digest: HashMap<ContentDigest, Vec<PathBuf>>,
    len: usize,
}

impl TargetIndex {
    /// Read every page under `root`.
    ///
    /// # Errors
    ///
    /// Fails if the tree cannot be walked or a page cannot be read.
    pub fn build(root: &Path) -> Result<Self> {
        let mut index = Self::default();
        for path in list_files(root)? {
            let content = fs::read(&path).map_err(|e| ApirefError::fs("failed to read", &path, e))?;
            index
                .by_digest
                .entry(ContentDigest::of(&content))
                .or_default()
                .push(path);
            index.len += 1;
        }
        tracing::debug!(root = %root.display(), pages = index.len, "indexed target pages");
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First target page whose bytes equal `content`.
    ///
    /// # Errors
    ///
    /// Fails if a candidate page can no longer be read.
    pub fn find(&self, content: &[u8]) -> Result<Option<&Path>> {
        let Some(candidates) = self.by_digest.get(&ContentDigest::of(content)) else {
            return Ok(None);
        };
        for candidate in candidates {
            let existing =
                fs::read(candidate).map_err(|e| ApirefError::fs("failed to read", candidate, e))?;
            if existing == content {
                return Ok(Some(candidate.as_path()));
            }
        }
        Ok(None)
    }
}

/// Result of the matching stage.
#[derive(Debug, Default)]
pub struct MatchReport {
    /// Target pages that a scraped page duplicated.
    pub seen: BTreeSet<PathBuf>,
    /// Scraped pages with no identical target page, in walk order.
    pub new_files: Vec<PathBuf>,
    /// Number of scraped pages deleted as duplicates.
    pub duplicates: usize,
}

/// Match every page in the scratch directory against the target tree.
///
/// Duplicates are deleted from scratch as they are found.
///
/// # Errors
///
/// Any walk, read, or delete failure aborts the stage. Duplicates deleted
/// before the failure stay deleted.
pub fn match_scratch(config: &ReconcileConfig) -> Result<MatchReport> {
    let index = TargetIndex::build(&config.target_dir)?;
    let mut report = MatchReport::default();

    for path in list_files(&config.scratch_dir)? {
        let content = fs::read(&path).map_err(|e| ApirefError::fs("failed to read", &path, e))?;
        match index.find(&content)? {
            Some(existing) => {
                fs::remove_file(&path).map_err(|e| ApirefError::fs("failed to remove", &path, e))?;
                tracing::debug!(scratch = %path.display(), existing = %existing.display(), "duplicate page");
                report.seen.insert(existing.to_path_buf());
                report.duplicates += 1;
            }
            None => {
                tracing::debug!(scratch = %path.display(), "new page");
                report.new_files.push(path);
            }
        }
    }

    tracing::info!(
        duplicates = report.duplicates,
        new = report.new_files.len(),
        "matched scratch pages"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        _dir: tempfile::TempDir,
        config: ReconcileConfig,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let config = ReconcileConfig {
                scratch_dir: dir.path().join("tmp"),
                target_dir: dir.path().join("reference/api"),
                ..ReconcileConfig::default()
            };
            fs::create_dir_all(&config.scratch_dir).unwrap();
            fs::create_dir_all(&config.target_dir).unwrap();
            Self { _dir: dir, config }
        }

        fn scratch(&self, rel: &str, content: &str) -> PathBuf {
            write(&self.config.scratch_dir.join(rel), content)
        }

        fn target(&self, rel: &str, content: &str) -> PathBuf {
            write(&self.config.target_dir.join(rel), content)
        }
    }

    fn write(path: &Path, content: &str) -> PathBuf {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
        path.to_path_buf()
    }

    #[test]
    fn identical_pages_are_removed_from_scratch() {
        let fx = Fixture::new();
        let scraped = fx.scratch("get-widget.mdx", "---\nopenapi: get /api/widgets/{id}\n---\n");
        let existing = fx.target(
            "widgets/{id}/fetch-widget.mdx",
            "---\nopenapi: get /api/widgets/{id}\n---\n",
        );

        let report = match_scratch(&fx.config).unwrap();
        assert!(!scraped.exists());
        assert!(existing.exists());
        assert!(report.seen.contains(&existing));
        assert!(report.new_files.is_empty());
        assert_eq!(report.duplicates, 1);
    }

    #[test]
    fn differing_pages_are_new() {
        let fx = Fixture::new();
        let scraped = fx.scratch("a.mdx", "---\nopenapi: post /api/widgets\n---\nv2\n");
        fx.target("widgets/create-widget.mdx", "---\nopenapi: post /api/widgets\n---\nv1\n");

        let report = match_scratch(&fx.config).unwrap();
        assert!(scraped.exists());
        assert_eq!(report.new_files, vec![scraped]);
        assert!(report.seen.is_empty());
    }

    #[test]
    fn new_files_follow_walk_order() {
        let fx = Fixture::new();
        let b = fx.scratch("b/page.mdx", "b");
        let a = fx.scratch("a.mdx", "a");
        let c = fx.scratch("c.mdx", "c");

        let report = match_scratch(&fx.config).unwrap();
        assert_eq!(report.new_files, vec![a, b, c]);
    }

    #[test]
    fn first_identical_target_wins() {
        let fx = Fixture::new();
        fx.scratch("x.mdx", "same");
        let first = fx.target("a/one.mdx", "same");
        let second = fx.target("b/two.mdx", "same");

        let report = match_scratch(&fx.config).unwrap();
        assert!(report.seen.contains(&first));
        assert!(!report.seen.contains(&second));
    }

    #[test]
    fn missing_target_directory_aborts() {
        let fx = Fixture::new();
        fx.scratch("a.mdx", "a");
        fs::remove_dir_all(&fx.config.target_dir).unwrap();

        assert!(match_scratch(&fx.config).is_err());
    }

    #[test]
    fn index_reports_size_and_misses() {
        let fx = Fixture::new();
        fx.target("a.mdx", "a");
        fx.target("b.mdx", "b");

        let index = TargetIndex::build(&fx.config.target_dir).unwrap();
        assert_eq!(index.len(), 2);
        assert!(!index.is_empty());
        assert!(index.find(b"c").unwrap().is_none());
        assert!(index.find(b"a").unwrap().is_some());
    }
}
