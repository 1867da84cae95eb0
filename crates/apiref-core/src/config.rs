//! Run configuration.
//!
//! Resolved once at startup (defaults, then an optional `apiref.toml`, then
//! command-line overrides) and passed by reference into every stage.
//!
//! ```toml
//! scratch_dir = "tmp"
//! target_dir = "reference/api"
//! protected = ["introduction.mdx"]
//! extension = "mdx"
//! ```

use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::error::{ApirefError, Result};

/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "apiref.toml";

/// Directories and rules for one reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReconcileConfig {
    /// Where the scraper drops freshly generated pages. Removed after every run.
    pub scratch_dir: PathBuf,
    /// The curated reference tree.
    pub target_dir: PathBuf,
    /// Pages under `target_dir` that are never pruned, relative to `target_dir`.
    pub protected: Vec<PathBuf>,
    /// Extension given to renamed pages, without the dot.
    pub extension: String,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            scratch_dir: PathBuf::from("tmp"),
            target_dir: PathBuf::from("reference/api"),
            protected: vec![PathBuf::from("introduction.mdx")],
            extension: "mdx".to_string(),
        }
    }
}

impl ReconcileConfig {
    /// Parse a TOML config. Missing keys fall back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ApirefError::Config`] on malformed TOML or unknown keys.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| ApirefError::Config(e.to_string()))
    }

    /// Read and parse a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ApirefError::Fs`] if the file cannot be read, otherwise as
    /// [`ReconcileConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ApirefError::fs("failed to read config", path, e))?;
        Self::from_toml_str(&content)
    }

    /// Check the directories are safe to work on.
    ///
    /// The scratch directory is deleted wholesale at the end of a run, so it
    /// must not overlap the target tree in either direction. Both paths are
    /// compared in absolute form with `.` and `..` folded away; symlinks are
    /// not followed.
    ///
    /// # Errors
    ///
    /// Returns [`ApirefError::Config`] describing the first problem found, or
    /// [`ApirefError::Fs`] if the working directory cannot be determined.
    pub fn validate(&self) -> Result<()> {
        if self.extension.is_empty() || self.extension.starts_with('.') {
            return Err(ApirefError::Config(format!(
                "extension must be non-empty and given without a dot, got {:?}",
                self.extension
            )));
        }

        let scratch = normalized(&self.scratch_dir)?;
        let target = normalized(&self.target_dir)?;
        if scratch == normalized(Path::new("."))? {
            return Err(ApirefError::Config(
                "scratch_dir must not be the working directory".to_string(),
            ));
        }
        if scratch.starts_with(&target) || target.starts_with(&scratch) {
            return Err(ApirefError::Config(format!(
                "scratch_dir ({}) and target_dir ({}) must not contain each other",
                self.scratch_dir.display(),
                self.target_dir.display()
            )));
        }

        if let Some(bad) = self
            .protected
            .iter()
            .find(|p| p.is_absolute() || p.components().any(|c| c == Component::ParentDir))
        {
            return Err(ApirefError::Config(format!(
                "protected path {} must be relative to target_dir",
                bad.display()
            )));
        }

        Ok(())
    }

    /// Whether a path found while walking `target_dir` is protected from pruning.
    pub fn is_protected(&self, path: &Path) -> bool {
        let path = lexical(path);
        self.protected
            .iter()
            .any(|p| lexical(&self.target_dir.join(p)) == path)
    }
}

/// Absolute form of `path` with `.` and `..` resolved lexically.
fn normalized(path: &Path) -> Result<PathBuf> {
    let path = if path.as_os_str().is_empty() {
        Path::new(".")
    } else {
        path
    };
    let absolute =
        std::path::absolute(path).map_err(|e| ApirefError::fs("failed to resolve", path, e))?;
    let mut resolved = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other),
        }
    }
    Ok(resolved)
}

/// Drop `.` components so `./tmp` and `tmp` compare equal.
fn lexical(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| *c != Component::CurDir)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_scraper_layout() {
        let config = ReconcileConfig::default();
        assert_eq!(config.scratch_dir, Path::new("tmp"));
        assert_eq!(config.target_dir, Path::new("reference/api"));
        assert_eq!(config.extension, "mdx");
        assert!(config.is_protected(Path::new("reference/api/introduction.mdx")));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = ReconcileConfig::from_toml_str("target_dir = \"docs/api\"\n").unwrap();
        assert_eq!(config.target_dir, Path::new("docs/api"));
        assert_eq!(config.scratch_dir, Path::new("tmp"));
        assert_eq!(config.protected, vec![PathBuf::from("introduction.mdx")]);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ReconcileConfig::from_toml_str("scratch = \"tmp\"\n").unwrap_err();
        assert!(matches!(err, ApirefError::Config(_)));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "protected = [\"overview.mdx\", \"auth/intro.mdx\"]\n").unwrap();

        let config = ReconcileConfig::load(&path).unwrap();
        assert!(config.is_protected(Path::new("reference/api/auth/intro.mdx")));
        assert!(config.is_protected(Path::new("./reference/api/overview.mdx")));
        assert!(!config.is_protected(Path::new("reference/api/introduction.mdx")));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReconcileConfig::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ApirefError::Fs { .. }));
    }

    #[test]
    fn validate_rejects_overlapping_directories() {
        let config = ReconcileConfig {
            scratch_dir: PathBuf::from("reference"),
            ..ReconcileConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ReconcileConfig {
            scratch_dir: PathBuf::from("./reference/api/tmp"),
            ..ReconcileConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ReconcileConfig {
            scratch_dir: PathBuf::from("."),
            ..ReconcileConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_compares_absolute_and_relative_paths() {
        let cwd = std::env::current_dir().unwrap();

        let config = ReconcileConfig {
            scratch_dir: cwd.join("reference"),
            ..ReconcileConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ReconcileConfig {
            scratch_dir: PathBuf::from("tmp"),
            target_dir: cwd.join("tmp/api"),
            ..ReconcileConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ReconcileConfig {
            scratch_dir: cwd.join("tmp"),
            ..ReconcileConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_resolves_parent_components() {
        let config = ReconcileConfig {
            scratch_dir: PathBuf::from("reference/api/../../reference"),
            ..ReconcileConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ReconcileConfig {
            scratch_dir: PathBuf::from("tmp/.."),
            ..ReconcileConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ReconcileConfig {
            scratch_dir: PathBuf::from("docs/../tmp"),
            target_dir: PathBuf::from("./reference/./api"),
            ..ReconcileConfig::default()
        };
        assert!(config.validate().is_ok());

        let config = ReconcileConfig {
            scratch_dir: PathBuf::from("reference/api-scratch"),
            ..ReconcileConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_extension_and_escaping_protected_paths() {
        let config = ReconcileConfig {
            extension: ".mdx".to_string(),
            ..ReconcileConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ReconcileConfig {
            protected: vec![PathBuf::from("../README.md")],
            ..ReconcileConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
