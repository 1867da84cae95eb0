//! Stage 3: name new pages and move them into the target tree.
//!
//! The renamer suggests a sidebar title from each page's route, lets the
//! operator override it, and files the page under a directory mirroring the
//! route.

use std::fs;
use std::path::{Path, PathBuf};

use apiref_core::error::{ApirefError, Result};
use apiref_core::naming::{default_display_name, file_name, route_directory};
use apiref_core::{ReconcileConfig, RouteDescriptor};

use crate::operator::Operator;

/// A new page with everything needed to prompt for its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPage {
    pub source: PathBuf,
    pub route: RouteDescriptor,
    pub default_name: String,
    pub directory: PathBuf,
}

impl PendingPage {
    /// Read the page at `source` and derive its default name and directory.
    ///
    /// # Errors
    ///
    /// Returns [`ApirefError::Fs`] if the page cannot be read and
    /// [`ApirefError::Route`] if its route line is malformed.
    pub fn read(source: &Path, target_root: &Path) -> Result<Self> {
        let bytes = fs::read(source).map_err(|e| ApirefError::fs("failed to read", source, e))?;
        let route = RouteDescriptor::from_content(&String::from_utf8_lossy(&bytes), source)?;
        Ok(Self {
            source: source.to_path_buf(),
            default_name: default_display_name(&route),
            directory: route_directory(target_root, &route),
            route,
        })
    }

    /// Final location for the page given the operator's answer.
    ///
    /// A blank answer takes the default name.
    pub fn destination(&self, answer: &str, extension: &str) -> PathBuf {
        let name = if answer.is_empty() {
            self.default_name.as_str()
        } else {
            answer
        };
        self.directory.join(file_name(name, extension))
    }
}

/// Names containing a path separator would land outside the route directory.
fn is_valid_name(answer: &str) -> bool {
    !answer.contains(['/', '\\'])
}

/// Prompt for a name for every new page and move it into place, in order.
///
/// Returns the destinations of all moved pages.
///
/// # Errors
///
/// The first failure to read, parse, create a directory or move aborts the batch.
/// Pages moved before the failure stay where they were moved.
pub fn rename_new_files<O: Operator + ?Sized>(
    config: &ReconcileConfig,
    new_files: &[PathBuf],
    operator: &mut O,
) -> Result<Vec<PathBuf>> {
    let mut moved = Vec::with_capacity(new_files.len());

    for source in new_files {
        let page = PendingPage::read(source, &config.target_dir)?;
        let prompt = format!(
            "Route: \"{}\" (default: \"{}\") => ",
            page.route, page.default_name
        );
        let answer = loop {
            let answer = operator.ask(&prompt)?;
            if is_valid_name(&answer) {
                break answer;
            }
            operator.say("Names cannot contain '/' or '\\', try again.")?;
        };

        let destination = page.destination(&answer, &config.extension);
        fs::create_dir_all(&page.directory)
            .map_err(|e| ApirefError::fs("failed to create", &page.directory, e))?;
        if destination.exists() {
            tracing::warn!(page = %destination.display(), "overwriting existing page");
        }
        fs::rename(&page.source, &destination)
            .map_err(|e| ApirefError::fs("failed to move", &page.source, e))?;
        tracing::debug!(from = %page.source.display(), to = %destination.display(), "moved page");
        moved.push(destination);
    }

    tracing::info!(pages = moved.len(), "renamed new pages");
    Ok(moved)
}
