//! Stage 2: remove target pages whose operation disappeared from the API.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use apiref_core::error::{ApirefError, Result};
use apiref_core::ReconcileConfig;

use crate::operator::Operator;
use crate::walk::{list_files, slash_path};
use crate::SEPARATOR;

/// What the pruning stage did.
#[derive(Debug, PartialEq, Eq)]
pub enum PruneOutcome {
    /// Every unprotected target page was matched.
    NothingToRemove,
    /// The operator confirmed and these pages were deleted.
    Removed(Vec<PathBuf>),
    /// The operator declined; these pages were left in place.
    Declined(Vec<PathBuf>),
}

/// Target pages that no scraped page duplicated and that are not protected,
/// in walk order.
///
/// # Errors
///
/// Fails if the target tree cannot be walked.
pub fn unmatched_files(config: &ReconcileConfig, seen: &BTreeSet<PathBuf>) -> Result<Vec<PathBuf>> {
    Ok(list_files(&config.target_dir)?
        .into_iter()
        .filter(|path| !seen.contains(path) && !config.is_protected(path))
        .collect())
}

/// List unmatched pages, ask once, and delete them all on `y`.
///
/// # Errors
///
/// Fails on walk errors, operator input errors, or the first failed
/// deletion. Pages deleted before a failure are not restored.
pub fn prune<O: Operator + ?Sized>(
    config: &ReconcileConfig,
    seen: &BTreeSet<PathBuf>,
    operator: &mut O,
) -> Result<PruneOutcome> {
    let unmatched = unmatched_files(config, seen)?;
    if unmatched.is_empty() {
        return Ok(PruneOutcome::NothingToRemove);
    }

    operator.say(SEPARATOR)?;
    operator.say("The following files are no longer in the OpenAPI spec and will be removed:")?;
    for path in &unmatched {
        operator.say(&slash_path(path))?;
    }
    if !operator.confirm("Do you want to proceed? (y/n)")? {
        tracing::info!(pages = unmatched.len(), "pruning declined");
        return Ok(PruneOutcome::Declined(unmatched));
    }

    for path in &unmatched {
        fs::remove_file(path).map_err(|e| ApirefError::fs("failed to remove", path, e))?;
        tracing::debug!(page = %path.display(), "removed stale page");
    }
    tracing::info!(pages = unmatched.len(), "pruned stale pages");
    Ok(PruneOutcome::Removed(unmatched))
}
