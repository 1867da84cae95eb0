//! A full run: match, prune, rename, report.

use std::path::PathBuf;

use apiref_core::error::Result;
use apiref_core::ReconcileConfig;

use crate::matcher::match_scratch;
use crate::operator::Operator;
use crate::pruner::{prune, PruneOutcome};
use crate::renamer::rename_new_files;
use crate::report::navigation_entries;
use crate::scratch::ScratchGuard;
use crate::SEPARATOR;

/// How a run ended, when it did not fail.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Completed(Summary),
    /// The operator declined pruning; nothing was deleted or renamed.
    Declined { unmatched: Vec<PathBuf> },
}

/// What a completed run changed.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// Scraped pages dropped because an identical page already existed.
    pub duplicates: usize,
    /// Target pages deleted by pruning.
    pub removed: Vec<PathBuf>,
    /// New pages moved into the target tree, in prompt order.
    pub renamed: Vec<PathBuf>,
}

/// Reconcile the scratch directory with the target tree.
///
/// The scratch directory is removed when this returns, whether the run
/// completed, was declined, or failed.
///
/// # Errors
///
/// Any stage error ends the run. Changes already made by earlier steps
/// (deleted duplicates, pruned pages, moved pages) are kept.
pub fn reconcile<O: Operator + ?Sized>(
    config: &ReconcileConfig,
    operator: &mut O,
) -> Result<Outcome> {
    let _scratch = ScratchGuard::new(&config.scratch_dir);

    let matched = match_scratch(config)?;

    let removed = match prune(config, &matched.seen, operator)? {
        PruneOutcome::NothingToRemove => Vec::new(),
        PruneOutcome::Removed(pages) => pages,
        PruneOutcome::Declined(unmatched) => {
            operator.say("Aborted.")?;
            return Ok(Outcome::Declined { unmatched });
        }
    };

    let mut summary = Summary {
        duplicates: matched.duplicates,
        removed,
        renamed: Vec::new(),
    };

    if matched.new_files.is_empty() {
        operator.say("Done.")?;
        return Ok(Outcome::Completed(summary));
    }

    operator.say(SEPARATOR)?;
    operator.say("One or more new API endpoints were found!")?;
    operator.say(
        "Please state what these API endpoints should appear as in the API reference sidebar.",
    )?;
    operator.say("(Leave empty to accept the default suggestion)")?;

    summary.renamed = rename_new_files(config, &matched.new_files, operator)?;

    operator.say("Now add the newly generated files to mint.json (create your own groups!):")?;
    for entry in navigation_entries(&summary.renamed, &config.extension) {
        operator.say(&entry)?;
    }

    Ok(Outcome::Completed(summary))
}
