// src/engine/batch.rs

//! Batch mode: fix every entry of the output directory once.
//!
//! No queue is involved. Entries are listed non-recursively and fixed one
//! after another with the same [`Fixer`] the watch-mode runtime uses.

use std::path::Path;

use tracing::{debug, info};

use crate::errors::Result;
use crate::fixup::{FixOutcome, Fixer};
use crate::fs::FileSystem;
use crate::watch::path_utils::{display_path, relative_str};
use crate::watch::PathFilter;

/// Per-outcome counts of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub fixed: usize,
    pub unchanged: usize,
    pub missing: usize,
    /// Directories and excluded entries.
    pub skipped: usize,
}

impl BatchReport {
    fn record(&mut self, outcome: FixOutcome) {
        match outcome {
            FixOutcome::Fixed { .. } => self.fixed += 1,
            FixOutcome::Unchanged => self.unchanged += 1,
            FixOutcome::Missing => self.missing += 1,
        }
    }
}

/// Fix each direct entry of `dir`.
///
/// Stops at the first fatal error.
pub async fn fix_directory(
    fs: &dyn FileSystem,
    fixer: &Fixer,
    dir: &Path,
    filter: &PathFilter,
) -> Result<BatchReport> {
    let mut report = BatchReport::default();

    for path in fs.read_dir(dir)? {
        if fs.is_dir(&path) {
            debug!(path = %path.display(), "skipping directory");
            report.skipped += 1;
            continue;
        }

        if let Some(rel) = relative_str(dir, &path) {
            if filter.is_excluded(&rel) {
                debug!(path = %rel, "skipping excluded file");
                report.skipped += 1;
                continue;
            }
        }

        println!("Fixing file {}", display_path(dir, &path));
        let outcome = fixer.fix_file(&path).await?;
        report.record(outcome);
    }

    info!(
        fixed = report.fixed,
        unchanged = report.unchanged,
        missing = report.missing,
        skipped = report.skipped,
        "batch run complete"
    );
    Ok(report)
}
