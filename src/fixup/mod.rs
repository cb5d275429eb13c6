// src/fixup/mod.rs

//! The actual file fixup: strip the marker from a file's contents and write
//! the result back.
//!
//! - [`strip_marker`] is the pure text transformation.
//! - [`Fixer`] applies it to a file through a [`FileSystem`], retrying
//!   transient lock conflicts according to a [`RetryPolicy`].
//! - [`backend`] provides the `JobExecutor` seam the runtime talks to.

pub mod backend;
pub mod retry;

use std::fmt;
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::errors::{DistfixError, Result};
use crate::fs::FileSystem;

pub use backend::JobExecutor;
pub use retry::{classify_io_error, IoClass, RetryPolicy};

/// The CommonJS interop shim some bundlers emit at the top of every module.
pub const ESMODULE_MARKER: &str = r#"Object.defineProperty(exports, "__esModule", { value: true });"#;

/// What happened to a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixOutcome {
    /// The file did not exist (or vanished); nothing was done.
    Missing,
    /// No marker found; the file was not rewritten.
    Unchanged,
    /// `removed` occurrences were stripped and the file written back
    /// (or would have been, in dry-run mode).
    Fixed { removed: usize },
}

impl fmt::Display for FixOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixOutcome::Missing => write!(f, "missing"),
            FixOutcome::Unchanged => write!(f, "unchanged"),
            FixOutcome::Fixed { removed } => write!(f, "fixed ({removed} removed)"),
        }
    }
}

/// Remove every occurrence of `marker` from `contents`.
///
/// Returns the new text and the number of occurrences removed. Removal is
/// repeated until no occurrence is left, so a removal that happens to splice
/// a new marker together is cleaned up too.
pub fn strip_marker(contents: &str, marker: &str) -> (String, usize) {
    if marker.is_empty() {
        return (contents.to_string(), 0);
    }

    let mut text = contents.to_string();
    let mut removed = 0;
    loop {
        let count = text.matches(marker).count();
        if count == 0 {
            break;
        }
        removed += count;
        text = text.replace(marker, "");
    }
    (text, removed)
}

/// Applies [`strip_marker`] to files.
#[derive(Debug, Clone)]
pub struct Fixer {
    fs: Arc<dyn FileSystem>,
    marker: String,
    retry: RetryPolicy,
    dry_run: bool,
}

impl Fixer {
    pub fn new(fs: Arc<dyn FileSystem>, marker: impl Into<String>, retry: RetryPolicy) -> Self {
        Self {
            fs,
            marker: marker.into(),
            retry,
            dry_run: false,
        }
    }

    /// In dry-run mode files are read and analysed but never written.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Strip the marker from the file at `path`.
    ///
    /// A missing file is a silent no-op. Lock conflicts are retried per the
    /// retry policy; every other IO error is returned as
    /// [`DistfixError::Fatal`].
    pub async fn fix_file(&self, path: &Path) -> Result<FixOutcome> {
        if !self.fs.exists(path) {
            debug!(path = %path.display(), "file does not exist; skipping");
            return Ok(FixOutcome::Missing);
        }

        let Some(contents) = self
            .with_retry(path, "read", || self.fs.read_to_string(path))
            .await?
        else {
            return Ok(FixOutcome::Missing);
        };

        let (fixed, removed) = strip_marker(&contents, &self.marker);
        if removed == 0 {
            debug!(path = %path.display(), "no marker found");
            return Ok(FixOutcome::Unchanged);
        }

        if self.dry_run {
            info!(path = %path.display(), removed, "dry-run: would strip marker");
            return Ok(FixOutcome::Fixed { removed });
        }

        match self
            .with_retry(path, "write", || self.fs.write(path, fixed.as_bytes()))
            .await?
        {
            Some(()) => {
                info!(path = %path.display(), removed, "stripped marker");
                Ok(FixOutcome::Fixed { removed })
            }
            None => Ok(FixOutcome::Missing),
        }
    }

    /// Run `op` until it succeeds, the file turns out to be missing
    /// (`Ok(None)`), or the error is fatal / retries are exhausted.
    async fn with_retry<T>(
        &self,
        path: &Path,
        what: &str,
        mut op: impl FnMut() -> io::Result<T>,
    ) -> Result<Option<T>> {
        let mut attempt: u32 = 0;
        loop {
            let err = match op() {
                Ok(value) => return Ok(Some(value)),
                Err(err) => err,
            };

            match classify_io_error(&err) {
                IoClass::NotFound => {
                    debug!(path = %path.display(), op = what, "file vanished; skipping");
                    return Ok(None);
                }
                IoClass::TransientLock => {
                    attempt += 1;
                    if attempt >= self.retry.max_attempts {
                        return Err(DistfixError::RetriesExhausted {
                            path: path.to_path_buf(),
                            attempts: attempt,
                            source: err,
                        });
                    }
                    let delay = self.retry.delay_for(attempt - 1);
                    warn!(
                        path = %path.display(),
                        op = what,
                        attempt,
                        ?delay,
                        error = %err,
                        "file locked; retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                IoClass::Fatal => {
                    return Err(DistfixError::Fatal {
                        path: path.to_path_buf(),
                        source: err,
                    });
                }
            }
        }
    }
}
