// src/engine/mod.rs

//! Job engine for distfix.
//!
//! This module ties together:
//! - the file job queue (one job per path, debounced)
//! - the runtime loop that reacts to:
//!   - file-change events from the watcher
//!   - poll ticks (run due jobs, purge finished ones)
//!   - shutdown signals
//! - the single-pass batch mode
//!
//! The queue in [`queue`] is pure and clock-free; the async/IO shell is
//! implemented in [`runtime`].

use std::path::PathBuf;
use std::time::Duration;

use crate::types::ChangeKind;

/// Runtime timing options.
#[derive(Debug, Clone)]
pub struct RuntimeOptions {
    /// How often due jobs are checked.
    pub poll_interval: Duration,
    /// How long an executed job stays queued (and keeps swallowing events for
    /// its path) before it is purged.
    pub grace_period: Duration,
    /// Directory that progress lines are printed relative to.
    pub root: PathBuf,
}

impl RuntimeOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            poll_interval: Duration::from_millis(10),
            grace_period: Duration::from_millis(100),
            root: root.into(),
        }
    }
}

/// Events flowing into the runtime from the watcher and signal handler.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// A file under the watched tree was created or modified.
    FileChanged { path: PathBuf, kind: ChangeKind },
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

pub mod batch;
pub mod job;
pub mod queue;
pub mod runtime;

pub use batch::{fix_directory, BatchReport};
pub use job::FileJob;
pub use queue::FileJobs;
pub use runtime::Runtime;
