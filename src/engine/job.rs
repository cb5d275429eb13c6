// src/engine/job.rs

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::types::JobState;

/// One pending or completed fixup for a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileJob {
    path: PathBuf,
    run_at: Option<Instant>,
    delete_at: Option<Instant>,
}

impl FileJob {
    /// A new job, due immediately at `now`.
    pub fn new(path: impl Into<PathBuf>, now: Instant) -> Self {
        Self {
            path: path.into(),
            run_at: Some(now),
            delete_at: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn run_at(&self) -> Option<Instant> {
        self.run_at
    }

    pub fn delete_at(&self) -> Option<Instant> {
        self.delete_at
    }

    pub fn state(&self) -> JobState {
        if self.run_at.is_some() {
            JobState::Pending
        } else {
            JobState::Executed
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.run_at.is_some_and(|at| at <= now)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.delete_at.is_some_and(|at| at <= now)
    }

    /// Record that the job ran at `now`; it will be purged after `grace`.
    pub fn mark_executed(&mut self, now: Instant, grace: Duration) {
        self.run_at = None;
        self.delete_at = Some(now + grace);
    }
}
