// src/engine/queue.rs

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::debug;

use super::job::FileJob;

/// Ordered collection of file jobs, at most one per path.
///
/// Semantics:
/// - `add` only inserts when no job for that path exists yet. A second event
///   for a path whose job is still pending, or already executed but not yet
///   purged, is dropped. A rapid re-write that lands between execution and
///   purge is therefore not fixed again.
/// - Jobs become due at their `run_at` and are purged at their `delete_at`.
///
/// The queue performs no IO and never reads the clock itself: every
/// time-dependent call takes `now`, which keeps it deterministic under test.
#[derive(Debug, Default)]
pub struct FileJobs {
    jobs: Vec<FileJob>,
}

impl FileJobs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn find(&self, path: &Path) -> Option<&FileJob> {
        self.jobs.iter().find(|job| job.path() == path)
    }

    fn find_mut(&mut self, path: &Path) -> Option<&mut FileJob> {
        self.jobs.iter_mut().find(|job| job.path() == path)
    }

    /// Queue a job for `path`, due at `now`.
    ///
    /// Returns `false` (and changes nothing) if a job for `path` already
    /// exists.
    pub fn add(&mut self, path: impl Into<PathBuf>, now: Instant) -> bool {
        let path = path.into();
        if self.find(&path).is_some() {
            debug!(path = %path.display(), "job already queued; ignoring");
            return false;
        }
        debug!(path = %path.display(), "queued new job");
        self.jobs.push(FileJob::new(path, now));
        true
    }

    /// Remove the job for `path`, if any.
    pub fn remove(&mut self, path: &Path) -> Option<FileJob> {
        let idx = self.jobs.iter().position(|job| job.path() == path)?;
        Some(self.jobs.remove(idx))
    }

    /// Snapshot of the paths whose jobs are due at `now`, in queue order.
    pub fn due_paths(&self, now: Instant) -> Vec<PathBuf> {
        self.jobs
            .iter()
            .filter(|job| job.is_due(now))
            .map(|job| job.path().to_path_buf())
            .collect()
    }

    /// Mark the job for `path` as executed at `now`, to be purged after
    /// `grace`. Returns `false` if no such job exists.
    pub fn mark_executed(&mut self, path: &Path, now: Instant, grace: Duration) -> bool {
        match self.find_mut(path) {
            Some(job) => {
                job.mark_executed(now, grace);
                true
            }
            None => false,
        }
    }

    /// Remove every job whose `delete_at` has been reached, returning the
    /// purged paths.
    pub fn purge_expired(&mut self, now: Instant) -> Vec<PathBuf> {
        let mut purged = Vec::new();
        self.jobs.retain(|job| {
            if job.is_expired(now) {
                purged.push(job.path().to_path_buf());
                false
            } else {
                true
            }
        });
        if !purged.is_empty() {
            debug!(purged = purged.len(), "purged finished jobs");
        }
        purged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::JobState;

    const GRACE: Duration = Duration::from_millis(100);

    #[test]
    fn add_twice_keeps_a_single_job() {
        let now = Instant::now();
        let mut jobs = FileJobs::new();

        assert!(jobs.add("/dist/a.js", now));
        assert!(!jobs.add("/dist/a.js", now));
        assert_eq!(jobs.len(), 1);
    }

    #[test]
    fn remove_and_find() {
        let now = Instant::now();
        let mut jobs = FileJobs::new();
        jobs.add("/dist/a.js", now);
        jobs.add("/dist/b.js", now);

        assert!(jobs.find(Path::new("/dist/b.js")).is_some());
        let removed = jobs.remove(Path::new("/dist/a.js")).unwrap();
        assert_eq!(removed.path(), Path::new("/dist/a.js"));
        assert!(jobs.remove(Path::new("/dist/a.js")).is_none());
        assert!(jobs.find(Path::new("/dist/a.js")).is_none());
        assert_eq!(jobs.len(), 1);
    }

    #[test]
    fn due_paths_preserve_insertion_order() {
        let now = Instant::now();
        let mut jobs = FileJobs::new();
        jobs.add("/dist/z.js", now);
        jobs.add("/dist/a.js", now);
        jobs.add("/dist/later.js", now + Duration::from_secs(5));

        assert_eq!(
            jobs.due_paths(now),
            vec![PathBuf::from("/dist/z.js"), PathBuf::from("/dist/a.js")]
        );
    }

    #[test]
    fn executed_job_is_not_due_again_and_expires_after_grace() {
        let t0 = Instant::now();
        let mut jobs = FileJobs::new();
        jobs.add("/dist/a.js", t0);

        assert!(jobs.mark_executed(Path::new("/dist/a.js"), t0, GRACE));
        let job = jobs.find(Path::new("/dist/a.js")).unwrap();
        assert_eq!(job.state(), JobState::Executed);
        assert_eq!(job.run_at(), None);
        assert_eq!(job.delete_at(), Some(t0 + GRACE));
        assert!(jobs.due_paths(t0 + GRACE).is_empty());

        assert!(jobs.purge_expired(t0 + Duration::from_millis(99)).is_empty());
        assert_eq!(
            jobs.purge_expired(t0 + GRACE),
            vec![PathBuf::from("/dist/a.js")]
        );
        assert!(jobs.is_empty());
    }

    #[test]
    fn mark_executed_on_unknown_path_is_false() {
        let mut jobs = FileJobs::new();
        assert!(!jobs.mark_executed(Path::new("/nope"), Instant::now(), GRACE));
    }
}
