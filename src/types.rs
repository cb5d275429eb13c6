use std::fmt;

/// Kind of filesystem change that can enqueue a fixup job.
///
/// Only creations and content modifications matter; deletions, renames out of
/// the tree, metadata and access events never reach the job queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Modified,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::Created => write!(f, "created"),
            ChangeKind::Modified => write!(f, "modified"),
        }
    }
}

/// Where a [`crate::engine::FileJob`] is in its lifecycle.
///
/// `absent -> Pending -> Executed -> absent`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    /// Waiting for its `run_at` time.
    Pending,
    /// Ran once; waiting for its `delete_at` time.
    Executed,
}
