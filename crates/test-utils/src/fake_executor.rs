use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use distfix::errors::{DistfixError, Result};
use distfix::fixup::{FixOutcome, JobExecutor};

/// A fake executor that:
/// - records which paths were "fixed", in order
/// - reports `Fixed { removed: 1 }` for each, or a fatal error for paths
///   registered with `fail_on`
/// - never finishes jobs for paths registered with `stall_on`.
#[derive(Debug, Clone, Default)]
pub struct FakeExecutor {
    executed: Arc<Mutex<Vec<PathBuf>>>,
    failing: Arc<Mutex<Vec<PathBuf>>>,
    stalling: Arc<Mutex<Vec<PathBuf>>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make jobs for `path` fail with a fatal IO error.
    pub fn fail_on(&self, path: impl Into<PathBuf>) {
        self.failing.lock().unwrap().push(path.into());
    }

    /// Make jobs for `path` hang forever, like a file that stays locked.
    pub fn stall_on(&self, path: impl Into<PathBuf>) {
        self.stalling.lock().unwrap().push(path.into());
    }

    /// Snapshot of the paths executed so far.
    pub fn executed(&self) -> Vec<PathBuf> {
        self.executed.lock().unwrap().clone()
    }

    /// How many times `path` was executed.
    pub fn count_for(&self, path: impl AsRef<std::path::Path>) -> usize {
        self.executed
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.as_path() == path.as_ref())
            .count()
    }
}

impl JobExecutor for FakeExecutor {
    fn run_job(
        &mut self,
        path: PathBuf,
    ) -> Pin<Box<dyn Future<Output = Result<FixOutcome>> + Send + '_>> {
        let executed = Arc::clone(&self.executed);
        let failing = Arc::clone(&self.failing);
        let stalled = self.stalling.lock().unwrap().contains(&path);

        Box::pin(async move {
            executed.lock().unwrap().push(path.clone());

            if stalled {
                std::future::pending::<()>().await;
            }

            if failing.lock().unwrap().contains(&path) {
                return Err(DistfixError::Fatal {
                    path,
                    source: std::io::Error::new(std::io::ErrorKind::InvalidData, "fake failure"),
                });
            }
            Ok(FixOutcome::Fixed { removed: 1 })
        })
    }
}
