// src/fixup/backend.rs

//! Pluggable job executor abstraction.
//!
//! The runtime talks to a `JobExecutor` instead of a concrete `Fixer`, so
//! tests can swap in an executor that only records which paths were run.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use crate::errors::Result;

use super::{FixOutcome, Fixer};

/// Trait abstracting how a due file job is executed.
pub trait JobExecutor: Send {
    /// Execute the job for `path` to completion.
    fn run_job(
        &mut self,
        path: PathBuf,
    ) -> Pin<Box<dyn Future<Output = Result<FixOutcome>> + Send + '_>>;
}

impl JobExecutor for Fixer {
    fn run_job(
        &mut self,
        path: PathBuf,
    ) -> Pin<Box<dyn Future<Output = Result<FixOutcome>> + Send + '_>> {
        Box::pin(async move { self.fix_file(&path).await })
    }
}
