// src/engine/runtime.rs

use std::fmt;
use std::path::PathBuf;
use std::time::Instant;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::errors::Result;
use crate::fixup::{FixOutcome, JobExecutor};
use crate::types::ChangeKind;
use crate::watch::path_utils::display_path;

use super::queue::FileJobs;
use super::{RuntimeEvent, RuntimeOptions};

/// Drives the file job queue in response to `RuntimeEvent`s and poll ticks,
/// and delegates the actual fixup to a `JobExecutor`.
///
/// The runtime is the only owner of the queue: the watcher reaches it
/// exclusively through the event channel.
pub struct Runtime<E: JobExecutor> {
    jobs: FileJobs,
    event_rx: mpsc::Receiver<RuntimeEvent>,
    executor: E,
    options: RuntimeOptions,
}

impl<E: JobExecutor> fmt::Debug for Runtime<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("jobs", &self.jobs)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<E: JobExecutor> Runtime<E> {
    pub fn new(
        event_rx: mpsc::Receiver<RuntimeEvent>,
        executor: E,
        options: RuntimeOptions,
    ) -> Self {
        Self {
            jobs: FileJobs::new(),
            event_rx,
            executor,
            options,
        }
    }

    /// Main loop.
    ///
    /// - Consumes `RuntimeEvent`s and queues jobs for new paths.
    /// - Every `poll_interval`, runs due jobs and purges expired ones.
    /// - Returns on shutdown, when the event channel closes, or with the
    ///   first error a job reports.
    pub async fn run(mut self) -> Result<()> {
        info!(
            poll_interval = ?self.options.poll_interval,
            grace_period = ?self.options.grace_period,
            "distfix runtime started"
        );

        let mut ticker = tokio::time::interval(self.options.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                event = self.event_rx.recv() => match event {
                    Some(RuntimeEvent::FileChanged { path, kind }) => {
                        self.handle_change(path, kind);
                    }
                    Some(RuntimeEvent::ShutdownRequested) => {
                        info!("shutdown requested; stopping runtime");
                        break;
                    }
                    None => {
                        info!("runtime event channel closed; exiting");
                        break;
                    }
                },
                _ = ticker.tick() => match self.tick().await {
                    Ok(TickFlow::Continue) => {}
                    Ok(TickFlow::Stop) => break,
                    Err(err) => {
                        error!(error = %err, "fixup failed; stopping runtime");
                        return Err(err);
                    }
                },
            }
        }

        info!(pending = self.jobs.len(), "runtime exiting");
        Ok(())
    }

    fn handle_change(&mut self, path: PathBuf, kind: ChangeKind) {
        queue_change(&mut self.jobs, path, kind);
    }

    /// One poll: run every due job (from a snapshot), then purge.
    async fn tick(&mut self) -> Result<TickFlow> {
        let due = self.jobs.due_paths(Instant::now());

        for path in due {
            println!("Fixing file {}", display_path(&self.options.root, &path));

            let Some(outcome) = self.run_until_shutdown(path.clone()).await? else {
                return Ok(TickFlow::Stop);
            };
            debug!(path = %path.display(), %outcome, "job executed");

            self.jobs
                .mark_executed(&path, Instant::now(), self.options.grace_period);
        }

        self.jobs.purge_expired(Instant::now());
        Ok(TickFlow::Continue)
    }

    /// Run a single job while still consuming events.
    ///
    /// Changes that arrive meanwhile are queued as usual. Shutdown (or a
    /// closed channel) drops the job at its next await point, which is
    /// between retry attempts, and returns `None`.
    async fn run_until_shutdown(&mut self, path: PathBuf) -> Result<Option<FixOutcome>> {
        let Self {
            jobs,
            event_rx,
            executor,
            ..
        } = self;
        let mut job = executor.run_job(path);

        loop {
            tokio::select! {
                biased;
                result = &mut job => return result.map(Some),
                event = event_rx.recv() => match event {
                    Some(RuntimeEvent::FileChanged { path, kind }) => {
                        queue_change(jobs, path, kind);
                    }
                    Some(RuntimeEvent::ShutdownRequested) => {
                        info!("shutdown requested while a job was running; abandoning it");
                        return Ok(None);
                    }
                    None => {
                        info!("runtime event channel closed while a job was running");
                        return Ok(None);
                    }
                },
            }
        }
    }
}

/// Whether the main loop keeps going after a tick.
enum TickFlow {
    Continue,
    Stop,
}

fn queue_change(jobs: &mut FileJobs, path: PathBuf, kind: ChangeKind) {
    debug!(path = %path.display(), %kind, "file change received");
    jobs.add(path, Instant::now());
}
