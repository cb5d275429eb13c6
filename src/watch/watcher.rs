// src/watch/watcher.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::engine::RuntimeEvent;
use crate::errors::Result;
use crate::fs::FileSystem;
use crate::watch::event_handler::{change_kind, changed_paths, process_file_change};
use crate::watch::patterns::PathFilter;

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `RecommendedWatcher` is kept alive for
/// as long as needed. Dropping this handle will stop file watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
    root: PathBuf,
}

impl WatcherHandle {
    /// The (canonicalized) directory being watched.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

/// Spawn a filesystem watcher that observes `root` recursively and sends
/// `RuntimeEvent::FileChanged` for every created or modified file.
///
/// - `root` is the output directory; exclude patterns are relative to it.
/// - `filter` drops excluded paths before they reach the runtime.
/// - `runtime_tx` is the channel into the job runtime.
///
/// Must be called from within a Tokio runtime.
pub fn spawn_watcher(
    root: impl Into<PathBuf>,
    filter: PathFilter,
    fs: Arc<dyn FileSystem>,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> Result<WatcherHandle> {
    let root = root.into();
    // Canonicalize once so we have a stable base path.
    let root = root.canonicalize().unwrap_or(root);

    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let Err(err) = event_tx.send(event) {
                    // Runs on notify's thread; the receiving task may be gone.
                    eprintln!("distfix: failed to forward notify event: {err}");
                }
            }
            Err(err) => {
                eprintln!("distfix: file watch error: {err}");
            }
        },
        Config::default(),
    )?;

    watcher.watch(&root, RecursiveMode::Recursive)?;

    info!("file watcher started on {:?}", root);

    let async_root = root.clone();
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            debug!(?event, "received notify event");

            let Some(kind) = change_kind(&event.kind) else {
                continue;
            };

            for path in changed_paths(&event) {
                let open = process_file_change(
                    fs.as_ref(),
                    &async_root,
                    path,
                    kind,
                    &filter,
                    &runtime_tx,
                )
                .await;
                if !open {
                    // The runtime is gone; nothing left to feed.
                    debug!("runtime channel closed; watcher loop ending");
                    return;
                }
            }
        }
        debug!("watcher event loop finished");
    });

    Ok(WatcherHandle {
        _inner: watcher,
        root,
    })
}
