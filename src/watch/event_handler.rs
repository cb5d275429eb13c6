// src/watch/event_handler.rs

//! Event processing logic for file system changes.

use std::path::{Path, PathBuf};

use notify::event::{CreateKind, ModifyKind, RenameMode};
use notify::{Event, EventKind};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::engine::RuntimeEvent;
use crate::fs::FileSystem;
use crate::types::ChangeKind;
use crate::watch::path_utils::relative_str;
use crate::watch::patterns::PathFilter;

/// Map a notify event kind onto the changes that can enqueue a fixup.
///
/// Files moved into the tree count as created. For renames where the
/// backend cannot tell the direction, the path is forwarded anyway; a path
/// that no longer exists is skipped by the fixer. Renames away, metadata-only
/// changes, accesses and removals are ignored.
pub fn change_kind(kind: &EventKind) -> Option<ChangeKind> {
    match kind {
        EventKind::Create(CreateKind::Folder) => None,
        EventKind::Create(_) => Some(ChangeKind::Created),
        EventKind::Modify(ModifyKind::Name(
            RenameMode::To | RenameMode::Both | RenameMode::Any,
        )) => Some(ChangeKind::Created),
        EventKind::Modify(ModifyKind::Name(_)) | EventKind::Modify(ModifyKind::Metadata(_)) => {
            None
        }
        EventKind::Modify(_) => Some(ChangeKind::Modified),
        _ => None,
    }
}

/// The paths of `event` that can need a fixup.
///
/// A rename reported as one `Both` event lists `[from, to]`; only the
/// destination still exists, so only it is returned.
pub fn changed_paths(event: &Event) -> &[PathBuf] {
    match event.kind {
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
            let last = event.paths.len().saturating_sub(1);
            &event.paths[last..]
        }
        _ => &event.paths,
    }
}

/// Process a single changed path and forward it to the runtime.
///
/// Paths that no longer exist, directories and excluded paths are dropped
/// here. Whether a job for the
/// path already exists is decided by the runtime, which owns the queue.
///
/// Returns `false` once the runtime channel is closed.
pub async fn process_file_change(
    fs: &dyn FileSystem,
    root: &Path,
    path: &Path,
    kind: ChangeKind,
    filter: &PathFilter,
    runtime_tx: &mpsc::Sender<RuntimeEvent>,
) -> bool {
    if !fs.exists(path) {
        debug!(path = %path.display(), "ignoring event for vanished path");
        return true;
    }

    if fs.is_dir(path) {
        debug!(path = %path.display(), "ignoring directory event");
        return true;
    }

    match relative_str(root, path) {
        Some(rel) if filter.is_excluded(&rel) => {
            debug!(path = %rel, "ignoring excluded path");
            return true;
        }
        Some(_) => {}
        None => {
            warn!("could not relativize path {:?} against root {:?}", path, root);
        }
    }

    if let Err(err) = runtime_tx
        .send(RuntimeEvent::FileChanged {
            path: path.to_path_buf(),
            kind,
        })
        .await
    {
        warn!("failed to send RuntimeEvent::FileChanged: {err}");
        return false;
    }
    true
}
