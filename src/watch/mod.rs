// src/watch/mod.rs

//! File watching and change detection.
//!
//! This module is responsible for:
//! - Wiring up a cross-platform filesystem watcher (`notify`).
//! - Turning raw notify events into `Created` / `Modified` file changes.
//! - Dropping vanished paths, directories and `[watch].exclude` matches.
//!
//! It does **not** know about the job queue; it only forwards file changes
//! to the runtime over a channel.

pub mod event_handler;
pub mod path_utils;
pub mod patterns;
pub mod watcher;

pub use event_handler::{change_kind, changed_paths, process_file_change};
pub use patterns::PathFilter;
pub use watcher::{spawn_watcher, WatcherHandle};
