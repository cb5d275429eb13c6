// src/fs/mock.rs

//! In-memory [`FileSystem`] used by tests.
//!
//! Besides storing files it can inject IO errors for specific paths and
//! counts every read and write, so tests can assert that no file operation
//! happened at all.

use super::FileSystem;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File(Vec<u8>),
    Dir(Vec<String>), // child names
}

#[derive(Debug, Default)]
struct MockState {
    entries: HashMap<PathBuf, MockEntry>,
    /// Errors handed out (front first) on the next reads/writes of a path.
    failures: HashMap<PathBuf, VecDeque<io::ErrorKind>>,
    reads: usize,
    writes: usize,
}

#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    state: Arc<Mutex<MockState>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = path.as_ref();
        let mut state = self.state();
        insert_file(&mut state.entries, path, content.into());
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut state = self.state();
        ensure_dir_entry(&mut state.entries, path.as_ref());
    }

    /// Make the next `times` reads or writes of `path` fail with `kind`.
    pub fn fail_next(&self, path: impl AsRef<Path>, kind: io::ErrorKind, times: usize) {
        let mut state = self.state();
        let queue = state
            .failures
            .entry(path.as_ref().to_path_buf())
            .or_default();
        queue.extend(std::iter::repeat_n(kind, times));
    }

    /// Current contents of a file as UTF-8 (lossy), if it exists.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        match self.state().entries.get(path.as_ref()) {
            Some(MockEntry::File(bytes)) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        }
    }

    pub fn read_count(&self) -> usize {
        self.state().reads
    }

    pub fn write_count(&self) -> usize {
        self.state().writes
    }

    fn take_failure(state: &mut MockState, path: &Path) -> Option<io::Error> {
        let queue = state.failures.get_mut(path)?;
        let kind = queue.pop_front()?;
        Some(io::Error::new(kind, format!("injected failure on {path:?}")))
    }
}

fn parent_of(path: &Path) -> Option<&Path> {
    path.parent().map(|p| {
        if p.as_os_str().is_empty() {
            Path::new(".")
        } else {
            p
        }
    })
}

fn link_child(entries: &mut HashMap<PathBuf, MockEntry>, parent: &Path, child: &Path) {
    if let Some(MockEntry::Dir(children)) = entries.get_mut(parent) {
        if let Some(name) = child.file_name().and_then(|n| n.to_str()) {
            if !children.iter().any(|c| c == name) {
                children.push(name.to_string());
            }
        }
    }
}

fn insert_file(entries: &mut HashMap<PathBuf, MockEntry>, path: &Path, content: Vec<u8>) {
    entries.insert(path.to_path_buf(), MockEntry::File(content));
    if let Some(parent) = parent_of(path) {
        ensure_dir_entry(entries, parent);
        link_child(entries, parent, path);
    }
}

fn ensure_dir_entry(entries: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
    if entries.contains_key(path) {
        return;
    }
    entries.insert(path.to_path_buf(), MockEntry::Dir(Vec::new()));
    if let Some(parent) = parent_of(path) {
        // Stop at the root.
        if parent != path {
            ensure_dir_entry(entries, parent);
            link_child(entries, parent, path);
        }
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let mut state = self.state();
        state.reads += 1;
        if let Some(err) = Self::take_failure(&mut state, path) {
            return Err(err);
        }
        match state.entries.get(path) {
            Some(MockEntry::File(content)) => String::from_utf8(content.clone())
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
            Some(MockEntry::Dir(_)) => Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("is a directory: {path:?}"),
            )),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {path:?}"),
            )),
        }
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut state = self.state();
        state.writes += 1;
        if let Some(err) = Self::take_failure(&mut state, path) {
            return Err(err);
        }
        insert_file(&mut state.entries, path, contents.to_vec());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.state().entries.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.state().entries.get(path), Some(MockEntry::Dir(_)))
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        match self.state().entries.get(path) {
            Some(MockEntry::Dir(children)) => {
                let mut paths: Vec<PathBuf> = children.iter().map(|name| path.join(name)).collect();
                paths.sort();
                Ok(paths)
            }
            _ => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("not a directory or not found: {path:?}"),
            )),
        }
    }
}
