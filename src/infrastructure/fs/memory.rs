//! In-memory File System
//!
//! Mirrors a bundler's virtual output file system. Also backs most tests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::domain::ports::file_system::{ContentReader, FileSystem, FsError, FsResult};
use crate::domain::value_objects::path::normalize;

#[derive(Debug, Default)]
struct State {
    files: BTreeMap<PathBuf, Vec<u8>>,
    /// Directory aliases: link path -> real path
    links: BTreeMap<PathBuf, PathBuf>,
}

/// In-memory file system
///
/// Cloning shares the underlying tree.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    state: Arc<Mutex<State>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a file
    pub fn insert(&self, path: impl AsRef<Path>, content: impl AsRef<[u8]>) {
        let mut state = self.lock();
        state
            .files
            .insert(normalize(path.as_ref()), content.as_ref().to_vec());
    }

    /// Make `link` resolve to `target` in `canonicalize`
    pub fn link(&self, link: impl AsRef<Path>, target: impl AsRef<Path>) {
        let mut state = self.lock();
        state
            .links
            .insert(normalize(link.as_ref()), normalize(target.as_ref()));
    }

    /// Content of `path`, if present
    pub fn get(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.lock().files.get(&normalize(path.as_ref())).cloned()
    }

    /// All file paths, sorted
    pub fn paths(&self) -> Vec<PathBuf> {
        self.lock().files.keys().cloned().collect()
    }

    /// File paths under `dir`, sorted
    pub fn paths_under(&self, dir: impl AsRef<Path>) -> Vec<PathBuf> {
        let dir = normalize(dir.as_ref());
        self.lock()
            .files
            .keys()
            .filter(|p| p.starts_with(&dir))
            .cloned()
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ContentReader for MemoryFs {
    fn read(&self, path: &Path) -> FsResult<Vec<u8>> {
        let path = normalize(path);
        self.lock()
            .files
            .get(&path)
            .cloned()
            .ok_or(FsError::NotFound(path))
    }

    fn is_file(&self, path: &Path) -> bool {
        self.lock().files.contains_key(&normalize(path))
    }
}

impl FileSystem for MemoryFs {
    fn write(&self, path: &Path, content: &[u8]) -> FsResult<()> {
        self.lock().files.insert(normalize(path), content.to_vec());
        Ok(())
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        let path = normalize(path);
        match self.lock().files.remove(&path) {
            Some(_) => Ok(()),
            None => Err(FsError::NotFound(path)),
        }
    }

    fn canonicalize(&self, path: &Path) -> PathBuf {
        let path = normalize(path);
        let state = self.lock();
        for (link, target) in &state.links {
            if let Ok(rest) = path.strip_prefix(link) {
                return target.join(rest);
            }
        }
        path
    }
}
