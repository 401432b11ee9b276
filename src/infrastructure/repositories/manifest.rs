//! JSON Manifest Repository
//!
//! Persists the output manifest as pretty printed `package.json`. Writes are
//! serialized by an in-process mutex and, for on-disk trees, by an exclusive
//! advisory lock file next to the manifest.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use fs2::FileExt;

use crate::domain::entities::OutputManifest;
use crate::domain::ports::{FileSystem, FsError, ManifestError, ManifestRepository, ManifestResult};

/// Extension of the advisory lock file, appended to the manifest path
pub const LOCK_EXTENSION: &str = "lock";

pub struct JsonManifestRepository {
    fs: Arc<dyn FileSystem>,
    guard: Mutex<()>,
    lock_files: bool,
}

impl JsonManifestRepository {
    /// Repository over `fs`, locking in-process only
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            guard: Mutex::new(()),
            lock_files: false,
        }
    }

    /// Also take an exclusive lock file on disk around every update
    pub fn with_file_lock(mut self) -> Self {
        self.lock_files = true;
        self
    }

    fn lock_path(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_owned();
        name.push(".");
        name.push(LOCK_EXTENSION);
        PathBuf::from(name)
    }

    fn acquire_file_lock(&self, path: &Path) -> ManifestResult<Option<fs::File>> {
        if !self.lock_files {
            return Ok(None);
        }
        let lock_path = Self::lock_path(path);
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ManifestError::Lock(e.to_string()))?;
        }
        let lock_file =
            fs::File::create(&lock_path).map_err(|e| ManifestError::Lock(e.to_string()))?;
        lock_file
            .lock_exclusive()
            .map_err(|e| ManifestError::Lock(e.to_string()))?;
        Ok(Some(lock_file))
    }
}

impl ManifestRepository for JsonManifestRepository {
    fn load(&self, path: &Path) -> ManifestResult<Option<OutputManifest>> {
        let content = match self.fs.read_to_string(path) {
            Ok(content) => content,
            Err(FsError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(ManifestError::Io(e.to_string())),
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| ManifestError::InvalidFormat(format!("{}: {}", path.display(), e)))
    }

    fn save(&self, manifest: &OutputManifest, path: &Path) -> ManifestResult<()> {
        let mut content = serde_json::to_string_pretty(manifest)
            .map_err(|e| ManifestError::InvalidFormat(e.to_string()))?;
        content.push('\n');
        self.fs
            .write(path, content.as_bytes())
            .map_err(|e| ManifestError::Io(e.to_string()))
    }

    fn update(
        &self,
        path: &Path,
        update: &mut dyn FnMut(Option<OutputManifest>) -> OutputManifest,
    ) -> ManifestResult<OutputManifest> {
        let _guard = self
            .guard
            .lock()
            .map_err(|e| ManifestError::Lock(e.to_string()))?;
        let lock_file = self.acquire_file_lock(path)?;

        let result = self.load(path).and_then(|current| {
            let next = update(current);
            self.save(&next, path).map(|_| next)
        });

        if let Some(lock_file) = lock_file {
            let _ = lock_file.unlock();
        }
        result
    }
}
