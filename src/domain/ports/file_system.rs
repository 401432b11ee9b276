//! FileSystem port - abstraction over file I/O operations
//!
//! Binary bytes are read through [`ContentReader`] so that the pipeline works the
//! same on disk and against a bundler's in-memory file system. [`FileSystem`]
//! adds the write side used for artifacts and the output manifest.

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug)]
pub enum FsError {
    /// File not found
    NotFound(PathBuf),
    /// Permission denied
    PermissionDenied(PathBuf),
    /// I/O error
    Io(std::io::Error),
    /// Other error
    Other(String),
}

impl FsError {
    /// Convert an I/O error, keeping the path for the common kinds
    pub fn from_io(err: std::io::Error, path: &Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io(err),
        }
    }
}

impl From<std::io::Error> for FsError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(PathBuf::new()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(PathBuf::new()),
            _ => FsError::Io(err),
        }
    }
}

impl std::fmt::Display for FsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FsError::NotFound(path) => write!(f, "File not found: {}", path.display()),
            FsError::PermissionDenied(path) => {
                write!(f, "Permission denied: {}", path.display())
            }
            FsError::Io(err) => write!(f, "I/O error: {}", err),
            FsError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for FsError {}

/// Reads raw file content
///
/// Implementations:
/// - `LocalFs` - standard file I/O
/// - `MemoryFs` - in-memory, mirrors a dev server's virtual output
pub trait ContentReader: Send + Sync {
    /// Read file content as bytes
    fn read(&self, path: &Path) -> FsResult<Vec<u8>>;

    /// Check if a regular file exists
    fn is_file(&self, path: &Path) -> bool;

    /// Read file content as UTF-8 text
    fn read_to_string(&self, path: &Path) -> FsResult<String> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes)
            .map_err(|e| FsError::Other(format!("{} is not UTF-8: {}", path.display(), e)))
    }
}

impl<T: ContentReader + ?Sized> ContentReader for Arc<T> {
    fn read(&self, path: &Path) -> FsResult<Vec<u8>> {
        (**self).read(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        (**self).is_file(path)
    }
}

/// Abstract file system interface
pub trait FileSystem: ContentReader {
    /// Write content to file, creating parent directories
    fn write(&self, path: &Path, content: &[u8]) -> FsResult<()>;

    /// Remove a file
    fn remove(&self, path: &Path) -> FsResult<()>;

    /// Resolve symlinks; implementations without links return the path unchanged
    fn canonicalize(&self, path: &Path) -> PathBuf;
}
