//! ManifestRepository port - abstraction for output manifest persistence
//!
//! The output manifest (`package.json` in the addons output directory) is the
//! only state that outlives a build pass. This trait keeps the synchronizer
//! independent of the JSON encoding and of the locking strategy.

use std::path::Path;

use crate::domain::entities::OutputManifest;

/// Result type for manifest operations
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Manifest operation errors
#[derive(Debug)]
pub enum ManifestError {
    /// Invalid manifest format
    InvalidFormat(String),
    /// I/O error
    Io(String),
    /// Could not take the manifest lock
    Lock(String),
}

impl std::fmt::Display for ManifestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManifestError::InvalidFormat(msg) => write!(f, "Invalid manifest format: {}", msg),
            ManifestError::Io(msg) => write!(f, "I/O error: {}", msg),
            ManifestError::Lock(msg) => write!(f, "Manifest lock failed: {}", msg),
        }
    }
}

impl std::error::Error for ManifestError {}

/// Abstract repository for the output manifest
pub trait ManifestRepository: Send + Sync {
    /// Load the manifest, `None` if it does not exist yet
    fn load(&self, path: &Path) -> ManifestResult<Option<OutputManifest>>;

    /// Save the manifest
    fn save(&self, manifest: &OutputManifest, path: &Path) -> ManifestResult<()>;

    /// Run `update` as one read-modify-write cycle, exclusive against other writers
    fn update(
        &self,
        path: &Path,
        update: &mut dyn FnMut(Option<OutputManifest>) -> OutputManifest,
    ) -> ManifestResult<OutputManifest> {
        let current = self.load(path)?;
        let next = update(current);
        self.save(&next, path)?;
        Ok(next)
    }
}
