//! Error types for nativepack
//!
//! Uses `thiserror` for library errors; the binary wraps them with `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::{FsError, ManifestError};

/// Result type alias for nativepack operations
pub type NativeResult<T> = Result<T, NativeError>;

/// Main error type for nativepack operations
#[derive(Error, Debug)]
pub enum NativeError {
    /// The package declares build targets but none of them was compiled
    #[error("can not find the native addon module from {package}, you should rebuild it first")]
    TargetsMissing { package: PathBuf },

    /// The probe child was started without a candidate path
    #[error("compatibility probe for {source_path} was launched without a target path (protocol error)")]
    ProbeProtocol { source_path: PathBuf },

    /// The installed runtime failed to load the binary
    #[error(
        "this local addon is not compatible with the installed runtime, you need to rebuild it first:\n{source_path}"
    )]
    Incompatible { source_path: PathBuf },

    /// The probe child did not exit in time
    #[error("compatibility probe for {source_path} did not finish within {secs}s")]
    ProbeTimeout { source_path: PathBuf, secs: u64 },

    /// The runtime executable could not be started
    #[error("failed to launch runtime '{program}': {message}")]
    ProbeLaunch { program: String, message: String },

    /// The build target is not an electron process target
    #[error("native addons can only be used in electron targets, but the current build target is '{target}'")]
    UnsupportedTarget { target: String },

    /// A package descriptor could not be parsed
    #[error("invalid package descriptor {path}: {message}")]
    InvalidDescriptor { path: PathBuf, message: String },

    /// Configuration file is malformed
    #[error("invalid configuration in {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// File system failure
    #[error("file system error: {0}")]
    Fs(#[from] FsError),

    /// Manifest persistence failure
    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A fatal error already ended this pipeline run
    #[error("the native addon pipeline was aborted by an earlier fatal error")]
    Aborted,
}

impl NativeError {
    /// Whether this error must end the whole build process, not just the current module
    pub fn is_process_fatal(&self) -> bool {
        matches!(self, NativeError::ProbeProtocol { .. })
    }

    /// Source file the error is about, if any
    pub fn source_path(&self) -> Option<&PathBuf> {
        match self {
            NativeError::TargetsMissing { package } => Some(package),
            NativeError::ProbeProtocol { source_path }
            | NativeError::Incompatible { source_path }
            | NativeError::ProbeTimeout { source_path, .. } => Some(source_path),
            NativeError::InvalidDescriptor { path, .. } | NativeError::Config { path, .. } => {
                Some(path)
            }
            _ => None,
        }
    }
}
