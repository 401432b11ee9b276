//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod file_system;
pub mod manifest_repository;
pub mod probe_launcher;

pub use file_system::{ContentReader, FileSystem, FsError, FsResult};
pub use manifest_repository::{ManifestError, ManifestRepository, ManifestResult};
pub use probe_launcher::{
    LaunchError, ProbeLauncher, ProbeOutcome, EXIT_COMPATIBLE, EXIT_INCOMPATIBLE,
    EXIT_PROTOCOL_ERROR, PROBE_PATH_VAR,
};
