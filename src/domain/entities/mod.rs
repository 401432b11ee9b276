//! Domain Entities
//!
//! Core domain entities that have identity and lifecycle.
//! - `BinaryArtifact` - A resolved native binary
//! - `PackageDescriptor` - A package's `package.json` snapshot
//! - `OutputManifest` - Dependency list persisted next to bundled binaries

mod artifact;
mod manifest;
mod package;

pub use artifact::{target_file_name, BinaryArtifact, Delivery, BINARY_EXTENSION, DEFAULT_TARGET};
pub use manifest::{HostIdentity, OutputManifest};
pub use package::{PackageDescriptor, PACKAGE_DESCRIPTOR};
