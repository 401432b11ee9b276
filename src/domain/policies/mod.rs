//! Domain Policies
//!
//! Business rules and policies that govern behavior.
//! These are pure functions that operate on domain entities.

mod dependency_version;

pub use dependency_version::{choose_version, compare_versions, VersionChoice, VersionSource};
