//! Repository Implementations
//!
//! Concrete implementations of repository ports.

mod manifest;

pub use manifest::{JsonManifestRepository, LOCK_EXTENSION};
