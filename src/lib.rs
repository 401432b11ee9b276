//! nativepack - native addon resolution for desktop application bundles
//!
//! Bundlers hand nativepack every reference to a compiled `.node` binary.
//! nativepack decides where the binary goes in the packaged app, checks it
//! against the runtime the app ships with, records the packages that must be
//! installed at packaging time, and emits the loader code that replaces the
//! original reference.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{BuildReport, NativePipeline, Resolution};
pub use config::{BuildConfig, ProbeConfig};
pub use domain::entities::{BinaryArtifact, Delivery};
pub use domain::services::{find_binding, DiscoveredBinary};
pub use domain::value_objects::{BuildMode, ContentHash, ProcessClass, RuntimeInfo};
pub use error::{NativeError, NativeResult};
