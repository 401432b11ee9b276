//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Components
//!
//! - `NativePipeline` - Resolves direct references and locator calls for one build run
//! - `CompatibilityProber` - Memoized runtime load checks
//! - `ManifestSynchronizer` - Keeps the output manifest in step with bundled binaries

pub mod compat;
pub mod manifest_sync;
pub mod pipeline;

pub use compat::CompatibilityProber;
pub use manifest_sync::{HostProject, ManifestSynchronizer, SyncOutcome, MANIFEST_SKIPPED};
pub use pipeline::{BuildReport, NativePipeline, Resolution};
