//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod hash;
pub mod path;
mod runtime;
mod target;

pub use hash::ContentHash;
pub use runtime::{runtime_arch, runtime_platform, RuntimeInfo};
pub use target::{BuildMode, ProcessClass};
