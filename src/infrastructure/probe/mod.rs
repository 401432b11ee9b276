//! Probe Launchers
//!
//! Concrete implementations of the `ProbeLauncher` port.

mod runtime;

pub use runtime::{RuntimeLauncher, BOOTSTRAP_SCRIPT, DEFAULT_TIMEOUT};
