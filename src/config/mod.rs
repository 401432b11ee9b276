//! Configuration module for nativepack
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (NATIVEPACK_*)
//! 3. Project config (`nativepack.toml`)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    load_or_default, load_with_warnings, with_env_overrides, ConfigWarning, CONFIG_FILE_NAME,
};
pub use types::{BuildConfig, ProbeConfig};
