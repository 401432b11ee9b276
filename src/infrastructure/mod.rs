//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - File system implementations (Local, Memory)
//! - `repositories/` - Output manifest persistence
//! - `probe/` - Compatibility probe launchers

pub mod fs;
pub mod probe;
pub mod repositories;

// Re-export for convenience
pub use fs::{LocalFs, MemoryFs};
pub use probe::RuntimeLauncher;
pub use repositories::JsonManifestRepository;
