//! File System Implementations
//!
//! Concrete implementations of the `ContentReader` and `FileSystem` ports.

mod local;
mod memory;

pub use local::LocalFs;
pub use memory::MemoryFs;
