//! Domain Layer
//!
//! Native binary resolution without direct I/O.
//!
//! ## Structure
//!
//! - `entities/` - Core domain entities (BinaryArtifact, PackageDescriptor, OutputManifest)
//! - `value_objects/` - Immutable value types (ContentHash, ProcessClass, BuildMode)
//! - `services/` - Domain services (Discovery, PathPlanner, ShimGenerator)
//! - `policies/` - Business rules (dependency version precedence)
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or spawns processes directly
//! 2. **Ports & Adapters** - Reads, writes and probes go through trait-defined ports

pub mod entities;
pub mod policies;
pub mod ports;
pub mod services;
pub mod value_objects;
