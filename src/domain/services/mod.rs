//! Domain Services
//!
//! Resolution logic over domain entities. File access goes through the
//! `ContentReader` port so every service runs against an in-memory tree in
//! tests.

pub mod discovery;
pub mod locator;
pub mod package_inspector;
pub mod path_planner;
pub mod shim;

pub use discovery::{declared_targets, search_paths, BinaryDiscovery, DiscoveredBinary, BUILD_DESCRIPTOR};
pub use locator::{find_binding, locator_module, LOCATE_FAILED};
pub use package_inspector::{main_resolves_to, PackageInspector};
pub use path_planner::{
    interpolate_name, package_module_path, ArtifactPathPlanner, Origin, Placement,
    DEVELOPMENT_NAME_PATTERN, PRODUCTION_NAME_PATTERN,
};
pub use shim::{js_string, Linkage, LoadStrategy, ShimGenerator, TOOL_NAME};
