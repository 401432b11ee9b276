//! Scenario: a run records a dependency, then hits a package that was never built
//!
//! Steps:
//! 1. `node_modules/foo` ships `build/Release/foo.node` and is resolved
//! 2. `node_modules/broken/binding.gyp` declares `broken`, nothing is compiled
//! 3. A module inside `broken` calls `bindings(...)`
//!
//! Success Criteria:
//! - the run fails with `TargetsMissing`
//! - no copied binary is left behind
//! - the output manifest is back to what it was before the run

use nativepack::{BuildMode, NativeError};

use crate::common::*;

const MANIFEST: &str = "build/addons/package.json";

fn fixture() -> Fixture {
    let f = Fixture::new();
    f.package(
        "node_modules/foo",
        "foo",
        "1.0.0",
        Some("build/Release/foo.node"),
    )
    .file("node_modules/foo/build/Release/foo.node", b"FOO-BIN")
    .package("node_modules/broken", "broken", "0.1.0", Some("lib/index.js"))
    .file(
        "node_modules/broken/binding.gyp",
        "{'targets': [{'target_name': 'broken'}]}",
    );
    f
}

#[test]
fn scenario_abort_removes_manifest_created_by_the_run() {
    let f = fixture();
    let pipeline = f.pipeline(BuildMode::Production);

    pipeline
        .resolve_direct(&f.path("node_modules/foo/build/Release/foo.node"))
        .unwrap();
    assert_eq!(f.manifest().unwrap()["dependencies"]["foo"], "1.0.0");

    let err = pipeline
        .resolve_bindings(&[f.path("node_modules/broken/lib")])
        .unwrap_err();
    assert!(matches!(err, NativeError::TargetsMissing { .. }));
    assert!(pipeline.is_aborted());
    assert!(f.emitted().is_empty());
    assert!(f.manifest().is_none());
}

#[test]
fn scenario_abort_keeps_manifest_from_an_earlier_build() {
    let f = fixture();
    f.file(
        MANIFEST,
        r#"{"name":"desk","version":"1.0.0","dependencies":{"bar":"2.0.0"}}"#,
    );
    let pipeline = f.pipeline(BuildMode::Development);

    pipeline
        .resolve_direct(&f.path("node_modules/foo/build/Release/foo.node"))
        .unwrap();
    assert_eq!(f.manifest().unwrap()["dependencies"]["foo"], "1.0.0");

    pipeline
        .resolve_bindings(&[f.path("node_modules/broken/lib")])
        .unwrap_err();

    let manifest = f.manifest().unwrap();
    assert_eq!(manifest["dependencies"]["bar"], "2.0.0");
    assert!(manifest["dependencies"].get("foo").is_none());
}
