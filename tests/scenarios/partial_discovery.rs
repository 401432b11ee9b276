//! Scenario: a package declares two native targets but only one was compiled
//!
//! Steps:
//! 1. `node_modules/engine-pkg/binding.gyp` declares `engine` and `bindings`
//! 2. Only `build/Release/engine.node` exists
//! 3. A module inside the package calls `bindings(...)`
//!
//! Success Criteria:
//! - `engine` is found and bundled
//! - no `bindings` entry is made up
//! - the build continues

use std::path::PathBuf;

use nativepack::{find_binding, BuildMode, NativeError};

use crate::common::*;

const GYP: &str = r#"{
  'targets': [
    { 'target_name': 'engine', 'sources': ['src/engine.cc'] },
    { 'target_name': 'bindings', 'sources': ['src/glue.cc'] }
  ]
}"#;

fn fixture() -> Fixture {
    let f = Fixture::new();
    f.package("node_modules/engine-pkg", "engine-pkg", "2.3.0", Some("lib/index.js"))
        .file("node_modules/engine-pkg/binding.gyp", GYP)
        .file("node_modules/engine-pkg/build/Release/engine.node", b"ENGINE-BIN");
    f
}

#[test]
fn scenario_only_compiled_targets_are_bundled() {
    let f = fixture();
    let pipeline = f.pipeline(BuildMode::Production);

    let res = pipeline
        .resolve_bindings(&[f.path("node_modules/engine-pkg/lib")])
        .unwrap();

    assert_eq!(res.artifacts.len(), 1);
    assert_eq!(res.artifacts[0].target_name(), "engine.node");
    assert!(res.code.contains(r#"name: "engine.node""#));
    assert!(!res.code.contains(r#"name: "bindings.node""#));

    assert!(find_binding(&res.artifacts, Some("engine")).is_some());
    assert!(find_binding(&res.artifacts, None).is_none());

    assert_eq!(f.emitted().len(), 1);
    assert!(!pipeline.is_aborted());

    let manifest = f.manifest().unwrap();
    assert_eq!(manifest["dependencies"]["engine-pkg"], "2.3.0");
}

#[test]
fn scenario_dependency_binaries_are_never_probed() {
    let f = fixture();
    let pipeline = f.pipeline(BuildMode::Production);
    pipeline
        .resolve_bindings(&[f.path("node_modules/engine-pkg/lib")])
        .unwrap();
    assert_eq!(f.launcher.calls(), 0);
}

#[test]
fn scenario_no_compiled_target_fails_naming_the_package() {
    let f = Fixture::new();
    f.package("node_modules/engine-pkg", "engine-pkg", "2.3.0", None)
        .file("node_modules/engine-pkg/binding.gyp", GYP);
    let pipeline = f.pipeline(BuildMode::Production);

    let err = pipeline
        .resolve_bindings(&[f.path("node_modules/engine-pkg")])
        .unwrap_err();
    assert!(matches!(err, NativeError::TargetsMissing { .. }));
    assert_eq!(
        err.source_path(),
        Some(&PathBuf::from("/app/node_modules/engine-pkg"))
    );
    assert!(err.to_string().contains("rebuild"));
}
