//! Scenario: two packages bundle their own copy of dependency `foo`
//!
//! The host declares `foo@^1.0.0`. Both copies of `foo` ship a native binary.
//!
//! Success Criteria:
//! - the output manifest has exactly one `foo` entry
//! - a development-only declaration never replaces a production one

use std::sync::Arc;

use nativepack::application::{HostProject, ManifestSynchronizer};
use nativepack::domain::entities::HostIdentity;
use nativepack::infrastructure::{JsonManifestRepository, MemoryFs};
use nativepack::BuildMode;

use crate::common::*;

const GYP: &str = "{ 'targets': [ { 'target_name': 'foo' } ] }";

#[test]
fn scenario_two_copies_of_foo_record_one_entry() {
    let f = Fixture::new();
    f.file(
        "package.json",
        r#"{"name":"desk","version":"1.0.0","dependencies":{"foo":"^1.0.0","widget":"^3.0.0"}}"#,
    );
    f.package("node_modules/foo", "foo", "1.2.0", None)
        .file("node_modules/foo/binding.gyp", GYP)
        .file("node_modules/foo/build/Release/foo.node", b"FOO-1.2.0");
    f.package("node_modules/widget", "widget", "3.0.0", None);
    f.package("node_modules/widget/node_modules/foo", "foo", "1.0.3", None)
        .file("node_modules/widget/node_modules/foo/binding.gyp", GYP)
        .file(
            "node_modules/widget/node_modules/foo/build/Release/foo.node",
            b"FOO-1.0.3",
        );

    let pipeline = f.pipeline(BuildMode::Production);
    let res = pipeline
        .resolve_bindings(&[
            f.path("node_modules/foo/lib"),
            f.path("node_modules/widget/node_modules/foo"),
        ])
        .unwrap();
    assert_eq!(res.artifacts.len(), 2);
    assert_eq!(f.emitted().len(), 2);

    let manifest = f.manifest().unwrap();
    let deps = manifest["dependencies"].as_object().unwrap();
    assert_eq!(deps.len(), 1);
    assert_eq!(deps["foo"], "^1.0.0");
    assert_eq!(manifest["name"], "desk");
}

#[test]
fn scenario_dev_only_declaration_does_not_replace_production() {
    let fs = MemoryFs::new();
    let repo = Arc::new(JsonManifestRepository::new(Arc::new(fs.clone())));
    let sync = ManifestSynchronizer::new(repo, "/app/build/addons/package.json", true);

    let identity = HostIdentity {
        name: "desk".to_string(),
        version: "1.0.0".to_string(),
        ..Default::default()
    };
    let production = HostProject {
        identity: identity.clone(),
        dependencies: [("foo".to_string(), "^1.0.0".to_string())].into(),
        ..Default::default()
    };
    let dev_only = HostProject {
        identity,
        dev_dependencies: [("foo".to_string(), "^1.4.0".to_string())].into(),
        ..Default::default()
    };

    sync.synchronize(Some(&production), "foo", "1.2.0").unwrap();
    let outcome = sync.synchronize(Some(&dev_only), "foo", "1.0.3").unwrap();
    assert!(outcome.warning().unwrap().contains("devDependencies"));

    let manifest: serde_json::Value =
        serde_json::from_slice(&fs.get("/app/build/addons/package.json").unwrap()).unwrap();
    let deps = manifest["dependencies"].as_object().unwrap();
    assert_eq!(deps.len(), 1);
    assert_eq!(deps["foo"], "^1.0.0");
}
