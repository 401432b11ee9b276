//! Scenario: a development build over a real project tree
//!
//! Steps:
//! 1. A project with a local addon and a dependency addon on disk
//! 2. The local addon is referenced directly
//! 3. The dependency's module calls `bindings(...)`
//!
//! Success Criteria:
//! - the local addon is mirrored under `build/addons`
//! - the dependency is loaded from `node_modules`, never copied
//! - the manifest lists the dependency

use std::fs;
use std::path::Path;
use std::sync::Arc;

use nativepack::domain::ports::FileSystem;
use nativepack::infrastructure::{JsonManifestRepository, LocalFs};
use nativepack::{BuildConfig, BuildMode, Delivery, NativePipeline};
use tempfile::tempdir;

use crate::common::*;

fn write(root: &Path, relative: &str, content: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn scenario_development_build_on_disk() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(
        root,
        "package.json",
        br#"{"name":"desk","version":"0.1.0","main":"build/main/index.js","dependencies":{"leveldown":"^6.1.0"}}"#,
    );
    write(root, "native/build/Release/engine.node", b"ENGINE");
    write(
        root,
        "node_modules/leveldown/package.json",
        br#"{"name":"leveldown","version":"6.1.1","main":"leveldown.js"}"#,
    );
    write(
        root,
        "node_modules/leveldown/binding.gyp",
        b"{ 'targets': [ { 'target_name': 'leveldown' } ] }",
    );
    write(
        root,
        "node_modules/leveldown/build/Release/leveldown.node",
        b"LEVELDOWN",
    );

    let config = BuildConfig {
        project_root: Some(root.to_path_buf()),
        mode: BuildMode::Development,
        ..Default::default()
    };
    let fs_port: Arc<dyn FileSystem> = Arc::new(LocalFs::new());
    let repo = Arc::new(JsonManifestRepository::new(Arc::clone(&fs_port)).with_file_lock());
    let launcher = Arc::new(CountingLauncher::compatible());
    let pipeline = NativePipeline::new(config, fs_port, launcher.clone(), repo).unwrap();

    let local = pipeline
        .resolve_direct(Path::new("native/build/Release/engine.node"))
        .unwrap();
    let copied = root.join("build/addons/native/build/Release/engine.node");
    assert_eq!(fs::read(&copied).unwrap(), b"ENGINE");
    assert!(local
        .code
        .contains(r#"path.join(__dirname, "../addons/native/build/Release/engine.node")"#));

    let deps = pipeline
        .resolve_bindings(&[root.join("node_modules/leveldown")])
        .unwrap();
    assert_eq!(*deps.artifacts[0].delivery(), Delivery::Installed);
    assert!(deps
        .code
        .contains(r#"nativeRequire("leveldown/build/Release/leveldown.node")"#));
    assert!(!root.join("build/addons/node_modules").exists());

    // Development builds do not probe unless asked to.
    assert_eq!(launcher.calls(), 0);

    let manifest: serde_json::Value =
        serde_json::from_slice(&fs::read(root.join("build/addons/package.json")).unwrap())
            .unwrap();
    assert_eq!(manifest["name"], "desk");
    assert_eq!(manifest["main"], "../main/index.js");
    assert_eq!(manifest["dependencies"]["leveldown"], "^6.1.0");

    let report = pipeline.report();
    assert_eq!(report.artifacts.len(), 2);
    assert!(!report.aborted);
}
