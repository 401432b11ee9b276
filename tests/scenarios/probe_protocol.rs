//! Scenario: the probe child reports a protocol error
//!
//! A protocol error means the probe itself is broken, not the binary. The
//! whole build stops instead of failing one artifact.

use nativepack::domain::ports::ProbeOutcome;
use nativepack::{BuildMode, NativeError};

use crate::common::*;

#[test]
fn scenario_protocol_error_aborts_the_run() {
    let launcher = CountingLauncher::compatible();
    launcher.answer("/app/native/b/build/Release/b.node", ProbeOutcome::ProtocolError);
    let f = Fixture::new().with_launcher(launcher);
    f.file("native/a/build/Release/a.node", b"A-BIN")
        .file("native/b/build/Release/b.node", b"B-BIN")
        .file("native/c/build/Release/c.node", b"C-BIN");
    let pipeline = f.pipeline(BuildMode::Production);

    pipeline
        .resolve_direct(&f.path("native/a/build/Release/a.node"))
        .unwrap();
    assert_eq!(f.emitted().len(), 1);

    let err = pipeline
        .resolve_direct(&f.path("native/b/build/Release/b.node"))
        .unwrap_err();
    assert!(err.is_process_fatal());
    assert!(err.to_string().contains("b.node"));

    // Nothing from the run survives and nothing else is attempted.
    assert!(f.emitted().is_empty());
    assert!(pipeline.is_aborted());
    assert!(matches!(
        pipeline.resolve_direct(&f.path("native/c/build/Release/c.node")),
        Err(NativeError::Aborted)
    ));
    assert_eq!(f.launcher.calls(), 2);
    assert!(pipeline.report().aborted);
}

#[test]
fn scenario_incompatible_binary_is_not_process_fatal() {
    let f = Fixture::new().with_launcher(CountingLauncher::new(ProbeOutcome::Incompatible {
        code: Some(1),
    }));
    f.file("native/a/build/Release/a.node", b"A-BIN");
    let pipeline = f.pipeline(BuildMode::Production);

    let err = pipeline
        .resolve_direct(&f.path("native/a/build/Release/a.node"))
        .unwrap_err();
    assert!(matches!(err, NativeError::Incompatible { .. }));
    assert!(!err.is_process_fatal());
    assert!(err.to_string().contains("rebuild"));
    assert!(f.emitted().is_empty());
}

#[test]
fn scenario_identical_binaries_are_probed_once() {
    let f = Fixture::new();
    f.file("native/a/build/Release/addon.node", b"SAME")
        .file("native/b/build/Release/addon.node", b"SAME");
    let pipeline = f.pipeline(BuildMode::Production);

    let a = pipeline
        .resolve_direct(&f.path("native/a/build/Release/addon.node"))
        .unwrap();
    let b = pipeline
        .resolve_direct(&f.path("native/b/build/Release/addon.node"))
        .unwrap();
    assert_eq!(f.launcher.calls(), 1);
    assert_eq!(
        a.artifacts[0].output_path_from_build_root(),
        b.artifacts[0].output_path_from_build_root()
    );
}
