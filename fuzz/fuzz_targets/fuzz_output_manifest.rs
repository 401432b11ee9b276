#![no_main]

use libfuzzer_sys::fuzz_target;
use nativepack::domain::entities::{HostIdentity, OutputManifest};

fuzz_target!(|data: &[u8]| {
    // Fuzz output manifest parsing and reconciliation - this should never panic
    if let Ok(existing) = serde_json::from_slice::<OutputManifest>(data) {
        let host = HostIdentity {
            name: "desk".to_string(),
            version: "1.0.0".to_string(),
            ..Default::default()
        };
        let mut manifest = OutputManifest::reconcile(Some(existing), &host);
        manifest.record("foo", "^1.0.0");
        assert_eq!(manifest.get("foo"), Some("^1.0.0"));
    }
});
