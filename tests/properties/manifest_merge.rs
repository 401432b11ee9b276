//! Property tests for manifest merging.

use std::collections::BTreeMap;
use std::sync::Arc;

use proptest::prelude::*;

use nativepack::application::{HostProject, ManifestSynchronizer};
use nativepack::domain::entities::{HostIdentity, OutputManifest};
use nativepack::infrastructure::{JsonManifestRepository, MemoryFs};

const MANIFEST: &str = "/app/build/addons/package.json";

#[derive(Debug, Clone)]
struct Contribution {
    name: String,
    own_version: String,
}

fn contribution() -> impl Strategy<Value = Contribution> {
    (
        prop::sample::select(vec!["foo", "bar", "leveldown", "sqlite3", "bcrypt"]),
        (0u8..4, 0u8..10, 0u8..10),
    )
        .prop_map(|(name, (major, minor, patch))| Contribution {
            name: name.to_string(),
            own_version: format!("{}.{}.{}", major, minor, patch),
        })
}

fn host() -> HostProject {
    HostProject {
        identity: HostIdentity {
            name: "desk".to_string(),
            version: "1.0.0".to_string(),
            ..Default::default()
        },
        dependencies: [("foo".to_string(), "^1.0.0".to_string())].into(),
        dev_dependencies: [("bcrypt".to_string(), "5.0.0".to_string())].into(),
    }
}

fn merged(contributions: &[Contribution]) -> BTreeMap<String, String> {
    let fs = MemoryFs::new();
    let repo = Arc::new(JsonManifestRepository::new(Arc::new(fs.clone())));
    let sync = ManifestSynchronizer::new(repo, MANIFEST, true);
    let host = host();
    for c in contributions {
        sync.synchronize(Some(&host), &c.name, &c.own_version).unwrap();
    }
    let manifest: OutputManifest = serde_json::from_slice(&fs.get(MANIFEST).unwrap()).unwrap();
    manifest.dependencies
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the merged dependencies do not depend on arrival order.
    #[test]
    fn property_merge_is_order_independent(
        contributions in proptest::collection::vec(contribution(), 1..10),
    ) {
        let forward = merged(&contributions);
        let mut reversed = contributions.clone();
        reversed.reverse();
        prop_assert_eq!(&forward, &merged(&reversed));

        for c in &contributions {
            prop_assert!(forward.contains_key(&c.name));
        }
        if forward.contains_key("foo") {
            prop_assert_eq!(forward["foo"].as_str(), "^1.0.0");
        }
    }
}
