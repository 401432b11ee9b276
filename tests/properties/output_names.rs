//! Property tests for output path planning.

use std::path::{Path, PathBuf};

use proptest::prelude::*;

use nativepack::domain::services::{ArtifactPathPlanner, Origin, Placement};
use nativepack::{BuildMode, ContentHash};

fn relative_source() -> impl Strategy<Value = String> {
    let segment = || proptest::string::string_regex("[A-Za-z0-9_-]{1,12}").unwrap();
    (proptest::collection::vec(segment(), 0..4), segment())
        .prop_map(|(dirs, stem)| {
            let mut parts = dirs;
            parts.push(format!("{}.node", stem));
            parts.join("/")
        })
}

fn planner(mode: BuildMode) -> ArtifactPathPlanner {
    ArtifactPathPlanner::new("/app", "/app/build/main", "/app", "/app/build/addons", mode)
}

fn absolute(placement: &Placement) -> PathBuf {
    match placement {
        Placement::Copy { absolute, .. } => absolute.clone(),
        Placement::Installed { module_path } => panic!("unexpected install of {module_path}"),
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: development output mirrors the source path and is stable.
    #[test]
    fn property_development_path_mirrors_source(
        rel in relative_source(),
        bytes in proptest::collection::vec(any::<u8>(), 0..32),
    ) {
        let source = Path::new("/app").join(&rel);
        let hash = ContentHash::from_bytes(&bytes);
        let planner = planner(BuildMode::Development);

        let first = planner.plan(&source, &hash, Origin::ProjectLocal, None);
        let second = planner.plan(&source, &hash, Origin::ProjectLocal, None);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(absolute(&first), Path::new("/app/build/addons").join(&rel));
    }

    /// PROPERTY: flipping one byte renames that artifact and only that one.
    #[test]
    fn property_production_name_tracks_content(
        bytes in proptest::collection::vec(any::<u8>(), 1..64),
        other in proptest::collection::vec(any::<u8>(), 1..64),
        flip in any::<prop::sample::Index>(),
    ) {
        let planner = planner(BuildMode::Production);
        let source = Path::new("/app/native/addon.node");
        let other_source = Path::new("/app/native/other.node");

        let mut changed = bytes.clone();
        let i = flip.index(changed.len());
        changed[i] ^= 0x01;

        let before = planner.plan(source, &ContentHash::from_bytes(&bytes), Origin::ProjectLocal, None);
        let after = planner.plan(source, &ContentHash::from_bytes(&changed), Origin::ProjectLocal, None);
        prop_assert_ne!(absolute(&before), absolute(&after));

        let other_hash = ContentHash::from_bytes(&other);
        let other_before = planner.plan(other_source, &other_hash, Origin::ProjectLocal, None);
        let other_after = planner.plan(other_source, &other_hash, Origin::ProjectLocal, None);
        prop_assert_eq!(absolute(&other_before), absolute(&other_after));
    }
}
