//! Property tests for probe memoization.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use proptest::prelude::*;

use nativepack::application::CompatibilityProber;

use crate::common::CountingLauncher;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the runtime is launched once per distinct content, however
    /// many paths carry it.
    #[test]
    fn property_probe_launches_once_per_content(
        contents in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..16), 1..12),
        picks in proptest::collection::vec(any::<prop::sample::Index>(), 1..32),
    ) {
        let launcher = Arc::new(CountingLauncher::compatible());
        let prober = CompatibilityProber::new(launcher.clone(), 30);

        let mut distinct = HashSet::new();
        for (i, pick) in picks.iter().enumerate() {
            let bytes = &contents[pick.index(contents.len())];
            distinct.insert(bytes.clone());
            let path = PathBuf::from(format!("/app/native/{}/addon.node", i));
            prop_assert!(prober.probe(&path, bytes).unwrap());
        }

        prop_assert_eq!(launcher.calls(), distinct.len());
        prop_assert_eq!(prober.recorded(), distinct.len());
    }
}
