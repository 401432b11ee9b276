//! Property tests for build descriptor scanning.

use proptest::prelude::*;

use nativepack::domain::services::declared_targets;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: scanning arbitrary text never panics and never yields an
    /// empty or duplicated name.
    #[test]
    fn property_declared_targets_never_panics(input in ".{0,256}") {
        let names = declared_targets(&input);
        for (i, name) in names.iter().enumerate() {
            prop_assert!(!name.is_empty());
            prop_assert!(!names[..i].contains(name));
        }
    }

    /// PROPERTY: every declared name is found, in declaration order.
    #[test]
    fn property_declared_targets_keeps_order(
        names in proptest::collection::vec("[a-z][a-z0-9_]{0,10}", 1..6),
    ) {
        let mut unique: Vec<String> = Vec::new();
        for n in &names {
            if !unique.contains(n) {
                unique.push(n.clone());
            }
        }
        let body: Vec<String> = names
            .iter()
            .enumerate()
            .map(|(i, n)| if i % 2 == 0 {
                format!("{{ 'target_name': '{}' }}", n)
            } else {
                format!("{{ \"target_name\": \"{}\" }}", n)
            })
            .collect();
        let descriptor = format!("{{ 'targets': [ {} ] }}", body.join(", "));
        prop_assert_eq!(declared_targets(&descriptor), unique);
    }
}
