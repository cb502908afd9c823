//! Property-based tests for externals flattening.

#[cfg(test)]
mod proptest_tests {
    use std::collections::BTreeSet;

    use crate::externals::{flatten, ExternalTree, ExternalsMap};
    use crate::path;
    use proptest::prelude::*;

    fn segment() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9_-]{1,8}"
    }

    fn abs_path() -> impl Strategy<Value = String> {
        prop::collection::vec(segment(), 1..4).prop_map(|parts| format!("/{}", parts.join("/")))
    }

    fn locator() -> impl Strategy<Value = String> {
        prop_oneof![
            abs_path().prop_map(|p| format!("^{}", p)),
            (1usize..4, prop::collection::vec(segment(), 1..3))
                .prop_map(|(ups, parts)| format!("{}{}", "../".repeat(ups), parts.join("/"))),
        ]
    }

    fn externals_map() -> impl Strategy<Value = ExternalsMap> {
        prop::collection::btree_map(
            abs_path(),
            prop::collection::btree_map(segment(), locator(), 0..4),
            0..5,
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        /// Property: flattening an already flat mapping changes nothing
        #[test]
        fn flatten_is_idempotent(map in externals_map()) {
            let once = flatten(&map);
            let twice = ExternalTree::from(&once).flatten();
            prop_assert_eq!(twice, once);
        }

        /// Property: no flattened locator is parent-relative
        #[test]
        fn flatten_leaves_no_parent_locators(map in externals_map()) {
            for locator in flatten(&map).values() {
                prop_assert!(!path::is_parent_relative(locator));
            }
        }

        /// Property: every definition yields exactly one `mount/name` key
        #[test]
        fn flatten_keeps_one_key_per_definition(map in externals_map()) {
            let flat = flatten(&map);
            let expected: BTreeSet<String> = map
                .iter()
                .flat_map(|(mount, defs)| defs.keys().map(move |name| path::join(mount, name)))
                .collect();
            let keys: BTreeSet<String> = flat.keys().cloned().collect();
            prop_assert_eq!(keys, expected);
        }
    }
}
