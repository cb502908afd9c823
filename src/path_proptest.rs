//! Property-based tests for the path algebra.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::path::{normalize, normpath, resolve_external};
    use proptest::prelude::*;

    const ROOT: &str = "svn://svn_host";

    fn segment() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9_-]{1,8}"
    }

    fn abs_path() -> impl Strategy<Value = String> {
        prop::collection::vec(segment(), 1..5).prop_map(|parts| format!("/{}", parts.join("/")))
    }

    // ============================================================================
    // normpath property tests
    // ============================================================================

    proptest! {
        /// Property: normpath is idempotent
        #[test]
        fn normpath_is_idempotent(input in "[a-z./]{0,24}") {
            let once = normpath(&input);
            prop_assert_eq!(normpath(&once), once);
        }

        /// Property: normalized absolute paths contain no `.` or `..` components
        #[test]
        fn normpath_absolute_has_no_dot_components(input in "/[a-z./]{0,24}") {
            let result = normpath(&input);
            prop_assert!(result.starts_with('/'));
            for component in result.split('/') {
                prop_assert!(component != "." && component != "..");
            }
        }

        /// Property: normpath never leaves a doubled separator
        #[test]
        fn normpath_has_no_double_separator(input in "[a-z/\\\\]{0,24}") {
            let result = normpath(&input);
            prop_assert!(!result.contains("//"));
            prop_assert!(!result.contains('\\'));
        }
    }

    // ============================================================================
    // resolve_external property tests
    // ============================================================================

    proptest! {
        /// Property: anchor-relative locators ignore the current path
        #[test]
        fn anchor_locator_is_independent_of_current_path(
            current in abs_path(),
            target in abs_path(),
        ) {
            let locator = format!("^{}", target);
            let resolved = resolve_external(ROOT, &current, &locator, None).unwrap();
            prop_assert_eq!(resolved, format!("{}{}", ROOT, target));
        }

        /// Property: `../name` resolves to a sibling of the current path
        #[test]
        fn parent_locator_resolves_to_sibling(
            parent in abs_path(),
            current in segment(),
            name in segment(),
        ) {
            let current_path = format!("{}/{}", parent, current);
            let resolved =
                resolve_external(ROOT, &current_path, &format!("../{}", name), None).unwrap();
            prop_assert_eq!(resolved, format!("{}{}/{}", ROOT, parent, name));
        }

        /// Property: resolution agrees with normalize for parent-relative locators
        #[test]
        fn parent_locator_matches_normalize(
            current in abs_path(),
            rest in "(\\.\\./){1,3}[a-z]{1,6}",
        ) {
            let resolved = resolve_external(ROOT, &current, &rest, None).unwrap();
            prop_assert_eq!(resolved, format!("{}{}", ROOT, normalize(&current, &rest)));
        }
    }
}
