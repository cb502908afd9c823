//! Property-based tests for the structural diff.
//!
//! Trees are two levels deep: files and directories at the top, files only
//! inside each directory. Directory names and file names come from disjoint
//! alphabets so an entry never changes kind between the two sides.

#[cfg(test)]
mod proptest_tests {
    use std::collections::BTreeMap;

    use crate::diff::{DiffEngine, DiffResult};
    use crate::fake::FakeSvn;
    use proptest::prelude::*;

    const OLD: &str = "svn://svn_host/release/1.0";
    const NEW: &str = "svn://svn_host/release/1.1";

    type Files = BTreeMap<String, u32>;

    #[derive(Debug, Clone)]
    struct Tree {
        files: Files,
        dirs: BTreeMap<String, (u32, Files)>,
    }

    fn files() -> impl Strategy<Value = Files> {
        prop::collection::btree_map("f[a-d]", 1u32..4, 0..4)
    }

    fn tree() -> impl Strategy<Value = Tree> {
        (
            files(),
            prop::collection::btree_map("d[a-d]", (1u32..4, files()), 0..4),
        )
            .prop_map(|(files, dirs)| Tree { files, dirs })
    }

    fn rows(files: &Files, kind: &'static str) -> Vec<(&'static str, String, String)> {
        files
            .iter()
            .map(|(name, revision)| (kind, name.clone(), revision.to_string()))
            .collect()
    }

    fn listed(fake: FakeSvn, url: &str, rows: &[(&'static str, String, String)]) -> FakeSvn {
        let entries: Vec<(&str, &str, &str)> = rows
            .iter()
            .map(|(kind, name, revision)| (*kind, name.as_str(), revision.as_str()))
            .collect();
        fake.no_externals(url).listing(url, &entries)
    }

    /// Scripts `tree` at `root`, including the trailing-slash URLs the diff
    /// descends into.
    fn script(fake: FakeSvn, root: &str, tree: &Tree) -> FakeSvn {
        let mut top = rows(&tree.files, "file");
        top.extend(
            tree.dirs
                .iter()
                .map(|(name, (revision, _))| ("dir", name.clone(), revision.to_string())),
        );
        let mut fake = listed(fake, root, &top);
        for (name, (_, children)) in &tree.dirs {
            let url = format!("{}/{}/", root, name);
            fake = listed(fake, &url, &rows(children, "file"));
        }
        fake
    }

    fn diff(old: &Tree, new: &Tree, old_root: &str, new_root: &str) -> DiffResult {
        let fake = script(script(FakeSvn::new(), old_root, old), new_root, new);
        let client = fake.client();
        DiffEngine::new(&client).diff(old_root, new_root).unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Property: a tree never differs from itself
        #[test]
        fn diff_against_itself_is_empty(tree in tree()) {
            let result = diff(&tree, &tree, OLD, OLD);
            prop_assert!(result.is_empty());
        }

        /// Property: no path is both added, removed or updated at once
        #[test]
        fn change_sets_are_disjoint(old in tree(), new in tree()) {
            let result = diff(&old, &new, OLD, NEW);
            prop_assert!(result.added.is_disjoint(&result.removed));
            prop_assert!(result.added.is_disjoint(&result.updated));
            prop_assert!(result.removed.is_disjoint(&result.updated));
        }

        /// Property: swapping the sides swaps added and removed
        #[test]
        fn swapped_diff_mirrors(old in tree(), new in tree()) {
            let forward = diff(&old, &new, OLD, NEW);
            let backward = diff(&new, &old, NEW, OLD);
            prop_assert_eq!(forward.added, backward.removed);
            prop_assert_eq!(forward.removed, backward.added);
            prop_assert_eq!(forward.updated, backward.updated);
        }
    }
}
