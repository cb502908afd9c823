//! # Structural Diff
//!
//! Compares two repository trees, typically two release branches, by walking
//! their merged listings. Externals are followed like ordinary directories,
//! so a change inside a mounted library shows up at the path where the
//! library is mounted.
//!
//! ## Algorithm
//!
//! 1. List both roots (externals included).
//! 2. Names only on the new side are `added`; names only on the old side are
//!    `removed`.
//! 3. Names on both sides with different revisions are updated. Files are
//!    recorded directly; directories are descended into and contribute only
//!    their descendants, never their own path.
//!
//! An entry that is a file on one side and a directory on the other is
//! reported as `Error::KindMismatch` instead of being guessed at.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::listing::{EntryKind, ListingEntry, ListingService};
use crate::svn::SvnClient;

/// Prefix given to top-level paths when the caller does not choose one.
pub const DEFAULT_PREFIX: &str = "./";

/// Paths that differ between two trees. The three sets never overlap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffResult {
    pub added: BTreeSet<String>,
    pub removed: BTreeSet<String>,
    pub updated: BTreeSet<String>,
}

impl DiffResult {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }

    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.updated.len()
    }

    fn merge(&mut self, child: DiffResult) {
        self.added.extend(child.added);
        self.removed.extend(child.removed);
        self.updated.extend(child.updated);
    }
}

/// Recursive, externals-aware tree comparison.
pub struct DiffEngine<'a> {
    listing: ListingService<'a>,
}

impl<'a> DiffEngine<'a> {
    pub fn new(svn: &'a SvnClient) -> Self {
        Self {
            listing: ListingService::new(svn),
        }
    }

    /// Diffs `old_root` against `new_root` with paths prefixed by `./`.
    pub fn diff(&self, old_root: &str, new_root: &str) -> Result<DiffResult> {
        self.diff_with_prefix(old_root, new_root, DEFAULT_PREFIX)
    }

    /// Diffs `old_root` against `new_root`, prefixing every reported path
    /// with `prefix`.
    pub fn diff_with_prefix(
        &self,
        old_root: &str,
        new_root: &str,
        prefix: &str,
    ) -> Result<DiffResult> {
        debug!("diffing {} against {}", old_root, new_root);
        let old_entries = by_name(self.listing.list(old_root)?);
        let new_entries = by_name(self.listing.list(new_root)?);

        let mut result = DiffResult::default();

        for name in new_entries.keys() {
            if !old_entries.contains_key(name) {
                result.added.insert(format!("{}{}", prefix, name));
            }
        }
        for name in old_entries.keys() {
            if !new_entries.contains_key(name) {
                result.removed.insert(format!("{}{}", prefix, name));
            }
        }

        for (name, new_entry) in &new_entries {
            let Some(old_entry) = old_entries.get(name) else {
                continue;
            };
            if old_entry.revision == new_entry.revision {
                continue;
            }

            let path = format!("{}{}", prefix, name);
            if old_entry.kind != new_entry.kind {
                return Err(Error::KindMismatch {
                    path,
                    old: old_entry.kind.to_string(),
                    new: new_entry.kind.to_string(),
                });
            }

            match new_entry.kind {
                EntryKind::Dir => {
                    let child = self.diff_with_prefix(
                        &format!("{}/", old_entry.location),
                        &format!("{}/", new_entry.location),
                        &format!("{}/", path),
                    )?;
                    result.merge(child);
                }
                EntryKind::File => {
                    result.updated.insert(path);
                }
            }
        }

        Ok(result)
    }
}

fn by_name(entries: Vec<ListingEntry>) -> BTreeMap<String, ListingEntry> {
    entries
        .into_iter()
        .map(|entry| (entry.name.clone(), entry))
        .collect()
}
