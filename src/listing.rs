//! # Directory Listing
//!
//! Lists repository directories the way a user sees them: native children
//! plus the heads of any externals mounted on the directory, all with the
//! same shape.

use std::fmt;

use log::{debug, warn};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::externals::ExternalsCatalog;
use crate::path;
use crate::svn::SvnClient;
use crate::xml::XmlDocument;

/// Node kind as reported by `svn ls --xml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
}

impl EntryKind {
    fn parse(kind: &str) -> Option<Self> {
        match kind {
            "file" => Some(EntryKind::File),
            "dir" => Some(EntryKind::Dir),
            _ => None,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::File => f.write_str("file"),
            EntryKind::Dir => f.write_str("dir"),
        }
    }
}

/// One child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    pub kind: EntryKind,
    pub name: String,
    /// Revision the entry was last changed in, as reported.
    pub revision: String,
    pub author: String,
    pub date: String,
    /// The directory this entry was listed from. For an external this is the
    /// parent of the external's target, not the directory it is mounted on.
    pub url: String,
    /// Absolute URL of the entry itself.
    pub location: String,
}

/// Parses `svn ls --xml` output.
///
/// Entries missing a kind, name or commit revision are skipped.
pub fn parse_list_xml(xml: &str) -> Result<Vec<ListingEntry>> {
    let mut doc = XmlDocument::parse(xml)?;
    let list = doc.name("list");
    let entry = doc.name("entry");
    let name = doc.name("name");
    let commit = doc.name("commit");
    let author = doc.name("author");
    let date = doc.name("date");
    let path_attr = doc.name("path");
    let kind_attr = doc.name("kind");
    let revision_attr = doc.name("revision");

    let list_node = doc.child(doc.root(), list).ok_or_else(|| Error::Xml {
        message: "listing has no <list> element".to_string(),
    })?;
    let url = doc
        .attribute(list_node, path_attr)
        .unwrap_or_default()
        .trim_end_matches('/')
        .to_string();

    let mut entries = Vec::new();
    for node in doc.children(list_node, entry) {
        let Some(kind) = doc.attribute(node, kind_attr).and_then(EntryKind::parse) else {
            continue;
        };
        let Some(entry_name) = doc.child(node, name).map(|n| doc.text(n)) else {
            continue;
        };
        let Some(commit_node) = doc.child(node, commit) else {
            continue;
        };
        let Some(revision) = doc.attribute(commit_node, revision_attr) else {
            continue;
        };
        let text_of = |tag| {
            doc.child(commit_node, tag)
                .map(|n| doc.text(n))
                .unwrap_or_default()
        };

        entries.push(ListingEntry {
            kind,
            location: path::join(&url, &entry_name),
            name: entry_name,
            revision: revision.to_string(),
            author: text_of(author),
            date: text_of(date),
            url: url.clone(),
        });
    }
    Ok(entries)
}

/// Lists directories, merging in externally mounted entries.
pub struct ListingService<'a> {
    svn: &'a SvnClient,
}

impl<'a> ListingService<'a> {
    pub fn new(svn: &'a SvnClient) -> Self {
        Self { svn }
    }

    /// Entry names exactly as the client prints them, one per line.
    pub fn list_names(&self, url: &str) -> Result<Vec<String>> {
        self.svn.list_names(url)
    }

    /// Native entries of `url` followed by the head entry of every external
    /// mounted on it.
    ///
    /// Each external's target is looked up in a listing of its parent
    /// directory and presented under its local name. The merge is best
    /// effort: an external whose head cannot be found is left out.
    pub fn list(&self, url: &str) -> Result<Vec<ListingEntry>> {
        let externals = ExternalsCatalog::new(self.svn).fetch(url)?;
        let mut entries = parse_list_xml(&self.svn.list_xml(url)?)?;

        for (mount, definitions) in &externals {
            for (local_name, locator) in definitions {
                let target = path::resolve_external(self.svn.root(), mount, locator, None)?;
                match self.external_head(&target)? {
                    Some(mut head) => {
                        head.name = local_name.clone();
                        entries.push(head);
                    }
                    None => debug!("external {} -> {} not found, skipped", local_name, target),
                }
            }
        }
        Ok(entries)
    }

    /// The entry `target` names in its parent's HEAD listing. A peg
    /// revision on the target only pins the mount; the head is looked up
    /// without it so `location` stays a plain URL.
    fn external_head(&self, target: &str) -> Result<Option<ListingEntry>> {
        let (target, _peg) = path::split_peg(target);
        let parent = path::dirname(target);
        let wanted = path::basename(target);
        let xml = match self.svn.list_xml(parent) {
            Ok(xml) => xml,
            Err(err @ Error::Spawn { .. }) => return Err(err),
            Err(err) => {
                warn!("could not list {} for external {}: {}", parent, target, err);
                return Ok(None);
            }
        };
        Ok(parse_list_xml(&xml)?
            .into_iter()
            .find(|entry| entry.name == wanted))
    }
}
