//! # Externals Catalog
//!
//! Reads `svn:externals` definitions and turns them into data the rest of the
//! crate can work with.
//!
//! - [`parse`] reads the XML produced by `svn pg svn:externals --xml` into an
//!   [`ExternalsMap`]: mount path -> local name -> locator. Malformed or empty
//!   input gives an empty map, since externals are optional metadata.
//! - [`ExternalTree`] is the same data as a typed tree, and
//!   [`ExternalTree::flatten`] turns it into `full path -> locator` pairs.
//!   Parent-relative leaves are rewritten to anchor-relative form on the way
//!   out, so a flattened entry never depends on the mount it came from.
//! - [`ExternalsCatalog::copy_plan`] resolves every external, follows the
//!   externals defined on each resolved target, and produces the ordered list
//!   of copies that would replace the externals with real directories.

use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::path;
use crate::svn::SvnClient;
use crate::xml::XmlDocument;

/// Mount path (repository-relative) -> local name -> locator.
pub type ExternalsMap = BTreeMap<String, BTreeMap<String, String>>;

/// One line of an externals definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalSpec {
    pub local_name: String,
    pub locator: String,
}

impl ExternalSpec {
    /// Parses `[-r REV] <locator>[@PEG] <local_name>`.
    ///
    /// Option tokens are skipped. The first remaining token is the locator
    /// and the last one the local name; a line with fewer than two is not a
    /// definition.
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut tokens = Vec::new();
        let mut words = line.split_whitespace();
        while let Some(word) = words.next() {
            if word == "-r" {
                words.next();
            } else if !word.starts_with('-') {
                tokens.push(word);
            }
        }

        match tokens.as_slice() {
            [locator, .., local_name] => Some(Self {
                local_name: local_name.to_string(),
                locator: locator.to_string(),
            }),
            _ => None,
        }
    }
}

/// Parses the definition body of one target into `local name -> locator`.
pub fn parse_definitions(body: &str) -> BTreeMap<String, String> {
    body.lines()
        .filter_map(ExternalSpec::parse_line)
        .map(|spec| (spec.local_name, spec.locator))
        .collect()
}

/// Parses `svn pg svn:externals --xml` output. Target paths have `root`
/// stripped so keys are repository-relative.
pub fn parse(raw: &str, root: &str) -> ExternalsMap {
    if raw.trim().is_empty() {
        return ExternalsMap::new();
    }
    match try_parse(raw, root) {
        Ok(map) => map,
        Err(err) => {
            debug!("ignoring unreadable externals property: {}", err);
            ExternalsMap::new()
        }
    }
}

fn try_parse(raw: &str, root: &str) -> Result<ExternalsMap> {
    let mut doc = XmlDocument::parse(raw)?;
    let target = doc.name("target");
    let property = doc.name("property");
    let path_attr = doc.name("path");

    let mut map = ExternalsMap::new();
    for node in doc.children(doc.root(), target) {
        let Some(target_path) = doc.attribute(node, path_attr) else {
            continue;
        };
        let mount = path::strip_root(root, target_path).to_string();
        let body = doc
            .child(node, property)
            .map(|p| doc.text(p))
            .unwrap_or_default();
        map.insert(mount, parse_definitions(&body));
    }
    Ok(map)
}

/// Externals as a tree of path segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalTree {
    Leaf(String),
    Branch(BTreeMap<String, ExternalTree>),
}

impl ExternalTree {
    /// Flattens the tree into `full path -> locator`.
    ///
    /// Keys are joined with `/`. A parent-relative leaf is resolved against
    /// the directory holding its own key and recorded as `^<path>`.
    pub fn flatten(&self) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        self.flatten_into("", &mut out);
        out
    }

    fn flatten_into(&self, key: &str, out: &mut BTreeMap<String, String>) {
        match self {
            ExternalTree::Leaf(locator) => {
                let value = if path::is_parent_relative(locator) {
                    format!(
                        "{}{}",
                        path::ANCHOR_MARKER,
                        path::normalize(path::dirname(key), locator)
                    )
                } else {
                    locator.clone()
                };
                out.insert(key.to_string(), value);
            }
            ExternalTree::Branch(children) => {
                for (segment, child) in children {
                    let child_key = if key.is_empty() {
                        segment.clone()
                    } else {
                        path::join(key, segment)
                    };
                    child.flatten_into(&child_key, out);
                }
            }
        }
    }
}

impl From<&ExternalsMap> for ExternalTree {
    fn from(map: &ExternalsMap) -> Self {
        ExternalTree::Branch(
            map.iter()
                .map(|(mount, definitions)| {
                    let leaves = definitions
                        .iter()
                        .map(|(name, locator)| (name.clone(), ExternalTree::Leaf(locator.clone())))
                        .collect();
                    (mount.clone(), ExternalTree::Branch(leaves))
                })
                .collect(),
        )
    }
}

impl From<&BTreeMap<String, String>> for ExternalTree {
    fn from(flat: &BTreeMap<String, String>) -> Self {
        ExternalTree::Branch(
            flat.iter()
                .map(|(key, locator)| (key.clone(), ExternalTree::Leaf(locator.clone())))
                .collect(),
        )
    }
}

/// Shorthand for `ExternalTree::from(map).flatten()`.
pub fn flatten(map: &ExternalsMap) -> BTreeMap<String, String> {
    ExternalTree::from(map).flatten()
}

/// A single copy that replaces an external with a real directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyStep {
    /// Absolute URL of the external's target.
    pub source: String,
    /// Absolute URL the target is copied to.
    pub destination: String,
}

/// The copies to perform, in order, and the directories whose externals
/// property must be cleared once they are done.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CopyPlan {
    pub steps: Vec<CopyStep>,
    pub cleared: Vec<String>,
}

/// Externals queries against a live repository.
pub struct ExternalsCatalog<'a> {
    svn: &'a SvnClient,
}

impl<'a> ExternalsCatalog<'a> {
    pub fn new(svn: &'a SvnClient) -> Self {
        Self { svn }
    }

    /// Externals defined directly on `url`.
    pub fn fetch(&self, url: &str) -> Result<ExternalsMap> {
        let raw = self.svn.externals_xml(url, false)?;
        Ok(parse(&raw, self.svn.root()))
    }

    /// Externals defined on `url` and every directory below it.
    pub fn fetch_recursive(&self, url: &str) -> Result<ExternalsMap> {
        let raw = self.svn.externals_xml(url, true)?;
        Ok(parse(&raw, self.svn.root()))
    }

    /// Resolves every locator in `externals` to an absolute URL.
    ///
    /// Mount keys double as the context for parent-relative locators unless
    /// `source_path` is given.
    pub fn resolve(
        &self,
        externals: &ExternalsMap,
        source_path: Option<&str>,
    ) -> Result<ExternalsMap> {
        let root = self.svn.root();
        externals
            .iter()
            .map(|(mount, definitions)| -> Result<(String, BTreeMap<String, String>)> {
                let resolved = definitions
                    .iter()
                    .map(|(name, locator)| {
                        path::resolve_external(root, mount, locator, source_path)
                            .map(|target| (name.clone(), target))
                    })
                    .collect::<Result<BTreeMap<_, _>>>()?;
                Ok((mount.clone(), resolved))
            })
            .collect()
    }

    /// Plans the copies that materialise `externals` under `remote_root`.
    ///
    /// Mount keys are relative to `remote_root`. Each resolved target is
    /// queried for externals of its own, which are re-rooted under the
    /// destination and expanded depth-first. A target that reappears among
    /// its own ancestors fails with `Error::CycleDetected`.
    pub fn copy_plan(
        &self,
        remote_root: &str,
        externals: &ExternalsMap,
        source_path: Option<&str>,
    ) -> Result<CopyPlan> {
        let resolved = self.resolve(externals, source_path)?;
        let mut plan = CopyPlan::default();
        let mut chain = Vec::new();
        self.expand(remote_root, &resolved, &mut chain, &mut plan)?;
        Ok(plan)
    }

    fn expand(
        &self,
        remote_root: &str,
        resolved: &ExternalsMap,
        chain: &mut Vec<String>,
        plan: &mut CopyPlan,
    ) -> Result<()> {
        plan.cleared.extend(
            resolved
                .keys()
                .map(|mount| format!("{}{}", remote_root, mount)),
        );

        for (key, target) in flatten(resolved) {
            if chain.contains(&target) {
                let mut cycle = chain.clone();
                cycle.push(target);
                return Err(Error::CycleDetected {
                    cycle: cycle.join(" -> "),
                });
            }

            plan.steps.push(CopyStep {
                source: target.clone(),
                destination: format!("{}{}", remote_root, key),
            });

            let nested = self.fetch(&target)?;
            if nested.values().all(BTreeMap::is_empty) {
                continue;
            }
            debug!("{} defines externals of its own", target);

            let target_path = path::strip_root(self.svn.root(), &target);
            let rebased = self
                .resolve(&nested, None)?
                .into_iter()
                .map(|(mount, definitions)| {
                    let suffix = mount.strip_prefix(target_path).unwrap_or("");
                    (format!("{}{}", key, suffix), definitions)
                })
                .collect();

            chain.push(target);
            self.expand(remote_root, &rebased, chain, plan)?;
            chain.pop();
        }
        Ok(())
    }
}
