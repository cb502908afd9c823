//! # svnx
//!
//! Externals-aware helpers for a centralized Subversion server.
//!
//! `svn:externals` graft one subtree of a repository into another. The native
//! client treats those mounts as opaque: `svn ls` does not show them, `svn
//! info` does not find paths below them and `svn diff --summarize` stops at
//! them. This library treats them as transparent extensions of the tree.
//!
//! ## Quick Example
//!
//! ```
//! use svnx::externals::{self, ExternalTree};
//! use svnx::path;
//!
//! assert_eq!(
//!     path::resolve_external("svn://host", "/proj/trunk/lib", "../../shared/libA", None).unwrap(),
//!     "svn://host/proj/shared/libA"
//! );
//!
//! let raw = r#"<properties>
//! <target path="svn://host/proj/trunk">
//! <property name="svn:externals">^/shared/libA libA</property>
//! </target>
//! </properties>"#;
//! let map = externals::parse(raw, "svn://host");
//! let flat = ExternalTree::from(&map).flatten();
//! assert_eq!(flat["/proj/trunk/libA"], "^/shared/libA");
//! ```
//!
//! ## Core Concepts
//!
//! - **Command execution (`exec`, `svn`)**: runs the native client, decodes
//!   its output and classifies failures by their `E`/`W` code. A locked
//!   working copy is retried once.
//! - **Paths (`path`)**: normalization and resolution of `^/` and `../`
//!   externals locators.
//! - **Externals (`externals`)**: parsing property XML, flattening nested
//!   definitions and planning the copies that inline them.
//! - **Listing (`listing`)**: directory listings with external mounts merged
//!   in as ordinary entries.
//! - **Diff (`diff`)**: recursive comparison of two trees that descends through
//!   externals on both sides.
//! - **Repository operations (`repository`)**: existence checks, real-path
//!   resolution, directory creation and externals inlining.

pub mod config;
pub mod defaults;
pub mod diff;
pub mod error;
pub mod exec;
pub mod externals;
pub mod listing;
pub mod output;
pub mod path;
pub mod repository;
pub mod suggestions;
pub mod svn;

mod xml;

#[cfg(test)]
mod fake;

#[cfg(test)]
mod path_proptest;

#[cfg(test)]
mod diff_proptest;

#[cfg(test)]
mod externals_proptest;
