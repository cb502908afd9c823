//! # High-Level Repository Operations
//!
//! Path checks and path creation that understand externals.
//!
//! A URL that runs through an external mount does not exist as far as
//! `svn info` is concerned, because the mounted subtree lives elsewhere.
//! `RepositoryOps` therefore finds the longest prefix the server knows about
//! and walks the remaining segments through merged listings, following each
//! segment to wherever it really lives.

use log::{debug, info};

use crate::error::{Error, Result, SvnErrorCode};
use crate::externals::{CopyPlan, ExternalsCatalog, ExternalsMap};
use crate::listing::ListingService;
use crate::path;
use crate::svn::SvnClient;

/// Revision copied when inlining externals.
pub const INLINE_REVISION: &str = "HEAD";

pub struct RepositoryOps<'a> {
    svn: &'a SvnClient,
}

impl<'a> RepositoryOps<'a> {
    pub fn new(svn: &'a SvnClient) -> Self {
        Self { svn }
    }

    /// Whether the server knows `url`.
    ///
    /// Only `E200009` means "no". Any other failure is returned as an error.
    pub fn exists(&self, url: &str) -> Result<bool> {
        let result = self.svn.info(url)?;
        if result.success() {
            return Ok(true);
        }
        if result.has_code(&SvnErrorCode::NotFound) {
            return Ok(false);
        }
        Err(result.to_error(&format!("svn info {}", url)))
    }

    /// The URL where `url` really lives once externals along the way are
    /// followed.
    pub fn resolve_real_path(&self, url: &str) -> Result<String> {
        let (real, missing) = self.walk(url)?;
        if !missing.is_empty() {
            return Err(Error::PathNotFound {
                path: url.to_string(),
            });
        }
        Ok(real)
    }

    /// Makes sure `url` exists as a directory, creating missing trailing
    /// segments one `svn mkdir` at a time. Returns the real URL.
    pub fn ensure_directory(&self, url: &str, message: &str) -> Result<String> {
        if self.exists(url)? {
            return Ok(url.trim_end_matches('/').to_string());
        }
        let (mut real, missing) = self.walk(url)?;
        for segment in missing {
            real = path::join(&real, &segment);
            self.svn.mkdir(&real, message)?;
        }
        Ok(real)
    }

    /// Replaces the externals in `externals` with real copies under
    /// `remote_root`, then clears the externals property on every mount that
    /// was materialised. Returns the executed plan.
    pub fn inline_externals(
        &self,
        remote_root: &str,
        externals: &ExternalsMap,
        source_path: Option<&str>,
    ) -> Result<CopyPlan> {
        let plan = ExternalsCatalog::new(self.svn).copy_plan(remote_root, externals, source_path)?;
        info!(
            "inlining {} external(s), clearing {} mount(s)",
            plan.steps.len(),
            plan.cleared.len()
        );

        for step in &plan.steps {
            let message = format!("override_externals:{}", step.destination);
            self.svn
                .copy(&step.source, &step.destination, INLINE_REVISION, &message)?;
        }
        for mount in &plan.cleared {
            self.svn.set_externals(mount, "", "delete_externals")?;
        }
        Ok(plan)
    }

    /// Splits `url` into the longest prefix the server knows and walks the
    /// rest through merged listings. Returns the real URL reached and the
    /// segments that could not be found.
    fn walk(&self, url: &str) -> Result<(String, Vec<String>)> {
        let trimmed = url.trim_end_matches('/');
        let parts: Vec<&str> = trimmed.split('/').collect();
        let shortest = shortest_prefix(&parts);

        let mut found = None;
        for len in (shortest..=parts.len()).rev() {
            let prefix = parts[..len].join("/");
            if prefix.is_empty() {
                continue;
            }
            // a server root that refuses `svn info` just means no prefix exists
            let present = match self.exists(&prefix) {
                Ok(present) => present,
                Err(err @ (Error::Svn { .. } | Error::Command { .. })) if len == shortest => {
                    debug!("server root {} not readable: {}", prefix, err);
                    false
                }
                Err(err) => return Err(err),
            };
            if present {
                found = Some((prefix, len));
                break;
            }
        }
        let Some((mut real, len)) = found else {
            return Err(Error::PathNotFound {
                path: url.to_string(),
            });
        };
        debug!("longest existing prefix of {} is {}", url, real);

        let listing = ListingService::new(self.svn);
        let mut rest = parts[len..].iter().map(|s| s.to_string());
        while let Some(segment) = rest.next() {
            let entries = listing.list(&real)?;
            match entries.into_iter().find(|entry| entry.name == segment) {
                Some(entry) => real = entry.location,
                None => {
                    let mut missing = vec![segment];
                    missing.extend(rest);
                    return Ok((real, missing));
                }
            }
        }
        Ok((real, Vec::new()))
    }
}

/// Number of leading parts that make up the scheme and host of a URL, so the
/// walk never probes `svn:` or `svn:/` on their own.
fn shortest_prefix(parts: &[&str]) -> usize {
    match parts {
        [scheme, "", _host, ..] if scheme.ends_with(':') => 3,
        _ => 1,
    }
}
