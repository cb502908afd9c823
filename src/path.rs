//! Path algebra for repository paths and externals locators.
//!
//! Everything here is pure string manipulation with forward slashes; no call
//! touches the filesystem or the server. Backslashes are accepted on input
//! and rewritten.

use crate::error::{Error, Result};

/// Marker that starts an anchor-relative locator (`^/shared/lib`).
pub const ANCHOR_MARKER: char = '^';

/// Marker that starts a parent-relative locator (`../lib`).
pub const PARENT_MARKER: &str = "..";

/// Collapses `.` and `..` components and repeated separators.
///
/// `..` above the root of an absolute path is dropped; in a relative path it
/// is kept. An empty result is `"."`.
pub fn normpath(path: &str) -> String {
    let path = path.replace('\\', "/");
    let absolute = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for component in path.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !absolute {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }

    let body = parts.join("/");
    if absolute {
        format!("/{}", body)
    } else if body.is_empty() {
        ".".to_string()
    } else {
        body
    }
}

/// Joins `relative` onto `base_path` and normalizes the result.
///
/// An absolute `relative` replaces the base, as with a filesystem join.
pub fn normalize(base_path: &str, relative_path: &str) -> String {
    let relative = relative_path.replace('\\', "/");
    if relative.starts_with('/') || base_path.is_empty() {
        return normpath(&relative);
    }
    normpath(&format!("{}/{}", base_path, relative))
}

/// Everything before the last separator: `/lib/libA` -> `/lib`, `/a` -> `/`,
/// `a` -> ``.
pub fn dirname(path: &str) -> &str {
    match path.rfind('/') {
        None => "",
        Some(index) => {
            let head = path[..index].trim_end_matches('/');
            if head.is_empty() {
                &path[..1]
            } else {
                head
            }
        }
    }
}

/// The last component of `path`, ignoring a trailing separator.
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(index) => &trimmed[index + 1..],
        None => trimmed,
    }
}

/// Appends `name` to `base` with exactly one separator between them.
pub fn join(base: &str, name: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        name.trim_start_matches('/')
    )
}

/// Removes the repository root URL from the front of `path`, if present.
pub fn strip_root<'a>(root: &str, path: &'a str) -> &'a str {
    if root.is_empty() {
        return path;
    }
    path.strip_prefix(root).unwrap_or(path)
}

pub fn is_anchor_relative(locator: &str) -> bool {
    locator.starts_with(ANCHOR_MARKER)
}

pub fn is_parent_relative(locator: &str) -> bool {
    locator.starts_with(PARENT_MARKER)
}

/// Splits a trailing peg revision off `path`: `/lib/libA@5` ->
/// (`/lib/libA`, `Some("5")`).
///
/// A bare trailing `@` escapes an `@` in the name and is dropped.
pub fn split_peg(path: &str) -> (&str, Option<&str>) {
    match path.rfind('@') {
        Some(index) if index + 1 == path.len() => (&path[..index], None),
        Some(index) if !path[index + 1..].contains('/') => {
            (&path[..index], Some(&path[index + 1..]))
        }
        _ => (path, None),
    }
}

/// Resolves an externals locator into an absolute URL under `root`.
///
/// - `^/a/b` becomes `<root>/a/b`, whatever `current_path` is.
/// - `../a` is joined against `alternate_source` when given, otherwise
///   against `current_path`. The root is stripped from the context before the
///   join and put back afterwards.
/// - Anything else is rejected with `Error::UnsupportedLocator`.
pub fn resolve_external(
    root: &str,
    current_path: &str,
    locator: &str,
    alternate_source: Option<&str>,
) -> Result<String> {
    if let Some(rest) = locator.strip_prefix(ANCHOR_MARKER) {
        return Ok(format!("{}{}", root, rest));
    }

    if is_parent_relative(locator) {
        let context = strip_root(root, alternate_source.unwrap_or(current_path));
        return Ok(format!("{}{}", root, normalize(context, locator)));
    }

    Err(Error::UnsupportedLocator {
        locator: locator.to_string(),
    })
}
