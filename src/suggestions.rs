//! # Error Suggestions
//!
//! Turns library errors into user-facing messages with hints. Errors
//! should tell users what went wrong AND how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use svnx::suggestions;
//!
//! let real = ops.resolve_real_path(&url).map_err(suggestions::explain)?;
//! ```

use crate::error::{Error, SvnErrorCode};

/// Wraps `error` in an `anyhow::Error` carrying hints for the cases a user
/// can act on. Other errors pass through with their own message.
pub fn explain(error: Error) -> anyhow::Error {
    let hints: &[&str] = match &error {
        Error::Svn { code, .. } => match code {
            SvnErrorCode::TransientLock => &[
                "hint: Another svn process holds the lock; wait for it to finish",
                "hint: Run 'svn cleanup' if no other process is running",
            ],
            SvnErrorCode::NotFound => &["hint: Check the URL with 'svnx exists <URL>'"],
            SvnErrorCode::NotWorkingCopy => {
                &["hint: Run this command inside a working copy or pass a URL"]
            }
            SvnErrorCode::AlreadyExists => &[
                "hint: The directory already exists",
                "hint: 'svnx mkdir' skips directories that already exist",
            ],
            SvnErrorCode::MissingSource => &["hint: The source folder does not exist"],
            SvnErrorCode::NoExternals | SvnErrorCode::Other(_) => &[],
        },
        Error::Spawn { .. } => &[
            "hint: Make sure the svn client is installed and on PATH",
            "hint: Use --svn or SVNX_SVN to point at the client",
        ],
        Error::Decode { .. } => {
            &["hint: Use --encoding or SVNX_ENCODING to match the client's locale"]
        }
        Error::UnsupportedLocator { .. } => &[
            "hint: Only '^/...' and '../...' externals can be resolved",
            "hint: Rewrite absolute-URL externals relative to the repository root",
        ],
        Error::CycleDetected { .. } => {
            &["hint: Remove one of the externals definitions to break the cycle"]
        }
        Error::KindMismatch { .. } => {
            &["hint: Compare the parent directories with 'svn diff --summarize' instead"]
        }
        Error::PathNotFound { .. } => &["hint: Check each path segment with 'svnx ls'"],
        Error::UrlParse(_) => &["hint: repo_root must be a full URL such as svn://host"],
        _ => &[],
    };

    if hints.is_empty() {
        anyhow::Error::new(error)
    } else {
        anyhow::anyhow!("{}\n\n{}", error, hints.join("\n"))
    }
}
