//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for `svnx`.
//! It uses the `thiserror` library to create a single `Error` enum covering
//! every failure mode of the library, and an explicit table of the native
//! client's error codes.
//!
//! ## Key Components
//!
//! - **`SvnErrorCode`**: The known `svn` error and warning codes, parsed once
//!   from a command's stderr. Call sites match on the enum instead of
//!   searching the error text themselves.
//!
//! - **`Error`**: The main enum. Failures reported by the native client are
//!   carried either as `Error::Svn` (a recognised code) or `Error::Command`
//!   (an unrecognised non-zero exit, surfaced verbatim). Locally detected
//!   input problems (unsupported locators, missing path segments, cycles,
//!   kind mismatches) have their own variants.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Error and warning codes emitted by the `svn` client that this crate
/// reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SvnErrorCode {
    /// `E160024`: the working copy or transaction is locked. Retried once.
    TransientLock,
    /// `E200009`: the target does not exist.
    NotFound,
    /// `E155007`: the path is not a working copy.
    NotWorkingCopy,
    /// `E160020`: the path already exists.
    AlreadyExists,
    /// `E160013`: the source of a move or copy does not exist.
    MissingSource,
    /// `W200017`: the property is not set, i.e. no externals are defined.
    NoExternals,
    /// Any other code, kept as reported.
    Other(String),
}

fn code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b([EW]\d{6})\b").expect("static regex"))
}

impl SvnErrorCode {
    /// Maps a raw code such as `E160024` onto the table.
    pub fn from_code(code: &str) -> Self {
        match code {
            "E160024" => SvnErrorCode::TransientLock,
            "E200009" => SvnErrorCode::NotFound,
            "E155007" => SvnErrorCode::NotWorkingCopy,
            "E160020" => SvnErrorCode::AlreadyExists,
            "E160013" => SvnErrorCode::MissingSource,
            "W200017" => SvnErrorCode::NoExternals,
            other => SvnErrorCode::Other(other.to_string()),
        }
    }

    /// Returns the first code found in `stderr`, if any.
    pub fn parse(stderr: &str) -> Option<Self> {
        Self::parse_all(stderr).into_iter().next()
    }

    /// Returns every code found in `stderr`, in order of appearance.
    ///
    /// The client often prints a chain such as
    /// `svn: W170000: ...` followed by `svn: E200009: ...`; callers that care
    /// about one specific code should search the whole chain.
    pub fn parse_all(stderr: &str) -> Vec<Self> {
        code_pattern()
            .captures_iter(stderr)
            .map(|caps| Self::from_code(&caps[1]))
            .collect()
    }

    /// The textual code, e.g. `E160024`.
    pub fn as_str(&self) -> &str {
        match self {
            SvnErrorCode::TransientLock => "E160024",
            SvnErrorCode::NotFound => "E200009",
            SvnErrorCode::NotWorkingCopy => "E155007",
            SvnErrorCode::AlreadyExists => "E160020",
            SvnErrorCode::MissingSource => "E160013",
            SvnErrorCode::NoExternals => "W200017",
            SvnErrorCode::Other(code) => code,
        }
    }
}

impl fmt::Display for SvnErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main error type for svnx operations
#[derive(Error, Debug)]
pub enum Error {
    /// The native client failed with a recognised error code.
    #[error("svn {code} while running `{command}`: {stderr}")]
    Svn {
        code: SvnErrorCode,
        command: String,
        stderr: String,
    },

    /// The native client exited non-zero without a recognised code.
    #[error("Command failed with exit code {exit_code}: {command} - {stderr}")]
    Command {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    /// The native client could not be launched at all.
    #[error("Failed to launch `{command}`: {message}")]
    Spawn { command: String, message: String },

    /// Command output could not be decoded with either encoding.
    #[error("Failed to decode output of `{command}` as {encodings}")]
    Decode { command: String, encodings: String },

    /// The client's XML output could not be parsed.
    #[error("XML parsing error: {message}")]
    Xml { message: String },

    /// An externals locator that is neither anchor- nor parent-relative.
    #[error("Unsupported externals locator: {locator}")]
    UnsupportedLocator { locator: String },

    /// A path could not be located while walking the repository.
    #[error("Path not found: {path}")]
    PathNotFound { path: String },

    /// Externals expansion reached a target that is already being expanded.
    #[error("Cycle detected in externals: {cycle}")]
    CycleDetected { cycle: String },

    /// An entry is a file on one side of a diff and a directory on the other.
    #[error("Entry {path} changed kind from {old} to {new}")]
    KindMismatch {
        path: String,
        old: String,
        new: String,
    },

    /// Invalid settings.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl Error {
    /// The classified client code, when this error came from the client.
    pub fn svn_code(&self) -> Option<&SvnErrorCode> {
        match self {
            Error::Svn { code, .. } => Some(code),
            _ => None,
        }
    }

    /// True for both "target does not exist" codes and for failed path walks.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.svn_code(),
            Some(SvnErrorCode::NotFound) | Some(SvnErrorCode::NotWorkingCopy)
        ) || matches!(self, Error::PathNotFound { .. })
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
