//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the `svnx`
//! command-line tool. Each subcommand is defined in its own file to keep the
//! logic separated and maintainable.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and the shared
//!   [`Context`] and performs the command's logic.
//!
//! Targets given on the command line go through
//! [`Settings::to_url`](svnx::config::Settings::to_url), so `proj/trunk` and
//! `svn://host/proj/trunk` are both accepted.

pub mod completions;
pub mod diff;
pub mod exists;
pub mod export;
pub mod externals;
pub mod info;
pub mod inline;
pub mod ls;
pub mod mkdir;
pub mod mv;
pub mod realpath;
pub mod rm;

use svnx::config::Settings;
use svnx::output::OutputConfig;
use svnx::svn::SvnClient;

/// Exit code for "differences found" and "path absent".
pub const EXIT_NEGATIVE: u8 = 1;

/// Exit code for any error.
pub const EXIT_ERROR: u8 = 2;

/// What every repository command needs.
pub struct Context {
    pub settings: Settings,
    pub svn: SvnClient,
    pub output: OutputConfig,
}

impl Context {
    /// Full URL for a command-line target.
    pub fn url(&self, target: &str) -> String {
        self.settings.to_url(target)
    }
}
