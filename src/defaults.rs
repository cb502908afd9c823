//! Default values for svnx configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Server root that `^/` locators expand to.
pub const DEFAULT_REPO_ROOT: &str = "svn://svn_host";

/// Native client looked up on `PATH`.
pub const DEFAULT_SVN_BINARY: &str = "svn";

/// Primary encoding for client output; UTF-8 is always the fallback.
pub const DEFAULT_ENCODING: &str = "gbk";

/// Per-project settings file looked up in the current directory.
pub const DEFAULT_CONFIG_FILENAME: &str = ".svnx.yaml";

/// Returns the user-wide settings file.
///
/// Uses the platform-appropriate configuration directory:
/// - Linux: `~/.config/svnx/config.yaml`
/// - macOS: `~/Library/Application Support/svnx/config.yaml`
/// - Windows: `{FOLDERID_RoamingAppData}\svnx\config.yaml`
///
/// Returns `None` if the platform directory cannot be determined.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("svnx").join("config.yaml"))
}
