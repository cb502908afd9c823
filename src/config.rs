//! # Settings
//!
//! Where `svnx` finds the server and how it talks to the native client.
//!
//! Settings come from a YAML file and are then overridden by command-line
//! flags (or their environment variables). The file is looked up in order:
//!
//! 1. the path given with `--config` / `SVNX_CONFIG` (must exist),
//! 2. `.svnx.yaml` in the current directory,
//! 3. `config.yaml` in the user configuration directory.
//!
//! When none is found the built-in defaults apply.
//!
//! ```yaml
//! repo_root: svn://svn.example.com
//! svn_binary: /usr/bin/svn
//! encoding: utf-8
//! ```

use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::defaults::{
    user_config_path, DEFAULT_CONFIG_FILENAME, DEFAULT_ENCODING, DEFAULT_REPO_ROOT,
    DEFAULT_SVN_BINARY,
};
use crate::error::{Error, Result};
use crate::exec::Decoder;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Server root URL; `^/path` expands to `<repo_root>/path`.
    pub repo_root: String,
    /// Native client executable.
    pub svn_binary: String,
    /// Primary encoding label for client output.
    pub encoding: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            repo_root: DEFAULT_REPO_ROOT.to_string(),
            svn_binary: DEFAULT_SVN_BINARY.to_string(),
            encoding: DEFAULT_ENCODING.to_string(),
        }
    }
}

/// Flag and environment overrides applied on top of the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub repo_root: Option<String>,
    pub svn_binary: Option<String>,
    pub encoding: Option<String>,
}

impl Settings {
    /// Applies every override that is set.
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(root) = &overrides.repo_root {
            self.repo_root = root.clone();
        }
        if let Some(binary) = &overrides.svn_binary {
            self.svn_binary = binary.clone();
        }
        if let Some(encoding) = &overrides.encoding {
            self.encoding = encoding.clone();
        }
        self
    }

    /// Checks that the root is a URL, the binary is named and the encoding
    /// is known.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.repo_root)?;
        if self.svn_binary.trim().is_empty() {
            return Err(Error::Config {
                message: "svn_binary must not be empty".to_string(),
            });
        }
        Decoder::for_label(&self.encoding)?;
        Ok(())
    }

    /// Turns a repository-relative path into a URL under `repo_root`.
    /// Anything that already has a scheme is returned as is.
    pub fn to_url(&self, target: &str) -> String {
        if target.contains("://") {
            target.to_string()
        } else {
            crate::path::join(&self.repo_root, target)
        }
    }
}

/// Parses settings from YAML. An empty document yields the defaults.
pub fn parse(yaml_content: &str) -> Result<Settings> {
    if yaml_content.trim().is_empty() {
        return Ok(Settings::default());
    }
    Ok(serde_yaml::from_str(yaml_content)?)
}

/// Reads settings from `path`.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let content = std::fs::read_to_string(path.as_ref())?;
    parse(&content)
}

/// Finds the settings file to use, if any.
pub fn locate(explicit: Option<&Path>, working_dir: &Path) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(Error::Config {
                message: format!("settings file not found: {}", path.display()),
            });
        }
        return Ok(Some(path.to_path_buf()));
    }

    let local = working_dir.join(DEFAULT_CONFIG_FILENAME);
    if local.is_file() {
        return Ok(Some(local));
    }
    Ok(user_config_path().filter(|path| path.is_file()))
}

/// Loads, overrides and validates settings.
pub fn load(
    explicit: Option<&Path>,
    working_dir: &Path,
    overrides: &Overrides,
) -> Result<Settings> {
    let settings = match locate(explicit, working_dir)? {
        Some(path) => {
            debug!("loading settings from {}", path.display());
            from_file(path)?
        }
        None => Settings::default(),
    }
    .with_overrides(overrides);
    settings.validate()?;
    Ok(settings)
}
