//! Shared test utilities for E2E tests.
//!
//! This module provides a fixture that stands in for the `svn` binary: a
//! shell script that answers scripted command lines and fails on anything
//! else. The `svnx` binary is pointed at it with `--svn`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = SvnFixture::new().existing("svn://svn_host/proj");
//!     fixture.command().arg("exists").arg("proj").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{externals_xml, list_xml, SvnFixture, ROOT};
}

/// Repository root every fixture runs against.
pub const ROOT: &str = "svn://svn_host";

struct Response {
    args: String,
    exit_code: i32,
    stdout: String,
    stderr: String,
}

/// A temporary directory holding a scripted `svn` stand-in.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = SvnFixture::new()
///     .no_externals("svn://svn_host/proj")
///     .listing("svn://svn_host/proj", &[("file", "a.c", "3")]);
///
/// fixture.command().arg("ls").arg("proj").assert().success();
/// ```
pub struct SvnFixture {
    temp_dir: assert_fs::TempDir,
    responses: Vec<Response>,
}

impl SvnFixture {
    /// Create a new fixture with nothing scripted.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
            responses: Vec::new(),
        }
    }

    /// Answer `svn <args>` with `stdout` and exit code 0.
    pub fn respond(mut self, args: &str, stdout: &str) -> Self {
        self.responses.push(Response {
            args: args.to_string(),
            exit_code: 0,
            stdout: stdout.to_string(),
            stderr: String::new(),
        });
        self
    }

    /// Answer `svn <args>` with `stderr` and exit code 1.
    pub fn respond_err(mut self, args: &str, stderr: &str) -> Self {
        self.responses.push(Response {
            args: args.to_string(),
            exit_code: 1,
            stdout: String::new(),
            stderr: stderr.to_string(),
        });
        self
    }

    pub fn existing(self, url: &str) -> Self {
        self.respond(&format!("info {}", url), &format!("URL: {}\n", url))
    }

    pub fn missing(self, url: &str) -> Self {
        self.respond_err(
            &format!("info {}", url),
            &format!(
                "svn: warning: W170000: URL '{}' non-existent in revision 10\n\
                 svn: E200009: Could not display info for all targets because some targets don't exist\n",
                url
            ),
        )
    }

    pub fn listing(self, url: &str, entries: &[(&str, &str, &str)]) -> Self {
        self.respond(&format!("ls {} --xml", url), &list_xml(url, entries))
    }

    pub fn externals(self, url: &str, targets: &[(&str, &str)]) -> Self {
        self.respond(
            &format!("pg svn:externals {} --xml", url),
            &externals_xml(targets),
        )
    }

    pub fn no_externals(self, url: &str) -> Self {
        self.respond_err(
            &format!("pg svn:externals {} --xml", url),
            "svn: warning: W200017: Property 'svn:externals' not found on target\n\
             svn: E200000: A problem occurred; see other errors for details\n",
        )
    }

    /// Add a file with the given path and content.
    #[allow(dead_code)]
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes the stand-in script and returns its path.
    #[cfg(unix)]
    pub fn svn_script(&self) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let responses = self.temp_dir.child("responses");
        responses.create_dir_all().expect("Failed to create responses dir");

        let mut script = String::from("#!/bin/sh\ncase \"$*\" in\n");
        for (index, response) in self.responses.iter().enumerate() {
            let out = responses.child(format!("{}.out", index));
            let err = responses.child(format!("{}.err", index));
            out.write_str(&response.stdout).expect("Failed to write stdout");
            err.write_str(&response.stderr).expect("Failed to write stderr");
            script.push_str(&format!(
                "  '{}')\n    cat '{}'\n    cat '{}' >&2\n    exit {}\n    ;;\n",
                response.args,
                out.path().display(),
                err.path().display(),
                response.exit_code
            ));
        }
        script.push_str("  *)\n    echo \"fake svn: nothing scripted for $*\" >&2\n    exit 1\n    ;;\nesac\n");

        let path = self.temp_dir.path().join("svn");
        std::fs::write(&path, script).expect("Failed to write svn script");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make svn script executable");
        path
    }

    /// Create a `svnx` command running in this fixture's directory against
    /// the stand-in script, isolated from any user settings.
    #[cfg(unix)]
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("svnx");
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env_remove("SVNX_CONFIG")
            .env_remove("SVNX_REPO_ROOT")
            .env_remove("SVNX_ENCODING")
            .env_remove("RUST_LOG")
            .arg("--color")
            .arg("never")
            .arg("--svn")
            .arg(self.svn_script())
            .arg("--repo-root")
            .arg(ROOT);
        cmd
    }
}

impl Default for SvnFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// `svn ls --xml` output for `(kind, name, revision)` entries.
pub fn list_xml(url: &str, entries: &[(&str, &str, &str)]) -> String {
    let mut xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<lists>\n<list\n   path=\"{}\">\n",
        url
    );
    for (kind, name, revision) in entries {
        xml.push_str(&format!(
            "<entry\n   kind=\"{}\">\n<name>{}</name>\n<commit\n   revision=\"{}\">\n\
             <author>alice</author>\n<date>2024-03-01T08:00:00.000000Z</date>\n</commit>\n</entry>\n",
            kind, name, revision
        ));
    }
    xml.push_str("</list>\n</lists>\n");
    xml
}

/// `svn pg svn:externals --xml` output for `(target, definitions)` pairs.
pub fn externals_xml(targets: &[(&str, &str)]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<properties>\n");
    for (path, definitions) in targets {
        xml.push_str(&format!(
            "<target\n   path=\"{}\">\n<property\n   name=\"svn:externals\">{}\n</property>\n</target>\n",
            path, definitions
        ));
    }
    xml.push_str("</properties>\n");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = SvnFixture::new();
        assert!(fixture.path().exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_svn_script_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let fixture = SvnFixture::new().existing("svn://svn_host/a");
        let script = fixture.svn_script();
        let mode = std::fs::metadata(&script).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}
