use std::collections::BTreeMap;

use log::info;

use crate::config::Settings;
use crate::error::{Result, SvnErrorCode};
use crate::exec::{CommandExecutor, CommandResult, Decoder};

/// Typed wrappers over the native `svn` client.
///
/// Every call goes through the `CommandExecutor`, so all of them share the
/// decoding and transient-lock retry policy. Failures are classified through
/// the `SvnErrorCode` table; codes that a call expects as a normal outcome
/// (for example `W200017` when no externals are set) are handled here.
pub struct SvnClient {
    executor: CommandExecutor,
    binary: String,
    root: String,
}

impl SvnClient {
    /// Builds a client that launches the configured binary.
    pub fn new(settings: &Settings) -> Result<Self> {
        let decoder = Decoder::for_label(&settings.encoding)?;
        Ok(Self::with_executor(
            CommandExecutor::new(decoder),
            &settings.svn_binary,
            &settings.repo_root,
        ))
    }

    /// Builds a client around an existing executor.
    pub fn with_executor(executor: CommandExecutor, binary: &str, root: &str) -> Self {
        Self {
            executor,
            binary: binary.to_string(),
            root: root.trim_end_matches('/').to_string(),
        }
    }

    /// The server root URL that anchor-relative locators expand to.
    pub fn root(&self) -> &str {
        &self.root
    }

    fn command(&self, args: &[&str]) -> Vec<String> {
        std::iter::once(self.binary.as_str())
            .chain(args.iter().copied())
            .map(str::to_string)
            .collect()
    }

    fn run(&self, args: &[&str], quiet: bool) -> Result<(String, CommandResult)> {
        let command = self.command(args);
        let result = self.executor.run(&command, quiet)?;
        Ok((command.join(" "), result))
    }

    fn run_checked(&self, args: &[&str]) -> Result<String> {
        let (display, result) = self.run(args, true)?;
        Ok(result.check(&display)?.stdout)
    }

    /// `svn ls <url>`: entry names, one per line, directories keep their `/`.
    pub fn list_names(&self, url: &str) -> Result<Vec<String>> {
        let stdout = self.run_checked(&["ls", url])?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// `svn ls <url> --xml`.
    pub fn list_xml(&self, url: &str) -> Result<String> {
        self.run_checked(&["ls", url, "--xml"])
    }

    /// `svn pg svn:externals <url> --xml`. An unset property yields an empty
    /// string.
    pub fn externals_xml(&self, url: &str, recursive: bool) -> Result<String> {
        let args: Vec<&str> = if recursive {
            vec!["pg", "-R", "svn:externals", url, "--xml"]
        } else {
            vec!["pg", "svn:externals", url, "--xml"]
        };
        let (display, result) = self.run(&args, true)?;
        if !result.success() && result.has_code(&SvnErrorCode::NoExternals) {
            return Ok(String::new());
        }
        Ok(result.check(&display)?.stdout)
    }

    /// `svn info <url>`, unchecked. Callers decide which failures matter.
    pub fn info(&self, url: &str) -> Result<CommandResult> {
        Ok(self.run(&["info", url], true)?.1)
    }

    /// `svn info` in the current working copy, as `lower_snake_key -> value`.
    pub fn working_copy_info(&self) -> Result<BTreeMap<String, String>> {
        let stdout = self.run_checked(&["info"])?;
        Ok(parse_info(&stdout))
    }

    /// `svn cp -r <revision> <src> <dst> -m <message>`, streamed to the
    /// terminal.
    pub fn copy(&self, src: &str, dst: &str, revision: &str, message: &str) -> Result<()> {
        info!("copying {}@{} to {}", src, revision, dst);
        let (display, result) = self.run(&["cp", "-r", revision, src, dst, "-m", message], false)?;
        result.check(&display).map(|_| ())
    }

    /// `svn mv <src> <dst> -m <message>`.
    ///
    /// A missing source surfaces as `Error::Svn` with
    /// `SvnErrorCode::MissingSource`.
    pub fn move_path(&self, src: &str, dst: &str, message: Option<&str>) -> Result<()> {
        let default_message = format!("mv {} to {}", src, dst);
        let message = message.unwrap_or(&default_message);
        info!("moving {} to {}", src, dst);
        let (display, result) = self.run(&["mv", src, dst, "-m", message], true)?;
        result.check(&display).map(|_| ())
    }

    /// `svn mkdir <url> -m <message>`.
    ///
    /// An existing directory surfaces as `Error::Svn` with
    /// `SvnErrorCode::AlreadyExists`.
    pub fn mkdir(&self, url: &str, message: &str) -> Result<()> {
        info!("creating directory {}", url);
        let message = format!("{}:mkdir", message);
        let (display, result) = self.run(&["mkdir", url, "-m", &message], true)?;
        result.check(&display).map(|_| ())
    }

    /// `svn rm <url> -m <message>`, deleting `url` on the server.
    pub fn remove(&self, url: &str, message: &str) -> Result<()> {
        info!("removing {}", url);
        let (display, result) = self.run(&["rm", url, "-m", message], true)?;
        result.check(&display).map(|_| ())
    }

    /// `svn export <url> [<local_path>]`, writing an unversioned copy of
    /// `url` to disk. The client picks the directory name when no
    /// `local_path` is given.
    pub fn export(&self, url: &str, local_path: Option<&str>) -> Result<()> {
        info!("exporting {}", url);
        let mut args = vec!["export", url];
        args.extend(local_path);
        let (display, result) = self.run(&args, true)?;
        result.check(&display).map(|_| ())
    }

    /// Replaces `svn:externals` on `url` through `svn pe` with a scripted
    /// editor. `content` must be a single line; an empty `content` clears the
    /// property.
    pub fn set_externals(&self, url: &str, content: &str, message: &str) -> Result<()> {
        let editor = editor_command(content);
        info!("setting svn:externals on {}", url);
        let (display, result) = self.run(
            &[
                "pe",
                "svn:externals",
                url,
                "--editor-cmd",
                &editor,
                "-m",
                message,
            ],
            true,
        )?;
        result.check(&display).map(|_| ())
    }

    /// `svn diff --old=<old> --new=<new> --summarize`: the client's own
    /// summary, which does not follow externals.
    pub fn diff_summarize(&self, old: &str, new: &str) -> Result<String> {
        let old_arg = format!("--old={}", old);
        let new_arg = format!("--new={}", new);
        self.run_checked(&["diff", &old_arg, &new_arg, "--summarize"])
    }
}

fn editor_command(content: &str) -> String {
    match (content.trim(), cfg!(windows)) {
        ("", true) => "echo off >".to_string(),
        ("", false) => ": >".to_string(),
        (line, _) => format!("echo {} >", line),
    }
}

/// Parses `Key Name: value` lines into `key_name -> value`.
pub fn parse_info(text: &str) -> BTreeMap<String, String> {
    text.lines()
        .filter_map(|line| line.split_once(": "))
        .map(|(key, value)| {
            (
                key.trim().to_lowercase().replace(' ', "_"),
                value.trim().to_string(),
            )
        })
        .collect()
}
