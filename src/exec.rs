//! # Command Execution
//!
//! Runs the native client and turns its raw output into a `CommandResult`.
//!
//! Launching a process is abstracted behind the `Launcher` trait so the retry
//! and decoding policy in `CommandExecutor` can be tested without a real
//! `svn` binary. `SystemLauncher` is the production implementation.
//!
//! ## Policy
//!
//! - Output bytes are decoded with the configured primary encoding first and
//!   fall back to UTF-8. If neither decodes both streams, the call fails with
//!   `Error::Decode`.
//! - A result whose stderr carries `E160024` (working copy locked) is retried
//!   once. The second result is returned whatever it contains.
//! - No timeout is applied. A hung client hangs the caller.

use std::process::Command;

use encoding_rs::{Encoding, UTF_8};
use log::{debug, warn};

use crate::error::{Error, Result, SvnErrorCode};

/// Total number of attempts for a command that reports a transient lock.
pub const MAX_ATTEMPTS: usize = 2;

/// Undecoded output of a single process run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOutput {
    pub exit_code: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Decoded output of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Every client code found in stderr.
    pub fn error_codes(&self) -> Vec<SvnErrorCode> {
        SvnErrorCode::parse_all(&self.stderr)
    }

    /// Whether stderr reports `code` anywhere in its chain.
    pub fn has_code(&self, code: &SvnErrorCode) -> bool {
        self.error_codes().iter().any(|c| c == code)
    }

    fn is_transient_lock(&self) -> bool {
        self.has_code(&SvnErrorCode::TransientLock)
    }

    /// Builds the typed error for a failed run of `command`.
    ///
    /// The last code in the chain is the one the client reports as the final
    /// cause; with no code at all the failure is surfaced verbatim.
    pub fn to_error(&self, command: &str) -> Error {
        match self.error_codes().pop() {
            Some(code) => Error::Svn {
                code,
                command: command.to_string(),
                stderr: self.stderr.trim().to_string(),
            },
            None => Error::Command {
                command: command.to_string(),
                exit_code: self.exit_code,
                stderr: self.stderr.trim().to_string(),
            },
        }
    }

    /// `Ok(self)` on exit code 0, otherwise the classified error.
    pub fn check(self, command: &str) -> Result<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(self.to_error(command))
        }
    }
}

/// Launches a process once and collects its raw output.
pub trait Launcher: Send + Sync {
    /// Runs `command` (program followed by arguments) to completion.
    ///
    /// With `quiet` set, stdout and stderr are captured. Otherwise they are
    /// inherited from the current process and the returned buffers are empty.
    fn launch(&self, command: &[String], quiet: bool) -> Result<RawOutput>;
}

/// Launches real processes with `std::process::Command`.
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&self, command: &[String], quiet: bool) -> Result<RawOutput> {
        let (program, args) = command.split_first().ok_or_else(|| Error::Spawn {
            command: String::new(),
            message: "empty command".to_string(),
        })?;

        let spawn_error = |e: std::io::Error| Error::Spawn {
            command: command.join(" "),
            message: e.to_string(),
        };

        let mut process = Command::new(program);
        process.args(args);

        if quiet {
            let output = process.output().map_err(spawn_error)?;
            Ok(RawOutput {
                exit_code: output.status.code().unwrap_or(-1),
                stdout: output.stdout,
                stderr: output.stderr,
            })
        } else {
            let status = process.status().map_err(spawn_error)?;
            Ok(RawOutput {
                exit_code: status.code().unwrap_or(-1),
                ..RawOutput::default()
            })
        }
    }
}

/// Two-step text decoder: primary encoding, then UTF-8.
#[derive(Debug, Clone, Copy)]
pub struct Decoder {
    primary: &'static Encoding,
}

impl Decoder {
    /// Builds a decoder from a WHATWG encoding label such as `gbk` or `utf-8`.
    pub fn for_label(label: &str) -> Result<Self> {
        Encoding::for_label(label.trim().as_bytes())
            .map(|primary| Self { primary })
            .ok_or_else(|| Error::Config {
                message: format!("unknown encoding label '{}'", label),
            })
    }

    pub fn name(&self) -> &'static str {
        self.primary.name()
    }

    /// Decodes stdout and stderr together: both with the primary encoding,
    /// or both with UTF-8.
    fn decode_pair(&self, stdout: &[u8], stderr: &[u8]) -> Option<(String, String)> {
        for encoding in [self.primary, UTF_8] {
            let out = encoding.decode_without_bom_handling_and_without_replacement(stdout);
            let err = encoding.decode_without_bom_handling_and_without_replacement(stderr);
            if let (Some(out), Some(err)) = (out, err) {
                return Some((out.into_owned(), err.into_owned()));
            }
        }
        None
    }

    pub fn decode(&self, command: &str, raw: RawOutput) -> Result<CommandResult> {
        let (stdout, stderr) =
            self.decode_pair(&raw.stdout, &raw.stderr)
                .ok_or_else(|| Error::Decode {
                    command: command.to_string(),
                    encodings: format!("{} or UTF-8", self.name()),
                })?;
        Ok(CommandResult {
            exit_code: raw.exit_code,
            stdout,
            stderr,
        })
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self { primary: UTF_8 }
    }
}

/// Runs commands with decoding and the transient-lock retry.
pub struct CommandExecutor {
    launcher: Box<dyn Launcher>,
    decoder: Decoder,
}

impl CommandExecutor {
    /// An executor that launches real processes.
    pub fn new(decoder: Decoder) -> Self {
        Self {
            launcher: Box::new(SystemLauncher),
            decoder,
        }
    }

    /// An executor with a custom launcher, used to inject fakes in tests.
    pub fn with_launcher(launcher: Box<dyn Launcher>, decoder: Decoder) -> Self {
        Self { launcher, decoder }
    }

    /// Runs `command`, retrying once if the client reports a locked working
    /// copy. Non-zero exits are returned, not raised; use
    /// [`CommandResult::check`] to turn them into errors.
    pub fn run(&self, command: &[String], quiet: bool) -> Result<CommandResult> {
        let display = command.join(" ");
        let mut attempt = 1;
        loop {
            debug!("running `{}` (attempt {})", display, attempt);
            let raw = self.launcher.launch(command, quiet)?;
            let result = self.decoder.decode(&display, raw)?;

            if attempt < MAX_ATTEMPTS && result.is_transient_lock() {
                warn!(
                    "`{}` reported a locked working copy, retrying: {}",
                    display,
                    result.stderr.trim()
                );
                attempt += 1;
                continue;
            }
            return Ok(result);
        }
    }
}
