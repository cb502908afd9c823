//! # svnx CLI
//!
//! This is the binary entry point for the `svnx` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Executing the appropriate command based on the parsed arguments.
//! - Translating the outcome into an exit code: 0 on success, 1 when `diff`
//!   finds differences or `exists` finds nothing, 2 on any error.
//!
//! The core logic lives in the `svnx` library crate, so the binary stays a
//! thin wrapper around it.

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    match cli.execute() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(commands::EXIT_ERROR)
        }
    }
}
