//! # Exists Command Implementation
//!
//! Checks whether a URL exists on the server. Exits 0 when it does and 1 when
//! the server reports it missing; any other failure is an error.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use svnx::repository::RepositoryOps;
use svnx::suggestions;

use super::{Context, EXIT_NEGATIVE};

/// Check whether a URL exists on the server
#[derive(Args, Debug)]
pub struct ExistsArgs {
    /// URL, or a path relative to the repository root.
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Print nothing; only set the exit code.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the `exists` command.
pub fn execute(args: ExistsArgs, context: &Context) -> Result<ExitCode> {
    let url = context.url(&args.target);
    let found = RepositoryOps::new(&context.svn)
        .exists(&url)
        .map_err(suggestions::explain)?;

    if !args.quiet {
        if found {
            println!("{} exists", url);
        } else {
            println!("{} does not exist", url);
        }
    }
    Ok(if found {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_NEGATIVE)
    })
}
