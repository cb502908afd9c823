//! # Mkdir Command Implementation
//!
//! Creates a directory on the server together with any missing parents,
//! creating them inside external targets where the path runs through a
//! mount. Directories that already exist are left alone, so running the
//! command twice is harmless.

use anyhow::Result;
use clap::Args;

use svnx::repository::RepositoryOps;
use svnx::suggestions;

use super::Context;

/// Create a directory and any missing parents
#[derive(Args, Debug)]
pub struct MkdirArgs {
    /// URL, or a path relative to the repository root.
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Commit message; `:mkdir` is appended.
    #[arg(short, long, value_name = "MESSAGE", default_value = "svnx")]
    pub message: String,
}

/// Execute the `mkdir` command. Prints the URL the directory lives at.
pub fn execute(args: MkdirArgs, context: &Context) -> Result<()> {
    let url = context.url(&args.target);
    let real = RepositoryOps::new(&context.svn)
        .ensure_directory(&url, &args.message)
        .map_err(suggestions::explain)?;
    println!("{}", real);
    Ok(())
}
