//! # Realpath Command Implementation
//!
//! Prints the URL a path really lives at. Paths below an external mount are
//! unknown to `svn info`; this command follows each mount to its target.

use anyhow::Result;
use clap::Args;

use svnx::repository::RepositoryOps;
use svnx::suggestions;

use super::Context;

/// Print the URL a path really lives at
#[derive(Args, Debug)]
pub struct RealpathArgs {
    /// URL, or a path relative to the repository root.
    #[arg(value_name = "TARGET")]
    pub target: String,
}

/// Execute the `realpath` command.
pub fn execute(args: RealpathArgs, context: &Context) -> Result<()> {
    let url = context.url(&args.target);
    let real = RepositoryOps::new(&context.svn)
        .resolve_real_path(&url)
        .map_err(suggestions::explain)?;
    println!("{}", real);
    Ok(())
}
