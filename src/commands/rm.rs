//! # Rm Command Implementation
//!
//! Deletes one or more paths on the server, one commit per path.

use anyhow::Result;
use clap::Args;

use svnx::suggestions;

use super::Context;

/// Delete paths on the server
#[derive(Args, Debug)]
pub struct RmArgs {
    /// URLs, or paths relative to the repository root.
    #[arg(value_name = "TARGET", required = true)]
    pub targets: Vec<String>,

    /// Commit message.
    #[arg(short, long, value_name = "MESSAGE", default_value = "rm")]
    pub message: String,
}

/// Execute the `rm` command.
pub fn execute(args: RmArgs, context: &Context) -> Result<()> {
    for target in &args.targets {
        let url = context.url(target);
        context
            .svn
            .remove(&url, &args.message)
            .map_err(suggestions::explain)?;
        println!("Removed {}", url);
    }
    Ok(())
}
