//! # Mv Command Implementation
//!
//! Moves or renames a path on the server in a single commit.

use anyhow::Result;
use clap::Args;

use svnx::suggestions;

use super::Context;

/// Move or rename a path on the server
#[derive(Args, Debug)]
pub struct MvArgs {
    /// Source URL, or a path relative to the repository root.
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Destination URL, or a path relative to the repository root.
    #[arg(value_name = "DEST")]
    pub destination: String,

    /// Commit message. Defaults to `mv <SOURCE> to <DEST>`.
    #[arg(short, long, value_name = "MESSAGE")]
    pub message: Option<String>,
}

/// Execute the `mv` command.
pub fn execute(args: MvArgs, context: &Context) -> Result<()> {
    let source = context.url(&args.source);
    let destination = context.url(&args.destination);
    context
        .svn
        .move_path(&source, &destination, args.message.as_deref())
        .map_err(suggestions::explain)?;
    println!("Moved {} to {}", source, destination);
    Ok(())
}
