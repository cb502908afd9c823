//! # Export Command Implementation
//!
//! Writes an unversioned copy of a server path to the local disk.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;

use svnx::suggestions;

use super::Context;

/// Export a server path to a local directory
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// URL, or a path relative to the repository root.
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Local destination. The client names it after the target when omitted.
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,
}

/// Execute the `export` command.
pub fn execute(args: ExportArgs, context: &Context) -> Result<()> {
    let url = context.url(&args.target);
    let local_path = args
        .path
        .as_deref()
        .map(|path| {
            path.to_str()
                .with_context(|| format!("Export path is not valid UTF-8: {}", path.display()))
        })
        .transpose()?;
    context
        .svn
        .export(&url, local_path)
        .map_err(suggestions::explain)?;
    match local_path {
        Some(path) => println!("Exported {} to {}", url, path),
        None => println!("Exported {}", url),
    }
    Ok(())
}
