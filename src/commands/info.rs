//! # Info Command Implementation
//!
//! Shows `svn info` for the working copy in the current directory as
//! `key: value` lines or JSON, with keys in lower snake case
//! (`relative_url`, `repository_root`, ...).

use anyhow::Result;
use clap::Args;

use svnx::suggestions;

use super::Context;

/// Show information about the current working copy
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Print only the value of this key.
    #[arg(long, value_name = "KEY")]
    pub key: Option<String>,

    /// Print all keys as JSON.
    #[arg(long, conflicts_with = "key")]
    pub json: bool,
}

/// Execute the `info` command.
pub fn execute(args: InfoArgs, context: &Context) -> Result<()> {
    let info = context
        .svn
        .working_copy_info()
        .map_err(suggestions::explain)?;

    if let Some(key) = &args.key {
        let value = info
            .get(key)
            .ok_or_else(|| anyhow::anyhow!("svn info has no key '{}'", key))?;
        println!("{}", value);
    } else if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        for (key, value) in &info {
            println!("{}: {}", key, value);
        }
    }
    Ok(())
}
