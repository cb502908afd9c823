//! # Ls Command Implementation
//!
//! This module implements the `ls` subcommand, which lists a directory on the
//! server with the heads of its externals merged in as ordinary entries.
//!
//! ## Functionality
//!
//! - **Merged Listing**: externals appear under their local names, with the
//!   revision, author and date of the directory they point to
//! - **Native Listing**: `--native` shows what `svn ls` alone reports
//! - **Detailed Output**: `--long` adds kind, revision, author and target
//! - **JSON Output**: `--json` prints the entries for scripting
//!
//! This command is a safe, read-only operation.

use anyhow::Result;
use clap::Args;

use svnx::listing::{EntryKind, ListingEntry, ListingService};
use svnx::path;
use svnx::suggestions;

use super::Context;

/// List a directory with its externals merged in
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Directory URL, or a path relative to the repository root.
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Use long listing format showing revision, author and real location.
    #[arg(short, long)]
    pub long: bool,

    /// Print the entries as JSON.
    #[arg(long, conflicts_with_all = ["long", "native"])]
    pub json: bool,

    /// Show only the entries the server lists itself, without externals.
    #[arg(long)]
    pub native: bool,
}

/// Execute the `ls` command.
pub fn execute(args: LsArgs, context: &Context) -> Result<()> {
    let url = context.url(&args.target);
    let service = ListingService::new(&context.svn);

    if args.native {
        for name in service.list_names(&url).map_err(suggestions::explain)? {
            println!("{}", name);
        }
        return Ok(());
    }

    let entries = service.list(&url).map_err(suggestions::explain)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in &entries {
        if args.long {
            println!("{}", long_line(&url, entry));
        } else {
            println!("{}", display_name(entry));
        }
    }
    Ok(())
}

fn display_name(entry: &ListingEntry) -> String {
    match entry.kind {
        EntryKind::Dir => format!("{}/", entry.name),
        EntryKind::File => entry.name.clone(),
    }
}

/// `dir   42 alice  2024-01-02T03:04:05Z libA/ -> svn://host/shared/libA`,
/// the arrow only for entries that live somewhere other than `url`.
fn long_line(url: &str, entry: &ListingEntry) -> String {
    let mut line = format!(
        "{:<4} {:>8} {:<12} {} {}",
        entry.kind.to_string(),
        entry.revision,
        entry.author,
        entry.date,
        display_name(entry)
    );
    if entry.location != path::join(url, &entry.name) {
        line.push_str(&format!(" -> {}", entry.location));
    }
    line
}
