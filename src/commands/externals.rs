//! # Externals Command Implementation
//!
//! Shows the `svn:externals` definitions on a directory.
//!
//! ## Functionality
//!
//! - **Grouped Output**: definitions grouped by the directory they are set on
//! - **Flattened Output**: `--flatten` prints one `path locator` pair per
//!   external, with parent-relative locators rewritten to `^/` form
//! - **Resolved Output**: `--resolve` replaces each locator with the URL it
//!   points to
//! - **Recursion**: `--recursive` includes definitions on subdirectories

use std::collections::BTreeMap;

use anyhow::Result;
use clap::Args;

use svnx::externals::{self, ExternalsCatalog, ExternalsMap};
use svnx::suggestions;

use super::Context;

/// Show the externals defined on a directory
#[derive(Args, Debug)]
pub struct ExternalsArgs {
    /// Directory URL, or a path relative to the repository root.
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Include definitions set on subdirectories.
    #[arg(short = 'R', long)]
    pub recursive: bool,

    /// Print one `path locator` pair per external.
    #[arg(long)]
    pub flatten: bool,

    /// Replace locators with the URLs they resolve to.
    #[arg(long)]
    pub resolve: bool,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the `externals` command.
pub fn execute(args: ExternalsArgs, context: &Context) -> Result<()> {
    let url = context.url(&args.target);
    let catalog = ExternalsCatalog::new(&context.svn);

    let mut map = if args.recursive {
        catalog.fetch_recursive(&url)
    } else {
        catalog.fetch(&url)
    }
    .map_err(suggestions::explain)?;

    if args.resolve {
        map = catalog.resolve(&map, None).map_err(suggestions::explain)?;
    }

    if args.flatten {
        let flat = externals::flatten(&map);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&flat)?);
        } else {
            for line in flat_lines(&flat) {
                println!("{}", line);
            }
        }
    } else if args.json {
        println!("{}", serde_json::to_string_pretty(&map)?);
    } else {
        for line in grouped_lines(&map) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn grouped_lines(map: &ExternalsMap) -> Vec<String> {
    let mut lines = Vec::new();
    for (mount, definitions) in map {
        lines.push(format!("{}:", mount));
        lines.extend(
            definitions
                .iter()
                .map(|(name, locator)| format!("  {} -> {}", name, locator)),
        );
    }
    lines
}

fn flat_lines(flat: &BTreeMap<String, String>) -> Vec<String> {
    flat.iter()
        .map(|(path, locator)| format!("{} {}", path, locator))
        .collect()
}
