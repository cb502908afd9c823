//! # Diff Command Implementation
//!
//! This module implements the `diff` subcommand, which compares two trees on
//! the server (typically two release branches) and reports what was added,
//! removed or updated at every depth, descending through externals on both
//! sides.
//!
//! ## Exit Codes
//!
//! Returns 0 if the trees match and 1 if differences exist, so the command
//! can gate scripts.
//!
//! This command is a safe, read-only operation.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use svnx::diff::{DiffEngine, DiffResult, DEFAULT_PREFIX};
use svnx::output::{change_line, ChangeMarker, OutputConfig};
use svnx::suggestions;

use super::{Context, EXIT_NEGATIVE};

/// Compare two trees, following externals on both sides
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// The old tree: URL or repository-relative path.
    #[arg(value_name = "OLD")]
    pub old: String,

    /// The new tree: URL or repository-relative path.
    #[arg(value_name = "NEW")]
    pub new: String,

    /// Prefix for reported paths.
    #[arg(long, value_name = "PREFIX", default_value = DEFAULT_PREFIX)]
    pub prefix: String,

    /// Show only a summary without listing individual paths.
    #[arg(long)]
    pub summary: bool,

    /// Print the result as JSON.
    #[arg(long, conflicts_with = "summary")]
    pub json: bool,

    /// Use the client's own `svn diff --summarize`, which stops at externals.
    #[arg(long, conflicts_with_all = ["summary", "json", "prefix"])]
    pub native: bool,
}

/// Execute the `diff` command.
pub fn execute(args: DiffArgs, context: &Context) -> Result<ExitCode> {
    let old = context.url(&args.old);
    let new = context.url(&args.new);

    if args.native {
        let summary = context
            .svn
            .diff_summarize(&old, &new)
            .map_err(suggestions::explain)?;
        print!("{}", summary);
        return Ok(exit_code(summary.trim().is_empty()));
    }

    let result = DiffEngine::new(&context.svn)
        .diff_with_prefix(&old, &new, &args.prefix)
        .map_err(suggestions::explain)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if result.is_empty() {
        println!("No differences.");
    } else if args.summary {
        for line in summary_lines(&result) {
            println!("{}", line);
        }
    } else {
        for line in detail_lines(&context.output, &result) {
            println!("{}", line);
        }
    }
    Ok(exit_code(result.is_empty()))
}

fn exit_code(identical: bool) -> ExitCode {
    if identical {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_NEGATIVE)
    }
}

fn summary_lines(result: &DiffResult) -> Vec<String> {
    vec![
        format!("  {} path(s) added", result.added.len()),
        format!("  {} path(s) removed", result.removed.len()),
        format!("  {} path(s) updated", result.updated.len()),
        String::new(),
        format!("Total: {} change(s)", result.len()),
    ]
}

fn detail_lines(output: &OutputConfig, result: &DiffResult) -> Vec<String> {
    let groups = [
        (ChangeMarker::Added, &result.added),
        (ChangeMarker::Removed, &result.removed),
        (ChangeMarker::Updated, &result.updated),
    ];
    let mut lines: Vec<String> = groups
        .iter()
        .flat_map(|(marker, paths)| paths.iter().map(|p| change_line(output, *marker, p)))
        .collect();
    lines.push(String::new());
    lines.push(format!(
        "Summary: {} added, {} removed, {} updated",
        result.added.len(),
        result.removed.len(),
        result.updated.len()
    ));
    lines
}
