//! # Inline-Externals Command Implementation
//!
//! Replaces the externals on a directory (and below it) with real copies of
//! their targets taken at `HEAD`, then clears the externals property on every
//! directory that carried one. Externals defined on the copied targets are
//! inlined too.
//!
//! `--source` resolves `../` locators against another path, which is what is
//! needed after copying a tree whose relative externals pointed at siblings
//! of the original location.

use anyhow::Result;
use clap::Args;

use svnx::externals::{CopyPlan, ExternalsCatalog};
use svnx::repository::RepositoryOps;
use svnx::suggestions;

use super::Context;

/// Replace externals with real copies of their targets
#[derive(Args, Debug)]
pub struct InlineArgs {
    /// Directory URL, or a path relative to the repository root.
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Resolve `../` locators against this path instead of their own mount.
    #[arg(long, value_name = "PATH")]
    pub source: Option<String>,

    /// Print the plan without changing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the plan as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the `inline-externals` command.
pub fn execute(args: InlineArgs, context: &Context) -> Result<()> {
    let url = context.url(&args.target);
    let source = args.source.as_deref().map(|s| context.url(s));
    let catalog = ExternalsCatalog::new(&context.svn);

    let externals = catalog
        .fetch_recursive(&url)
        .map_err(suggestions::explain)?;
    if externals.values().all(|definitions| definitions.is_empty()) {
        println!("No externals under {}", url);
        return Ok(());
    }

    let root = context.svn.root();
    let plan = if args.dry_run {
        catalog.copy_plan(root, &externals, source.as_deref())
    } else {
        RepositoryOps::new(&context.svn).inline_externals(root, &externals, source.as_deref())
    }
    .map_err(suggestions::explain)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        for line in plan_lines(&plan, args.dry_run) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn plan_lines(plan: &CopyPlan, dry_run: bool) -> Vec<String> {
    let (copy, clear) = if dry_run {
        ("would copy", "would clear")
    } else {
        ("copied", "cleared")
    };
    plan.steps
        .iter()
        .map(|step| format!("{} {} -> {}", copy, step.source, step.destination))
        .chain(
            plan.cleared
                .iter()
                .map(|mount| format!("{} svn:externals on {}", clear, mount)),
        )
        .collect()
}
