//! CLI argument parsing and command dispatch

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use svnx::config::{self, Overrides};
use svnx::output::OutputConfig;
use svnx::suggestions;
use svnx::svn::SvnClient;

use crate::commands::{self, Context};

/// svnx - Externals-aware helpers for Subversion repositories
#[derive(Parser, Debug)]
#[command(name = "svnx")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalArgs,
}

/// Options shared by every subcommand.
#[derive(clap::Args, Debug)]
struct GlobalArgs {
    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,

    /// Settings file to use instead of .svnx.yaml
    #[arg(long, global = true, value_name = "FILE", env = "SVNX_CONFIG")]
    config: Option<PathBuf>,

    /// Server root URL that ^/ locators expand to
    #[arg(long, global = true, value_name = "URL", env = "SVNX_REPO_ROOT")]
    repo_root: Option<String>,

    /// Native svn client to run
    #[arg(long = "svn", global = true, value_name = "PATH", env = "SVNX_SVN")]
    svn_binary: Option<String>,

    /// Primary encoding of the client's output (UTF-8 is the fallback)
    #[arg(long, global = true, value_name = "LABEL", env = "SVNX_ENCODING")]
    encoding: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List a directory with its externals merged in
    Ls(commands::ls::LsArgs),

    /// Compare two trees, following externals on both sides
    Diff(commands::diff::DiffArgs),

    /// Check whether a URL exists on the server
    Exists(commands::exists::ExistsArgs),

    /// Print the URL a path really lives at once externals are followed
    Realpath(commands::realpath::RealpathArgs),

    /// Create a directory and any missing parents
    Mkdir(commands::mkdir::MkdirArgs),

    /// Show the externals defined on a directory
    Externals(commands::externals::ExternalsArgs),

    /// Replace externals with real copies of their targets
    #[command(name = "inline-externals")]
    InlineExternals(commands::inline::InlineArgs),

    /// Move or rename a path on the server
    Mv(commands::mv::MvArgs),

    /// Delete paths on the server
    Rm(commands::rm::RmArgs),

    /// Export a server path to a local directory
    Export(commands::export::ExportArgs),

    /// Show information about the current working copy
    Info(commands::info::InfoArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<ExitCode> {
        init_logging(&self.global.log_level);

        let command = match self.command {
            Commands::Completions(args) => {
                commands::completions::execute(args)?;
                return Ok(ExitCode::SUCCESS);
            }
            command => command,
        };

        let context = self.global.context()?;
        match command {
            Commands::Ls(args) => commands::ls::execute(args, &context).map(success),
            Commands::Diff(args) => commands::diff::execute(args, &context),
            Commands::Exists(args) => commands::exists::execute(args, &context),
            Commands::Realpath(args) => commands::realpath::execute(args, &context).map(success),
            Commands::Mkdir(args) => commands::mkdir::execute(args, &context).map(success),
            Commands::Externals(args) => {
                commands::externals::execute(args, &context).map(success)
            }
            Commands::InlineExternals(args) => {
                commands::inline::execute(args, &context).map(success)
            }
            Commands::Mv(args) => commands::mv::execute(args, &context).map(success),
            Commands::Rm(args) => commands::rm::execute(args, &context).map(success),
            Commands::Export(args) => commands::export::execute(args, &context).map(success),
            Commands::Info(args) => commands::info::execute(args, &context).map(success),
            Commands::Completions(_) => Ok(ExitCode::SUCCESS),
        }
    }
}

impl GlobalArgs {
    /// Loads settings and builds the client every repository command shares.
    fn context(&self) -> Result<Context> {
        let working_dir = std::env::current_dir()?;
        let overrides = Overrides {
            repo_root: self.repo_root.clone(),
            svn_binary: self.svn_binary.clone(),
            encoding: self.encoding.clone(),
        };
        let settings = config::load(self.config.as_deref(), &working_dir, &overrides)
            .map_err(suggestions::explain)?;
        let svn = SvnClient::new(&settings).map_err(suggestions::explain)?;
        Ok(Context {
            settings,
            svn,
            output: OutputConfig::from_env_and_flag(&self.color),
        })
    }
}

fn success(_: ()) -> ExitCode {
    ExitCode::SUCCESS
}

/// `RUST_LOG` wins over `--log-level` when set.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
