//! Command-line interface definitions.

use crate::config::Environment;
use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Resource hint injector for built HTML pages
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: preheat.toml)
    #[arg(short = 'C', long, default_value = "preheat.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Inject resource hints into the configured output files
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Print the hints a single HTML file would receive, without writing it
    #[command(visible_alias = "i")]
    Inspect {
        /// HTML file to inspect
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,
    },
}

/// Build command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Build environment; hints default to on only in production
    #[arg(short, long, value_enum, default_value_t = Environment::Development)]
    pub env: Environment,

    /// Output directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Force hints on or off regardless of environment
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub enabled: Option<bool>,

    /// Process files without writing them back
    #[arg(short, long)]
    pub dry: bool,
}

#[allow(unused)]
impl Cli {
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
    pub const fn is_inspect(&self) -> bool {
        matches!(self.command, Commands::Inspect { .. })
    }
}
