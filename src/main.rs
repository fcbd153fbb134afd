//! Preheat - resource hint injection for built HTML pages.

use anyhow::Result;
use clap::{ColorChoice, Parser};
use preheat::{
    cli::{self, Cli, Commands},
    config::PreheatConfig,
    logger,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = PreheatConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { build_args } => {
            cli::build::build_hints(&config, build_args.dry).map(|_| ())
        }
        Commands::Inspect { file } => cli::inspect::inspect_file(&config, file),
    }
}
