//! Hint injection over the built output.
//!
//! Build phases:
//! - **Gate** - Skip entirely when hints are disabled for the environment
//! - **Collect** - Resolve configured files against the output directory
//! - **Process** - Parse, run processors and serialize each file in parallel
//! - **Write** - Replace each file in place (skipped with `--dry`)

use crate::{
    config::PreheatConfig,
    log,
    logger::ProgressLine,
    pipeline::{self, HintOptions, HintReport, Processor},
};
use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Totals over one build run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub files: usize,
    pub preconnect: usize,
    pub preload: usize,
}

impl BuildSummary {
    fn add(mut self, report: HintReport) -> Self {
        self.files += 1;
        self.preconnect += report.preconnect;
        self.preload += report.preload;
        self
    }
}

/// Inject hints into every configured file.
///
/// Files are independent; the first failure aborts the run but files already
/// written stay written.
pub fn build_hints(config: &PreheatConfig, dry: bool) -> Result<BuildSummary> {
    if !config.is_enabled() {
        log!("hints"; "disabled for {} environment, skipping", config.env);
        return Ok(BuildSummary::default());
    }

    let files = collect_files(config)?;
    let options = config.hints.options();
    let processors = config.hints.processors();

    let progress = ProgressLine::new(&[("html", files.len())]);
    let summary = files
        .par_iter()
        .map(|path| -> Result<HintReport> {
            let report = process_file(path, &options, &processors, dry).with_context(|| {
                format!("failed to process {}", config.root_relative(path).display())
            })?;
            progress.inc("html");
            Ok(report)
        })
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .fold(BuildSummary::default(), BuildSummary::add);
    progress.finish();

    log!(
        "hints";
        "{} preconnect, {} preload across {}{}",
        summary.preconnect,
        summary.preload,
        plural(summary.files, "file"),
        if dry { " (dry run)" } else { "" }
    );
    Ok(summary)
}

/// Resolve configured files against the output directory.
fn collect_files(config: &PreheatConfig) -> Result<Vec<PathBuf>> {
    let output = config.output_dir();
    if !output.is_dir() {
        bail!(
            "output directory {} does not exist",
            config.root_relative(&output).display()
        );
    }

    config
        .hints
        .files
        .iter()
        .map(|file| {
            let path = output.join(file);
            if !path.is_file() {
                bail!("{} not found", config.root_relative(&path).display());
            }
            Ok(path)
        })
        .collect()
}

fn process_file(
    path: &Path,
    options: &HintOptions,
    processors: &[Box<dyn Processor>],
    dry: bool,
) -> Result<HintReport> {
    let html = fs::read_to_string(path).context("failed to read file")?;
    let (output, report) = pipeline::process_html(&html, options, processors)?;
    if !dry {
        fs::write(path, output).context("failed to write file")?;
    }
    Ok(report)
}

fn plural(count: usize, noun: &str) -> String {
    format!("{count} {noun}{}", if count == 1 { "" } else { "s" })
}
