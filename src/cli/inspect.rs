//! `preheat inspect`: show the hints a file would receive.

use crate::{
    config::PreheatConfig,
    dom::HtmlDocument,
    log,
    pipeline::{Hint, HintInjector},
};
use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};
use std::{fs, path::Path};

const HEADERS: [&str; 4] = ["rel", "href", "as", "crossorigin"];

/// Plan hints for `file` and print them as a table.
pub fn inspect_file(config: &PreheatConfig, file: &Path) -> Result<()> {
    let hints = plan_file(config, file)?;
    if hints.is_empty() {
        log!("inspect"; "no hints for {}", file.display());
        return Ok(());
    }
    print!("{}", render_table(&hints));
    Ok(())
}

/// Hints for `file` in insertion order. The document is not modified.
pub fn plan_file(config: &PreheatConfig, file: &Path) -> Result<Vec<Hint>> {
    let html = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let doc = HtmlDocument::parse(&html);
    let options = config.hints.options();
    let hints = HintInjector::new(&options)
        .plan(&doc)
        .with_context(|| format!("failed to plan hints for {}", file.display()))?;
    Ok(hints)
}

fn render_table(hints: &[Hint]) -> String {
    let rows: Vec<[&str; 4]> = hints
        .iter()
        .map(|hint| {
            [
                hint.rel.as_str(),
                hint.href.as_str(),
                hint.destination.map_or("-", |d| d.as_str()),
                hint.crossorigin.map_or("-", |c| c.as_str()),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let header = format_row(&HEADERS, &widths);
    let mut out = header
        .if_supports_color(Stream::Stdout, |h| h.bold())
        .to_string();
    out.push('\n');
    for row in &rows {
        out.push_str(&format_row(row, &widths));
        out.push('\n');
    }
    out
}

fn format_row(cells: &[&str; 4], widths: &[usize; 4]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
