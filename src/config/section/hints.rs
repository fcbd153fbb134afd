//! `[hints]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [hints]
//! enabled = true                    # default: only for `--env production`
//! files = ["index.html"]            # documents to process, relative to output
//! preconnect = ["https://fonts.gstatic.com"]
//! preload = [
//!     "https://cdn.example.com/app.js",
//!     { url = "https://cdn.example.com/font.woff2", as = "font", crossorigin = "anonymous" },
//! ]
//! processors = ["resource-hints"]
//! ```

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, Environment, FieldPath};
use crate::pipeline::{self, HintOptions, Processor, ResourceHints};
use crate::reference::{Reference, ReferenceInput};

/// Resource hint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HintsConfig {
    /// Explicit switch. Unset means "enabled for production builds".
    pub enabled: Option<bool>,

    /// Documents to process, relative to the output directory.
    pub files: Vec<PathBuf>,

    /// Extra origins to connect to early.
    ///
    /// Kept untyped: each entry is classified when the document is processed.
    pub preconnect: Vec<toml::Value>,

    /// Extra resources to fetch early.
    pub preload: Vec<toml::Value>,

    /// Processor names, run in order.
    pub processors: Vec<String>,
}

impl Default for HintsConfig {
    fn default() -> Self {
        Self {
            enabled: None,
            files: vec![PathBuf::from("index.html")],
            preconnect: Vec::new(),
            preload: Vec::new(),
            processors: vec![ResourceHints::NAME.to_string()],
        }
    }
}

impl HintsConfig {
    pub const FILES: FieldPath = FieldPath::new("hints.files");
    pub const PRECONNECT: FieldPath = FieldPath::new("hints.preconnect");
    pub const PRELOAD: FieldPath = FieldPath::new("hints.preload");
    pub const PROCESSORS: FieldPath = FieldPath::new("hints.processors");

    pub fn is_enabled(&self, env: Environment) -> bool {
        self.enabled.unwrap_or(env.is_production())
    }

    /// Options handed to every processor.
    pub fn options(&self) -> HintOptions {
        let inputs = |values: &[toml::Value]| {
            values
                .iter()
                .cloned()
                .map(ReferenceInput::Value)
                .collect::<Vec<_>>()
        };
        HintOptions {
            preconnect: inputs(&self.preconnect),
            preload: inputs(&self.preload),
        }
    }

    /// Instantiate the configured processors, skipping unknown names.
    ///
    /// Unknown names are reported by [`validate`](Self::validate).
    pub fn processors(&self) -> Vec<Box<dyn Processor>> {
        self.processors
            .iter()
            .filter_map(|name| pipeline::processor_by_name(name))
            .collect()
    }

    /// Reference entries are only checked when hints run for `env`.
    pub fn validate(&self, env: Environment, diag: &mut ConfigDiagnostics) {
        if self.files.is_empty() {
            diag.error(Self::FILES, "no files to process");
        }
        for file in &self.files {
            if !is_contained(file) {
                diag.error_with_hint(
                    Self::FILES,
                    format!("`{}` escapes the output directory", file.display()),
                    "use a path relative to the output directory",
                );
            }
        }

        for name in &self.processors {
            if pipeline::processor_by_name(name).is_none() {
                diag.error_with_hint(
                    Self::PROCESSORS,
                    format!("unknown processor `{name}`"),
                    format!("available: {}", pipeline::PROCESSOR_NAMES.join(", ")),
                );
            }
        }

        if self.is_enabled(env) {
            Self::validate_references(Self::PRECONNECT, &self.preconnect, diag);
            Self::validate_references(Self::PRELOAD, &self.preload, diag);
        }
    }

    /// Catch malformed entries at load time rather than on the first document.
    fn validate_references(field: FieldPath, values: &[toml::Value], diag: &mut ConfigDiagnostics) {
        for (index, value) in values.iter().enumerate() {
            if let Err(e) = Reference::from_input(value.clone()) {
                diag.error(field, format!("entry {index}: {e}"));
            }
        }
    }
}

/// Relative path that stays inside its base directory.
fn is_contained(path: &Path) -> bool {
    path.components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}
