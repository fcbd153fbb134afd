//! Project configuration management for `preheat.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build      # [build]
//! │   └── hints      # [hints]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # PreheatConfig (this file)
//! ```
//!
//! A missing config file is not an error: every field has a default, so a
//! project can run with flags alone.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{BuildConfig, HintsConfig};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{BuildArgs, Cli, Commands},
    debug, log,
};
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

// ============================================================================
// environment
// ============================================================================

/// Build environment. Decides whether hints are on when not set explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Environment {
    Production,
    #[default]
    Development,
}

impl Environment {
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Production => "production",
            Self::Development => "development",
        })
    }
}

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing preheat.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreheatConfig {
    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Environment of the current run (internal use only)
    #[serde(skip)]
    pub env: Environment,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Resource hint settings
    #[serde(default)]
    pub hints: HintsConfig,
}

impl PreheatConfig {
    /// Load configuration for a CLI invocation.
    ///
    /// Searches upward from cwd for the config file. Without one, defaults are
    /// used and the project root is the current directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                debug!("config"; "using {}", path.display());
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
                config
            }
            None => {
                debug!("config"; "{} not found, using defaults", cli.config.display());
                let mut config = Self::default();
                config.root =
                    std::env::current_dir().context("Failed to get current working directory")?;
                config
            }
        };

        if let Commands::Build { build_args } = &cli.command {
            config.apply_build_args(build_args);
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Apply build arguments from CLI. Flags override file values.
    fn apply_build_args(&mut self, args: &BuildArgs) {
        self.env = args.env;
        Self::update_option(&mut self.build.output, args.output.as_ref());
        if args.enabled.is_some() {
            self.hints.enabled = args.enabled;
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Run every section validator and fail with all collected diagnostics.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();
        self.build.validate(&mut diag);
        self.hints.validate(self.env, &mut diag);
        diag.into_result().map_err(ConfigError::Diagnostics)
    }

    /// Whether hints run for the current environment.
    pub fn is_enabled(&self) -> bool {
        self.hints.is_enabled(self.env)
    }

    /// Absolute output directory.
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.build.output)
    }

    /// Get path relative to the project root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }
}

// ============================================================================
// tests
// ============================================================================
