//! Configuration types for hoplat.
//!
//! [`Config::load`] layers, in order: the embedded defaults,
//! `$XDG_CONFIG_HOME/hoplat/config.toml` (optional), and an explicit file
//! passed on the command line (required when given). [`Config::defaults`]
//! returns the embedded defaults without touching the filesystem.
//!
//! List-valued settings (extensions, role markers, the stage catalogue) have
//! their defaults in code rather than in `DEFAULT_CONFIG`, so a user file
//! replaces a list instead of merging into it.

use crate::error::{Error, Result};
use crate::role::RoleMarkers;
use crate::stages::{default_catalogue, StagePair};
use crate::stats::Metric;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[parser]
marker   = "latency"
kind_key = "ev"
ts_key   = "t"

[input]
recursive = false

[report]
top_events  = 20
group_limit = 8
rank_by     = "mean"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub roles: RoleMarkers,
    /// Stage catalogue in report order. Replaces the built-in one when set.
    #[serde(default = "default_catalogue")]
    pub stages: Vec<StagePair>,
}

/// `[parser]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParserConfig {
    /// Substring a line must contain to be considered at all.
    #[serde(default = "default_marker")]
    pub marker: String,
    #[serde(default = "default_kind_key")]
    pub kind_key: String,
    #[serde(default = "default_ts_key")]
    pub ts_key: String,
}

fn default_marker() -> String { "latency".to_string() }
fn default_kind_key() -> String { "ev".to_string() }
fn default_ts_key() -> String { "t".to_string() }

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            marker: default_marker(),
            kind_key: default_kind_key(),
            ts_key: default_ts_key(),
        }
    }
}

/// `[input]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InputConfig {
    /// File extensions (without the dot) picked up when scanning directories.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub recursive: bool,
}

fn default_extensions() -> Vec<String> {
    vec!["log".to_string(), "txt".to_string()]
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            recursive: false,
        }
    }
}

/// `[report]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportConfig {
    /// How many event kinds to list per source.
    #[serde(default = "default_top_events")]
    pub top_events: usize,
    /// Row limit for grouped (per-peer / per-priority) tables.
    #[serde(default = "default_group_limit")]
    pub group_limit: usize,
    #[serde(default)]
    pub rank_by: Metric,
}

fn default_top_events() -> usize { 20 }
fn default_group_limit() -> usize { 8 }

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_events: default_top_events(),
            group_limit: default_group_limit(),
            rank_by: Metric::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the layered configuration. `explicit` must exist when given.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(user_config_path().as_path()).required(false));

        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "loading explicit config");
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let cfg: Config = builder.build()?.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Cross-field checks the deserializer cannot express.
    pub fn validate(&self) -> Result<()> {
        self.roles.validate()?;

        let mut seen = HashSet::new();
        for stage in &self.stages {
            if stage.key.fields.is_empty() {
                return Err(Error::EmptyKeyRule {
                    name: stage.name.clone(),
                });
            }
            if !seen.insert(stage.name.as_str()) {
                return Err(Error::DuplicateStage(stage.name.clone()));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn user_config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("hoplat")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
