//! Command-line surface.

use anyhow::Context;
use clap::Parser;
use hoplat_core::config::Config;
use hoplat_core::Metric;
use hoplat_report::{render, Format, RunRequest};
use hoplat_sources::resolve_inputs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "hoplat",
    about = "Per-stage latency statistics from device instrumentation logs",
    after_help = "Deltas are only computed within one log source. Cross-device flows \
                  (--cross-device) assume the devices' clocks were synchronized beforehand."
)]
pub struct Cli {
    /// Log dump files (directories are scanned too).
    pub files: Vec<PathBuf>,

    /// Directory to scan for log files. May be repeated.
    #[arg(short, long = "dir")]
    pub dirs: Vec<PathBuf>,

    /// Scan directories recursively.
    #[arg(short, long)]
    pub recursive: bool,

    /// Comma-separated extensions to pick up when scanning (default: log,txt).
    #[arg(long, value_delimiter = ',')]
    pub ext: Vec<String>,

    /// Output format: text, csv or json.
    #[arg(short, long, default_value_t = Format::Text)]
    pub format: Format,

    /// Metric used to rank per-peer / per-priority tables.
    #[arg(long)]
    pub rank_by: Option<Metric>,

    /// Number of event kinds listed per source.
    #[arg(long)]
    pub top: Option<usize>,

    /// Row limit for grouped tables.
    #[arg(long)]
    pub group_limit: Option<usize>,

    /// Also correlate stages across sources. Requires synchronized clocks.
    #[arg(long)]
    pub cross_device: bool,

    /// Extra config file layered over the defaults and the user config.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write debug logs to stderr.
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply(&self, cfg: &mut Config) {
        if self.recursive {
            cfg.input.recursive = true;
        }
        if !self.ext.is_empty() {
            cfg.input.extensions = self
                .ext
                .iter()
                .map(|e| e.trim().trim_start_matches('.').to_string())
                .filter(|e| !e.is_empty())
                .collect();
        }
        if let Some(metric) = self.rank_by {
            cfg.report.rank_by = metric;
        }
        if let Some(top) = self.top {
            cfg.report.top_events = top;
        }
        if let Some(limit) = self.group_limit {
            cfg.report.group_limit = limit;
        }
    }
}

/// Load the layered configuration, then run [`execute_with`].
///
/// Fails only when configuration cannot be loaded, no input resolves, or the
/// output cannot be written.
pub fn execute<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<()> {
    let cfg = Config::load(cli.config.as_deref()).context("loading configuration")?;
    execute_with(cli, cfg, out)
}

/// Apply command-line overrides to `cfg`, resolve inputs, analyze them and
/// render the report to `out`.
pub fn execute_with<W: Write>(cli: &Cli, mut cfg: Config, out: &mut W) -> anyhow::Result<()> {
    cli.apply(&mut cfg);

    let resolved = resolve_inputs(&cli.files, &cli.dirs, &cfg.input)?;
    tracing::debug!(
        files = resolved.files.len(),
        missing = resolved.missing.len(),
        "resolved inputs"
    );

    let request = RunRequest {
        files: resolved.files,
        missing: resolved.missing,
        cross_device: cli.cross_device,
    };
    let report = hoplat_report::run(request, cfg)?;
    render(out, &report, cli.format)
}
