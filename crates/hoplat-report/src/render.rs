//! Renderers — text, CSV and JSON views over a [`RunReport`].
//!
//! Renderers only format; every number comes from the report records.

use crate::model::{Coverage, FlowReport, RunReport, SourceReport, StageReport};
use hoplat_core::StatsSummary;
use std::io::{self, Write};
use std::str::FromStr;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Text,
    Csv,
    Json,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Format::Text),
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            other => Err(format!("unknown format: {other} (expected text|csv|json)")),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Text => write!(f, "text"),
            Format::Csv => write!(f, "csv"),
            Format::Json => write!(f, "json"),
        }
    }
}

const CLOCK_SYNC_LABEL: &str = "[requires synced clocks]";

/// Write `report` to `out` in the requested format.
pub fn render<W: Write>(out: &mut W, report: &RunReport, format: Format) -> anyhow::Result<()> {
    match format {
        Format::Text => write_text(out, report)?,
        Format::Csv => write_csv(out, report)?,
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// One-line summary, e.g. `count=3 mean=1.50ms p50=1.00ms ...`.
pub fn format_summary(s: &StatsSummary) -> String {
    format!(
        "count={} mean={:.2}ms p50={:.2}ms p90={:.2}ms p99={:.2}ms min={:.2}ms max={:.2}ms",
        s.count, s.mean_ms, s.p50_ms, s.p90_ms, s.p99_ms, s.min_ms, s.max_ms
    )
}

fn format_coverage(c: &Coverage) -> String {
    let mut text = format!("matched {}/{} starts, {} ends", c.matched, c.starts, c.ends);
    if c.negative > 0 {
        text.push_str(&format!(", {} negative discarded", c.negative));
    }
    text
}

pub fn write_text<W: Write>(out: &mut W, report: &RunReport) -> io::Result<()> {
    for path in &report.missing {
        writeln!(out, "Missing file: {path}")?;
    }
    for source in &report.sources {
        write_source_text(out, source)?;
    }
    if !report.flows.is_empty() {
        writeln!(out)?;
        writeln!(out, "Cross-device flows {CLOCK_SYNC_LABEL}:")?;
        for flow in &report.flows {
            write_flow_text(out, flow)?;
        }
    }
    Ok(())
}

fn write_source_text<W: Write>(out: &mut W, source: &SourceReport) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "=== {} ===", source.path)?;
    writeln!(out, "events: {}", source.events)?;
    writeln!(out, "role: {} (best-effort)", source.role)?;
    writeln!(out, "Top events:")?;
    for kc in &source.top_kinds {
        writeln!(out, "  {}: {}", kc.kind, kc.count)?;
    }
    writeln!(out, "Stages:")?;
    for stage in &source.stages {
        write_stage_text(out, stage)?;
    }
    Ok(())
}

fn write_stage_text<W: Write>(out: &mut W, stage: &StageReport) -> io::Result<()> {
    let head = format!("  {} ({} -> {})", stage.name, stage.start, stage.end);
    match &stage.summary {
        Some(s) => writeln!(
            out,
            "{head}: {} [{}]",
            format_summary(s),
            format_coverage(&stage.coverage)
        )?,
        None => writeln!(out, "{head}: no data")?,
    }
    for table in stage.groups.iter().filter(|t| !t.rows.is_empty()) {
        writeln!(
            out,
            "    by {} (ranked by {}, top {} of {}):",
            table.dimension,
            table.ranked_by,
            table.rows.len(),
            table.total_groups
        )?;
        for row in &table.rows {
            writeln!(out, "      {}: {}", row.group, format_summary(&row.summary))?;
        }
    }
    Ok(())
}

fn write_flow_text<W: Write>(out: &mut W, flow: &FlowReport) -> io::Result<()> {
    let head = format!(
        "  {} -> {} {} ({} -> {})",
        flow.from, flow.to, flow.name, flow.start, flow.end
    );
    match &flow.summary {
        Some(s) => writeln!(out, "{head}: {} {CLOCK_SYNC_LABEL}", format_summary(s)),
        None => writeln!(out, "{head}: no data"),
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

const CSV_HEADER: &str = "source,target,stage,start,end,dimension,group,count,mean_ms,p50_ms,p90_ms,p99_ms,min_ms,max_ms,requires_clock_sync";

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_stats(s: Option<&StatsSummary>) -> String {
    match s {
        Some(s) => format!(
            "{},{:.3},{:.3},{:.3},{:.3},{:.3},{:.3}",
            s.count, s.mean_ms, s.p50_ms, s.p90_ms, s.p99_ms, s.min_ms, s.max_ms
        ),
        None => "0,,,,,,".to_string(),
    }
}

/// One row per stage, per group row, and per cross-device flow.
pub fn write_csv<W: Write>(out: &mut W, report: &RunReport) -> io::Result<()> {
    writeln!(out, "{CSV_HEADER}")?;
    for source in &report.sources {
        let src = csv_field(&source.path);
        for stage in &source.stages {
            let prefix = format!(
                "{src},,{},{},{}",
                csv_field(&stage.name),
                csv_field(&stage.start),
                csv_field(&stage.end)
            );
            writeln!(out, "{prefix},,,{},false", csv_stats(stage.summary.as_ref()))?;
            for table in &stage.groups {
                for row in &table.rows {
                    writeln!(
                        out,
                        "{prefix},{},{},{},false",
                        csv_field(&table.dimension),
                        csv_field(&row.group),
                        csv_stats(Some(&row.summary))
                    )?;
                }
            }
        }
    }
    for flow in &report.flows {
        writeln!(
            out,
            "{},{},{},{},{},,,{},{}",
            csv_field(&flow.from),
            csv_field(&flow.to),
            csv_field(&flow.name),
            csv_field(&flow.start),
            csv_field(&flow.end),
            csv_stats(flow.summary.as_ref()),
            flow.requires_clock_sync
        )?;
    }
    Ok(())
}
