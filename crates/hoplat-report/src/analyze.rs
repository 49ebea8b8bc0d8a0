//! Analysis driver — runs the stage catalogue over each log source.
//!
//! Sources are independent: each one is loaded and analyzed on its own
//! blocking task, and its events are dropped as soon as its report is built.
//! Results come back in input order regardless of completion order. Within a
//! source, stage pairs run in catalogue order.

use crate::model::{
    Coverage, FlowReport, GroupRow, GroupTable, KindCount, RunReport, SourceReport, StageReport,
};
use hoplat_core::config::Config;
use hoplat_core::correlate::{correlate, correlate_across, correlate_grouped};
use hoplat_core::role::{infer_role, kind_histogram, top_kinds};
use hoplat_core::stats::{rank_groups, summarize};
use hoplat_core::{Event, Scope, StagePair};
use hoplat_sources::{load_source, LogSource};
use std::path::PathBuf;
use std::sync::Arc;

/// What to analyze, after input resolution.
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    pub files: Vec<PathBuf>,
    /// Inputs already known to be missing; carried into the report.
    pub missing: Vec<PathBuf>,
    /// Also compute cross-device flows between every ordered pair of sources.
    pub cross_device: bool,
}

// ---------------------------------------------------------------------------
// Per-source analysis
// ---------------------------------------------------------------------------

/// Analyze the events of one source.
pub fn analyze_events(path: &str, events: &[Event], cfg: &Config) -> SourceReport {
    let histogram = kind_histogram(events);
    let role = infer_role(&histogram, &cfg.roles);

    let stages = cfg
        .stages
        .iter()
        .filter(|pair| pair.scope == Scope::Local)
        .map(|pair| analyze_stage(path, events, pair, cfg))
        .collect();

    SourceReport {
        path: path.to_string(),
        events: events.len(),
        role,
        top_kinds: top_kinds(&histogram, cfg.report.top_events)
            .into_iter()
            .map(|(kind, count)| KindCount { kind, count })
            .collect(),
        stages,
    }
}

pub fn analyze_source(source: &LogSource, cfg: &Config) -> SourceReport {
    analyze_events(&source.name(), &source.events, cfg)
}

fn analyze_stage(path: &str, events: &[Event], pair: &StagePair, cfg: &Config) -> StageReport {
    let set = correlate(events, pair);
    if set.negative > 0 {
        tracing::debug!(
            source = path,
            stage = %pair.name,
            negative = set.negative,
            "discarded negative deltas"
        );
    }

    let groups = pair
        .group_by
        .iter()
        .map(|dimension| {
            let per_group = correlate_grouped(events, pair, dimension);
            let total_groups = per_group.values().filter(|s| !s.is_empty()).count();
            let rows = rank_groups(&per_group, cfg.report.rank_by, cfg.report.group_limit)
                .into_iter()
                .map(|(group, summary)| GroupRow { group, summary })
                .collect();
            GroupTable {
                dimension: dimension.clone(),
                ranked_by: cfg.report.rank_by,
                total_groups,
                rows,
            }
        })
        .collect();

    StageReport {
        name: pair.name.clone(),
        start: pair.start.clone(),
        end: pair.end.clone(),
        coverage: Coverage::from(&set),
        summary: summarize(set.as_slice()),
        groups,
    }
}

// ---------------------------------------------------------------------------
// Cross-device flows
// ---------------------------------------------------------------------------

/// Every cross-device stage for every ordered pair of distinct sources.
///
/// Only valid once the devices' clocks have been aligned externally; every
/// returned flow carries `requires_clock_sync = true`.
pub fn analyze_cross(sources: &[LogSource], cfg: &Config) -> Vec<FlowReport> {
    let pairs: Vec<&StagePair> = cfg
        .stages
        .iter()
        .filter(|pair| pair.scope == Scope::CrossDevice)
        .collect();

    let mut flows = Vec::new();
    for from in sources {
        for to in sources {
            if std::ptr::eq(from, to) {
                continue;
            }
            for pair in &pairs {
                let cross = correlate_across(&from.events, &to.events, pair);
                flows.push(FlowReport {
                    from: from.name(),
                    to: to.name(),
                    name: pair.name.clone(),
                    start: pair.start.clone(),
                    end: pair.end.clone(),
                    requires_clock_sync: cross.requires_clock_sync,
                    coverage: Coverage::from(&cross.deltas),
                    summary: summarize(cross.deltas.as_slice()),
                });
            }
        }
    }
    flows
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Load and analyze every file in `request`, fanning out one blocking task
/// per source. Unreadable files are reported as missing, not fatal.
pub async fn analyze_all(request: RunRequest, cfg: Arc<Config>) -> RunReport {
    let mut missing: Vec<String> = request
        .missing
        .iter()
        .map(|p| p.display().to_string())
        .collect();

    let handles: Vec<_> = request
        .files
        .iter()
        .cloned()
        .map(|path| {
            let cfg = Arc::clone(&cfg);
            let keep = request.cross_device;
            tokio::task::spawn_blocking(move || {
                let source = load_source(&path, &cfg.parser)?;
                let report = analyze_source(&source, &cfg);
                Ok::<_, hoplat_sources::Error>((report, keep.then_some(source)))
            })
        })
        .collect();

    let mut sources = Vec::with_capacity(handles.len());
    let mut kept = Vec::new();
    for (path, handle) in request.files.iter().zip(handles) {
        match handle.await {
            Ok(Ok((report, source))) => {
                sources.push(report);
                kept.extend(source);
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "skipping source");
                missing.push(path.display().to_string());
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "analysis task failed");
                missing.push(path.display().to_string());
            }
        }
    }

    let flows = if request.cross_device {
        tracing::info!(sources = kept.len(), "computing cross-device flows (requires synced clocks)");
        analyze_cross(&kept, &cfg)
    } else {
        Vec::new()
    };

    tracing::info!(
        sources = sources.len(),
        missing = missing.len(),
        flows = flows.len(),
        "analysis complete"
    );

    RunReport {
        generated_at: chrono::Utc::now(),
        sources,
        flows,
        missing,
    }
}

/// Blocking entry point: builds a runtime and runs [`analyze_all`].
pub fn run(request: RunRequest, cfg: Config) -> anyhow::Result<RunReport> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(analyze_all(request, Arc::new(cfg))))
}
