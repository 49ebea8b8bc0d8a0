//! Report records — plain serializable values produced by the driver and
//! consumed by the renderers.

use chrono::{DateTime, Utc};
use hoplat_core::{DeltaSet, Metric, Role, StatsSummary};
use serde::Serialize;

/// Everything one invocation produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub sources: Vec<SourceReport>,
    /// Cross-device flows; empty unless explicitly requested.
    pub flows: Vec<FlowReport>,
    /// Inputs that could not be found or read.
    pub missing: Vec<String>,
}

/// Per-source analysis.
#[derive(Debug, Clone, Serialize)]
pub struct SourceReport {
    pub path: String,
    pub events: usize,
    /// Heuristic, see `hoplat_core::role`.
    pub role: Role,
    pub top_kinds: Vec<KindCount>,
    pub stages: Vec<StageReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindCount {
    pub kind: String,
    pub count: usize,
}

/// One stage pair within one source. `summary` is `None` when no key was
/// observed on both sides.
#[derive(Debug, Clone, Serialize)]
pub struct StageReport {
    pub name: String,
    pub start: String,
    pub end: String,
    pub coverage: Coverage,
    pub summary: Option<StatsSummary>,
    pub groups: Vec<GroupTable>,
}

/// How much of the stage was actually observed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Coverage {
    pub starts: usize,
    pub ends: usize,
    pub matched: usize,
    /// Matches dropped because the end preceded the start.
    pub negative: usize,
}

impl From<&DeltaSet> for Coverage {
    fn from(set: &DeltaSet) -> Self {
        Self {
            starts: set.starts,
            ends: set.ends,
            matched: set.len(),
            negative: set.negative,
        }
    }
}

/// Ranked per-group summaries for one secondary dimension.
#[derive(Debug, Clone, Serialize)]
pub struct GroupTable {
    pub dimension: String,
    pub ranked_by: Metric,
    /// Groups with data before truncation to the display limit.
    pub total_groups: usize,
    pub rows: Vec<GroupRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupRow {
    pub group: String,
    pub summary: StatsSummary,
}

/// A stage whose start and end were logged by two different devices.
#[derive(Debug, Clone, Serialize)]
pub struct FlowReport {
    pub from: String,
    pub to: String,
    pub name: String,
    pub start: String,
    pub end: String,
    /// Always `true`: the two sources share no clock.
    pub requires_clock_sync: bool,
    pub coverage: Coverage,
    pub summary: Option<StatsSummary>,
}
