//! Statistics — distribution summaries over nanosecond deltas.
//!
//! Values are converted to milliseconds before any aggregate is computed.
//! Percentiles use the nearest-rank rule on sorted samples:
//! `idx = round(p/100 × (n−1))`, clamped to `[0, n−1]`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

const NS_PER_MS: f64 = 1_000_000.0;

// ---------------------------------------------------------------------------
// StatsSummary
// ---------------------------------------------------------------------------

/// Count, mean and nearest-rank percentiles, all in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatsSummary {
    pub count: usize,
    pub mean_ms: f64,
    pub p50_ms: f64,
    pub p90_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

impl StatsSummary {
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Mean => self.mean_ms,
            Metric::P50 => self.p50_ms,
            Metric::P90 => self.p90_ms,
            Metric::P99 => self.p99_ms,
            Metric::Max => self.max_ms,
        }
    }
}

/// Summarize nanosecond deltas. Returns `None` for an empty input.
pub fn summarize(deltas_ns: &[u64]) -> Option<StatsSummary> {
    if deltas_ns.is_empty() {
        return None;
    }

    let mut ms: Vec<f64> = deltas_ns.iter().map(|&ns| ns as f64 / NS_PER_MS).collect();
    ms.sort_by(f64::total_cmp);

    let count = ms.len();
    let mean_ms = ms.iter().sum::<f64>() / count as f64;

    Some(StatsSummary {
        count,
        mean_ms,
        p50_ms: nearest_rank(&ms, 50.0),
        p90_ms: nearest_rank(&ms, 90.0),
        p99_ms: nearest_rank(&ms, 99.0),
        min_ms: ms[0],
        max_ms: ms[count - 1],
    })
}

/// Nearest-rank percentile over already-sorted, non-empty values.
fn nearest_rank(sorted: &[f64], p: f64) -> f64 {
    let last = sorted.len() - 1;
    let idx = (p / 100.0 * last as f64).round() as usize;
    sorted[idx.min(last)]
}

// ---------------------------------------------------------------------------
// Group ranking
// ---------------------------------------------------------------------------

/// Which summary value to rank groups by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    Mean,
    P50,
    P90,
    P99,
    Max,
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mean" | "avg" => Ok(Metric::Mean),
            "p50" | "median" => Ok(Metric::P50),
            "p90" => Ok(Metric::P90),
            "p99" => Ok(Metric::P99),
            "max" => Ok(Metric::Max),
            other => Err(format!("unknown metric: {other} (expected mean|p50|p90|p99|max)")),
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Metric::Mean => write!(f, "mean"),
            Metric::P50 => write!(f, "p50"),
            Metric::P90 => write!(f, "p90"),
            Metric::P99 => write!(f, "p99"),
            Metric::Max => write!(f, "max"),
        }
    }
}

/// Summarize every group, rank descending by `metric` (ties by label
/// ascending), and keep the first `limit`. Empty groups are dropped.
pub fn rank_groups<D>(
    per_group: &BTreeMap<String, D>,
    metric: Metric,
    limit: usize,
) -> Vec<(String, StatsSummary)>
where
    D: AsRef<[u64]>,
{
    let mut ranked: Vec<(String, StatsSummary)> = per_group
        .iter()
        .filter_map(|(label, deltas)| Some((label.clone(), summarize(deltas.as_ref())?)))
        .collect();

    ranked.sort_by(|(la, a), (lb, b)| {
        b.metric(metric)
            .total_cmp(&a.metric(metric))
            .then_with(|| la.cmp(lb))
    });
    ranked.truncate(limit);
    ranked
}
