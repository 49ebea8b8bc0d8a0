//! Correlator — matches start and end events by key and measures the gap.
//!
//! Every stage analysis goes through [`correlate_by`]; the stage-specific
//! parts (kinds, key shape) are plain configuration in a
//! [`StagePair`](crate::stages::StagePair).
//!
//! # Matching policy
//!
//! For each key, the **earliest** start and the **earliest** end are kept, so
//! duplicate emissions of the same logical event are counted once. A key seen
//! on only one side is an incomplete observation and is ignored. A match whose
//! end precedes its start is discarded and counted in [`DeltaSet::negative`];
//! it never enters the deltas.

use crate::stages::StagePair;
use crate::types::{CorrelationKey, Event};
use std::collections::BTreeMap;

/// Group label used when the end event lacks the grouping field.
pub const UNKNOWN_GROUP: &str = "(unknown)";

// ---------------------------------------------------------------------------
// DeltaSet
// ---------------------------------------------------------------------------

/// Matched start/end gaps for one stage pair within one log source.
///
/// Deltas are nanoseconds and unsigned, so a negative measurement cannot be
/// represented. Order carries no meaning (it follows key order).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeltaSet {
    pub deltas: Vec<u64>,
    /// Distinct keys observed on the start side.
    pub starts: usize,
    /// Distinct keys observed on the end side.
    pub ends: usize,
    /// Matches discarded because end < start.
    pub negative: usize,
}

impl DeltaSet {
    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.deltas
    }
}

impl AsRef<[u64]> for DeltaSet {
    fn as_ref(&self) -> &[u64] {
        &self.deltas
    }
}

/// Deltas computed from two different log sources.
///
/// Timestamps from different devices share no clock, so these values are only
/// meaningful after an external clock-sync step. `requires_clock_sync` is
/// always `true` and exists so every consumer carries the label forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossDeltaSet {
    pub deltas: DeltaSet,
    pub requires_clock_sync: bool,
}

// ---------------------------------------------------------------------------
// Public operations
// ---------------------------------------------------------------------------

/// Correlate `start_kind` and `end_kind` events using an arbitrary key
/// derivation. Events for which `key_fn` returns `None` are skipped.
pub fn correlate_by<F>(events: &[Event], start_kind: &str, end_kind: &str, key_fn: F) -> DeltaSet
where
    F: Fn(&Event) -> Option<CorrelationKey>,
{
    let starts = earliest(events, start_kind, &key_fn);
    let ends = earliest(events, end_kind, &key_fn);
    pair_up(&starts, &ends)
}

/// Correlate one stage pair within a single log source.
pub fn correlate(events: &[Event], pair: &StagePair) -> DeltaSet {
    correlate_by(events, &pair.start, &pair.end, |ev| pair.key.derive(ev))
}

/// Like [`correlate`], but buckets each key by `group_field`.
///
/// The group is read from the key's earliest end event, or from its earliest
/// start event when no end was seen. Missing values land in
/// [`UNKNOWN_GROUP`]. Counters keep their [`DeltaSet`] meaning per bucket, so
/// summing `starts`, `ends`, `negative` and the deltas over all buckets gives
/// the ungrouped result.
pub fn correlate_grouped(
    events: &[Event],
    pair: &StagePair,
    group_field: &str,
) -> BTreeMap<String, DeltaSet> {
    let key_fn = |ev: &Event| pair.key.derive(ev);
    let starts = earliest(events, &pair.start, &key_fn);
    let ends = earliest(events, &pair.end, &key_fn);
    let label = |ev: &Event| ev.field(group_field).unwrap_or(UNKNOWN_GROUP).to_string();

    let mut groups: BTreeMap<String, DeltaSet> = BTreeMap::new();
    for (key, end) in &ends {
        let bucket = groups.entry(label(end)).or_default();
        bucket.ends += 1;
        let Some(start) = starts.get(key) else {
            continue;
        };
        bucket.starts += 1;
        match delta(start.timestamp, end.timestamp) {
            Some(d) => bucket.deltas.push(d),
            None => bucket.negative += 1,
        }
    }
    for (key, start) in &starts {
        if !ends.contains_key(key) {
            groups.entry(label(start)).or_default().starts += 1;
        }
    }
    groups
}

/// Correlate a stage pair whose start events live in one source and end
/// events in another. The result is always labelled as clock-sync dependent.
pub fn correlate_across(
    start_events: &[Event],
    end_events: &[Event],
    pair: &StagePair,
) -> CrossDeltaSet {
    let key_fn = |ev: &Event| pair.key.derive(ev);
    let starts = earliest(start_events, &pair.start, &key_fn);
    let ends = earliest(end_events, &pair.end, &key_fn);
    CrossDeltaSet {
        deltas: pair_up(&starts, &ends),
        requires_clock_sync: true,
    }
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

/// Earliest event of `kind` per derivable key. Ties keep the first seen.
fn earliest<'a, F>(events: &'a [Event], kind: &str, key_fn: &F) -> BTreeMap<CorrelationKey, &'a Event>
where
    F: Fn(&Event) -> Option<CorrelationKey>,
{
    let mut out: BTreeMap<CorrelationKey, &Event> = BTreeMap::new();
    for ev in events.iter().filter(|ev| ev.kind == kind) {
        let Some(key) = key_fn(ev) else {
            continue;
        };
        out.entry(key)
            .and_modify(|cur| {
                if ev.timestamp < cur.timestamp {
                    *cur = ev;
                }
            })
            .or_insert(ev);
    }
    out
}

fn pair_up(
    starts: &BTreeMap<CorrelationKey, &Event>,
    ends: &BTreeMap<CorrelationKey, &Event>,
) -> DeltaSet {
    let mut set = DeltaSet {
        starts: starts.len(),
        ends: ends.len(),
        ..DeltaSet::default()
    };
    for (key, start) in starts {
        let Some(end) = ends.get(key) else {
            continue;
        };
        match delta(start.timestamp, end.timestamp) {
            Some(d) => set.deltas.push(d),
            None => set.negative += 1,
        }
    }
    set
}

/// `end - start`, or `None` when negative (key collision or clock anomaly).
fn delta(start: i64, end: i64) -> Option<u64> {
    u64::try_from(end.checked_sub(start)?).ok()
}
