//! Role inference — classify a log source by the event kinds it emits.
//!
//! This is a best-effort heuristic, not a guarantee: a device that logged only
//! part of its activity can be misclassified. It never fails; a histogram with
//! no known markers is simply [`Role::Unknown`].
//!
//! Decision table, first match wins:
//!
//! | sender | receiver | relay | frag+reasm | verdict |
//! |--------|----------|-------|------------|---------|
//! | > 0    | > 0      | any   | any        | `both` |
//! | > 0    | 0        | any   | any        | `sender` |
//! | 0      | > 0      | > 0   | any        | `relay` |
//! | 0      | > 0      | 0     | any        | `receiver` |
//! | 0      | 0        | any   | both seen  | `relay` |
//! | 0      | 0        | any   | otherwise  | `unknown` |

use crate::error::{Error, Result};
use crate::types::{Event, Role};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Event-kind histogram for one log source.
pub type KindHistogram = BTreeMap<String, usize>;

// ---------------------------------------------------------------------------
// RoleMarkers
// ---------------------------------------------------------------------------

/// Marker sets used by [`infer_role`]. Loaded from the `[roles]` config
/// section so new instrumentation points need no code change.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoleMarkers {
    #[serde(default = "default_sender")]
    pub sender: Vec<String>,
    #[serde(default = "default_receiver")]
    pub receiver: Vec<String>,
    #[serde(default = "default_relay")]
    pub relay: Vec<String>,
    /// Fragmentation-create family, used by the relay fallback.
    #[serde(default = "default_frag_create")]
    pub frag_create: Vec<String>,
    /// Reassembly family, used by the relay fallback.
    #[serde(default = "default_reassembly")]
    pub reassembly: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_sender() -> Vec<String> {
    strings(&["cam_frame", "enc_out", "video_payload", "mesh_send_call"])
}
fn default_receiver() -> Vec<String> {
    strings(&["rx_video", "dec_in", "render_cb"])
}
fn default_relay() -> Vec<String> {
    strings(&["mesh_forward", "relay_tx"])
}
fn default_frag_create() -> Vec<String> {
    strings(&["frag_create", "frag_split", "frag_emit"])
}
fn default_reassembly() -> Vec<String> {
    strings(&["reasm_add", "reasm_done"])
}

impl Default for RoleMarkers {
    fn default() -> Self {
        Self {
            sender: default_sender(),
            receiver: default_receiver(),
            relay: default_relay(),
            frag_create: default_frag_create(),
            reassembly: default_reassembly(),
        }
    }
}

impl RoleMarkers {
    /// The sender, receiver and relay sets must be disjoint.
    pub fn validate(&self) -> Result<()> {
        let sets: [(&'static str, &[String]); 3] = [
            ("sender", &self.sender),
            ("receiver", &self.receiver),
            ("relay", &self.relay),
        ];
        for (i, &(first, a)) in sets.iter().enumerate() {
            for &(second, b) in &sets[i + 1..] {
                if let Some(kind) = a.iter().find(|&k| b.contains(k)) {
                    return Err(Error::OverlappingMarkers {
                        kind: kind.clone(),
                        first,
                        second,
                    });
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Inference
// ---------------------------------------------------------------------------

fn score(histogram: &KindHistogram, markers: &[String]) -> usize {
    markers
        .iter()
        .filter_map(|m| histogram.get(m))
        .sum()
}

/// Classify a source from its event-kind histogram.
pub fn infer_role(histogram: &KindHistogram, markers: &RoleMarkers) -> Role {
    let sender = score(histogram, &markers.sender);
    let receiver = score(histogram, &markers.receiver);
    let relay = score(histogram, &markers.relay);

    match (sender > 0, receiver > 0) {
        (true, true) => Role::Both,
        (true, false) => Role::Sender,
        (false, true) if relay > 0 => Role::Relay,
        (false, true) => Role::Receiver,
        (false, false) => {
            let fragments = score(histogram, &markers.frag_create) > 0;
            let reassembles = score(histogram, &markers.reassembly) > 0;
            if fragments && reassembles {
                Role::Relay
            } else {
                Role::Unknown
            }
        }
    }
}

/// Count events per kind.
pub fn kind_histogram(events: &[Event]) -> KindHistogram {
    let mut hist = KindHistogram::new();
    for ev in events {
        *hist.entry(ev.kind.clone()).or_insert(0) += 1;
    }
    hist
}

/// The `n` most frequent kinds, count descending then kind ascending.
pub fn top_kinds(histogram: &KindHistogram, n: usize) -> Vec<(String, usize)> {
    let mut top: Vec<(String, usize)> = histogram
        .iter()
        .map(|(k, &c)| (k.clone(), c))
        .collect();
    top.sort_by(|(ka, a), (kb, b)| b.cmp(a).then_with(|| ka.cmp(kb)));
    top.truncate(n);
    top
}
