//! Stage pair definitions and the built-in catalogue.
//!
//! A [`StagePair`] names one latency measurement: which event kind starts it,
//! which ends it, and how a [`CorrelationKey`] is derived from each event.
//! Stage pairs are configuration values; adding a measurement never requires
//! new correlation code.

use crate::types::{CorrelationKey, Event};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// KeyRule
// ---------------------------------------------------------------------------

/// How to derive a [`CorrelationKey`] from an event.
///
/// Every name in `fields` must be present on the event; `index`, when set,
/// must name a field that parses as an integer. Otherwise the event is not
/// correlatable for this stage pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KeyRule {
    pub fields: Vec<String>,
    #[serde(default)]
    pub index: Option<String>,
}

impl KeyRule {
    /// Key made of a single field, e.g. `fid`.
    pub fn field(name: &str) -> Self {
        Self {
            fields: vec![name.to_string()],
            index: None,
        }
    }

    /// Composite key over several fields plus an optional integer sub-index.
    pub fn composite(fields: &[&str], index: Option<&str>) -> Self {
        Self {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            index: index.map(str::to_string),
        }
    }

    pub fn derive(&self, event: &Event) -> Option<CorrelationKey> {
        let parts = self
            .fields
            .iter()
            .map(|name| event.field(name).map(str::to_string))
            .collect::<Option<Vec<_>>>()?;
        let index = match &self.index {
            Some(name) => Some(event.int_field(name)?),
            None => None,
        };
        Some(CorrelationKey::new(parts, index))
    }
}

// ---------------------------------------------------------------------------
// StagePair
// ---------------------------------------------------------------------------

/// Whether both ends of a stage pair live in the same log source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Start and end come from one device; deltas use a single monotonic clock.
    #[default]
    Local,
    /// Start comes from one device and end from another. Deltas are only
    /// meaningful once the two devices' clocks have been aligned externally.
    CrossDevice,
}

/// A named (start kind, end kind, key rule) triple.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StagePair {
    pub name: String,
    pub start: String,
    pub end: String,
    pub key: KeyRule,
    /// Secondary dimensions (read from the end event) for grouped tables.
    #[serde(default)]
    pub group_by: Vec<String>,
    #[serde(default)]
    pub scope: Scope,
}

impl StagePair {
    pub fn local(name: &str, start: &str, end: &str, key: KeyRule) -> Self {
        Self {
            name: name.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            key,
            group_by: Vec::new(),
            scope: Scope::Local,
        }
    }

    pub fn cross_device(name: &str, start: &str, end: &str, key: KeyRule) -> Self {
        Self {
            scope: Scope::CrossDevice,
            ..Self::local(name, start, end, key)
        }
    }

    pub fn grouped_by(mut self, dims: &[&str]) -> Self {
        self.group_by = dims.iter().map(|d| d.to_string()).collect();
        self
    }

    pub fn requires_clock_sync(&self) -> bool {
        self.scope == Scope::CrossDevice
    }
}

// ---------------------------------------------------------------------------
// Built-in catalogue
// ---------------------------------------------------------------------------

/// The default stage catalogue, in report order.
///
/// | Leg | Key | Pairs |
/// |-----|-----|-------|
/// | sender | `fid` | cam_frame → enc_out → video_payload → mesh_send_call |
/// | receiver | `seq` | rx_video → dec_in → render_cb |
/// | fragmentation | `fragId` | frag_create → frag_split → frag_emit, reasm_add → reasm_done |
/// | scheduler/radio | `addr,prio,tid,fragId#idx` | sched_enq → sched_deq → radio_tx |
/// | cross-device | `seq` | mesh_send_call → rx_video, cam_frame → render_cb |
pub fn default_catalogue() -> Vec<StagePair> {
    let transport = KeyRule::composite(&["addr", "prio", "tid", "fragId"], Some("idx"));

    vec![
        StagePair::local("capture_to_encode", "cam_frame", "enc_out", KeyRule::field("fid")),
        StagePair::local("encode_to_payload", "enc_out", "video_payload", KeyRule::field("fid")),
        StagePair::local(
            "payload_to_mesh_send",
            "video_payload",
            "mesh_send_call",
            KeyRule::field("fid"),
        ),
        StagePair::local("receive_to_decode", "rx_video", "dec_in", KeyRule::field("seq")),
        StagePair::local("decode_to_render", "dec_in", "render_cb", KeyRule::field("seq")),
        StagePair::local("fragment_split", "frag_create", "frag_split", KeyRule::field("fragId")),
        StagePair::local("fragment_first_emit", "frag_split", "frag_emit", KeyRule::field("fragId")),
        StagePair::local("reassembly", "reasm_add", "reasm_done", KeyRule::field("fragId")),
        StagePair::local("scheduler_queue", "sched_enq", "sched_deq", transport.clone())
            .grouped_by(&["addr", "prio"]),
        StagePair::local("radio_transmit", "sched_deq", "radio_tx", transport).grouped_by(&["addr"]),
        StagePair::cross_device("network", "mesh_send_call", "rx_video", KeyRule::field("seq")),
        StagePair::cross_device("end_to_end", "cam_frame", "render_cb", KeyRule::field("seq")),
    ]
}
