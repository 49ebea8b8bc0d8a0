//! Core types for hoplat-core.
//!
//! This module defines the data shared across every analysis layer: the
//! parsed [`Event`], the [`CorrelationKey`] used to pair start and end
//! events, and the inferred device [`Role`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// One instrumentation occurrence parsed from a log line.
///
/// `timestamp` comes from a device-local monotonic clock (nanoseconds). It is
/// only comparable to timestamps from the same log source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Instrumentation point, e.g. `cam_frame` or `sched_enq`. Open-ended.
    pub kind: String,
    /// Monotonic device-local timestamp in nanoseconds.
    pub timestamp: i64,
    /// Remaining `key=value` tokens from the line, verbatim.
    pub fields: HashMap<String, String>,
}

impl Event {
    pub fn new(kind: impl Into<String>, timestamp: i64) -> Self {
        Self {
            kind: kind.into(),
            timestamp,
            fields: HashMap::new(),
        }
    }

    /// Builder-style field insertion, mostly useful for tests and benches.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Raw string value of a field. Absence is not an error.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Integer value of a field, interpreted on demand.
    ///
    /// Returns `None` when the field is absent or does not parse as `i64`.
    pub fn int_field(&self, name: &str) -> Option<i64> {
        self.field(name)?.parse().ok()
    }
}

// ---------------------------------------------------------------------------
// CorrelationKey
// ---------------------------------------------------------------------------

/// Identifies one thing flowing through the pipeline for a single stage pair:
/// a frame id, a sequence number, a fragment id, or a composite transport key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CorrelationKey {
    pub parts: Vec<String>,
    pub index: Option<i64>,
}

impl CorrelationKey {
    pub fn new(parts: Vec<String>, index: Option<i64>) -> Self {
        Self { parts, index }
    }

    /// Single-component key, e.g. a frame id.
    pub fn single(value: impl Into<String>) -> Self {
        Self {
            parts: vec![value.into()],
            index: None,
        }
    }
}

impl std::fmt::Display for CorrelationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.parts.join("/"))?;
        if let Some(idx) = self.index {
            write!(f, "#{idx}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Best-effort classification of which pipeline leg a log source represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Sender,
    Receiver,
    Relay,
    Both,
    Unknown,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Sender => write!(f, "sender"),
            Role::Receiver => write!(f, "receiver"),
            Role::Relay => write!(f, "relay"),
            Role::Both => write!(f, "both"),
            Role::Unknown => write!(f, "unknown"),
        }
    }
}
