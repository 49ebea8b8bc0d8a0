//! hoplat-core — event correlation and latency statistics.
//!
//! This crate turns instrumentation log lines into per-stage latency
//! summaries. Everything here is synchronous and free of I/O apart from
//! loading configuration.
//!
//! # Architecture
//!
//! ```text
//! lines ──► parser ──► Vec<Event> ──► correlate (per StagePair) ──► DeltaSet ──► stats
//!                          │
//!                          └──► role (kind histogram)
//! ```
//!
//! Timestamps are device-local monotonic nanoseconds. Deltas are only
//! computed within one source, except through
//! [`correlate::correlate_across`], whose results are always labelled as
//! requiring synchronized clocks.

pub mod config;
pub mod correlate;
pub mod error;
pub mod parser;
pub mod role;
pub mod stages;
pub mod stats;
pub mod types;

pub use correlate::{CrossDeltaSet, DeltaSet};
pub use error::{Error, Result};
pub use stages::{KeyRule, Scope, StagePair};
pub use stats::{Metric, StatsSummary};
pub use types::{CorrelationKey, Event, Role};
