//! Test builders — ergonomic constructors for events, log lines and stage
//! pairs.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use hoplat_core::{Event, KeyRule, StagePair};

// ---------------------------------------------------------------------------
// LineBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for logcat-style instrumentation lines.
///
/// # Example
///
/// ```rust
/// let line = LineBuilder::new("cam_frame", 1000).field("fid", 7).build();
/// assert_eq!(line, "01-02 10:00:00.000  812  830 D latency: ev=cam_frame t=1000 fid=7");
/// ```
pub struct LineBuilder {
    kind: String,
    ts: i64,
    fields: Vec<(String, String)>,
}

impl LineBuilder {
    pub fn new(kind: &str, ts: i64) -> Self {
        Self {
            kind: kind.to_string(),
            ts,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, key: &str, value: impl ToString) -> Self {
        self.fields.push((key.to_string(), value.to_string()));
        self
    }

    pub fn build(self) -> String {
        let mut line = format!(
            "01-02 10:00:00.000  812  830 D latency: ev={} t={}",
            self.kind, self.ts
        );
        for (k, v) in self.fields {
            line.push_str(&format!(" {k}={v}"));
        }
        line
    }
}

// ---------------------------------------------------------------------------
// Event helpers
// ---------------------------------------------------------------------------

/// Event keyed by frame id.
pub fn fid_event(kind: &str, ts: i64, fid: u32) -> Event {
    Event::new(kind, ts).with_field("fid", fid.to_string())
}

/// Scheduler event with the full composite transport key.
pub fn sched_event(kind: &str, ts: i64, addr: &str, prio: &str, tid: u32, idx: u32) -> Event {
    Event::new(kind, ts)
        .with_field("addr", addr)
        .with_field("prio", prio)
        .with_field("tid", tid.to_string())
        .with_field("fragId", "f0")
        .with_field("idx", idx.to_string())
}

/// `cam_frame -> enc_out` keyed by `fid`.
pub fn capture_pair() -> StagePair {
    StagePair::local("capture_to_encode", "cam_frame", "enc_out", KeyRule::field("fid"))
}

/// Join lines into a log body with a trailing newline.
pub fn log_body<S: AsRef<str>>(lines: &[S]) -> String {
    let mut body = String::new();
    for line in lines {
        body.push_str(line.as_ref());
        body.push('\n');
    }
    body
}
