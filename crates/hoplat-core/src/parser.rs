//! Line parser — turns raw log lines into [`Event`] values.
//!
//! Only lines carrying the instrumentation marker (default `latency`) are
//! considered. Within such a line, whitespace-separated `key=value` tokens are
//! collected; the kind key (default `ev`) and timestamp key (default `t`) are
//! mandatory. Everything else is ordinary log noise and yields `None`.
//!
//! ```text
//! 01-02 10:00:00.000  812  830 D latency: ev=cam_frame t=1000 fid=7 w=640
//!                                         └──────── segment ────────────┘
//! ```

use crate::config::ParserConfig;
use crate::types::Event;
use std::collections::HashMap;

/// Parse one line. Pure; never logs.
pub fn parse_line(line: &str, cfg: &ParserConfig) -> Option<Event> {
    if !line.contains(cfg.marker.as_str()) {
        return None;
    }

    let segment = segment(line, cfg)?;

    let mut fields: HashMap<String, String> = HashMap::new();
    for token in segment.split_whitespace() {
        let Some((key, value)) = token.split_once('=') else {
            continue;
        };
        if key.is_empty() {
            continue;
        }
        fields.insert(key.to_string(), value.to_string());
    }

    let kind = fields.remove(&cfg.kind_key).filter(|k| !k.is_empty())?;
    let timestamp = fields.remove(&cfg.ts_key)?.parse::<i64>().ok()?;

    Some(Event {
        kind,
        timestamp,
        fields,
    })
}

/// Isolate the `key=value` part of a line: everything after `"<marker>:"`,
/// or failing that, everything from the first `"<kind_key>="` token.
fn segment<'a>(line: &'a str, cfg: &ParserConfig) -> Option<&'a str> {
    let tagged = format!("{}:", cfg.marker);
    if let Some((_, rest)) = line.split_once(tagged.as_str()) {
        return Some(rest);
    }

    let kind_prefix = format!("{}=", cfg.kind_key);
    line.match_indices(kind_prefix.as_str())
        .map(|(idx, _)| idx)
        .find(|&idx| {
            line[..idx]
                .chars()
                .next_back()
                .map_or(true, char::is_whitespace)
        })
        .map(|idx| &line[idx..])
}

/// Parse a whole text dump, skipping noise lines.
pub fn parse_text(text: &str, cfg: &ParserConfig) -> Vec<Event> {
    text.lines().filter_map(|line| parse_line(line, cfg)).collect()
}

/// Parse raw bytes, replacing invalid UTF-8 sequences instead of failing.
pub fn parse_bytes(bytes: &[u8], cfg: &ParserConfig) -> Vec<Event> {
    parse_text(&String::from_utf8_lossy(bytes), cfg)
}
