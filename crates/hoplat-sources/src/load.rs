//! Loading one log source into memory.

use crate::error::{Error, Result};
use hoplat_core::config::ParserConfig;
use hoplat_core::parser;
use hoplat_core::Event;
use std::path::{Path, PathBuf};

/// One log file, fully parsed. Held only for the duration of its analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSource {
    pub path: PathBuf,
    pub events: Vec<Event>,
}

impl LogSource {
    /// Display name: the path as given.
    pub fn name(&self) -> String {
        self.path.display().to_string()
    }
}

/// Read `path` and parse every instrumentation line in it.
///
/// Invalid UTF-8 is replaced rather than rejected; only failing to read the
/// file is an error.
pub fn load_source(path: &Path, cfg: &ParserConfig) -> Result<LogSource> {
    let bytes = std::fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let events = parser::parse_bytes(&bytes, cfg);
    tracing::debug!(
        path = %path.display(),
        bytes = bytes.len(),
        events = events.len(),
        "loaded log source"
    );
    Ok(LogSource {
        path: path.to_path_buf(),
        events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn loads_and_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("device-a.log");
        let mut body = b"boot noise\n".to_vec();
        body.extend_from_slice(b"D/latency: ev=cam_frame t=1000 fid=7\n");
        body.extend_from_slice(&[0xc0, 0xaf, b'\n']);
        body.extend_from_slice(b"D/latency: ev=enc_out t=1500 fid=7\n");
        std::fs::write(&path, body).unwrap();

        let source = load_source(&path, &ParserConfig::default()).unwrap();
        let kinds: Vec<_> = source.events.iter().map(|e| e.kind.as_str()).collect();
        assert_eq!(kinds, vec!["cam_frame", "enc_out"]);
        assert_eq!(source.path, path);
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_source(&dir.path().join("nope.log"), &ParserConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }
}
