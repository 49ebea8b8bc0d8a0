//! Input discovery — explicit files and directory scans.
//!
//! Resolution follows argument order: an explicit file is taken as is, an
//! explicit directory contributes its contents (sorted) in place, and `--dir`
//! directories come last. Paths are canonicalized so the same
//! file reached twice is analyzed once, and the first occurrence keeps its
//! position.

use crate::error::{Error, Result};
use glob::{glob_with, MatchOptions, Pattern};
use hoplat_core::config::InputConfig;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Outcome of input resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolved {
    /// Files to analyze, de-duplicated, first-seen order.
    pub files: Vec<PathBuf>,
    /// Inputs that did not exist. Reported, not fatal.
    pub missing: Vec<PathBuf>,
}

/// Resolve explicit `files` and scanned `dirs` into a list of log files.
///
/// An explicit path that turns out to be a directory is scanned in place, so
/// its files keep the position of the argument. `dirs` are scanned after all
/// explicit paths.
///
/// # Errors
///
/// [`Error::NoInputs`] when nothing resolves, [`Error::Glob`] if a directory
/// path cannot be turned into a valid pattern.
pub fn resolve_inputs(files: &[PathBuf], dirs: &[PathBuf], cfg: &InputConfig) -> Result<Resolved> {
    let mut resolved = Resolved::default();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for path in files {
        if path.is_file() {
            push_unique(path.clone(), &mut seen, &mut resolved);
        } else if path.is_dir() {
            scan_into(path, cfg, &mut seen, &mut resolved)?;
        } else {
            tracing::warn!(path = %path.display(), "missing file");
            resolved.missing.push(path.clone());
        }
    }

    for dir in dirs {
        if !dir.is_dir() {
            tracing::warn!(path = %dir.display(), "missing directory");
            resolved.missing.push(dir.clone());
            continue;
        }
        scan_into(dir, cfg, &mut seen, &mut resolved)?;
    }

    if resolved.files.is_empty() {
        return Err(Error::NoInputs);
    }
    Ok(resolved)
}

fn push_unique(path: PathBuf, seen: &mut HashSet<PathBuf>, resolved: &mut Resolved) {
    let canonical = path.canonicalize().unwrap_or_else(|_| path.clone());
    if seen.insert(canonical) {
        resolved.files.push(path);
    }
}

fn scan_into(
    dir: &Path,
    cfg: &InputConfig,
    seen: &mut HashSet<PathBuf>,
    resolved: &mut Resolved,
) -> Result<()> {
    let found = scan_dir(dir, &cfg.extensions, cfg.recursive)?;
    tracing::debug!(dir = %dir.display(), files = found.len(), "scanned directory");
    for path in found {
        push_unique(path, seen, resolved);
    }
    Ok(())
}

/// Files directly in `dir` (or anywhere below it when `recursive`) whose
/// extension is in `extensions`, compared case-insensitively. Sorted.
pub fn scan_dir(dir: &Path, extensions: &[String], recursive: bool) -> Result<Vec<PathBuf>> {
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::default()
    };
    let root = Pattern::escape(&dir.to_string_lossy());
    let depth = if recursive { "**/" } else { "" };

    let mut paths: Vec<PathBuf> = Vec::new();
    for ext in extensions {
        let pattern = format!("{root}/{depth}*.{}", Pattern::escape(ext));
        let matches = glob_with(&pattern, options).map_err(|e| Error::Glob {
            pattern: pattern.clone(),
            source: e,
        })?;
        paths.extend(matches.filter_map(std::result::Result::ok).filter(|p| p.is_file()));
    }

    paths.sort();
    paths.dedup();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "D/latency: ev=cam_frame t=1 fid=1\n").unwrap();
    }

    fn cfg(recursive: bool) -> InputConfig {
        InputConfig {
            recursive,
            ..InputConfig::default()
        }
    }

    #[test]
    fn scan_honours_extension_filter() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.log"));
        touch(&dir.path().join("b.TXT"));
        touch(&dir.path().join("c.json"));
        touch(&dir.path().join("nested/d.log"));

        let found = scan_dir(dir.path(), &cfg(false).extensions, false).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.log", "b.TXT"]);
    }

    #[test]
    fn recursive_scan_descends() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.log"));
        touch(&dir.path().join("nested/deeper/d.log"));

        let found = scan_dir(dir.path(), &["log".to_string()], true).unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn duplicates_keep_first_seen_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.log");
        let b = dir.path().join("b.log");
        touch(&a);
        touch(&b);

        let files = vec![b.clone(), a.clone(), b.clone()];
        let resolved = resolve_inputs(&files, &[dir.path().to_path_buf()], &cfg(false)).unwrap();
        assert_eq!(resolved.files, vec![b, a]);
        assert!(resolved.missing.is_empty());
    }

    #[test]
    fn positional_directory_keeps_its_position() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first");
        let x = first.join("x.log");
        let second = dir.path().join("second.log");
        touch(&x);
        touch(&second);

        let resolved = resolve_inputs(&[first.clone(), second.clone()], &[], &cfg(false)).unwrap();
        assert_eq!(resolved.files.len(), 2);
        assert!(resolved.files[0].ends_with("first/x.log"));
        assert_eq!(resolved.files[1], second);
    }

    #[test]
    fn dir_flag_is_scanned_after_explicit_paths() {
        let dir = tempfile::tempdir().unwrap();
        let scanned = dir.path().join("scanned");
        let a = scanned.join("a.log");
        let z = dir.path().join("z.log");
        touch(&a);
        touch(&z);

        let resolved = resolve_inputs(&[z.clone()], &[scanned], &cfg(false)).unwrap();
        assert_eq!(resolved.files.len(), 2);
        assert_eq!(resolved.files[0], z);
        assert!(resolved.files[1].ends_with("scanned/a.log"));
    }

    #[test]
    fn missing_file_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.log");
        touch(&a);
        let gone = dir.path().join("gone.log");

        let resolved = resolve_inputs(&[gone.clone(), a.clone()], &[], &cfg(false)).unwrap();
        assert_eq!(resolved.files, vec![a]);
        assert_eq!(resolved.missing, vec![gone]);
    }

    #[test]
    fn nothing_resolved_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_inputs(&[dir.path().join("gone.log")], &[], &cfg(false)).unwrap_err();
        assert!(matches!(err, Error::NoInputs));

        let empty = tempfile::tempdir().unwrap();
        let err = resolve_inputs(&[], &[empty.path().to_path_buf()], &cfg(false)).unwrap_err();
        assert!(matches!(err, Error::NoInputs));
    }
}
