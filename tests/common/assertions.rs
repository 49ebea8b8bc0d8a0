//! Domain-specific assertion macros for hoplat harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear which correlation or statistics invariant was violated.

/// Assert the exact multiset of deltas (nanoseconds) in a `DeltaSet`,
/// ignoring order.
///
/// ```rust
/// assert_deltas!(set, [500, 1500]);
/// ```
#[macro_export]
macro_rules! assert_deltas {
    ($set:expr, [$($d:expr),* $(,)?]) => {{
        let set: &hoplat_core::DeltaSet = &$set;
        let mut actual: Vec<u64> = set.deltas.clone();
        actual.sort_unstable();
        let mut expected: Vec<u64> = vec![$($d),*];
        expected.sort_unstable();
        pretty_assertions::assert_eq!(
            actual, expected,
            "assert_deltas! failed (starts={}, ends={}, negative={})",
            set.starts, set.ends, set.negative
        );
    }};
}

/// Assert the summary of a named stage in a `SourceReport`.
///
/// ```rust
/// assert_stage_mean!(report, "capture_to_encode", 2, 2.0);
/// ```
#[macro_export]
macro_rules! assert_stage_mean {
    ($report:expr, $name:expr, $count:expr, $mean_ms:expr) => {{
        let report: &hoplat_report::model::SourceReport = &$report;
        let name: &str = $name;
        let stage = report
            .stages
            .iter()
            .find(|s| s.name == name)
            .unwrap_or_else(|| panic!("assert_stage_mean! failed: no stage {:?}", name));
        match &stage.summary {
            Some(s) => {
                assert_eq!(s.count, $count, "stage {:?} count", name);
                assert!(
                    (s.mean_ms - $mean_ms).abs() < 1e-9,
                    "assert_stage_mean! failed for {:?}:\n  expected: {}\n  actual:   {}",
                    name,
                    $mean_ms,
                    s.mean_ms
                );
            }
            None => panic!(
                "assert_stage_mean! failed: stage {:?} has no data (coverage {:?})",
                name, stage.coverage
            ),
        }
    }};
}

/// Assert that a named stage produced no data.
#[macro_export]
macro_rules! assert_no_data {
    ($report:expr, $name:expr) => {{
        let report: &hoplat_report::model::SourceReport = &$report;
        let name: &str = $name;
        let stage = report
            .stages
            .iter()
            .find(|s| s.name == name)
            .unwrap_or_else(|| panic!("assert_no_data! failed: no stage {:?}", name));
        if let Some(s) = &stage.summary {
            panic!("assert_no_data! failed: stage {:?} has data: {:?}", name, s);
        }
    }};
}
