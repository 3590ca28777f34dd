//! Domain-specific assertion macros for logsift harnesses.
//!
//! These add context-rich failure messages that show *which* entry broke an
//! expectation and the raw line it came from.

use logsift::{LogEntry, Statistics};

// ---------------------------------------------------------------------------
// Entry assertions
// ---------------------------------------------------------------------------

/// Assert that a `LogEntry` has a specific level.
///
/// ```rust
/// assert_level!(entry, "ERROR");
/// ```
#[macro_export]
macro_rules! assert_level {
    ($entry:expr, $level:expr) => {{
        let entry: &logsift::LogEntry = &$entry;
        let expected: &str = $level;
        if entry.level != expected {
            panic!(
                "assert_level! failed:\n  expected: {:?}\n  actual:   {:?}\n  raw: {:?}",
                expected, entry.level, entry.raw_line
            );
        }
    }};
}

/// Assert that a `LogEntry` carries the expected source tag.
///
/// ```rust
/// assert_source!(entry, "apache");
/// ```
#[macro_export]
macro_rules! assert_source {
    ($entry:expr, $source:expr) => {{
        let entry: &logsift::LogEntry = &$entry;
        let expected: &str = $source;
        if entry.source != expected {
            panic!(
                "assert_source! failed:\n  expected: {:?}\n  actual:   {:?}\n  raw: {:?}",
                expected, entry.source, entry.raw_line
            );
        }
    }};
}

/// Assert that a `LogEntry` has the expected message.
#[macro_export]
macro_rules! assert_message {
    ($entry:expr, $message:expr) => {{
        let entry: &logsift::LogEntry = &$entry;
        let expected: &str = $message;
        if entry.message != expected {
            panic!(
                "assert_message! failed:\n  expected: {:?}\n  actual:   {:?}\n  raw: {:?}",
                expected, entry.message, entry.raw_line
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Result set assertions
// ---------------------------------------------------------------------------

/// Assert that every entry in a result set satisfies a predicate.
///
/// ```rust
/// assert_results_all!(results, |e: &&LogEntry| e.is_error());
/// ```
#[macro_export]
macro_rules! assert_results_all {
    ($results:expr, $pred:expr) => {{
        let pred = $pred;
        let total = $results.len();
        let failing: Vec<String> = $results
            .iter()
            .filter_map(|e| if pred(e) { None } else { Some(e.raw_line.clone()) })
            .collect();
        if !failing.is_empty() {
            panic!(
                "assert_results_all! failed: {} of {} entries did not satisfy predicate.\n  first: {:?}",
                failing.len(),
                total,
                failing[0]
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Ingestion / statistics invariant helpers
// ---------------------------------------------------------------------------

/// Line numbers must be strictly increasing and within `1..=total_lines`.
pub fn assert_line_numbers_ordered(entries: &[LogEntry], total_lines: usize) {
    for pair in entries.windows(2) {
        assert!(
            pair[0].line_number < pair[1].line_number,
            "line numbers out of order: {} then {}",
            pair[0].line_number,
            pair[1].line_number
        );
    }
    for entry in entries {
        assert!(
            (1..=total_lines).contains(&entry.line_number),
            "line number {} outside 1..={total_lines}",
            entry.line_number
        );
    }
}

/// Every distribution must account for every entry exactly once.
pub fn assert_distributions_sum(stats: &Statistics) {
    let total = stats.total_entries;
    assert_eq!(stats.level_distribution.values().sum::<usize>(), total, "level distribution");
    assert_eq!(stats.source_distribution.values().sum::<usize>(), total, "source distribution");
    assert_eq!(stats.date_distribution.values().sum::<usize>(), total, "date distribution");
    assert_eq!(stats.hourly_distribution.values().sum::<usize>(), total, "hourly distribution");
    assert!(stats.error_count + stats.warning_count <= total);
    assert!(stats.hourly_distribution.keys().all(|h| *h < 24));
}
