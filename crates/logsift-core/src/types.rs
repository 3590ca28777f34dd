//! Core types for logsift-core.
//!
//! This module defines the normalised [`LogEntry`] shared by every stage of
//! the pipeline, plus the literal tags the classifier stamps on entries.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Source tag used when a line matched no format pattern.
pub const UNKNOWN_SOURCE: &str = "unknown";

/// Level assigned when a line carries no recognisable severity.
pub const DEFAULT_LEVEL: &str = "INFO";

/// A normalised log entry, one per classified input line.
///
/// Entries are created once during ingestion and never mutated afterwards.
/// `level` is free text: unrecognised tokens pass through, uppercased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Point in time the line was written. Inputs without an explicit offset
    /// are read as UTC.
    pub timestamp: DateTime<FixedOffset>,
    /// Uppercased severity token with no surrounding whitespace.
    pub level: String,
    /// Human-readable payload.
    pub message: String,
    /// Originating component; empty when the matched pattern has none.
    pub source: String,
    /// The input line, trimmed.
    pub raw_line: String,
    /// 1-based position in the source file.
    pub line_number: usize,
    /// `true` when `timestamp` is the ingest-time wall clock rather than a
    /// value read from the line. Ordering by timestamp is unreliable for
    /// such entries.
    #[serde(default, skip_serializing_if = "is_false")]
    pub timestamp_estimated: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl LogEntry {
    /// Build an entry, normalising `level` to a trimmed uppercase token.
    pub fn new(
        timestamp: DateTime<FixedOffset>,
        level: &str,
        message: impl Into<String>,
        source: impl Into<String>,
        raw_line: impl Into<String>,
        line_number: usize,
    ) -> Self {
        Self {
            timestamp,
            level: level.trim().to_uppercase(),
            message: message.into(),
            source: source.into(),
            raw_line: raw_line.into(),
            line_number,
            timestamp_estimated: false,
        }
    }

    /// Mark the timestamp as a wall-clock stand-in.
    pub fn estimated(mut self) -> Self {
        self.timestamp_estimated = true;
        self
    }

    pub fn is_error(&self) -> bool {
        matches!(self.level.as_str(), "ERROR" | "FATAL")
    }

    pub fn is_warning(&self) -> bool {
        matches!(self.level.as_str(), "WARNING" | "WARN")
    }
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.timestamp, self.level, self.message)
    }
}
