//! Test builders: ergonomic constructors for `LogEntry` values and corpora.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use logsift::{FixedClock, LogEntry};

// ---------------------------------------------------------------------------
// Time helpers
// ---------------------------------------------------------------------------

/// The instant every harness treats as "now": 2026-03-01 12:00:00 UTC.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

pub fn fixed_clock() -> FixedClock {
    FixedClock(fixed_now())
}

/// A UTC timestamp carried as `DateTime<FixedOffset>`.
pub fn utc_ts(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(y, mo, d, h, mi, s)
        .unwrap()
}

// ---------------------------------------------------------------------------
// LogEntryBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`LogEntry`] test fixtures.
///
/// # Example
///
/// ```rust
/// let entry = LogEntryBuilder::new("timeout connecting to db")
///     .level("ERROR")
///     .source("api")
///     .line(7)
///     .build();
/// ```
pub struct LogEntryBuilder {
    message: String,
    level: String,
    source: String,
    timestamp: DateTime<FixedOffset>,
    line_number: usize,
    raw_line: Option<String>,
}

impl LogEntryBuilder {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: "INFO".to_string(),
            source: "app".to_string(),
            timestamp: utc_ts(2024, 1, 15, 10, 30, 0),
            line_number: 1,
            raw_line: None,
        }
    }

    pub fn level(mut self, level: &str) -> Self {
        self.level = level.to_string();
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn at(mut self, timestamp: DateTime<FixedOffset>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn line(mut self, line_number: usize) -> Self {
        self.line_number = line_number;
        self
    }

    pub fn raw(mut self, raw_line: impl Into<String>) -> Self {
        self.raw_line = Some(raw_line.into());
        self
    }

    pub fn build(self) -> LogEntry {
        let raw_line = self.raw_line.unwrap_or_else(|| self.message.clone());
        LogEntry::new(
            self.timestamp,
            &self.level,
            self.message,
            self.source,
            raw_line,
            self.line_number,
        )
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

pub fn info_entry(message: &str) -> LogEntry {
    LogEntryBuilder::new(message).build()
}

pub fn warn_entry(message: &str) -> LogEntry {
    LogEntryBuilder::new(message).level("WARNING").build()
}

pub fn error_entry(message: &str) -> LogEntry {
    LogEntryBuilder::new(message).level("ERROR").build()
}

// ---------------------------------------------------------------------------
// Corpus helpers
// ---------------------------------------------------------------------------

/// Build `n` entries cycling ERROR / WARNING / INFO (1:2:7), three sources and
/// one-minute spacing from 2024-01-15 00:00 UTC.
pub fn build_corpus(n: usize) -> Vec<LogEntry> {
    let base = utc_ts(2024, 1, 15, 0, 0, 0);
    (0..n)
        .map(|i| {
            let level = match i % 10 {
                0 => "ERROR",
                1 | 2 => "WARNING",
                _ => "INFO",
            };
            LogEntryBuilder::new(format!("log line {i}"))
                .level(level)
                .source(format!("producer-{}", i % 3))
                .at(base + chrono::Duration::minutes(i as i64))
                .line(i + 1)
                .build()
        })
        .collect()
}
