//! Statistics: a whole-set snapshot of distributions and rates.
//!
//! A [`Statistics`] value is computed in one pass over a record set and never
//! updated in place; a new record set gets a new snapshot.

use chrono::{DateTime, FixedOffset, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::LogEntry;

/// How many error and warning messages the snapshot samples.
pub const MESSAGE_SAMPLE_SIZE: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<DateTime<FixedOffset>>,
    pub end: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_entries: usize,
    pub level_distribution: BTreeMap<String, usize>,
    pub source_distribution: BTreeMap<String, usize>,
    /// Keyed by the calendar date written in the log (the entry's own offset).
    pub date_distribution: BTreeMap<NaiveDate, usize>,
    /// Keyed by hour of day, 0-23, in the entry's own offset.
    pub hourly_distribution: BTreeMap<u32, usize>,
    pub error_count: usize,
    pub warning_count: usize,
    /// Percentage of `total_entries`.
    pub error_rate: f64,
    /// Percentage of `total_entries`.
    pub warning_rate: f64,
    pub date_range: DateRange,
    /// First errors in ingestion order, not ranked by frequency.
    pub top_error_messages: Vec<String>,
    /// First warnings in ingestion order, not ranked by frequency.
    pub top_warning_messages: Vec<String>,
}

impl Statistics {
    /// Compute the snapshot for `entries`. An empty set yields the zeroed
    /// default.
    pub fn compute(entries: &[LogEntry]) -> Self {
        if entries.is_empty() {
            return Self::default();
        }

        let mut stats = Self {
            total_entries: entries.len(),
            ..Self::default()
        };

        for entry in entries {
            *stats
                .level_distribution
                .entry(entry.level.clone())
                .or_default() += 1;
            *stats
                .source_distribution
                .entry(entry.source.clone())
                .or_default() += 1;
            *stats
                .date_distribution
                .entry(entry.timestamp.date_naive())
                .or_default() += 1;
            *stats
                .hourly_distribution
                .entry(entry.timestamp.hour())
                .or_default() += 1;

            if entry.is_error() {
                stats.error_count += 1;
                if stats.top_error_messages.len() < MESSAGE_SAMPLE_SIZE {
                    stats.top_error_messages.push(entry.message.clone());
                }
            } else if entry.is_warning() {
                stats.warning_count += 1;
                if stats.top_warning_messages.len() < MESSAGE_SAMPLE_SIZE {
                    stats.top_warning_messages.push(entry.message.clone());
                }
            }
        }

        stats.error_rate = stats.percentage_of(stats.error_count);
        stats.warning_rate = stats.percentage_of(stats.warning_count);
        stats.date_range = DateRange {
            start: entries.iter().map(|e| e.timestamp).min(),
            end: entries.iter().map(|e| e.timestamp).max(),
        };
        stats
    }

    /// `count` as a percentage of all entries; 0 for an empty snapshot.
    pub fn percentage_of(&self, count: usize) -> f64 {
        if self.total_entries == 0 {
            0.0
        } else {
            count as f64 / self.total_entries as f64 * 100.0
        }
    }

    /// Sources by descending count, ties in name order.
    pub fn top_sources(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut sources: Vec<_> = self
            .source_distribution
            .iter()
            .map(|(source, count)| (source.as_str(), *count))
            .collect();
        sources.sort_by(|a, b| b.1.cmp(&a.1));
        sources.truncate(limit);
        sources
    }
}
