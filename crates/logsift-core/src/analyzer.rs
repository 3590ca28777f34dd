//! The analysis session: one owned record set at a time.
//!
//! A [`RecordSet`] is immutable once built and carries its statistics
//! snapshot. [`LogAnalyzer::load`] builds the new set completely before
//! swapping it in, so a failed load leaves the previous set current.
//!
//! ```text
//! load(path) ─► ingest ─► RecordSet { entries, statistics } ─► swap in
//!                                   │
//!                 filter(criteria) ◄┴► export(path, records, format)
//! ```

use std::borrow::Borrow;
use std::io::BufRead;
use std::path::Path;

use crate::clock::{Clock, SystemClock};
use crate::error::LoadError;
use crate::export::{self, ExportFormat};
use crate::filter::{self, FilterCriteria};
use crate::ingest::{self, Ingested};
use crate::stats::Statistics;
use crate::types::LogEntry;

/// Entries from one load plus their statistics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    entries: Vec<LogEntry>,
    statistics: Statistics,
}

impl RecordSet {
    pub fn new(entries: Vec<LogEntry>) -> Self {
        let statistics = Statistics::compute(&entries);
        Self {
            entries,
            statistics,
        }
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&LogEntry> {
        filter::filter(&self.entries, criteria)
    }
}

/// Line counts reported by a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub total_lines: usize,
    pub parsed_count: usize,
}

/// Owns the current record set and the clock used for fallback timestamps.
///
/// Not internally synchronised: share one analyzer across threads only behind
/// external locking.
pub struct LogAnalyzer {
    clock: Box<dyn Clock>,
    current: RecordSet,
}

impl Default for LogAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LogAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogAnalyzer")
            .field("entries", &self.current.len())
            .finish_non_exhaustive()
    }
}

impl LogAnalyzer {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            current: RecordSet::default(),
        }
    }

    /// Replace the current record set with the contents of `path`.
    ///
    /// On error the previously loaded set stays current.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<LoadSummary, LoadError> {
        let path = path.as_ref();
        let ingested = ingest::ingest_path(path, self.clock.as_ref())?;
        let summary = self.install(ingested);
        tracing::info!(
            path = %path.display(),
            total_lines = summary.total_lines,
            parsed = summary.parsed_count,
            "log file loaded"
        );
        Ok(summary)
    }

    /// Like [`load`](Self::load), reading from an already-open stream.
    pub fn load_reader<R: BufRead>(&mut self, reader: R) -> std::io::Result<LoadSummary> {
        let ingested = ingest::ingest_reader(reader, self.clock.as_ref())?;
        Ok(self.install(ingested))
    }

    fn install(&mut self, ingested: Ingested) -> LoadSummary {
        let summary = LoadSummary {
            total_lines: ingested.total_lines,
            parsed_count: ingested.parsed_count(),
        };
        self.current = RecordSet::new(ingested.entries);
        summary
    }

    pub fn records(&self) -> &RecordSet {
        &self.current
    }

    pub fn entries(&self) -> &[LogEntry] {
        self.current.entries()
    }

    /// Snapshot for the current set; zeroed when nothing is loaded.
    pub fn statistics(&self) -> &Statistics {
        self.current.statistics()
    }

    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&LogEntry> {
        self.current.filter(criteria)
    }

    /// Write `records` to `path`, embedding the current set's statistics.
    ///
    /// Returns `false` when the export could not be written; the cause is
    /// logged. A partial file may remain.
    pub fn export<E: Borrow<LogEntry>>(
        &self,
        path: impl AsRef<Path>,
        records: &[E],
        format: ExportFormat,
    ) -> bool {
        let path = path.as_ref();
        match export::export_to_path(
            path,
            records,
            self.current.statistics(),
            format,
            self.clock.as_ref(),
        ) {
            Ok(()) => {
                tracing::info!(path = %path.display(), %format, count = records.len(), "export written");
                true
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %format, error = %err, "export failed");
                false
            }
        }
    }
}
