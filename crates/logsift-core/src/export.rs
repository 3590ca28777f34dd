//! Export: renders a record set and its statistics into one of three
//! encodings.
//!
//! | Format | Layout |
//! |--------|--------|
//! | `json` | `{ "metadata": { export_time, entry_count, statistics }, "entries": [...] }` |
//! | `csv`  | header `Timestamp,Level,Source,Message,Line Number`, one row per entry |
//! | `txt`  | three-line report header, blank line, `[<timestamp>] <LEVEL>: <message>` per entry |
//!
//! Writes are not atomic: a failure part-way leaves a partial file behind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;

use crate::clock::Clock;
use crate::error::ExportError;
use crate::stats::Statistics;
use crate::types::LogEntry;

pub const CSV_HEADER: [&str; 5] = ["Timestamp", "Level", "Source", "Message", "Line Number"];

pub const REPORT_TITLE: &str = "Log Analysis Report";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
    Text,
}

impl ExportFormat {
    /// Infer the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()?.to_str()?.parse().ok()
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Text => "txt",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown export format {0:?} (expected json, csv or txt)")]
pub struct UnknownFormat(pub String);

impl FromStr for ExportFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "txt" | "text" => Ok(ExportFormat::Text),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

/// A structured export, as read back from disk.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExportDocument {
    pub metadata: ExportMetadata,
    pub entries: Vec<LogEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExportMetadata {
    pub export_time: DateTime<Utc>,
    pub entry_count: usize,
    pub statistics: Statistics,
}

#[derive(Serialize)]
struct DocumentOut<'a> {
    metadata: MetadataOut<'a>,
    entries: Vec<&'a LogEntry>,
}

#[derive(Serialize)]
struct MetadataOut<'a> {
    export_time: DateTime<Utc>,
    entry_count: usize,
    statistics: &'a Statistics,
}

/// Encode `records` to `writer`.
///
/// `stats` is embedded in the JSON metadata as-is; callers usually pass the
/// snapshot of the full record set even when `records` is a filtered subset.
pub fn write_export<W, E>(
    mut writer: W,
    records: &[E],
    stats: &Statistics,
    format: ExportFormat,
    clock: &dyn Clock,
) -> Result<(), ExportError>
where
    W: Write,
    E: Borrow<LogEntry>,
{
    let entries: Vec<&LogEntry> = records.iter().map(Borrow::borrow).collect();

    match format {
        ExportFormat::Json => {
            let document = DocumentOut {
                metadata: MetadataOut {
                    export_time: clock.now(),
                    entry_count: entries.len(),
                    statistics: stats,
                },
                entries,
            };
            serde_json::to_writer_pretty(&mut writer, &document)?;
            writeln!(writer)?;
        }
        ExportFormat::Csv => {
            let mut csv = csv::Writer::from_writer(&mut writer);
            csv.write_record(CSV_HEADER)?;
            for entry in &entries {
                let timestamp = entry.timestamp.to_rfc3339();
                let line_number = entry.line_number.to_string();
                csv.write_record([
                    timestamp.as_str(),
                    entry.level.as_str(),
                    entry.source.as_str(),
                    entry.message.as_str(),
                    line_number.as_str(),
                ])?;
            }
            csv.flush()?;
        }
        ExportFormat::Text => {
            writeln!(writer, "{REPORT_TITLE}")?;
            writeln!(writer, "Generated: {}", clock.now().format("%Y-%m-%d %H:%M:%S"))?;
            writeln!(writer, "Total Entries: {}", entries.len())?;
            writeln!(writer)?;
            for entry in &entries {
                writeln!(writer, "{entry}")?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write the export into it.
pub fn export_to_path<E: Borrow<LogEntry>>(
    path: &Path,
    records: &[E],
    stats: &Statistics,
    format: ExportFormat,
    clock: &dyn Clock,
) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_export(BufWriter::new(file), records, stats, format, clock)
}

/// Read back a JSON export.
pub fn read_json_export<R: Read>(reader: R) -> Result<ExportDocument, serde_json::Error> {
    serde_json::from_reader(reader)
}
