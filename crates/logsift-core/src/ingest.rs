//! Ingestion: drives the classifier over a whole source, line by line.
//!
//! A single sequential pass: entries come out in source order with 1-based
//! line numbers. Invalid UTF-8 byte sequences are dropped, not replaced.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::classifier;
use crate::clock::Clock;
use crate::error::LoadError;
use crate::types::LogEntry;

/// Result of one ingestion pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ingested {
    pub entries: Vec<LogEntry>,
    /// Every line read, including blank and comment lines.
    pub total_lines: usize,
}

impl Ingested {
    /// Lines that produced an entry.
    pub fn parsed_count(&self) -> usize {
        self.entries.len()
    }
}

/// Classify every line of `reader`.
pub fn ingest_reader<R: BufRead>(mut reader: R, clock: &dyn Clock) -> std::io::Result<Ingested> {
    let mut ingested = Ingested::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        ingested.total_lines += 1;

        let line = decode_dropping_invalid(&buf);
        if let Some(entry) = classifier::classify(&line, ingested.total_lines, clock) {
            ingested.entries.push(entry);
        }
    }

    tracing::debug!(
        total_lines = ingested.total_lines,
        parsed = ingested.parsed_count(),
        "ingestion pass complete"
    );
    Ok(ingested)
}

/// Open `path` and classify every line.
pub fn ingest_path(path: &Path, clock: &dyn Clock) -> Result<Ingested, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::from_io(path, e))?;
    ingest_reader(BufReader::new(file), clock).map_err(|e| LoadError::from_io(path, e))
}

/// Keep the valid UTF-8 runs of `bytes`, skipping anything invalid.
fn decode_dropping_invalid(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}
