//! Filtering: a conjunction of independent predicates over a record set.
//!
//! Each criterion narrows the result; an absent (or empty) criterion does not
//! filter. Within the level list and within the keyword list any one match is
//! enough. Filtering borrows; the underlying entries are never touched.

use chrono::{DateTime, Utc};

use crate::types::LogEntry;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Inclusive lower time bound.
    pub start: Option<DateTime<Utc>>,
    /// Inclusive upper time bound.
    pub end: Option<DateTime<Utc>>,
    /// Accepted levels, compared uppercased.
    pub levels: Vec<String>,
    /// Case-insensitive substrings looked for in the message.
    pub keywords: Vec<String>,
    /// Case-insensitive substring looked for in the source.
    pub source: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn levels<I, S>(mut self, levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.levels = levels.into_iter().map(|l| l.as_ref().to_string()).collect();
        self
    }

    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().to_string())
            .collect();
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// `true` when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.start.is_none()
            && self.end.is_none()
            && self.levels.is_empty()
            && self.keywords.is_empty()
            && self.source.is_none()
    }

    /// Prepare the criteria for repeated matching.
    fn compile(&self) -> CompiledCriteria {
        CompiledCriteria {
            start: self.start,
            end: self.end,
            levels: self.levels.iter().map(|l| l.trim().to_uppercase()).collect(),
            keywords: self.keywords.iter().map(|k| k.to_lowercase()).collect(),
            source: self.source.as_ref().map(|s| s.to_lowercase()),
        }
    }

    pub fn matches(&self, entry: &LogEntry) -> bool {
        self.compile().matches(entry)
    }
}

struct CompiledCriteria {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    levels: Vec<String>,
    keywords: Vec<String>,
    source: Option<String>,
}

impl CompiledCriteria {
    fn matches(&self, entry: &LogEntry) -> bool {
        let ts = entry.timestamp.with_timezone(&Utc);
        if self.start.is_some_and(|start| ts < start) {
            return false;
        }
        if self.end.is_some_and(|end| ts > end) {
            return false;
        }
        if !self.levels.is_empty() && !self.levels.iter().any(|l| *l == entry.level) {
            return false;
        }
        if !self.keywords.is_empty() {
            let message = entry.message.to_lowercase();
            if !self.keywords.iter().any(|k| message.contains(k.as_str())) {
                return false;
            }
        }
        if let Some(source) = &self.source {
            if !entry.source.to_lowercase().contains(source.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Entries satisfying every criterion, in their original order.
pub fn filter<'a>(entries: &'a [LogEntry], criteria: &FilterCriteria) -> Vec<&'a LogEntry> {
    let compiled = criteria.compile();
    entries.iter().filter(|e| compiled.matches(e)).collect()
}
