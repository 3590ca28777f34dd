//! logsift-core: log ingestion and analysis core.
//!
//! Turns line-oriented log files of unknown format into normalised
//! [`LogEntry`] records, then filters, summarises and exports them.
//!
//! # Architecture
//!
//! ```text
//! ingest ──► classifier ──► RecordSet ──► stats
//!               │              │
//!           timestamp          ├──► filter
//!                              └──► export
//! ```
//!
//! Everything is synchronous and single-threaded. Anything that needs the
//! current time takes a [`Clock`].

pub mod analyzer;
pub mod classifier;
pub mod clock;
pub mod error;
pub mod export;
pub mod filter;
pub mod ingest;
pub mod stats;
pub mod timestamp;
pub mod types;

pub use analyzer::{LoadSummary, LogAnalyzer, RecordSet};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ExportError, LoadError};
pub use export::ExportFormat;
pub use filter::FilterCriteria;
pub use stats::Statistics;
pub use types::LogEntry;
