//! logsift: multi-format log file analysis.
//!
//! Re-exports the analysis core so integration tests and benches can import
//! everything from one place, and adds the terminal [`report`] renderer and the
//! [`config`] loader used by the `logsift` binary.
//!
//! # Architecture
//!
//! ```text
//! CLI ──► LogAnalyzer::load ──► RecordSet ──► report
//!                                  │
//!                                  ├──► filter
//!                                  └──► export
//! ```

pub mod config;
pub mod report;

pub use logsift_core::*;
