//! Static log corpora and on-disk fixture helpers used across harnesses.
//!
//! Each corpus is a `&'static [&'static str]` of representative log lines.
//! [`corpus_high_volume`] builds a larger synthetic file for throughput paths.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use logsift::ingest::{self, Ingested};

/// Mixed application, access and syslog lines. Classified with
/// [`fixed_clock`](super::fixed_clock), this yields 11 entries: levels
/// INFO 5, ERROR 4, WARNING 1, FATAL 1.
pub const CORPUS_SAMPLE: &[&str] = &[
    "2024-01-15 10:30:25.123 [INFO]: Application started successfully",
    "2024-01-15 10:30:26.456 [WARNING]: High memory usage detected",
    "2024-01-15 10:30:27.789 [ERROR]: Database connection failed",
    "2024-01-15 10:30:28.012 [INFO]: Retrying database connection",
    "2024-01-15 10:30:29.345 [ERROR]: Connection retry failed",
    "2024-01-15 10:30:30.678 [FATAL]: System shutdown initiated",
    r#"192.168.1.100 - - [15/Jan/2024:10:30:31 -0700] "GET /index.html HTTP/1.1" 200 2326"#,
    r#"192.168.1.101 - - [15/Jan/2024:10:30:32 -0700] "POST /login HTTP/1.1" 401 234"#,
    r#"192.168.1.102 - - [15/Jan/2024:10:30:33 -0700] "GET /admin HTTP/1.1" 403 145"#,
    "Jan 15 10:30:34 server01 apache[1234]: Configuration reloaded",
    "Jan 15 10:30:35 server01 mysql[5678]: Database connection restored",
];

/// One line per recognised dialect, in chain order.
pub const CORPUS_DIALECTS: &[&str] = &[
    r#"10.0.0.1 - - [15/Jan/2024:10:30:25 +0000] "GET /health HTTP/1.1" 200 2"#,
    "2024-01-15 10:30:25,456 ERROR Payment gateway timeout",
    "Feb 13 04:05:06 edge-1 sshd[42]: Accepted publickey for deploy",
    "2024-01-15 10:30:25 192.168.1.1 GET /default.htm - 80 - 10.0.0.5 Mozilla/5.0 - 200 0 0 125",
];

/// Lines no pattern accepts, plus skippable noise.
pub const CORPUS_UNSTRUCTURED: &[&str] = &[
    "",
    "   ",
    "# generated by logrotate",
    "Something went wrong: error code 42",
    "worker-3 warn: queue depth 900",
    "plain text with no severity at all",
    "   # indented comment",
];

/// Generate `n` application-log lines cycling ERROR / WARNING / INFO (1:2:7).
pub fn corpus_high_volume(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            let level = match i % 10 {
                0 => "ERROR",
                1 | 2 => "WARNING",
                _ => "INFO",
            };
            format!(
                "2024-01-15 {:02}:{:02}:{:02}.{:03} [{level}]: log line {i}",
                i / 3600 % 24,
                i / 60 % 60,
                i % 60,
                i % 1000,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Ingestion helpers
// ---------------------------------------------------------------------------

/// Ingest `lines` (joined with `\n`) from memory against the fixed clock.
pub fn ingest_lines<S: AsRef<str>>(lines: &[S]) -> Ingested {
    let text = lines
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n");
    ingest::ingest_reader(Cursor::new(text), &super::fixed_clock()).unwrap()
}

/// Write `lines` to `dir/name`, newline-terminated, and return the path.
pub fn write_log<S: AsRef<str>>(dir: &Path, name: &str, lines: &[S]) -> PathBuf {
    let path = dir.join(name);
    let mut text = String::new();
    for line in lines {
        text.push_str(line.as_ref());
        text.push('\n');
    }
    std::fs::write(&path, text).unwrap();
    path
}
