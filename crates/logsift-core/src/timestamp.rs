//! Timestamp normalization: free-text timestamp substrings to absolute time.
//!
//! [`normalize`] walks a fixed, ordered list of layouts and stops at the first
//! one that consumes the whole input. When none does, a generic ISO-8601 parse
//! is attempted. Inputs that carry no UTC offset are read as UTC.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

use crate::clock::Clock;

static OFFSET_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:Z|[+-]\d{2}:?\d{2})$").expect("offset marker regex"));

/// How a layout string is applied to the input.
#[derive(Debug, Clone, Copy)]
enum Layout {
    /// No offset in the input; read as UTC.
    Naive(&'static str),
    /// Like `Naive`, with `,` as the fractional-second separator.
    DecimalComma(&'static str),
    /// Carries a `%z` offset. `+0000` is appended when the input has none.
    Offset(&'static str),
    /// Month-name stamps with no year; the clock supplies the year.
    NoYear(&'static str),
}

#[derive(Debug, Clone, Copy)]
struct TimestampFormat {
    name: &'static str,
    layout: Layout,
}

const FORMATS: &[TimestampFormat] = &[
    TimestampFormat {
        name: "date_time",
        layout: Layout::Naive("%Y-%m-%d %H:%M:%S"),
    },
    TimestampFormat {
        name: "date_time_fraction_dot",
        layout: Layout::Naive("%Y-%m-%d %H:%M:%S%.f"),
    },
    TimestampFormat {
        name: "date_time_fraction_comma",
        layout: Layout::DecimalComma("%Y-%m-%d %H:%M:%S%.f"),
    },
    TimestampFormat {
        name: "clf",
        layout: Layout::Offset("%d/%b/%Y:%H:%M:%S %z"),
    },
    TimestampFormat {
        name: "bsd_syslog",
        layout: Layout::NoYear("%b %d %H:%M:%S"),
    },
    TimestampFormat {
        name: "iso8601",
        layout: Layout::Naive("%Y-%m-%dT%H:%M:%S"),
    },
    TimestampFormat {
        name: "iso8601_fraction_utc",
        layout: Layout::Naive("%Y-%m-%dT%H:%M:%S%.fZ"),
    },
];

const ISO_OFFSET_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
];

const ISO_NAIVE_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

impl TimestampFormat {
    fn parse(&self, text: &str, clock: &dyn Clock) -> Option<DateTime<FixedOffset>> {
        match self.layout {
            Layout::Naive(fmt) => NaiveDateTime::parse_from_str(text, fmt).ok().map(as_utc),
            Layout::DecimalComma(fmt) => {
                let (whole, fraction) = text.rsplit_once(',')?;
                NaiveDateTime::parse_from_str(&format!("{whole}.{fraction}"), fmt)
                    .ok()
                    .map(as_utc)
            }
            Layout::Offset(fmt) => {
                if OFFSET_MARKER.is_match(text) {
                    DateTime::parse_from_str(text, fmt).ok()
                } else {
                    DateTime::parse_from_str(&format!("{text} +0000"), fmt).ok()
                }
            }
            Layout::NoYear(fmt) => {
                let year = clock.now().year();
                NaiveDateTime::parse_from_str(&format!("{year} {text}"), &format!("%Y {fmt}"))
                    .ok()
                    .map(as_utc)
            }
        }
    }
}

/// Convert a timestamp substring into an absolute point in time.
///
/// Returns `None` when no layout matches. Never panics on malformed input.
pub fn normalize(text: &str, clock: &dyn Clock) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    for format in FORMATS {
        if let Some(ts) = format.parse(text, clock) {
            tracing::trace!(format = format.name, input = text, "timestamp normalized");
            return Some(ts);
        }
    }

    parse_iso8601(text)
}

/// Generic ISO-8601 parse. A trailing `Z` means UTC.
fn parse_iso8601(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = match text.strip_suffix('Z').or_else(|| text.strip_suffix('z')) {
        Some(stem) => format!("{stem}+00:00"),
        None => text.to_string(),
    };

    if let Ok(ts) = DateTime::parse_from_rfc3339(&text) {
        return Some(ts);
    }
    if let Some(ts) = ISO_OFFSET_LAYOUTS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(&text, fmt).ok())
    {
        return Some(ts);
    }
    if let Some(naive) = ISO_NAIVE_LAYOUTS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&text, fmt).ok())
    {
        return Some(as_utc(naive));
    }

    NaiveDate::parse_from_str(&text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(as_utc)
}

fn as_utc(naive: NaiveDateTime) -> DateTime<FixedOffset> {
    naive.and_utc().fixed_offset()
}
