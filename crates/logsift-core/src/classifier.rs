//! Line classification: raw text line to [`LogEntry`].
//!
//! Recognition is a priority-ordered chain:
//!
//! ```text
//! access_log ─► application_log ─► syslog ─► web_server_log ─► keyword sniff ─► catch-all
//! ```
//!
//! The first [`FormatPattern`] whose matcher accepts the line wins. Each
//! pattern owns its derivation rule for level, message and source. Lines that
//! no pattern accepts still yield an entry, so every non-blank, non-comment
//! line is classified.

use chrono::{DateTime, FixedOffset};
use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::clock::Clock;
use crate::timestamp;
use crate::types::{LogEntry, DEFAULT_LEVEL, UNKNOWN_SOURCE};

/// Source tag stamped on web access-log entries.
pub const ACCESS_LOG_SOURCE: &str = "apache";

static ACCESS_LOG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?P<ip>\d+\.\d+\.\d+\.\d+) - - \[(?P<timestamp>[^\]]+)\] "(?P<method>\w+) (?P<url>\S+) (?P<protocol>[^"]+)" (?P<status>\d+) (?P<size>\d+|-)"#,
    )
    .expect("access log regex")
});

// The level token must be alphabetic and end on a word boundary; otherwise a
// web-server line's leading host address would read as a level.
static APPLICATION_LOG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<timestamp>\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}[,.]?\d*) \[?(?P<level>[A-Za-z]\w*)\]?\s*:?\s*(?P<message>.*)$",
    )
    .expect("application log regex")
});

static SYSLOG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<timestamp>[A-Za-z]{3}\s+\d{1,2} \d{2}:\d{2}:\d{2}) (?P<hostname>[\w.-]+) (?P<source>[\w./-]+?)(?:\[(?P<pid>\d+)\])?: (?P<message>.*)$",
    )
    .expect("syslog regex")
});

static WEB_SERVER_LOG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<timestamp>\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}) (?P<server_ip>\S+) (?P<method>\w+) (?P<uri>\S+) (?P<query>\S+) (?P<port>\d+) (?P<username>\S+) (?P<client_ip>\S+) (?P<user_agent>\S+) (?P<referer>\S+) (?P<status>\d+) (?P<substatus>\d+) (?P<win32_status>\d+) (?P<time_taken>\d+)",
    )
    .expect("web server log regex")
});

static SEVERITY_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(ERROR|WARN|INFO|DEBUG|TRACE|FATAL)").expect("severity keyword regex")
});

/// Fields a pattern derives from one matched line. The timestamp is still
/// text; the classifier normalizes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derived<'a> {
    pub timestamp: Option<&'a str>,
    pub level: String,
    pub message: String,
    pub source: String,
}

/// A named extraction rule: a matcher plus how to derive level, message and
/// source from its captures.
pub struct FormatPattern {
    name: &'static str,
    matcher: &'static LazyLock<Regex>,
    derive: for<'a> fn(&Captures<'a>) -> Derived<'a>,
}

impl FormatPattern {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Match `line` against this pattern alone.
    pub fn extract<'a>(&self, line: &'a str) -> Option<Derived<'a>> {
        self.matcher.captures(line).map(|caps| (self.derive)(&caps))
    }
}

impl std::fmt::Debug for FormatPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatPattern")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Format patterns in priority order. More specific dialects come first.
pub static PATTERNS: [FormatPattern; 4] = [
    FormatPattern {
        name: "access_log",
        matcher: &ACCESS_LOG,
        derive: derive_access_log,
    },
    FormatPattern {
        name: "application_log",
        matcher: &APPLICATION_LOG,
        derive: derive_from_groups,
    },
    FormatPattern {
        name: "syslog",
        matcher: &SYSLOG,
        derive: derive_syslog,
    },
    FormatPattern {
        name: "web_server_log",
        matcher: &WEB_SERVER_LOG,
        derive: derive_from_groups,
    },
];

fn group<'a>(caps: &Captures<'a>, name: &str) -> Option<&'a str> {
    caps.name(name).map(|m| m.as_str())
}

/// Status below 400 is `INFO`, anything else `ERROR`.
fn derive_access_log<'a>(caps: &Captures<'a>) -> Derived<'a> {
    let status = group(caps, "status").unwrap_or_default();
    let failed = status.parse::<u64>().map_or(true, |code| code >= 400);
    Derived {
        timestamp: group(caps, "timestamp"),
        level: if failed { "ERROR" } else { DEFAULT_LEVEL }.to_string(),
        message: format!(
            "{} {} - {}",
            group(caps, "method").unwrap_or_default(),
            group(caps, "url").unwrap_or_default(),
            status
        ),
        source: ACCESS_LOG_SOURCE.to_string(),
    }
}

/// Syslog carries no severity in its header; always `INFO`.
fn derive_syslog<'a>(caps: &Captures<'a>) -> Derived<'a> {
    Derived {
        timestamp: group(caps, "timestamp"),
        level: DEFAULT_LEVEL.to_string(),
        message: group(caps, "message").unwrap_or_default().to_string(),
        source: group(caps, "source").unwrap_or_default().to_string(),
    }
}

fn derive_from_groups<'a>(caps: &Captures<'a>) -> Derived<'a> {
    Derived {
        timestamp: group(caps, "timestamp"),
        level: group(caps, "level").unwrap_or(DEFAULT_LEVEL).to_string(),
        message: group(caps, "message").unwrap_or_default().to_string(),
        source: group(caps, "source").unwrap_or_default().to_string(),
    }
}

/// Which link of the chain produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// A named format pattern matched.
    Pattern(&'static str),
    /// No pattern matched; a severity keyword was found in the line.
    Keyword,
    /// Nothing matched.
    CatchAll,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub entry: LogEntry,
    pub strategy: Strategy,
}

/// `true` for lines the classifier skips: blank or `#`-prefixed after trimming.
pub fn is_skippable(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#')
}

/// Classify one raw line. Returns `None` only for blank and comment lines.
pub fn classify(line: &str, line_number: usize, clock: &dyn Clock) -> Option<LogEntry> {
    classify_detailed(line, line_number, clock).map(|c| c.entry)
}

/// Like [`classify`], also reporting which strategy produced the entry.
pub fn classify_detailed(
    line: &str,
    line_number: usize,
    clock: &dyn Clock,
) -> Option<Classification> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    for pattern in &PATTERNS {
        let Some(derived) = pattern.extract(line) else {
            continue;
        };
        let parsed = derived
            .timestamp
            .and_then(|text| timestamp::normalize(text, clock));
        let entry = LogEntry::new(
            parsed.unwrap_or_else(|| wall_clock(clock)),
            &derived.level,
            derived.message,
            derived.source,
            line,
            line_number,
        );
        let entry = if parsed.is_some() {
            entry
        } else {
            tracing::debug!(
                line_number,
                pattern = pattern.name,
                "timestamp unparseable, using wall clock"
            );
            entry.estimated()
        };
        return Some(Classification {
            entry,
            strategy: Strategy::Pattern(pattern.name),
        });
    }

    let (level, strategy) = match SEVERITY_KEYWORD.find(line) {
        Some(m) => (m.as_str(), Strategy::Keyword),
        None => (DEFAULT_LEVEL, Strategy::CatchAll),
    };
    tracing::debug!(line_number, ?strategy, "no format pattern matched");

    let entry = LogEntry::new(
        wall_clock(clock),
        level,
        line,
        UNKNOWN_SOURCE,
        line,
        line_number,
    )
    .estimated();
    Some(Classification { entry, strategy })
}

fn wall_clock(clock: &dyn Clock) -> DateTime<FixedOffset> {
    clock.now().fixed_offset()
}
