//! Terminal rendering of statistics and entry listings.

use std::io::{self, Write};

use logsift_core::{LogEntry, Statistics};

const STATS_RULE: usize = 50;
const ENTRIES_RULE: usize = 100;

/// `1234567` → `1,234,567`.
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn write_statistics<W: Write>(
    mut out: W,
    stats: &Statistics,
    top_sources: usize,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "LOG FILE STATISTICS")?;
    writeln!(out, "{}", "=".repeat(STATS_RULE))?;
    writeln!(out, "Total Entries: {}", group_thousands(stats.total_entries))?;
    if stats.total_entries == 0 {
        return Ok(());
    }
    writeln!(out, "Error Rate: {:.2}%", stats.error_rate)?;
    writeln!(out, "Warning Rate: {:.2}%", stats.warning_rate)?;

    writeln!(out)?;
    writeln!(out, "Log Level Distribution:")?;
    for (level, count) in &stats.level_distribution {
        writeln!(
            out,
            "  {:<10}: {:>8} ({:>5.1}%)",
            level,
            group_thousands(*count),
            stats.percentage_of(*count)
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Top Sources:")?;
    for (source, count) in stats.top_sources(top_sources) {
        writeln!(out, "  {:<20}: {}", source, group_thousands(count))?;
    }

    if let (Some(start), Some(end)) = (stats.date_range.start, stats.date_range.end) {
        writeln!(out)?;
        writeln!(out, "Date Range: {} to {}", start.to_rfc3339(), end.to_rfc3339())?;
    }

    writeln!(out)?;
    writeln!(out, "Hourly Distribution:")?;
    for (hour, count) in &stats.hourly_distribution {
        writeln!(
            out,
            "  {hour:02}:00 - {hour:02}:59: {}",
            group_thousands(*count)
        )?;
    }
    Ok(())
}

pub fn write_entries<W: Write>(mut out: W, entries: &[&LogEntry], limit: usize) -> io::Result<()> {
    let shown = entries.len().min(limit);
    writeln!(out)?;
    writeln!(
        out,
        "LOG ENTRIES ({} total, showing first {})",
        group_thousands(entries.len()),
        group_thousands(shown)
    )?;
    writeln!(out, "{}", "=".repeat(ENTRIES_RULE))?;

    for entry in &entries[..shown] {
        writeln!(
            out,
            "[{}] {:<8} | {:<15} | {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.level,
            entry.source,
            entry.message
        )?;
    }

    if entries.len() > shown {
        writeln!(out)?;
        writeln!(
            out,
            "... and {} more entries",
            group_thousands(entries.len() - shown)
        )?;
    }
    Ok(())
}
