use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use chrono::{DateTime, NaiveDate, Utc};
use clap::Parser;
use logsift::config::Config;
use logsift::{report, ExportFormat, FilterCriteria, LogAnalyzer};

const LEVELS: [&str; 6] = ["ERROR", "WARNING", "INFO", "DEBUG", "TRACE", "FATAL"];

#[derive(Parser)]
#[command(
    name = "logsift",
    version,
    about = "Parse, filter, summarise and export log files",
    after_help = "Examples:\n  \
        logsift access.log\n  \
        logsift --file app.log --level ERROR WARNING\n  \
        logsift --file server.log --start-date 2024-01-01 --end-date 2024-01-31\n  \
        logsift --file app.log --keywords \"timeout,connection\" --export results.json"
)]
struct Cli {
    /// Path to the log file to analyze.
    file: Option<PathBuf>,

    /// Path to the log file to analyze (alternative to the positional argument).
    #[arg(long = "file", short = 'f', value_name = "FILE")]
    file_path: Option<PathBuf>,

    /// Keep entries at or after this date (YYYY-MM-DD).
    #[arg(long)]
    start_date: Option<String>,

    /// Keep entries up to the end of this date (YYYY-MM-DD).
    #[arg(long)]
    end_date: Option<String>,

    /// Log levels to include.
    #[arg(long, short, num_args = 1.., value_parser = LEVELS, ignore_case = true)]
    level: Vec<String>,

    /// Comma-separated keywords to search for in messages.
    #[arg(long, short)]
    keywords: Option<String>,

    /// Keep entries whose source contains this text.
    #[arg(long, short)]
    source: Option<String>,

    /// Export the filtered entries to this file.
    #[arg(long, short)]
    export: Option<PathBuf>,

    /// Export format; the export path's extension takes precedence.
    #[arg(long, value_parser = ["json", "csv", "txt"])]
    format: Option<String>,

    /// Show only statistics, not individual entries.
    #[arg(long)]
    stats_only: bool,

    /// Maximum number of entries to list.
    #[arg(long)]
    limit: Option<usize>,

    /// Read configuration from this file instead of ~/.config/logsift/config.toml.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write debug logs to this file (tail -f to inspect).
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug_log.as_deref())?;

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;

    let Some(path) = cli.file.as_ref().or(cli.file_path.as_ref()) else {
        bail!("no log file specified; pass it as an argument or with --file (see --help)");
    };
    let criteria = build_criteria(&cli)?;

    let mut analyzer = LogAnalyzer::new();
    println!("Loading log file: {}", path.display());
    let summary = analyzer.load(path)?;
    println!(
        "Loaded {} entries from {} lines",
        report::group_thousands(summary.parsed_count),
        report::group_thousands(summary.total_lines)
    );

    let filtered = analyzer.filter(&criteria);
    tracing::debug!(matched = filtered.len(), "filter applied");

    {
        let mut stdout = io::stdout().lock();
        report::write_statistics(&mut stdout, analyzer.statistics(), config.display.top_sources)?;
        if !cli.stats_only {
            let limit = cli.limit.unwrap_or(config.display.entry_limit);
            report::write_entries(&mut stdout, &filtered, limit)?;
        }
        stdout.flush()?;
    }

    if let Some(export_path) = &cli.export {
        let format = export_format(export_path, cli.format.as_deref(), &config);
        if !analyzer.export(export_path, &filtered, format) {
            bail!("failed to export results to: {}", export_path.display());
        }
        println!();
        println!("Results exported to: {}", export_path.display());
    }

    Ok(())
}

fn init_tracing(debug_log: Option<&Path>) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("RUST_LOG");
    match debug_log {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open debug log {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .with_env_filter(
                    filter.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
                )
                .init();
            tracing::info!("logsift debug log started");
        }
        None => {
            tracing_subscriber::fmt()
                .with_writer(io::stderr)
                .with_env_filter(
                    filter.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
                )
                .init();
        }
    }
    Ok(())
}

fn build_criteria(cli: &Cli) -> anyhow::Result<FilterCriteria> {
    let mut criteria = FilterCriteria::new()
        .levels(&cli.level)
        .keywords(
            cli.keywords
                .as_deref()
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty()),
        );

    if let Some(date) = &cli.start_date {
        criteria = criteria.start(day_bound(date, "start", (0, 0, 0))?);
    }
    if let Some(date) = &cli.end_date {
        criteria = criteria.end(day_bound(date, "end", (23, 59, 59))?);
    }
    if let Some(source) = &cli.source {
        criteria = criteria.source(source.clone());
    }
    Ok(criteria)
}

fn day_bound(
    date: &str,
    which: &str,
    (h, m, s): (u32, u32, u32),
) -> anyhow::Result<DateTime<Utc>> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("invalid {which} date format: {date}. Use YYYY-MM-DD"))?;
    let bound = day
        .and_hms_opt(h, m, s)
        .with_context(|| format!("invalid time of day for {which} date"))?;
    Ok(bound.and_utc())
}

fn export_format(path: &Path, flag: Option<&str>, config: &Config) -> ExportFormat {
    ExportFormat::from_path(path)
        .or_else(|| flag.and_then(|f| f.parse().ok()))
        .unwrap_or_else(|| config.export.format())
}
