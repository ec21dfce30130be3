//! Report command for business-hours totals.
//!
//! Loads a calendar, aggregates the events fully contained in the requested
//! range and prints per-category inside/outside hours, either as aligned text
//! or as JSON.

use std::fmt::Display;
use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone};
use clap::Args;
use serde::Serialize;
use slastats_core::{AggregationResult, DateRange, aggregate};
use slastats_ical::{FetchOptions, Source, fetch, parse_calendar};

use crate::Config;
use crate::commands::util::resolve_range;

/// Placeholder printed for a timestamp that was never observed.
const UNSET: &str = "-";

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Calendar to read: an http(s) URL, a path to an .ics file, or `-` for stdin.
    ///
    /// Falls back to `source` from the config file.
    pub source: Option<String>,

    /// Only count events starting at or after this date (YYYY-MM-DD or RFC 3339).
    #[arg(long)]
    pub from: Option<String>,

    /// Only count events ending at or before this date (YYYY-MM-DD or RFC 3339).
    #[arg(long)]
    pub until: Option<String>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

// ========== Text Output ==========

fn format_timestamp<Tz: TimeZone>(ts: Option<&DateTime<Tz>>) -> String
where
    Tz::Offset: Display,
{
    ts.map_or_else(
        || UNSET.to_string(),
        |ts| ts.format("%Y-%m-%d %H:%M").to_string(),
    )
}

/// Writes the human-readable report.
///
/// One line per category in sorted order (`name: inside, outside`), then the
/// first and last timestamps observed among included events.
pub fn write_report<W: Write, Tz: TimeZone>(
    writer: &mut W,
    result: &AggregationResult<Tz>,
) -> std::io::Result<()>
where
    Tz::Offset: Display,
{
    if result.is_empty() {
        writeln!(writer, "No events in range.")?;
    }

    for (name, totals) in result.categories() {
        writeln!(
            writer,
            "{name:>8}: {}, {}",
            totals.inside_hours(),
            totals.outside_hours()
        )?;
    }

    writeln!(writer)?;
    writeln!(writer, "Start: {}", format_timestamp(result.first_seen.as_ref()))?;
    writeln!(writer, "End:   {}", format_timestamp(result.last_seen.as_ref()))?;
    Ok(())
}

// ========== JSON Output ==========

/// JSON report structure.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub range: JsonRange,
    pub categories: Vec<JsonCategory>,
    pub totals: JsonTotals,
    pub first_seen: Option<String>,
    pub last_seen: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JsonRange {
    pub from: String,
    pub until: String,
}

#[derive(Debug, Serialize)]
pub struct JsonCategory {
    pub category: String,
    pub inside_hours: i64,
    pub outside_hours: i64,
}

#[derive(Debug, Serialize)]
pub struct JsonTotals {
    pub inside_hours: i64,
    pub outside_hours: i64,
    pub category_count: usize,
}

/// Formats the aggregation result as pretty-printed JSON.
pub fn format_report_json<Tz: TimeZone>(
    result: &AggregationResult<Tz>,
    range: &DateRange<Tz>,
) -> Result<String>
where
    Tz::Offset: Display,
{
    let grand_total = result.grand_total();

    let report = JsonReport {
        range: JsonRange {
            from: range.from.to_rfc3339(),
            until: range.until.to_rfc3339(),
        },
        categories: result
            .categories()
            .map(|(name, totals)| JsonCategory {
                category: name.to_string(),
                inside_hours: totals.inside_hours(),
                outside_hours: totals.outside_hours(),
            })
            .collect(),
        totals: JsonTotals {
            inside_hours: grand_total.inside_hours(),
            outside_hours: grand_total.outside_hours(),
            category_count: result.totals.len(),
        },
        first_seen: result.first_seen.as_ref().map(DateTime::to_rfc3339),
        last_seen: result.last_seen.as_ref().map(DateTime::to_rfc3339),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

// ========== Public Interface ==========

/// Runs the report command.
pub fn run<W: Write>(writer: &mut W, args: &ReportArgs, config: &Config) -> Result<()> {
    // Validate the range before touching the network.
    let range = resolve_range(args.from.as_deref(), args.until.as_deref(), &Local)?;

    let source_arg = args
        .source
        .as_deref()
        .or(config.source.as_deref())
        .context("no calendar given: pass SOURCE or set `source` in the config file")?;
    let source = Source::parse(source_arg);

    let options = FetchOptions {
        timeout: config.timeout(),
    };
    let runtime = tokio::runtime::Runtime::new().context("failed to initialize tokio runtime")?;
    let text = runtime
        .block_on(fetch(&source, &options))
        .with_context(|| format!("failed to load calendar from {source}"))?;

    let events = parse_calendar(&text, &Local).context("failed to parse calendar")?;
    let result = aggregate(&events, &range);

    if args.json {
        writeln!(writer, "{}", format_report_json(&result, &range)?)?;
    } else {
        write_report(writer, &result)?;
    }

    Ok(())
}
