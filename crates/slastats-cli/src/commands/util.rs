//! Shared utilities for CLI commands.

use anyhow::Context;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use slastats_core::{DateRange, on_clock};

/// Wall-clock time used when no `--from` is given.
fn range_floor() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .map_or(NaiveDateTime::MIN, |date| date.and_time(NaiveTime::MIN))
}

/// Wall-clock time used when no `--until` is given.
fn range_ceiling() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(9999, 12, 31)
        .and_then(|date| date.and_hms_opt(23, 59, 59))
        .unwrap_or(NaiveDateTime::MAX)
}

/// Parse a range bound as either a calendar date or an RFC 3339 timestamp.
///
/// Supports:
/// - Date: "2020-01-31" (midnight at the start of that day on `tz`)
/// - RFC 3339: "2020-01-31T17:00:00Z"
pub fn parse_bound<Tz: TimeZone>(s: &str, flag: &str, tz: &Tz) -> anyhow::Result<DateTime<Tz>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(tz));
    }

    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| {
        format!(
            "failed to parse --{flag} '{s}' in format yyyy-mm-dd (or RFC 3339, e.g. 2020-01-31T17:00:00Z)"
        )
    })?;

    on_clock(date.and_time(NaiveTime::MIN), tz)
        .with_context(|| format!("--{flag} '{s}' does not exist on the local clock"))
}

/// Resolve optional range bounds into a concrete [`DateRange`].
///
/// A missing start admits everything from the year 1; a missing end admits
/// everything up to the end of year 9999. Fails if the start lies after the end.
pub fn resolve_range<Tz: TimeZone>(
    from: Option<&str>,
    until: Option<&str>,
    tz: &Tz,
) -> anyhow::Result<DateRange<Tz>> {
    let from = match from {
        Some(s) => parse_bound(s, "from", tz)?,
        None => on_clock(range_floor(), tz).context("failed to resolve default range start")?,
    };
    let until = match until {
        Some(s) => parse_bound(s, "until", tz)?,
        None => on_clock(range_ceiling(), tz).context("failed to resolve default range end")?,
    };

    Ok(DateRange::new(from, until)?)
}
