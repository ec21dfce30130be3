//! Decoding of iCalendar text into aggregatable events.
//!
//! Each `VEVENT` yields at most one event, in document order. Recurrence
//! rules are not expanded.

use chrono::{DateTime, Duration, NaiveTime, TimeZone};
use icalendar::{Calendar, CalendarComponent, CalendarDateTime, Component, DatePerhapsTime};
use slastats_core::{Event, on_clock};

use crate::CalendarError;

/// Parses iCalendar text, expressing every timestamp on the `tz` clock.
///
/// Category is the event's `SUMMARY` (empty when absent). Events without a
/// usable `DTSTART` are skipped. A missing `DTEND` yields a zero-length event,
/// or a one-day event when the start is a bare date.
pub fn parse_calendar<Tz: TimeZone>(text: &str, tz: &Tz) -> Result<Vec<Event<Tz>>, CalendarError> {
    let text = normalize_delimiters(text.trim_start_matches('\u{feff}').trim_start());
    if !text.starts_with("BEGIN:VCALENDAR") {
        return Err(CalendarError::Parse("missing BEGIN:VCALENDAR".to_string()));
    }

    let calendar: Calendar = text.parse().map_err(CalendarError::Parse)?;

    let mut events = Vec::new();
    for component in &calendar.components {
        let CalendarComponent::Event(vevent) = component else {
            continue;
        };

        // TEXT escapes are already decoded by the parser
        let summary = vevent.get_summary().unwrap_or_default().to_string();

        let Some(raw_start) = vevent.get_start() else {
            tracing::warn!(summary = %summary, "skipping event without DTSTART");
            continue;
        };
        let all_day = matches!(raw_start, DatePerhapsTime::Date(_));
        let Some(start) = resolve(raw_start, tz) else {
            tracing::warn!(summary = %summary, "skipping event with nonexistent DTSTART");
            continue;
        };

        let end = match vevent.get_end() {
            Some(raw_end) => {
                let Some(end) = resolve(raw_end, tz) else {
                    tracing::warn!(summary = %summary, "skipping event with nonexistent DTEND");
                    continue;
                };
                end
            }
            None if all_day => start.clone() + Duration::days(1),
            None => start.clone(),
        };

        events.push(Event::new(start, end, summary));
    }

    tracing::debug!(count = events.len(), "parsed calendar events");
    Ok(events)
}

/// Upper-cases `BEGIN`/`END` lines.
///
/// Component names are case-insensitive, but the parser only recognizes
/// `VCALENDAR` and `VEVENT` spelled in upper case.
fn normalize_delimiters(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        let is_delimiter = ["BEGIN:", "END:"].iter().any(|tag| {
            line.get(..tag.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(tag))
        });
        if is_delimiter {
            out.push_str(&line.to_ascii_uppercase());
        } else {
            out.push_str(line);
        }
    }
    out
}

/// Converts an iCalendar date or date-time onto the `tz` clock.
///
/// Returns `None` only when no instant on the relevant clock matches.
fn resolve<Tz: TimeZone>(value: DatePerhapsTime, tz: &Tz) -> Option<DateTime<Tz>> {
    match value {
        DatePerhapsTime::Date(date) => on_clock(date.and_time(NaiveTime::MIN), tz),
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(instant)) => {
            Some(instant.with_timezone(tz))
        }
        DatePerhapsTime::DateTime(CalendarDateTime::Floating(naive)) => on_clock(naive, tz),
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, tzid }) => {
            match tzid.parse::<chrono_tz::Tz>() {
                Ok(zone) => on_clock(date_time, &zone).map(|instant| instant.with_timezone(tz)),
                Err(err) => {
                    tracing::warn!(%tzid, error = %err, "unknown TZID, using local clock");
                    on_clock(date_time, tz)
                }
            }
        }
    }
}
