//! Calendar events and the date range used to select them.

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone};
use thiserror::Error;

/// The range's start lies after its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("start time after end time")]
pub struct InvalidRange;

/// An event that can be aggregated.
///
/// This trait allows aggregation to work with different event representations
/// (e.g., events decoded from an iCalendar feed, or test fixtures).
pub trait CalendarEvent {
    /// Clock the event's timestamps are expressed on.
    type Tz: TimeZone;

    /// Returns when the event starts.
    fn start(&self) -> &DateTime<Self::Tz>;

    /// Returns when the event ends. Expected to be no earlier than `start`.
    fn end(&self) -> &DateTime<Self::Tz>;

    /// Returns the label the event is grouped under.
    fn category(&self) -> &str;
}

/// One calendar occurrence.
#[derive(Debug, Clone)]
pub struct Event<Tz: TimeZone> {
    /// When the event starts.
    pub start: DateTime<Tz>,
    /// When the event ends.
    pub end: DateTime<Tz>,
    /// Display label; many events may share one.
    pub category: String,
}

impl<Tz: TimeZone> Event<Tz> {
    /// Creates a new event.
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>, category: impl Into<String>) -> Self {
        Self {
            start,
            end,
            category: category.into(),
        }
    }
}

impl<Tz: TimeZone> CalendarEvent for Event<Tz> {
    type Tz = Tz;

    fn start(&self) -> &DateTime<Tz> {
        &self.start
    }

    fn end(&self) -> &DateTime<Tz> {
        &self.end
    }

    fn category(&self) -> &str {
        &self.category
    }
}

/// Inclusion window for aggregation.
///
/// Both bounds are inclusive. The fields are public so callers that have
/// already validated their bounds can build a range directly; [`DateRange::new`]
/// checks `from <= until` for everyone else.
#[derive(Debug, Clone)]
pub struct DateRange<Tz: TimeZone> {
    /// Earliest admissible event start.
    pub from: DateTime<Tz>,
    /// Latest admissible event end.
    pub until: DateTime<Tz>,
}

impl<Tz: TimeZone> DateRange<Tz> {
    /// Creates a range, rejecting one whose start lies after its end.
    pub fn new(from: DateTime<Tz>, until: DateTime<Tz>) -> Result<Self, InvalidRange> {
        if from > until {
            return Err(InvalidRange);
        }
        Ok(Self { from, until })
    }

    /// Returns true if the event lies entirely within the range.
    ///
    /// Events that only partially overlap are not contained.
    pub fn contains<E: CalendarEvent<Tz = Tz>>(&self, event: &E) -> bool {
        *event.start() >= self.from && *event.end() <= self.until
    }
}

/// Interprets a wall-clock time on `tz`.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant. Times in a
/// DST spring-forward gap move one hour later, past the gap.
pub fn on_clock<Tz: TimeZone>(naive: NaiveDateTime, tz: &Tz) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
}
