//! Business-hours aggregation.
//!
//! Sums, per category, how many hours of each event fall inside and outside
//! business hours, over the events fully contained in a [`DateRange`].
//!
//! # Algorithm Summary
//!
//! 1. Drop every event not fully contained in the range (no clipping)
//! 2. Walk each remaining event from its start in one-hour steps, classifying
//!    the start of every step and adding one whole hour to its bucket
//! 3. Record the start of the first and the end of the last included event,
//!    in input order
//!
//! A trailing partial hour still counts as a full hour, so an event of
//! 30 minutes contributes one hour.

use std::collections::BTreeMap;
use std::ops::AddAssign;

use chrono::{DateTime, Duration, TimeZone};

use crate::business_hours::{Bucket, classify};
use crate::event::{CalendarEvent, DateRange};

/// Whole-hour totals for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryTotals {
    /// Time counted inside business hours.
    pub inside: Duration,
    /// Time counted outside business hours.
    pub outside: Duration,
}

impl Default for CategoryTotals {
    fn default() -> Self {
        Self {
            inside: Duration::zero(),
            outside: Duration::zero(),
        }
    }
}

impl CategoryTotals {
    /// Whole hours inside business hours.
    pub fn inside_hours(&self) -> i64 {
        self.inside.num_hours()
    }

    /// Whole hours outside business hours.
    pub fn outside_hours(&self) -> i64 {
        self.outside.num_hours()
    }

    /// Whole hours in either bucket.
    pub fn total_hours(&self) -> i64 {
        self.inside_hours() + self.outside_hours()
    }

    fn add_hour(&mut self, bucket: Bucket) {
        match bucket {
            Bucket::Inside => self.inside += Duration::hours(1),
            Bucket::Outside => self.outside += Duration::hours(1),
        }
    }
}

impl AddAssign for CategoryTotals {
    fn add_assign(&mut self, rhs: Self) {
        self.inside += rhs.inside;
        self.outside += rhs.outside;
    }
}

/// Result of aggregating a sequence of events.
#[derive(Debug, Clone)]
pub struct AggregationResult<Tz: TimeZone> {
    /// Totals per category, ordered by label (case-sensitive, byte order).
    pub totals: BTreeMap<String, CategoryTotals>,

    /// Start of the first included event, in input order.
    ///
    /// This is not necessarily the earliest start when the input is unsorted.
    pub first_seen: Option<DateTime<Tz>>,

    /// End of the last included event, in input order.
    ///
    /// This is not necessarily the latest end when the input is unsorted.
    pub last_seen: Option<DateTime<Tz>>,
}

impl<Tz: TimeZone> AggregationResult<Tz> {
    fn new() -> Self {
        Self {
            totals: BTreeMap::new(),
            first_seen: None,
            last_seen: None,
        }
    }

    /// Returns true if no event was included.
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Iterates categories in sorted order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &CategoryTotals)> {
        self.totals.iter().map(|(name, totals)| (name.as_str(), totals))
    }

    /// Sum of all categories.
    pub fn grand_total(&self) -> CategoryTotals {
        let mut sum = CategoryTotals::default();
        for totals in self.totals.values() {
            sum += *totals;
        }
        sum
    }
}

/// Splits the span `[start, end)` into whole-hour inside/outside totals.
///
/// Each step is classified by its starting instant. The last step counts as a
/// full hour even when `end` falls before it completes. Returns zero totals
/// when `end` is not after `start`.
pub fn split_hours<Tz: TimeZone>(start: &DateTime<Tz>, end: &DateTime<Tz>) -> CategoryTotals {
    let mut totals = CategoryTotals::default();
    let mut cursor = start.clone();

    while cursor < *end {
        totals.add_hour(classify(&cursor));
        cursor += Duration::hours(1);
    }

    totals
}

/// Aggregates business-hours totals per category.
///
/// Events are visited in the order given. Only events fully contained in
/// `range` contribute; a category appears in the result as soon as one of
/// its events is included, even if that event spans zero hours.
pub fn aggregate<E: CalendarEvent>(
    events: &[E],
    range: &DateRange<E::Tz>,
) -> AggregationResult<E::Tz> {
    let mut result = AggregationResult::new();
    let mut skipped = 0usize;

    for event in events {
        if !range.contains(event) {
            tracing::trace!(category = event.category(), "skipping event outside range");
            skipped += 1;
            continue;
        }

        if result.first_seen.is_none() {
            result.first_seen = Some(event.start().clone());
        }
        result.last_seen = Some(event.end().clone());

        let hours = split_hours(event.start(), event.end());
        *result
            .totals
            .entry(event.category().to_string())
            .or_default() += hours;
    }

    tracing::debug!(
        included = events.len() - skipped,
        skipped,
        categories = result.totals.len(),
        "aggregated events"
    );

    result
}
