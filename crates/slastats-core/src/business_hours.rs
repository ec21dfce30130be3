//! Classification of hour slices against the fixed business-hours window.

use std::fmt;
use std::ops::Range;

use chrono::{DateTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

/// Hours of the day (on the timestamp's own clock) that count as business hours.
///
/// 09:00 inclusive to 17:00 exclusive, every day of the week.
pub const BUSINESS_HOURS: Range<u32> = 9..17;

/// Which side of the business-hours window an hour slice falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    /// The slice starts within business hours.
    Inside,
    /// The slice starts outside business hours.
    Outside,
}

impl Bucket {
    /// String representation used in reports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inside => "inside",
            Self::Outside => "outside",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classifies the hour slice starting at `instant`.
///
/// Only the hour-of-day is inspected; minutes and seconds are ignored, so
/// 16:59 is still inside and 08:59 is still outside.
pub fn classify<Tz: TimeZone>(instant: &DateTime<Tz>) -> Bucket {
    if BUSINESS_HOURS.contains(&instant.hour()) {
        Bucket::Inside
    } else {
        Bucket::Outside
    }
}
