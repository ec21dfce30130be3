//! Core domain logic for business-hours reporting.
//!
//! This crate contains the fundamental types and logic for:
//! - Classification: deciding whether an hour slice falls inside business hours
//! - Aggregation: summing inside/outside hours per event category over a date range
//!
//! It performs no I/O. Callers hand it already-parsed events and a resolved range.

mod aggregate;
pub mod business_hours;
pub mod event;

pub use aggregate::{AggregationResult, CategoryTotals, aggregate, split_hours};
pub use business_hours::{BUSINESS_HOURS, Bucket, classify};
pub use event::{CalendarEvent, DateRange, Event, InvalidRange, on_clock};
