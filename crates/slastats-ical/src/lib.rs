//! iCalendar event source for slastats.
//!
//! Provides the collaborators the aggregation core leaves to its caller:
//! - Fetching raw calendar text from a URL, a file, or stdin
//! - Decoding `VEVENT` components into [`slastats_core::Event`]s

use std::path::PathBuf;

use thiserror::Error;

mod parse;
pub mod source;

pub use parse::parse_calendar;
pub use source::{FetchOptions, Source, fetch};

/// Calendar retrieval and decoding errors.
#[derive(Debug, Error)]
pub enum CalendarError {
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("failed to GET iCal feed: {0}")]
    Request(#[from] reqwest::Error),
    /// The feed answered with a non-success status.
    #[error("iCal feed {url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    /// Failed to read a calendar file.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Failed to read the calendar from stdin.
    #[error("failed to read iCal data from stdin: {0}")]
    Stdin(#[source] std::io::Error),
    /// The text is not a valid iCalendar document.
    #[error("failed to parse iCal feed: {0}")]
    Parse(String),
}
