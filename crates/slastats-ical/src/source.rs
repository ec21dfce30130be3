//! Where calendar text comes from.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use tokio::io::AsyncReadExt;

use crate::CalendarError;

/// Default request timeout for feed downloads.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A calendar location given on the command line or in configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// An `http://` or `https://` feed.
    Url(String),
    /// A local `.ics` file.
    File(PathBuf),
    /// Standard input (`-`).
    Stdin,
}

impl Source {
    /// Classifies a source argument.
    ///
    /// `-` means stdin, anything with an HTTP(S) scheme is a URL, and
    /// everything else is treated as a file path.
    pub fn parse(arg: &str) -> Self {
        let trimmed = arg.trim();
        if trimmed == "-" {
            return Self::Stdin;
        }
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(arg))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdin => write!(f, "<stdin>"),
        }
    }
}

/// Options for [`fetch`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Timeout applied to the whole HTTP request.
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Reads the raw calendar text from `source`.
pub async fn fetch(source: &Source, options: &FetchOptions) -> Result<String, CalendarError> {
    tracing::debug!(%source, "fetching calendar");

    let text = match source {
        Source::Url(url) => fetch_url(url, options).await?,
        Source::File(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| CalendarError::Read {
                    path: path.clone(),
                    source,
                })?
        }
        Source::Stdin => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .map_err(CalendarError::Stdin)?;
            text
        }
    };

    tracing::debug!(bytes = text.len(), "calendar fetched");
    Ok(text)
}

async fn fetch_url(url: &str, options: &FetchOptions) -> Result<String, CalendarError> {
    let http = reqwest::Client::builder()
        .timeout(options.timeout)
        .build()
        .map_err(CalendarError::ClientBuild)?;

    let response = http.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CalendarError::Status {
            url: url.to_string(),
            status,
        });
    }

    Ok(response.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FEED: &str = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n";

    #[test]
    fn parse_classifies_sources() {
        assert_eq!(Source::parse("-"), Source::Stdin);
        assert_eq!(
            Source::parse("https://example.com/cal.ics"),
            Source::Url("https://example.com/cal.ics".to_string())
        );
        assert_eq!(
            Source::parse("HTTP://example.com/cal.ics"),
            Source::Url("HTTP://example.com/cal.ics".to_string())
        );
        assert_eq!(
            Source::parse("calendars/work.ics"),
            Source::File(PathBuf::from("calendars/work.ics"))
        );
    }

    #[test]
    fn display_names_the_source() {
        assert_eq!(Source::Stdin.to_string(), "<stdin>");
        assert_eq!(
            Source::File(PathBuf::from("work.ics")).to_string(),
            "work.ics"
        );
    }

    #[tokio::test]
    async fn fetch_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FEED.as_bytes()).unwrap();

        let source = Source::File(file.path().to_path_buf());
        let text = fetch(&source, &FetchOptions::default()).await.unwrap();
        assert_eq!(text, FEED);
    }

    #[tokio::test]
    async fn fetch_missing_file_names_path() {
        let temp = tempfile::tempdir().unwrap();
        let missing = temp.path().join("missing.ics");

        let err = fetch(&Source::File(missing), &FetchOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CalendarError::Read { .. }));
        assert!(err.to_string().contains("missing.ics"));
    }

    #[tokio::test]
    async fn fetch_downloads_feed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/team.ics"))
            .respond_with(ResponseTemplate::new(200).set_body_string(FEED))
            .mount(&server)
            .await;

        let source = Source::Url(format!("{}/team.ics", server.uri()));
        let text = fetch(&source, &FetchOptions::default()).await.unwrap();
        assert_eq!(text, FEED);
    }

    #[tokio::test]
    async fn fetch_rejects_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone.ics"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let source = Source::Url(format!("{}/gone.ics", server.uri()));
        let err = fetch(&source, &FetchOptions::default())
            .await
            .unwrap_err();
        match err {
            CalendarError::Status { status, .. } => assert_eq!(status.as_u16(), 404),
            other => panic!("expected status error, got {other:?}"),
        }
    }
}
