//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::report::ReportArgs;

/// Business-hours report for calendar feeds.
///
/// Counts, per event title, how many hours fall inside 09:00-17:00 and how
/// many fall outside, over the events fully contained in the chosen range.
#[derive(Debug, Parser)]
#[command(name = "slastats", version, about, long_about = None)]
#[command(after_help = "Example: slastats http://example.com/example.ics --from 2020-01-01 --until 2020-12-31")]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub report: ReportArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_source_and_range() {
        let cli = Cli::try_parse_from([
            "slastats",
            "work.ics",
            "--from",
            "2020-01-01",
            "--until",
            "2020-12-31",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.report.source.as_deref(), Some("work.ics"));
        assert_eq!(cli.report.from.as_deref(), Some("2020-01-01"));
        assert_eq!(cli.report.until.as_deref(), Some("2020-12-31"));
        assert!(cli.report.json);
        assert!(!cli.verbose);
    }

    #[test]
    fn everything_is_optional() {
        let cli = Cli::try_parse_from(["slastats", "-v"]).unwrap();

        assert!(cli.verbose);
        assert!(cli.report.source.is_none());
        assert!(cli.report.from.is_none());
        assert!(cli.report.until.is_none());
    }
}
