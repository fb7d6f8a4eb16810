//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};

use crate::constants;
use crate::core::dates::StartDate;

/// Generates the mini-CI report of new C3 submissions for one unit
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("window").args(["start", "oneweek", "onemonth"])))]
pub struct Args {
    /// Launchpad username used to access C3
    pub username: String,

    /// API key used to access C3
    pub api_key: String,

    /// Canonical ID of the unit
    pub canonical_id: String,

    /// Ubuntu release, e.g. "14.04.5 LTS"
    pub release: String,

    /// Form factor label on C3, e.g. Desktop or Portable
    pub form_factor: Option<String>,

    /// Number of records per request, 0 for as many as possible
    #[arg(long, alias = "batch_limit", default_value_t = constants::DEFAULT_BATCH_LIMIT)]
    pub batch_limit: u32,

    /// Start of the report window: YYYY-MM-DD, optionally with THH:MM:SS.
    /// Defaults to 10 days ago
    #[arg(long, value_name = "DATE")]
    pub start: Option<String>,

    /// Report on submissions from the last week
    #[arg(long)]
    pub oneweek: bool,

    /// Report on submissions from the last month
    #[arg(long)]
    pub onemonth: bool,

    /// Read submission ids from the unit's CSV database in DIR instead of searching
    #[arg(long, value_name = "DIR", num_args = 0..=1)]
    pub from_csv: Option<Option<PathBuf>>,

    /// Report file to write (overrides the configured one)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Configuration file
    #[arg(long, value_name = "PATH", env = constants::ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}

impl Args {
    /// The report window chosen on the command line.
    pub fn start_date(&self) -> StartDate {
        match (&self.start, self.oneweek, self.onemonth) {
            (Some(text), _, _) => StartDate::Explicit(text.clone()),
            (None, true, _) => StartDate::OneWeek,
            (None, false, true) => StartDate::OneMonth,
            (None, false, false) => StartDate::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    const BASE: [&str; 5] = ["minici-report", "alice", "key", "201302-12843", "20.04"];

    fn parse(extra: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(BASE.iter().chain(extra.iter()).copied())
    }

    #[test]
    fn test_positionals_and_defaults() {
        let args = parse(&["Desktop"]).unwrap();
        assert_eq!(args.username, "alice");
        assert_eq!(args.canonical_id, "201302-12843");
        assert_eq!(args.form_factor.as_deref(), Some("Desktop"));
        assert_eq!(args.batch_limit, 1);
        assert_eq!(args.start_date(), StartDate::Default);
        assert!(args.from_csv.is_none());
    }

    #[test]
    fn test_form_factor_optional() {
        let args = parse(&[]).unwrap();
        assert!(args.form_factor.is_none());
    }

    #[test]
    fn test_missing_release() {
        let err = Args::try_parse_from(["minici-report", "alice", "key", "id"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_batch_limit_spellings() {
        assert_eq!(parse(&["--batch-limit", "0"]).unwrap().batch_limit, 0);
        assert_eq!(parse(&["--batch_limit", "20"]).unwrap().batch_limit, 20);
        assert!(parse(&["--batch-limit", "-1"]).is_err());
    }

    #[test]
    fn test_start_choices() {
        assert_eq!(
            parse(&["--start", "2021-01-05"]).unwrap().start_date(),
            StartDate::Explicit("2021-01-05".to_string())
        );
        assert_eq!(parse(&["--oneweek"]).unwrap().start_date(), StartDate::OneWeek);
        assert_eq!(parse(&["--onemonth"]).unwrap().start_date(), StartDate::OneMonth);
    }

    #[test]
    fn test_start_options_conflict() {
        for extra in [
            &["--start", "2021-01-05", "--oneweek"][..],
            &["--start", "2021-01-05", "--onemonth"][..],
            &["--oneweek", "--onemonth"][..],
        ] {
            let err = parse(extra).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ArgumentConflict, "{extra:?}");
        }
    }

    #[test]
    fn test_from_csv_with_and_without_dir() {
        let args = parse(&["Desktop", "--from-csv"]).unwrap();
        assert_eq!(args.from_csv, Some(None));
        let args = parse(&["Desktop", "--from-csv", "/srv/db"]).unwrap();
        assert_eq!(args.from_csv, Some(Some(PathBuf::from("/srv/db"))));
    }
}
