//! Free-form date parsing and start-of-window defaults.

use chrono::{DateTime, Days, Months, NaiveDate, NaiveDateTime, NaiveTime};

use crate::constants;
use crate::error::{Error, Result};

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y%m%d",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d %Y",
];

/// Parses a user-supplied date or timestamp.
///
/// Date-only input means midnight. An explicit UTC offset is dropped and the
/// wall-clock time kept.
pub fn parse_date(text: &str) -> Result<NaiveDateTime> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.naive_local());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Ok(date.and_time(NaiveTime::MIN));
        }
    }

    Err(Error::InvalidDate(text.to_string()))
}

/// Formats a timestamp the way the API expects `from_date`.
pub fn format_api_datetime(dt: &NaiveDateTime) -> String {
    dt.format(constants::API_DATETIME_FORMAT).to_string()
}

/// Normalizes free-form text to `YYYY-MM-DDTHH:MM:SS`.
pub fn normalize_from_date(text: &str) -> Result<String> {
    parse_date(text).map(|dt| format_api_datetime(&dt))
}

/// Start of the reporting window as chosen on the command line.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum StartDate {
    /// Explicit date text, passed through for later normalization.
    Explicit(String),
    OneWeek,
    OneMonth,
    /// Nothing given: the default lookback window.
    #[default]
    Default,
}

impl StartDate {
    /// Resolves the choice to date text relative to `today`.
    pub fn resolve(&self, today: NaiveDate) -> Result<String> {
        let day = match self {
            StartDate::Explicit(text) => return Ok(text.clone()),
            StartDate::OneWeek => today.checked_sub_days(Days::new(constants::ONE_WEEK_DAYS)),
            StartDate::OneMonth => {
                today.checked_sub_months(Months::new(constants::ONE_MONTH_MONTHS))
            }
            StartDate::Default => {
                today.checked_sub_days(Days::new(constants::DEFAULT_LOOKBACK_DAYS))
            }
        };
        day.map(|d| d.format("%Y-%m-%d").to_string())
            .ok_or_else(|| Error::InvalidDate(format!("{self:?} before {today}")))
    }
}
