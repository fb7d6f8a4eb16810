//! Application-wide constants and configuration values.
//!
//! This module defines the static values used throughout minici-report,
//! including API endpoints, report defaults, date windows, and messages.

// === Application Metadata ===

/// Application name (from Cargo.toml).
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
/// Current application version (from Cargo.toml).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// === Remote API ===

/// Base URL of the certification service.
pub const C3_URL: &str = "https://certification.canonical.com";
/// Submission search endpoint.
pub const ENDPOINT_MACHINE_REPORTS: &str = "/api/v1/machinereports/find/";
/// Per-submission lookup endpoint prefix; the id and a trailing slash follow.
pub const ENDPOINT_SUBMISSIONS: &str = "/api/v1/submissions/";
/// Response format requested from the API.
pub const API_FORMAT: &str = "json";
/// Default number of records per request (0 asks for as many as possible).
pub const DEFAULT_BATCH_LIMIT: u32 = 1;

// === Report ===

/// Default report file, written to the working directory.
pub const REPORT_JSON_NAME: &str = "minici.json";
/// Placeholder for summary fields the API cannot supply.
pub const PLACEHOLDER_NA: &str = "NA";
/// Extension of the local submission databases.
pub const EXT_CSV: &str = "csv";

// === Dates ===

/// Lookback window used when no start option is given.
pub const DEFAULT_LOOKBACK_DAYS: u64 = 10;
/// Lookback window for `--oneweek`.
pub const ONE_WEEK_DAYS: u64 = 7;
/// Lookback window for `--onemonth`, in calendar months.
pub const ONE_MONTH_MONTHS: u32 = 1;
/// Wire format of `from_date`.
pub const API_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// === Configuration ===

/// Directory under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "minici-report";
/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Environment variable naming an explicit configuration file.
pub const ENV_CONFIG: &str = "MINICI_CONFIG";

// === Messages ===

pub const MSG_QUERYING: &str = "Querying submissions";
pub const MSG_REPORT_WRITTEN: &str = "Report written";
pub const MSG_TRUNCATED: &str = "More submissions available than the batch limit returned";
