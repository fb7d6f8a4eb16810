//! Query client, date handling and report generation.

pub mod client;
pub mod dates;
pub mod report;
pub mod submissions;
