//! Mini-CI report generator for the C3 hardware certification service.
//!
//! Queries submissions of one unit since a start date and writes a
//! `{"records": [...]}` summary with pass, fail and skip counts per
//! submission for the dashboard.

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod error;
pub mod logging;
pub mod state;

#[cfg(test)]
mod test_support;
