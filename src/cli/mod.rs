//! Command-line interface module.
//!
//! Provides argument parsing and the report command.

pub mod args;
pub mod commands;
