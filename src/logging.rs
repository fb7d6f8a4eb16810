//! Diagnostic logging to stderr.

use tracing::level_filters::LevelFilter;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{filter, fmt, Layer, Registry};

/// Target prefix of every event this crate emits.
const CRATE_TARGET: &str = "minici_report";

/// Installs the global subscriber.
///
/// This crate logs at WARN, or DEBUG with `debug`; dependencies only at ERROR.
pub fn init(debug: bool) -> Result<(), SetGlobalDefaultError> {
    let level = if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    let targets = filter::Targets::new()
        .with_target(CRATE_TARGET, level)
        .with_default(LevelFilter::ERROR);
    let fmt = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(targets);

    tracing::subscriber::set_global_default(Registry::default().with(fmt))
}
