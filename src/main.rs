use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};

use minici_report::cli::args::Args;
use minici_report::cli::commands;
use minici_report::config::Settings;
use minici_report::constants;
use minici_report::logging;

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    logging::init(args.debug).wrap_err("failed to install logger")?;

    let settings = Settings::load(args.config.as_deref()).wrap_err("failed to load configuration")?;
    let today = chrono::Local::now().date_naive();

    let (report, path) =
        commands::run(&args, &settings, today).wrap_err("failed to generate report")?;

    println!(
        "{}: {} ({} records)",
        constants::MSG_REPORT_WRITTEN,
        path.display(),
        report.records.len()
    );
    Ok(())
}
