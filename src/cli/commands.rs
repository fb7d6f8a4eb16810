//! Report command handler.

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::cli::args::Args;
use crate::config::Settings;
use crate::core::client::{Credentials, QueryClient, QueryFilter};
use crate::core::report::ReportGenerator;
use crate::error::Result;
use crate::state::Report;

/// Runs one report as described by `args`, with "today" fixed by the caller.
///
/// Returns the report and the path it was written to.
pub fn run(args: &Args, settings: &Settings, today: NaiveDate) -> Result<(Report, PathBuf)> {
    let filter = QueryFilter {
        canonical_id: args.canonical_id.clone(),
        release: args.release.clone(),
        form_factor: args.form_factor.clone(),
        from_date: args.start_date().resolve(today)?,
    };

    let client = QueryClient::new(
        &settings.base_url,
        Credentials::new(args.username.clone(), args.api_key.clone()),
        args.batch_limit,
    )?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| settings.report_file.clone());
    let generator = ReportGenerator::new(client, output);

    let report = match &args.from_csv {
        Some(dir) => {
            let dir = dir.as_deref().unwrap_or(&settings.csv_dir);
            generator.generate_json_from_csv(&filter, dir)?
        }
        None => generator.generate_json(&filter)?,
    };
    Ok((report, generator.output().to_path_buf()))
}
