//! Mini-CI report generation.
//!
//! Fetches submissions, projects each one onto a [`SummaryRecord`] and writes
//! the resulting [`Report`] as JSON. The file is only written once every
//! request has succeeded, so a failed run leaves any previous report intact.
//!
//! Records sharing a date are all kept; the dashboard shows every
//! submission, not only the latest one per day.

use std::path::{Path, PathBuf};

use crate::constants;
use crate::core::client::{QueryClient, QueryFilter};
use crate::core::dates;
use crate::core::submissions::{self, SubmissionEntry};
use crate::error::{Error, Result};
use crate::state::{MachineReport, MachineReportPage, Report, SubmissionStatus, SummaryRecord};

/// Builds report files from a [`QueryClient`].
pub struct ReportGenerator {
    client: QueryClient,
    output: PathBuf,
}

impl ReportGenerator {
    pub fn new(client: QueryClient, output: impl Into<PathBuf>) -> Self {
        Self {
            client,
            output: output.into(),
        }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Writes the report for every submission matching `filter`.
    pub fn generate_json(&self, filter: &QueryFilter) -> Result<Report> {
        tracing::info!(
            canonical_id = %filter.canonical_id,
            release = %filter.release,
            from_date = %filter.from_date,
            "{}",
            constants::MSG_QUERYING
        );

        let value = self.client.retrieve_machine_reports(filter)?;
        let page: MachineReportPage =
            serde_json::from_value(value).map_err(|e| Error::decode("machine reports", e))?;

        if page.is_truncated() {
            tracing::warn!(
                limit = self.client.limit(),
                total = ?page.meta.as_ref().and_then(|m| m.total_count),
                "{}",
                constants::MSG_TRUNCATED
            );
        }

        let report = Report::new(page.objects.iter().map(summarize).collect());
        self.write(&report)?;
        Ok(report)
    }

    /// Writes the report for the submissions listed in the unit's CSV
    /// database under `csv_dir`, looking each one up individually.
    pub fn generate_json_from_csv(&self, filter: &QueryFilter, csv_dir: &Path) -> Result<Report> {
        let form_factor = filter.form_factor.as_deref().unwrap_or_default();
        let path =
            submissions::database_path(csv_dir, &filter.release, form_factor, &filter.canonical_id);
        let entries = submissions::read_submissions(&path)?;
        tracing::info!(path = %path.display(), entries = entries.len(), "read submission database");

        let mut records = Vec::with_capacity(entries.len());
        for entry in &entries {
            let status = self.client.submission_status(entry.submission_id)?;
            records.push(summarize_status(filter, entry, &status)?);
        }

        let report = Report::new(records);
        self.write(&report)?;
        Ok(report)
    }

    fn write(&self, report: &Report) -> Result<()> {
        report.write_to(&self.output)?;
        tracing::info!(
            path = %self.output.display(),
            records = report.records.len(),
            "{}",
            constants::MSG_REPORT_WRITTEN
        );
        Ok(())
    }
}

/// Projects one API submission onto the dashboard schema.
///
/// The API has no log link, so that field is always the placeholder.
pub fn summarize(entry: &MachineReport) -> SummaryRecord {
    SummaryRecord {
        release: entry.release.clone(),
        formfactor: entry.form_factor.clone(),
        canonical_id: entry.canonical_id.clone(),
        submission_id: entry.id,
        date: entry.created_at.clone(),
        passed: entry.passed_test_count,
        failed: entry.failed_test_count,
        skipped: entry.skipped_test_count,
        total: entry.test_count,
        checkbox_log_url: constants::PLACEHOLDER_NA.to_string(),
    }
}

fn summarize_status(
    filter: &QueryFilter,
    entry: &SubmissionEntry,
    status: &SubmissionStatus,
) -> Result<SummaryRecord> {
    let updated = dates::parse_date(&status.updated_at)?;
    Ok(SummaryRecord {
        release: filter.release.clone(),
        formfactor: filter.form_factor.clone().unwrap_or_default(),
        canonical_id: filter.canonical_id.clone(),
        submission_id: entry.submission_id,
        date: updated.date().format("%Y-%m-%d").to_string(),
        passed: status.passed_test_count,
        failed: status.failed_test_count,
        skipped: status.skipped_test_count,
        total: status.test_count,
        checkbox_log_url: entry.checkbox_log_url.clone(),
    })
}
