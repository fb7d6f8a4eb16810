//! Local submission database used by the CSV report variant.
//!
//! The file is comma separated with a header row. Only the `submission_id`
//! and `checkbox_log_url` columns are read; any others are ignored.

use std::path::{Path, PathBuf};

use crate::constants;
use crate::error::{Error, Result};

const COL_SUBMISSION_ID: &str = "submission_id";
const COL_CHECKBOX_LOG_URL: &str = "checkbox_log_url";

/// One row of the submission database.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionEntry {
    pub submission_id: u64,
    pub checkbox_log_url: String,
}

/// File name of the database for one unit: `<release>-<form_factor>-<canonical_id>.csv`.
pub fn database_path(dir: &Path, release: &str, form_factor: &str, canonical_id: &str) -> PathBuf {
    dir.join(format!(
        "{release}-{form_factor}-{canonical_id}.{}",
        constants::EXT_CSV
    ))
}

/// Reads every entry of the database at `path`, in file order.
pub fn read_submissions(path: &Path) -> Result<Vec<SubmissionEntry>> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_submissions(&content, path)
}

fn parse_submissions(content: &str, path: &Path) -> Result<Vec<SubmissionEntry>> {
    let csv_error = |line: usize, message: String| Error::Csv {
        path: path.to_path_buf(),
        line,
        message,
    };

    let mut records = split_records(content)
        .map_err(|(line, message)| csv_error(line, message))?
        .into_iter();

    let Some((header_line, header)) = records.next() else {
        return Err(csv_error(1, "missing header row".to_string()));
    };
    let column = |name: &str| {
        header
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| csv_error(header_line, format!("missing column {name}")))
    };
    let id_col = column(COL_SUBMISSION_ID)?;
    let url_col = column(COL_CHECKBOX_LOG_URL)?;

    let mut entries = Vec::new();
    for (line_no, fields) in records {
        let field = |idx: usize, name: &str| {
            fields
                .get(idx)
                .map(|f| f.trim())
                .ok_or_else(|| csv_error(line_no, format!("row has no {name} value")))
        };

        let raw_id = field(id_col, COL_SUBMISSION_ID)?;
        let submission_id = raw_id
            .parse::<u64>()
            .map_err(|_| csv_error(line_no, format!("invalid submission id {raw_id:?}")))?;

        entries.push(SubmissionEntry {
            submission_id,
            checkbox_log_url: field(url_col, COL_CHECKBOX_LOG_URL)?.to_string(),
        });
    }

    Ok(entries)
}

type Record = (usize, Vec<String>);

/// Splits the file into records of fields, each tagged with its first line.
///
/// Fields are comma separated; a double-quoted field may hold commas,
/// line breaks and `""` for a literal quote. Blank records are dropped.
fn split_records(content: &str) -> Result<Vec<Record>, (usize, String)> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            ('"', true) => in_quotes = false,
            ('"', false) if current.trim().is_empty() => {
                current.clear();
                in_quotes = true;
            }
            ('\r', false) if chars.peek() == Some(&'\n') => {}
            ('\n', false) => {
                fields.push(std::mem::take(&mut current));
                push_record(&mut records, record_line, std::mem::take(&mut fields));
                line += 1;
                record_line = line;
            }
            ('\n', true) => {
                current.push(c);
                line += 1;
            }
            (',', false) => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }

    if in_quotes {
        return Err((record_line, "unterminated quoted field".to_string()));
    }
    if !current.is_empty() || !fields.is_empty() {
        fields.push(current);
        push_record(&mut records, record_line, fields);
    }
    Ok(records)
}

fn push_record(records: &mut Vec<Record>, line: usize, fields: Vec<String>) {
    if fields.iter().any(|f| !f.trim().is_empty()) {
        records.push((line, fields));
    }
}
