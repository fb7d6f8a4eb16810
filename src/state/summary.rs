//! The fixed-schema summary consumed by the mini-CI dashboard.

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// One line of the dashboard: a submission and its test outcome counts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SummaryRecord {
    pub release: String,
    pub formfactor: String,
    pub canonical_id: String,
    pub submission_id: u64,
    /// Creation (live report) or last update (CSV report) date.
    pub date: String,
    pub passed: u64,
    pub failed: u64,
    pub skipped: u64,
    pub total: u64,
    /// Link to the checkbox log. The dashboard reads it as `pastebin`.
    #[serde(rename = "pastebin", alias = "checkbox_log_url")]
    pub checkbox_log_url: String,
}

/// Names accepted when building a [`SummaryRecord`] field by field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SummaryField {
    Release,
    FormFactor,
    CanonicalId,
    SubmissionId,
    Date,
    Passed,
    Failed,
    Skipped,
    Total,
    CheckboxLogUrl,
}

impl SummaryField {
    pub const ALL: [SummaryField; 10] = [
        SummaryField::Release,
        SummaryField::FormFactor,
        SummaryField::CanonicalId,
        SummaryField::SubmissionId,
        SummaryField::Date,
        SummaryField::Passed,
        SummaryField::Failed,
        SummaryField::Skipped,
        SummaryField::Total,
        SummaryField::CheckboxLogUrl,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SummaryField::Release => "release",
            SummaryField::FormFactor => "formfactor",
            SummaryField::CanonicalId => "canonical_id",
            SummaryField::SubmissionId => "submission_id",
            SummaryField::Date => "date",
            SummaryField::Passed => "passed",
            SummaryField::Failed => "failed",
            SummaryField::Skipped => "skipped",
            SummaryField::Total => "total",
            SummaryField::CheckboxLogUrl => "checkbox_log_url",
        }
    }
}

impl fmt::Display for SummaryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SummaryField {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        SummaryField::ALL
            .into_iter()
            .find(|field| field.as_str() == name)
            .ok_or_else(|| Error::InvalidField(name.to_string()))
    }
}

impl SummaryRecord {
    /// Builds a record from `(name, value)` pairs.
    ///
    /// Every name is checked before anything is assigned, so an unknown
    /// name fails with [`Error::InvalidField`] and nothing is built. All ten
    /// fields must be present.
    pub fn from_fields<I, K>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let fields = fields
            .into_iter()
            .map(|(name, value)| Ok((name.as_ref().parse::<SummaryField>()?, value)))
            .collect::<Result<Vec<_>>>()?;

        let mut map = Map::new();
        for (field, value) in fields {
            map.insert(field.as_str().to_string(), value);
        }
        if let Some(missing) = SummaryField::ALL
            .into_iter()
            .find(|field| !map.contains_key(field.as_str()))
        {
            return Err(Error::MissingField(missing.as_str()));
        }

        serde_json::from_value(Value::Object(map)).map_err(|e| Error::decode("summary record", e))
    }
}

/// The report file: every summary record, in query order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub records: Vec<SummaryRecord>,
}

impl Report {
    pub fn new(records: Vec<SummaryRecord>) -> Self {
        Self { records }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::encode("report", e))
    }

    /// Serializes the whole report into a temporary file next to `path`,
    /// then renames it over `path`. A failure leaves `path` untouched.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
        file.write_all(json.as_bytes())
            .and_then(|()| file.as_file().sync_all())
            .map_err(|e| Error::io(file.path(), e))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o644))
                .map_err(|e| Error::io(file.path(), e))?;
        }
        file.persist(path).map_err(|e| Error::io(path, e.error))?;
        Ok(())
    }
}
