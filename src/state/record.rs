//! Shapes of the certification API responses.

use serde::Deserialize;

/// One submission as returned by the machine-report search.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MachineReport {
    /// Submission id.
    pub id: u64,
    /// Creation timestamp, kept exactly as the server formats it.
    pub created_at: String,
    pub release: String,
    pub form_factor: String,
    pub canonical_id: String,
    pub passed_test_count: u64,
    pub failed_test_count: u64,
    pub skipped_test_count: u64,
    pub test_count: u64,
}

/// Paging block returned next to `objects`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub total_count: Option<u64>,
    /// Path of the next page, if the limit cut the result short.
    #[serde(default)]
    pub next: Option<String>,
}

/// Body of the machine-report search.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MachineReportPage {
    #[serde(default)]
    pub meta: Option<PageMeta>,
    pub objects: Vec<MachineReport>,
}

impl MachineReportPage {
    /// Whether the server holds more matches than this page carries.
    pub fn is_truncated(&self) -> bool {
        self.meta.as_ref().is_some_and(|meta| meta.next.is_some())
    }
}

/// Counts and last update of a single submission.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SubmissionStatus {
    pub passed_test_count: u64,
    pub failed_test_count: u64,
    pub skipped_test_count: u64,
    pub test_count: u64,
    pub updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_ignores_extra_fields() {
        let json = r#"{
            "meta": {"limit": 1, "offset": 0, "total_count": 3, "next": "/api/v1/machinereports/find/?offset=1"},
            "objects": [{
                "id": 7, "created_at": "2021-01-01T00:00:00", "release": "20.04",
                "form_factor": "Desktop", "canonical_id": "X1",
                "passed_test_count": 5, "failed_test_count": 1,
                "skipped_test_count": 0, "test_count": 6,
                "resource_uri": "/api/v1/machinereports/7/"
            }]
        }"#;
        let page: MachineReportPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.objects.len(), 1);
        assert_eq!(page.objects[0].id, 7);
        assert!(page.is_truncated());
    }

    #[test]
    fn test_page_without_meta_is_not_truncated() {
        let page: MachineReportPage = serde_json::from_str(r#"{"objects": []}"#).unwrap();
        assert!(page.objects.is_empty());
        assert!(!page.is_truncated());
    }

    #[test]
    fn test_null_next_is_not_truncated() {
        let page: MachineReportPage =
            serde_json::from_str(r#"{"meta": {"next": null}, "objects": []}"#).unwrap();
        assert!(!page.is_truncated());
    }

    #[test]
    fn test_missing_count_is_rejected() {
        let json = r#"{"objects": [{"id": 1, "created_at": "x", "release": "r",
            "form_factor": "f", "canonical_id": "c", "passed_test_count": 1,
            "failed_test_count": 0, "test_count": 1}]}"#;
        let err = serde_json::from_str::<MachineReportPage>(json).unwrap_err();
        assert!(err.to_string().contains("skipped_test_count"));
    }
}
