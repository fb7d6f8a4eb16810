//! Record types: raw API submissions and the summary report built from them.

mod record;
mod summary;

pub use record::{MachineReport, MachineReportPage, PageMeta, SubmissionStatus};
pub use summary::{Report, SummaryField, SummaryRecord};
