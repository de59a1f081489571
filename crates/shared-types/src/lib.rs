pub mod report;
pub mod types;

pub use report::{ErrorReport, Report, ReportIssue, SeverityBuckets};
pub use types::{
    ChecklistResult, Issue, MissingDocument, ProcessDefinition, ProcessedDocument, Severity,
    UNKNOWN_PROCESS,
};
