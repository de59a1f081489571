//! Batch report aggregation

use shared_types::{
    ChecklistResult, Issue, ProcessedDocument, Report, ReportIssue, Severity, SeverityBuckets,
};

/// Bucket by the first letter of the severity label, case-insensitive.
///
/// Anything that does not start with `h` or `m`, unrecognised labels
/// included, counts as low.
pub fn severity_buckets<'a, I>(severities: I) -> SeverityBuckets
where
    I: IntoIterator<Item = &'a Severity>,
{
    let mut buckets = SeverityBuckets::default();
    for severity in severities {
        match severity.as_str().chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('h') => buckets.high += 1,
            Some('m') => buckets.medium += 1,
            _ => buckets.low += 1,
        }
    }
    buckets
}

fn report_issue(document: &str, issue: &Issue) -> ReportIssue {
    ReportIssue {
        document: document.to_string(),
        issue: issue.issue.clone(),
        severity: issue.severity.clone(),
        suggestion: issue.suggestion.clone().unwrap_or_default(),
        paragraph_index: issue.paragraph_index,
        legal_reference: issue.legal_reference.clone().unwrap_or_default(),
    }
}

/// Combine per-document results and the checklist into the final report.
///
/// A non-empty `detected_process` overrides the checklist's process.
pub fn generate_report(
    processed: &[ProcessedDocument],
    checklist: &ChecklistResult,
    detected_process: Option<&str>,
) -> Report {
    let issues_found: Vec<ReportIssue> = processed
        .iter()
        .flat_map(|doc| {
            doc.issues
                .iter()
                .map(move |issue| report_issue(&doc.file_name, issue))
        })
        .collect();

    let reviewed_files = processed
        .iter()
        .filter_map(|doc| doc.reviewed_path.clone())
        .collect();

    let buckets = severity_buckets(issues_found.iter().map(|i| &i.severity));

    let process = detected_process
        .filter(|p| !p.is_empty())
        .unwrap_or(checklist.process.as_str())
        .to_string();

    Report {
        process,
        documents_uploaded: checklist.documents_uploaded,
        required_documents: checklist.required_documents,
        uploaded_documents: checklist.uploaded_documents.clone(),
        missing_documents: checklist.missing_documents.clone(),
        total_issues: issues_found.len(),
        high_severity_count: buckets.high,
        severity_buckets: buckets,
        issues_found,
        reviewed_files,
    }
}
