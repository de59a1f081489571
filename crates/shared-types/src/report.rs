//! Final review report.
//!
//! Field names are the contract consumed by downstream tooling and must not
//! change.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::{MissingDocument, Severity};

/// One issue in the flattened report, tagged with its source document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportIssue {
    pub document: String,
    pub issue: String,
    pub severity: Severity,
    pub suggestion: String,
    pub paragraph_index: Option<usize>,
    pub legal_reference: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityBuckets {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityBuckets {
    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub process: String,
    pub documents_uploaded: usize,
    pub required_documents: usize,
    pub uploaded_documents: Vec<String>,
    pub missing_documents: Vec<MissingDocument>,
    pub issues_found: Vec<ReportIssue>,
    pub reviewed_files: Vec<PathBuf>,
    pub total_issues: usize,
    pub high_severity_count: usize,
    pub severity_buckets: SeverityBuckets,
}

/// Structured top-level failure, written in place of a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub error: String,
}

impl ErrorReport {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
