use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Process name used when no checklist matches the upload set
pub const UNKNOWN_PROCESS: &str = "Unknown";

/// Issue severity as it appears in reports.
///
/// Any string other than the three canonical labels is kept verbatim in
/// `Other` so that externally produced results survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    High,
    Medium,
    Low,
    Other(String),
}

impl Severity {
    pub fn as_str(&self) -> &str {
        match self {
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::Other(raw) => raw,
        }
    }
}

impl From<String> for Severity {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "High" => Severity::High,
            "Medium" => Severity::Medium,
            "Low" => Severity::Low,
            _ => Severity::Other(raw),
        }
    }
}

impl From<&str> for Severity {
    fn from(raw: &str) -> Self {
        Severity::from(raw.to_string())
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single defect detected in a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Index into the source document's paragraph sequence
    #[serde(default)]
    pub paragraph_index: Option<usize>,
    pub issue: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_reference: Option<String>,
}

impl Issue {
    pub fn new(severity: Severity, issue: impl Into<String>) -> Self {
        Self {
            paragraph_index: None,
            issue: issue.into(),
            severity,
            suggestion: None,
            legal_reference: None,
        }
    }

    pub fn at_paragraph(mut self, index: Option<usize>) -> Self {
        self.paragraph_index = index;
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach a citation; empty strings are treated as "no citation"
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        let reference = reference.into();
        self.legal_reference = (!reference.is_empty()).then_some(reference);
        self
    }
}

/// A regulatory process and the documents it requires, in declared order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDefinition {
    pub name: String,
    pub required: Vec<String>,
}

impl ProcessDefinition {
    pub fn new(name: &str, required: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            required: required.iter().map(|d| d.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingDocument {
    pub document: String,
    pub legal_citation: String,
}

/// Outcome of matching the upload set against the known processes.
///
/// Created once per run and shared read-only by every later stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistResult {
    pub process: String,
    pub documents_uploaded: usize,
    pub uploaded_documents: Vec<String>,
    pub required_documents: usize,
    #[serde(default)]
    pub missing_documents: Vec<MissingDocument>,
}

impl ChecklistResult {
    /// Result for an upload set that matches no known process
    pub fn unknown(uploaded_documents: Vec<String>) -> Self {
        Self {
            process: UNKNOWN_PROCESS.to_string(),
            documents_uploaded: uploaded_documents.len(),
            uploaded_documents,
            required_documents: 0,
            missing_documents: Vec::new(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.process == UNKNOWN_PROCESS
    }
}

impl Default for ChecklistResult {
    fn default() -> Self {
        Self::unknown(Vec::new())
    }
}

/// Per-document result of the review pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedDocument {
    pub file_name: String,
    pub document_type: String,
    pub issues: Vec<Issue>,
    /// Annotated artifact, absent when it could not be written
    pub reviewed_path: Option<PathBuf>,
}
