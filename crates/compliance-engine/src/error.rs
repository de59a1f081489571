use std::path::PathBuf;

use docx_core::DocxError;
use shared_types::ErrorReport;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("No files uploaded.")]
    NoDocuments,

    #[error("Failed to open .docx: {0}")]
    Parse(#[from] DocxError),

    #[error("Failed to save reviewed document to {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: DocxError,
    },

    #[error("Invalid rulebook: {0}")]
    Rulebook(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReviewError {
    /// Structured form written in place of a report
    pub fn to_error_report(&self) -> ErrorReport {
        ErrorReport::new(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_documents_error_report() {
        let report = ReviewError::NoDocuments.to_error_report();
        assert_eq!(report.error, "No files uploaded.");
    }

    #[test]
    fn test_parse_error_message_prefix() {
        let err = ReviewError::from(DocxError::MissingPart("word/document.xml".to_string()));
        assert!(err.to_string().starts_with("Failed to open .docx: "));
    }
}
