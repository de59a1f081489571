//! ADGM document review engine
//!
//! Matches an upload set against the known regulatory processes, runs the
//! heuristic checks over each `.docx`, writes an annotated copy next to the
//! findings and aggregates everything into one report.

pub mod analyzer;
pub mod annotate;
pub mod checklist;
pub mod config;
pub mod error;
pub mod patterns;
pub mod report;
pub mod rules;

use std::path::{Path, PathBuf};

use citation_index::{CitationProvider, StaticRuleProvider};
use docx_core::{read_docx, Document};
use shared_types::{ChecklistResult, Issue, ProcessedDocument, Report};

pub use analyzer::{Analysis, Analyzer};
pub use annotate::Annotator;
pub use checklist::ChecklistMatcher;
pub use config::{MarkerConfig, ReviewConfig, Rulebook};
pub use error::ReviewError;
pub use report::generate_report;

/// Everything produced by one review run
#[derive(Debug, Clone)]
pub struct BatchReview {
    pub checklist: ChecklistResult,
    pub documents: Vec<ProcessedDocument>,
    pub report: Report,
}

/// Review entry point holding the run's immutable tables and the citation
/// strategy
pub struct ComplianceEngine {
    config: ReviewConfig,
    rulebook: Rulebook,
    citations: Box<dyn CitationProvider>,
}

impl ComplianceEngine {
    pub fn new(
        config: ReviewConfig,
        rulebook: Rulebook,
        citations: Box<dyn CitationProvider>,
    ) -> Self {
        tracing::debug!(provider = citations.name(), "compliance engine ready");
        Self {
            config,
            rulebook,
            citations,
        }
    }

    /// Default tables with the given citation provider
    pub fn with_citations(citations: Box<dyn CitationProvider>) -> Self {
        Self::new(ReviewConfig::default(), Rulebook::default(), citations)
    }

    pub fn config(&self) -> &ReviewConfig {
        &self.config
    }

    pub fn rulebook(&self) -> &Rulebook {
        &self.rulebook
    }

    pub fn citations(&self) -> &dyn CitationProvider {
        self.citations.as_ref()
    }

    pub fn verify_checklist<S: AsRef<str>>(&self, identifiers: &[S]) -> ChecklistResult {
        ChecklistMatcher::new(&self.rulebook, self.citations.as_ref()).verify(identifiers)
    }

    pub fn analyze(&self, document: &Document, file_name: &str) -> Analysis {
        self.analyzer().analyze(document, file_name)
    }

    /// Run the checks on raw text, one paragraph per line (for testing)
    pub fn check_text(&self, text: &str) -> Vec<Issue> {
        let document = Document::from_texts(text.lines());
        self.analyzer()
            .check_paragraphs(&document.paragraph_texts(), &document.full_text())
    }

    /// Analyze one file and write its annotated copy.
    ///
    /// Never fails: an unreadable file becomes a single High issue, and a
    /// failed save leaves `reviewed_path` empty. Without `output_dir` the
    /// artifact goes to a subdirectory next to the input.
    pub fn process_document(
        &self,
        path: &Path,
        checklist: &ChecklistResult,
        output_dir: Option<&Path>,
    ) -> ProcessedDocument {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let document = match read_docx(path) {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!(file = %file_name, error = %e, "could not open document");
                let analysis = Analysis::parse_failure(e);
                return ProcessedDocument {
                    file_name,
                    document_type: analysis.document_type,
                    issues: analysis.issues,
                    reviewed_path: None,
                };
            }
        };

        let analysis = self.analyze(&document, &file_name);

        let output_dir = output_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.fallback_output_dir(path));
        let reviewed_path = match Annotator::new(&self.config).save(
            &document,
            &analysis.issues,
            checklist,
            path,
            &output_dir,
        ) {
            Ok(saved) => Some(saved),
            Err(e) => {
                tracing::warn!(file = %file_name, error = %e, "reviewed document not saved");
                None
            }
        };

        ProcessedDocument {
            file_name,
            document_type: analysis.document_type,
            issues: analysis.issues,
            reviewed_path,
        }
    }

    /// Checklist over every path, each document in turn, then the report
    pub fn review<P: AsRef<Path>>(
        &self,
        paths: &[P],
        output_dir: Option<&Path>,
    ) -> Result<BatchReview, ReviewError> {
        if paths.is_empty() {
            return Err(ReviewError::NoDocuments);
        }

        let identifiers: Vec<String> = paths
            .iter()
            .map(|p| p.as_ref().to_string_lossy().into_owned())
            .collect();
        let checklist = self.verify_checklist(&identifiers);

        let documents: Vec<ProcessedDocument> = paths
            .iter()
            .map(|p| {
                let path = p.as_ref();
                if !docx_core::is_docx(path) {
                    tracing::warn!(path = %path.display(), "not a .docx upload");
                }
                self.process_document(path, &checklist, output_dir)
            })
            .collect();

        let report = generate_report(&documents, &checklist, None);
        tracing::info!(
            process = %report.process,
            documents = documents.len(),
            issues = report.total_issues,
            high = report.high_severity_count,
            "review complete"
        );

        Ok(BatchReview {
            checklist,
            documents,
            report,
        })
    }

    fn analyzer(&self) -> Analyzer<'_> {
        Analyzer::new(&self.config, &self.rulebook, self.citations.as_ref())
    }

    fn fallback_output_dir(&self, input: &Path) -> PathBuf {
        input
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(&self.config.fallback_output_dir)
    }
}

impl Default for ComplianceEngine {
    fn default() -> Self {
        Self::with_citations(Box::new(StaticRuleProvider::rules_only()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::Severity;

    #[test]
    fn test_engine_flags_unsigned_ambiguous_text() {
        let engine = ComplianceEngine::default();
        let issues = engine.check_text("The Company may issue shares.\nDisputes go to the Sharjah Court.");

        assert!(issues.iter().any(|i| i.issue.contains("sharjah court")));
        assert!(issues.iter().any(|i| i.issue.starts_with("No signature block")));
        assert!(issues.iter().any(|i| i.severity == Severity::Medium));
    }

    #[test]
    fn test_engine_accepts_well_formed_text() {
        let engine = ComplianceEngine::default();
        let text = "1. Name\n2. Objects\n3. Registered office in ADGM.\nSigned on 01/02/2024";
        assert!(engine.check_text(text).is_empty());
    }

    #[test]
    fn test_review_without_documents_fails() {
        let engine = ComplianceEngine::default();
        let paths: Vec<PathBuf> = Vec::new();
        let err = engine.review(&paths, None).unwrap_err();
        assert!(matches!(err, ReviewError::NoDocuments));
        assert_eq!(err.to_error_report().error, "No files uploaded.");
    }

    #[test]
    fn test_unreadable_file_becomes_issue() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.docx");
        std::fs::write(&path, b"not a zip").unwrap();

        let engine = ComplianceEngine::default();
        let processed = engine.process_document(&path, &ChecklistResult::default(), Some(dir.path()));

        assert_eq!(processed.document_type, "Unknown");
        assert_eq!(processed.issues.len(), 1);
        assert!(processed.issues[0].issue.starts_with("Failed to open .docx: "));
        assert_eq!(processed.reviewed_path, None);
    }

    #[test]
    fn test_default_output_dir_is_next_to_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memo.docx");
        docx_core::write_docx(&Document::from_texts(["Signed"]), &path).unwrap();

        let engine = ComplianceEngine::default();
        let processed = engine.process_document(&path, &ChecklistResult::default(), None);

        assert_eq!(
            processed.reviewed_path,
            Some(dir.path().join("tmp_reviewed").join("memo_reviewed.docx"))
        );
    }
}
