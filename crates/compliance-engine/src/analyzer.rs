//! Document classification and the heuristic rule battery

use citation_index::CitationProvider;
use docx_core::{Document, DocxError};
use serde::{Deserialize, Serialize};
use shared_types::{Issue, Severity, UNKNOWN_PROCESS};

use crate::config::{ReviewConfig, Rulebook};
use crate::error::ReviewError;
use crate::rules;

/// Document type used when classification finds nothing
pub const UNKNOWN_DOCUMENT_TYPE: &str = UNKNOWN_PROCESS;

/// Classification and issues for a single document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub document_type: String,
    pub issues: Vec<Issue>,
}

impl Analysis {
    /// Result for a document that could not be opened; no checks are run
    pub fn parse_failure(error: DocxError) -> Self {
        Self {
            document_type: UNKNOWN_DOCUMENT_TYPE.to_string(),
            issues: vec![Issue::new(
                Severity::High,
                ReviewError::Parse(error).to_string(),
            )],
        }
    }
}

pub struct Analyzer<'a> {
    config: &'a ReviewConfig,
    rulebook: &'a Rulebook,
    citations: &'a dyn CitationProvider,
}

impl<'a> Analyzer<'a> {
    pub fn new(
        config: &'a ReviewConfig,
        rulebook: &'a Rulebook,
        citations: &'a dyn CitationProvider,
    ) -> Self {
        Self {
            config,
            rulebook,
            citations,
        }
    }

    /// First document type whose phrase occurs in the text or whose hint
    /// occurs in the file name
    pub fn classify(&self, full_text: &str, file_name: &str) -> String {
        let text_lower = full_text.to_lowercase();
        let name_lower = file_name.to_lowercase();
        self.rulebook
            .document_types
            .iter()
            .find(|rule| {
                text_lower.contains(&rule.text_phrase) || name_lower.contains(&rule.file_hint)
            })
            .map(|rule| rule.label.clone())
            .unwrap_or_else(|| UNKNOWN_DOCUMENT_TYPE.to_string())
    }

    pub fn analyze(&self, document: &Document, file_name: &str) -> Analysis {
        let paragraphs = document.paragraph_texts();
        let full_text = document.full_text();

        let document_type = self.classify(&full_text, file_name);
        let issues = self.check_paragraphs(&paragraphs, &full_text);

        tracing::info!(
            file = file_name,
            document_type = %document_type,
            issues = issues.len(),
            "document analyzed"
        );

        Analysis {
            document_type,
            issues,
        }
    }

    /// Run every rule in reporting order
    pub fn check_paragraphs(&self, paragraphs: &[String], full_text: &str) -> Vec<Issue> {
        let mut issues = Vec::new();

        issues.extend(rules::jurisdiction::check_jurisdiction(
            full_text,
            self.citations,
        ));
        issues.extend(rules::signature::check_signature_block(
            paragraphs,
            self.config.signature_lookback,
            self.citations,
        ));
        issues.extend(rules::ambiguity::check_ambiguous_language(
            full_text,
            paragraphs,
            self.config.max_ambiguous_sentences,
            self.config.snippet_chars,
            self.citations,
        ));
        issues.extend(rules::numbering::check_clause_numbering(
            paragraphs,
            self.config.min_numbered_clauses,
            self.citations,
        ));

        issues
    }
}
