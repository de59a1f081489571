//! Checklist matching
//!
//! Maps uploaded file names to canonical document labels, picks the process
//! whose required set best matches, and lists what is still missing together
//! with the statutory basis of each missing document.

use std::collections::HashSet;
use std::path::Path;

use citation_index::CitationProvider;
use shared_types::{ChecklistResult, MissingDocument, ProcessDefinition};

use crate::config::Rulebook;
use crate::patterns::title_case;

pub struct ChecklistMatcher<'a> {
    rulebook: &'a Rulebook,
    citations: &'a dyn CitationProvider,
}

impl<'a> ChecklistMatcher<'a> {
    pub fn new(rulebook: &'a Rulebook, citations: &'a dyn CitationProvider) -> Self {
        Self {
            rulebook,
            citations,
        }
    }

    /// Canonical label for one uploaded identifier, or `None` when it is empty
    pub fn normalize_label(&self, identifier: &str) -> Option<String> {
        if identifier.trim().is_empty() {
            return None;
        }
        let path = Path::new(identifier);
        let base = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| identifier.to_string());
        let searchable = base.to_lowercase().replace(['_', '-'], " ");

        if let Some(entry) = self
            .rulebook
            .keywords
            .iter()
            .find(|entry| searchable.contains(&entry.keyword))
        {
            return Some(entry.label.clone());
        }

        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or(base);
        Some(title_case(&stem))
    }

    /// Labels for every identifier, deduplicated in first-seen order
    pub fn normalize_uploaded<S: AsRef<str>>(&self, identifiers: &[S]) -> Vec<String> {
        let mut seen = HashSet::new();
        identifiers
            .iter()
            .filter_map(|id| self.normalize_label(id.as_ref()))
            .filter(|label| seen.insert(label.clone()))
            .collect()
    }

    /// Process with the most required labels present.
    ///
    /// Only a strictly higher count replaces the current best, so the earlier
    /// table entry wins a tie. `None` when nothing matches at all.
    pub fn detect_process(&self, labels: &[String]) -> Option<&'a ProcessDefinition> {
        let rulebook: &'a Rulebook = self.rulebook;
        let mut best: Option<(&'a ProcessDefinition, usize)> = None;
        for process in &rulebook.processes {
            let matches = process
                .required
                .iter()
                .filter(|doc| labels.contains(doc))
                .count();
            let best_count = best.map(|(_, count)| count).unwrap_or(0);
            if matches > best_count {
                best = Some((process, matches));
            }
        }
        best.map(|(process, _)| process)
    }

    pub fn verify<S: AsRef<str>>(&self, identifiers: &[S]) -> ChecklistResult {
        let uploaded = self.normalize_uploaded(identifiers);

        let Some(process) = self.detect_process(&uploaded) else {
            tracing::info!(uploaded = uploaded.len(), "no known process matches the upload set");
            return ChecklistResult::unknown(uploaded);
        };

        let missing_documents: Vec<MissingDocument> = process
            .required
            .iter()
            .filter(|doc| !uploaded.contains(doc))
            .map(|doc| MissingDocument {
                document: doc.clone(),
                legal_citation: self.citations.query_by_document_name(doc),
            })
            .collect();

        tracing::info!(
            process = %process.name,
            uploaded = uploaded.len(),
            missing = missing_documents.len(),
            "checklist verified"
        );

        ChecklistResult {
            process: process.name.clone(),
            documents_uploaded: uploaded.len(),
            uploaded_documents: uploaded,
            required_documents: process.required.len(),
            missing_documents,
        }
    }
}
