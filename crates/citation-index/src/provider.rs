//! Citation providers
//!
//! Two strategies share one interface: `StaticRuleProvider` answers from the
//! built-in rule tables and reference file names, `IndexedProvider` adds a
//! BM25 index over the reference texts. `select_provider` picks one at
//! start-up so callers never branch on which is active.

use serde::{Deserialize, Serialize};

use crate::config::CitationConfig;
use crate::document::{load_reference_dir, ReferenceDocument};
use crate::rules::{default_rule_text, document_citation, match_static_rule};

/// A citation and the confidence behind it, in `[0, 1]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub text: String,
    pub score: f32,
}

impl Citation {
    pub fn new(text: impl Into<String>, score: f32) -> Self {
        Self {
            text: text.into(),
            score,
        }
    }

    pub fn empty() -> Self {
        Self::new(String::new(), 0.0)
    }

    /// The default rule, carrying no confidence
    pub fn fallback() -> Self {
        Self::new(default_rule_text(), 0.0)
    }

    /// Report form: `"{text} (score={score})"`, or empty when there is no text
    pub fn render(&self) -> String {
        if self.text.is_empty() {
            String::new()
        } else {
            format!("{} (score={:.2})", self.text, self.score)
        }
    }
}

/// Source of legal citations.
///
/// Both query methods are total: failures inside a provider degrade to the
/// default citation and never reach the caller.
pub trait CitationProvider: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Citation for a topic keyword such as "signature" or "jurisdiction"
    fn lookup_topic(&self, keyword: &str) -> Citation;

    /// Citation for a canonical document label
    fn lookup_document(&self, name: &str) -> Citation;

    fn query_by_topic(&self, keyword: &str) -> String {
        self.lookup_topic(keyword).render()
    }

    fn query_by_document_name(&self, name: &str) -> String {
        self.lookup_document(name).render()
    }
}

/// Rule-table provider; always available
#[derive(Debug, Clone, Default)]
pub struct StaticRuleProvider {
    references: Vec<ReferenceDocument>,
    excerpt_chars: usize,
}

impl StaticRuleProvider {
    pub fn new(references: Vec<ReferenceDocument>, excerpt_chars: usize) -> Self {
        Self {
            references,
            excerpt_chars,
        }
    }

    /// Provider with no reference texts
    pub fn rules_only() -> Self {
        Self::new(Vec::new(), 0)
    }

    pub fn references(&self) -> &[ReferenceDocument] {
        &self.references
    }

    fn reference_named(&self, name: &str) -> Option<&ReferenceDocument> {
        self.references.iter().find(|r| {
            let file = r.file_name.to_lowercase();
            file.starts_with(name) || file.contains(name)
        })
    }
}

impl CitationProvider for StaticRuleProvider {
    fn name(&self) -> &str {
        "static-rules"
    }

    fn lookup_topic(&self, keyword: &str) -> Citation {
        if keyword.trim().is_empty() {
            return Citation::empty();
        }
        match match_static_rule(keyword) {
            Some(text) => Citation::new(text, 1.0),
            None => Citation::fallback(),
        }
    }

    fn lookup_document(&self, name: &str) -> Citation {
        let name = name.trim();
        if name.is_empty() {
            return Citation::empty();
        }
        if let Some(citation) = document_citation(name) {
            return Citation::new(citation, 1.0);
        }

        let lowered = name.to_lowercase();
        if let Some(reference) = self.reference_named(&lowered) {
            return Citation::new(reference.citation_text(self.excerpt_chars), 1.0);
        }
        match match_static_rule(&lowered) {
            Some(text) => Citation::new(text, 1.0),
            None => Citation::fallback(),
        }
    }
}

/// Static rules plus a keyword index over the reference texts
#[cfg(feature = "similarity")]
pub struct IndexedProvider {
    base: StaticRuleProvider,
    index: crate::search::KeywordIndex,
    min_confidence: f32,
}

#[cfg(feature = "similarity")]
impl IndexedProvider {
    pub fn build(
        references: Vec<ReferenceDocument>,
        config: &CitationConfig,
    ) -> Result<Self, crate::CitationError> {
        if references.is_empty() {
            return Err(crate::CitationError::NoReferences(config.refs_dir.clone()));
        }
        let index = crate::search::KeywordIndex::build(&references)
            .map_err(|e| crate::CitationError::Index(e.to_string()))?;
        tracing::info!(documents = references.len(), "reference index built");
        Ok(Self {
            base: StaticRuleProvider::new(references, config.excerpt_chars),
            index,
            min_confidence: config.min_confidence,
        })
    }

    fn search_best(&self, query: &str) -> Option<Citation> {
        let hits = match self.index.search(query, 1) {
            Ok(hits) => hits,
            Err(e) => {
                tracing::warn!(query, error = %e, "reference search failed");
                return None;
            }
        };
        let (file_name, raw) = hits.into_iter().next()?;
        let confidence = crate::search::normalize_score(raw);
        if confidence < self.min_confidence {
            tracing::debug!(query, confidence, "reference match below threshold");
            return None;
        }
        let reference = self
            .base
            .references()
            .iter()
            .find(|r| r.file_name == file_name)?;
        Some(Citation::new(
            reference.citation_text(self.base.excerpt_chars),
            confidence,
        ))
    }
}

#[cfg(feature = "similarity")]
impl CitationProvider for IndexedProvider {
    fn name(&self) -> &str {
        "reference-index"
    }

    fn lookup_topic(&self, keyword: &str) -> Citation {
        if keyword.trim().is_empty() {
            return Citation::empty();
        }
        if let Some(text) = match_static_rule(keyword) {
            return Citation::new(text, 1.0);
        }
        self.search_best(keyword).unwrap_or_else(Citation::fallback)
    }

    fn lookup_document(&self, name: &str) -> Citation {
        self.base.lookup_document(name)
    }
}

/// Choose the richest provider available in this build and environment.
///
/// The index is used only when compiled in, the reference directory yields at
/// least one text, and the index builds; otherwise the static provider is
/// returned.
pub fn select_provider(config: &CitationConfig) -> Box<dyn CitationProvider> {
    let references = match load_reference_dir(&config.refs_dir) {
        Ok(references) => references,
        Err(e) => {
            tracing::warn!(error = %e, "could not load reference texts");
            Vec::new()
        }
    };

    #[cfg(feature = "similarity")]
    {
        if !references.is_empty() {
            match IndexedProvider::build(references.clone(), config) {
                Ok(provider) => return Box::new(provider),
                Err(e) => tracing::warn!(error = %e, "falling back to static citation rules"),
            }
        }
    }

    Box::new(StaticRuleProvider::new(references, config.excerpt_chars))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_format() {
        assert_eq!(Citation::new("Rule", 1.0).render(), "Rule (score=1.00)");
        assert_eq!(Citation::new("Rule", 0.4567).render(), "Rule (score=0.46)");
        assert_eq!(Citation::empty().render(), "");
    }

    #[test]
    fn test_static_topic_lookup() {
        let provider = StaticRuleProvider::rules_only();
        let citation = provider.lookup_topic("signature");
        assert_eq!(citation.score, 1.0);
        assert!(citation.text.starts_with("STATIC_RULE:"));
        assert!(provider.query_by_topic("numbered clauses").contains("numbered clauses"));
    }

    #[test]
    fn test_unknown_topic_falls_back_with_zero_score() {
        let provider = StaticRuleProvider::rules_only();
        let citation = provider.lookup_topic("registered office");
        assert_eq!(citation, Citation::fallback());
        assert_eq!(citation.score, 0.0);
    }

    #[test]
    fn test_empty_queries_are_empty() {
        let provider = StaticRuleProvider::rules_only();
        assert_eq!(provider.query_by_topic(""), "");
        assert_eq!(provider.query_by_document_name("  "), "");
    }

    #[test]
    fn test_document_table_wins() {
        let provider = StaticRuleProvider::rules_only();
        let text = provider.query_by_document_name("Board Resolution");
        assert_eq!(text, "ADGM Companies Regulations 2020, Section 73 (score=1.00)");
    }

    #[test]
    fn test_document_reference_file_match() {
        let provider = StaticRuleProvider::new(
            vec![ReferenceDocument::new(
                "business plan guidance.txt",
                "A business plan must cover three years",
            )],
            600,
        );
        let citation = provider.lookup_document("Business Plan");
        assert_eq!(citation.score, 1.0);
        assert!(citation.text.starts_with("business plan guidance.txt - "));
    }

    #[test]
    fn test_document_lookup_never_empty() {
        let provider = StaticRuleProvider::rules_only();
        for name in ["Passport Copy of Shareholders", "Regulatory Approval Form", "x"] {
            assert!(!provider.query_by_document_name(name).is_empty());
        }
    }

    #[test]
    fn test_select_provider_without_references_is_static() {
        let provider = select_provider(&CitationConfig::with_refs_dir("/nonexistent/refs"));
        assert_eq!(provider.name(), "static-rules");
    }

    #[cfg(feature = "similarity")]
    #[test]
    fn test_select_provider_with_references_is_indexed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("registered_office.txt"),
            "Every company must maintain a registered office within Abu Dhabi Global Market",
        )
        .unwrap();

        let provider = select_provider(&CitationConfig::with_refs_dir(dir.path()));
        assert_eq!(provider.name(), "reference-index");

        let citation = provider.lookup_topic("registered office");
        assert!(citation.text.starts_with("registered_office.txt - "));
        assert!(citation.score > 0.0);

        // Static keys still win over the index
        assert!(provider.lookup_topic("jurisdiction").text.starts_with("STATIC_RULE:"));
    }

    #[cfg(feature = "similarity")]
    #[test]
    fn test_indexed_provider_falls_back_on_no_match() {
        let config = CitationConfig::default();
        let provider = IndexedProvider::build(
            vec![ReferenceDocument::new("a.txt", "share capital")],
            &config,
        )
        .unwrap();
        assert_eq!(provider.lookup_topic("zebra"), Citation::fallback());
    }

    #[cfg(feature = "similarity")]
    #[test]
    fn test_indexed_provider_falls_back_below_threshold() {
        let references = vec![ReferenceDocument::new(
            "registered_office.txt",
            "Every company must maintain a registered office",
        )];
        let strict = CitationConfig {
            min_confidence: 0.99,
            ..CitationConfig::default()
        };

        let provider = IndexedProvider::build(references.clone(), &strict).unwrap();
        assert_eq!(provider.lookup_topic("registered office"), Citation::fallback());

        // The same query clears the default threshold
        let lenient = IndexedProvider::build(references, &CitationConfig::default()).unwrap();
        assert!(lenient
            .lookup_topic("registered office")
            .text
            .starts_with("registered_office.txt - "));
    }
}
