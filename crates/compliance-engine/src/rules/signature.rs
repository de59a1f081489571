// Signature block detection over the closing paragraphs
use citation_index::CitationProvider;
use shared_types::{Issue, Severity};

use crate::patterns::{contains_any, DATE_PATTERN, SIGNATURE_KEYWORDS};

/// Citation topic for missing signature blocks
pub const TOPIC: &str = "signature";

/// Whether the last `lookback` paragraphs contain a signature keyword or a date
pub fn has_signature_block(paragraphs: &[String], lookback: usize) -> bool {
    if paragraphs.is_empty() {
        return false;
    }
    let start = paragraphs.len().saturating_sub(lookback);
    let tail = paragraphs[start..]
        .iter()
        .filter(|p| !p.is_empty())
        .map(|p| p.trim().to_lowercase())
        .collect::<Vec<_>>()
        .join("\n");

    contains_any(&tail, SIGNATURE_KEYWORDS) || DATE_PATTERN.is_match(&tail)
}

/// One High issue at the last paragraph when no signature block is found
pub fn check_signature_block(
    paragraphs: &[String],
    lookback: usize,
    citations: &dyn CitationProvider,
) -> Option<Issue> {
    if has_signature_block(paragraphs, lookback) {
        return None;
    }
    tracing::debug!(paragraphs = paragraphs.len(), "no signature block found");

    Some(
        Issue::new(
            Severity::High,
            "No signature block detected in the final paragraphs.",
        )
        .at_paragraph(paragraphs.len().checked_sub(1))
        .with_suggestion("Add signature block with name, designation, company name and date.")
        .with_reference(citations.query_by_topic(TOPIC)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use citation_index::StaticRuleProvider;

    fn paragraphs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_signature_keyword_passes() {
        let doc = paragraphs(&["1. Terms", "", "Signed by the Director"]);
        assert!(has_signature_block(&doc, 8));
    }

    #[test]
    fn test_date_passes() {
        let doc = paragraphs(&["1. Terms", "Dated 05/03/2024"]);
        assert!(has_signature_block(&doc, 8));
    }

    #[test]
    fn test_keyword_outside_lookback_fails() {
        let mut doc = paragraphs(&["Signature: ________"]);
        doc.extend((0..8).map(|i| format!("Clause {}", i)));
        assert!(!has_signature_block(&doc, 8));
        assert!(has_signature_block(&doc, 9));
    }

    #[test]
    fn test_missing_block_reports_last_paragraph() {
        let provider = StaticRuleProvider::rules_only();
        let doc = paragraphs(&["Preamble", "1. Terms", "2. More terms"]);
        let issue = check_signature_block(&doc, 8, &provider).unwrap();
        assert_eq!(issue.severity, Severity::High);
        assert_eq!(issue.paragraph_index, Some(2));
        assert!(issue.legal_reference.unwrap().contains("Schedule 1"));
    }

    #[test]
    fn test_empty_document_has_no_index() {
        let provider = StaticRuleProvider::rules_only();
        let issue = check_signature_block(&[], 8, &provider).unwrap();
        assert_eq!(issue.paragraph_index, None);
    }
}
