// Clause numbering check
use citation_index::CitationProvider;
use shared_types::{Issue, Severity};

use crate::patterns::NUMBERED_CLAUSE_PATTERNS;

/// Citation topic for unnumbered documents
pub const TOPIC: &str = "numbered clauses";

/// Paragraphs whose trimmed text starts with a clause number
pub fn count_numbered_clauses(paragraphs: &[String]) -> usize {
    paragraphs
        .iter()
        .map(|p| p.trim())
        .filter(|t| NUMBERED_CLAUSE_PATTERNS.iter().any(|re| re.is_match(t)))
        .count()
}

/// One Low issue when fewer than `min_clauses` paragraphs are numbered
pub fn check_clause_numbering(
    paragraphs: &[String],
    min_clauses: usize,
    citations: &dyn CitationProvider,
) -> Option<Issue> {
    let numbered = count_numbered_clauses(paragraphs);
    if numbered >= min_clauses {
        return None;
    }
    tracing::debug!(numbered, min_clauses, "too few numbered clauses");

    Some(
        Issue::new(
            Severity::Low,
            "Document appears to lack numbered clauses/section headings.",
        )
        .with_suggestion("Use numbered clause headings (1., 1.1, 2., etc.) to improve clarity.")
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
    fn test_counts_each_numbering_style() {
        let doc = paragraphs(&["1. Name", "  1.1 Registered office", "(a) shares", "(iv) votes", "Note 2."]);
        assert_eq!(count_numbered_clauses(&doc), 4);
    }

    #[test]
    fn test_upper_case_letters_are_not_clause_numbers() {
        assert_eq!(count_numbered_clauses(&paragraphs(&["(A) shares"])), 0);
    }

    #[test]
    fn test_issue_below_threshold_only() {
        let provider = StaticRuleProvider::rules_only();
        let two = paragraphs(&["1. Name", "2. Objects"]);
        let three = paragraphs(&["1. Name", "2. Objects", "3. Liability"]);

        let issue = check_clause_numbering(&two, 3, &provider).unwrap();
        assert_eq!(issue.severity, Severity::Low);
        assert_eq!(issue.paragraph_index, None);
        assert!(check_clause_numbering(&three, 3, &provider).is_none());
    }
}
