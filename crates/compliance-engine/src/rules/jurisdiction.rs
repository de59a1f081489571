// Non-ADGM court references
use citation_index::CitationProvider;
use shared_types::{Issue, Severity};

use crate::patterns::JURISDICTION_INDICATORS;

/// Citation topic for jurisdiction findings
pub const TOPIC: &str = "jurisdiction";

/// One High issue per court indicator found in the text.
///
/// Indicators overlap ("uae federal court" also contains "federal court"),
/// and each one found is reported separately. The finding is document-wide,
/// so it carries no paragraph index.
pub fn check_jurisdiction(
    full_text: &str,
    citations: &dyn CitationProvider,
) -> Vec<Issue> {
    if full_text.is_empty() {
        return Vec::new();
    }
    let text_lower = full_text.to_lowercase();

    let found: Vec<&str> = JURISDICTION_INDICATORS
        .iter()
        .copied()
        .filter(|indicator| text_lower.contains(indicator))
        .collect();
    if found.is_empty() {
        return Vec::new();
    }

    let reference = citations.query_by_topic(TOPIC);
    found
        .into_iter()
        .map(|indicator| {
            tracing::debug!(indicator, "non-ADGM jurisdiction referenced");
            Issue::new(
                Severity::High,
                format!(
                    "Document references '{}' which is not ADGM jurisdiction.",
                    indicator
                ),
            )
            .with_suggestion("Update jurisdiction clause to ADGM Courts.")
            .with_reference(reference.clone())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use citation_index::StaticRuleProvider;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reports_each_indicator() {
        let provider = StaticRuleProvider::rules_only();
        let paragraphs = vec![
            "1. Definitions".to_string(),
            "Disputes go to the UAE Federal Court.".to_string(),
        ];
        let text = paragraphs.join("\n");
        let issues = check_jurisdiction(&text, &provider);

        let texts: Vec<&str> = issues.iter().map(|i| i.issue.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Document references 'uae federal court' which is not ADGM jurisdiction.",
                "Document references 'federal court' which is not ADGM jurisdiction.",
            ]
        );
        assert!(issues.iter().all(|i| i.paragraph_index.is_none()));
        assert!(issues
            .iter()
            .all(|i| i.legal_reference.as_deref().unwrap_or("").contains("ADGM Courts")));
    }

    #[test]
    fn test_adgm_courts_are_fine() {
        let provider = StaticRuleProvider::rules_only();
        assert!(check_jurisdiction("Disputes go to the ADGM Courts.", &provider).is_empty());
    }

    #[test]
    fn test_court_clause_has_no_paragraph_index() {
        let provider = StaticRuleProvider::rules_only();
        let issues = check_jurisdiction("1. Terms\nDisputes go to the Dubai Courts.", &provider);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].paragraph_index, None);
    }
}
