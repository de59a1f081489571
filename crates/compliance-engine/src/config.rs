//! Review configuration and the immutable rulebook
//!
//! Both are built once at start-up and handed to every component by
//! reference; nothing mutates them during a run.

use std::path::Path;

use serde::{Deserialize, Serialize};
use shared_types::ProcessDefinition;

use crate::error::ReviewError;

/// Heuristic thresholds and artifact settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Closing paragraphs searched for a signature block
    pub signature_lookback: usize,
    /// Ambiguous sentences reported per document
    pub max_ambiguous_sentences: usize,
    /// Numbered paragraphs required before a document counts as numbered
    pub min_numbered_clauses: usize,
    /// Characters of an ambiguous sentence quoted in its issue
    pub snippet_chars: usize,
    /// Appended to the input stem to name the artifact
    pub reviewed_suffix: String,
    /// Used next to the input when no output directory is given
    pub fallback_output_dir: String,
    pub marker: MarkerConfig,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            signature_lookback: 8,
            max_ambiguous_sentences: 8,
            min_numbered_clauses: 3,
            snippet_chars: 200,
            reviewed_suffix: "_reviewed".to_string(),
            fallback_output_dir: "tmp_reviewed".to_string(),
            marker: MarkerConfig::default(),
        }
    }
}

/// Presentation of inline comment markers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// Six-digit hex colour
    pub color: String,
    /// WordprocessingML highlight name
    pub highlight: String,
    pub bold: bool,
    pub italic: bool,
    pub size_pt: u32,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            color: "FF0000".to_string(),
            highlight: "yellow".to_string(),
            bold: true,
            italic: false,
            size_pt: 9,
        }
    }
}

/// Keyword found in an upload's file name and the label it maps to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordLabel {
    pub keyword: String,
    pub label: String,
}

/// How a document type is recognised: by a phrase in its text or a hint in
/// its file name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTypeRule {
    pub label: String,
    pub text_phrase: String,
    pub file_hint: String,
}

/// Ordered lookup tables; order decides every first-match tie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rulebook {
    pub keywords: Vec<KeywordLabel>,
    pub processes: Vec<ProcessDefinition>,
    pub document_types: Vec<DocumentTypeRule>,
}

const DEFAULT_KEYWORDS: &[(&str, &str)] = &[
    ("articles", "Articles of Association"),
    ("aoa", "Articles of Association"),
    ("memorandum", "Memorandum of Association"),
    ("moa", "Memorandum of Association"),
    ("incorporation", "Incorporation Application Form"),
    ("application", "Incorporation Application Form"),
    ("ubo", "UBO Declaration Form"),
    ("ultimate beneficial", "UBO Declaration Form"),
    ("register of members", "Register of Members and Directors"),
    ("board resolution", "Board Resolution"),
    ("shareholder resolution", "Shareholder Resolution"),
    ("license", "Trade License Application"),
    ("licence", "Trade License Application"),
    ("employment contract", "Employment Contract"),
    ("offer letter", "Offer Letter"),
    ("handbook", "Employee Handbook"),
    ("nda", "Non-Disclosure Agreement"),
    ("kyc", "KYC Records"),
];

const DEFAULT_DOCUMENT_TYPES: &[(&str, &str, &str)] = &[
    ("Articles of Association", "articles of association", "articles"),
    ("Memorandum of Association", "memorandum of association", "memorandum"),
    ("Employment Contract", "employment contract", "employment"),
    ("Board Resolution", "board resolution", "board resolution"),
];

impl Default for Rulebook {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS
                .iter()
                .map(|(keyword, label)| KeywordLabel {
                    keyword: keyword.to_string(),
                    label: label.to_string(),
                })
                .collect(),
            processes: vec![
                ProcessDefinition::new(
                    "Company Incorporation",
                    &[
                        "Articles of Association",
                        "Memorandum of Association",
                        "Incorporation Application Form",
                        "UBO Declaration Form",
                        "Register of Members and Directors",
                        "Board Resolution",
                        "Shareholder Resolution",
                    ],
                ),
                ProcessDefinition::new(
                    "Licensing",
                    &[
                        "Trade License Application",
                        "Regulatory Approval Form",
                        "Business Plan",
                        "Passport Copy of Shareholders",
                    ],
                ),
                ProcessDefinition::new(
                    "HR / Employment",
                    &[
                        "Employment Contract",
                        "Offer Letter",
                        "Employee Handbook",
                        "Non-Disclosure Agreement",
                    ],
                ),
            ],
            document_types: DEFAULT_DOCUMENT_TYPES
                .iter()
                .map(|(label, text_phrase, file_hint)| DocumentTypeRule {
                    label: label.to_string(),
                    text_phrase: text_phrase.to_string(),
                    file_hint: file_hint.to_string(),
                })
                .collect(),
        }
    }
}

impl Rulebook {
    /// Load a rulebook from JSON, replacing the built-in tables
    pub fn from_json_file(path: &Path) -> Result<Self, ReviewError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ReviewError> {
        let rulebook: Rulebook =
            serde_json::from_str(raw).map_err(|e| ReviewError::Rulebook(e.to_string()))?;
        rulebook.validate()?;
        Ok(rulebook)
    }

    /// Keywords, type phrases and file hints are matched against lower-cased
    /// text, so they must be non-empty lower case
    pub fn validate(&self) -> Result<(), ReviewError> {
        for entry in &self.keywords {
            check_needle("keyword", &entry.keyword)?;
        }
        for rule in &self.document_types {
            check_needle("text phrase", &rule.text_phrase)?;
            check_needle("file hint", &rule.file_hint)?;
        }
        for process in &self.processes {
            if process.name.trim().is_empty() {
                return Err(ReviewError::Rulebook("process with empty name".to_string()));
            }
        }
        Ok(())
    }

    pub fn process(&self, name: &str) -> Option<&ProcessDefinition> {
        self.processes.iter().find(|p| p.name == name)
    }
}

fn check_needle(kind: &str, needle: &str) -> Result<(), ReviewError> {
    if needle.trim().is_empty() || needle != needle.to_lowercase() {
        return Err(ReviewError::Rulebook(format!(
            "{} '{}' must be non-empty lower case",
            kind, needle
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_rulebook_validates() {
        let rulebook = Rulebook::default();
        assert!(rulebook.validate().is_ok());
        assert_eq!(
            rulebook.process("Company Incorporation").unwrap().required.len(),
            7
        );
    }

    #[test]
    fn test_rulebook_json_round_trip() {
        let json = serde_json::to_string(&Rulebook::default()).unwrap();
        assert_eq!(Rulebook::from_json_str(&json).unwrap(), Rulebook::default());
    }

    #[test]
    fn test_rulebook_rejects_upper_case_keywords() {
        let json = r#"{"keywords":[{"keyword":"AOA","label":"Articles of Association"}],
                       "processes":[],"document_types":[]}"#;
        assert!(matches!(
            Rulebook::from_json_str(json),
            Err(ReviewError::Rulebook(_))
        ));
    }

    #[test]
    fn test_rulebook_rejects_unusable_document_types() {
        for (phrase, hint) in [("", "articles"), ("articles", ""), ("Articles", "articles")] {
            let mut rulebook = Rulebook::default();
            rulebook.document_types[0].text_phrase = phrase.to_string();
            rulebook.document_types[0].file_hint = hint.to_string();
            assert!(
                matches!(rulebook.validate(), Err(ReviewError::Rulebook(_))),
                "accepted phrase {:?} hint {:?}",
                phrase,
                hint
            );
        }
    }

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let config: ReviewConfig = serde_json::from_str(r#"{"signature_lookback": 4}"#).unwrap();
        assert_eq!(config.signature_lookback, 4);
        assert_eq!(config.max_ambiguous_sentences, 8);
        assert_eq!(config.marker.color, "FF0000");
    }
}
