//! Static ADGM citation rules
//!
//! Used directly by the static provider and as the fallback of the indexed
//! provider.

/// Topic keyword → regulatory text, checked in order
pub const STATIC_RULES: &[(&str, &str)] = &[
    (
        "jurisdiction",
        "ADGM Companies Regulations 2020, Part 3, Section 15: Jurisdiction must be ADGM Courts.",
    ),
    (
        "signature",
        "ADGM Companies Regulations 2020, Schedule 1: Documents must be signed by an authorised signatory.",
    ),
    (
        "ambiguous",
        "ADGM Guidance on Contract Drafting: Avoid non-binding terms such as 'may' or 'endeavour'.",
    ),
    (
        "numbered clauses",
        "ADGM Best Practice Templates: Use numbered clauses for clarity.",
    ),
];

/// Rule returned when nothing more specific matches
pub const DEFAULT_RULE_KEY: &str = "ambiguous";

/// Canonical document label → statutory basis
pub const DOCUMENT_CITATIONS: &[(&str, &str)] = &[
    (
        "Articles of Association",
        "ADGM Companies Regulations 2020, Part 3, Section 12",
    ),
    (
        "Memorandum of Association",
        "ADGM Companies Regulations 2020, Section 12(1)",
    ),
    (
        "Incorporation Application Form",
        "ADGM Companies Regulations 2020, Section 7",
    ),
    (
        "UBO Declaration Form",
        "Beneficial Ownership Regulations 2018, Section 5",
    ),
    (
        "Register of Members and Directors",
        "ADGM Companies Regulations 2020, Schedule 1, Part 3",
    ),
    (
        "Board Resolution",
        "ADGM Companies Regulations 2020, Section 73",
    ),
    (
        "Shareholder Resolution",
        "ADGM Companies Regulations 2020, Section 74",
    ),
    (
        "Employment Contract",
        "ADGM Employment Regulations 2019",
    ),
];

/// Citation text for a static rule key
pub fn static_rule_text(key: &str) -> Option<String> {
    STATIC_RULES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, text)| format!("STATIC_RULE: {}", text))
}

/// First static rule whose key occurs in the lower-cased `query`
pub fn match_static_rule(query: &str) -> Option<String> {
    let query = query.to_lowercase();
    STATIC_RULES
        .iter()
        .find(|(key, _)| query.contains(key))
        .and_then(|(key, _)| static_rule_text(key))
}

/// The fallback rule text
pub fn default_rule_text() -> String {
    static_rule_text(DEFAULT_RULE_KEY).unwrap_or_default()
}

/// Statutory basis for a canonical document label, matched case-insensitively
pub fn document_citation(label: &str) -> Option<&'static str> {
    DOCUMENT_CITATIONS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(label.trim()))
        .map(|(_, citation)| *citation)
}
