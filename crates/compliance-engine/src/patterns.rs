//! Keyword tables, regex patterns and text helpers shared by the rules

use lazy_static::lazy_static;
use regex::Regex;

/// Keywords whose presence in the closing paragraphs indicates a signature block
pub const SIGNATURE_KEYWORDS: &[&str] = &[
    "signature",
    "signed",
    "for and on behalf",
    "authorised signatory",
    "signature:",
];

/// Court references that point away from ADGM, checked in order
pub const JURISDICTION_INDICATORS: &[&str] = &[
    "uae federal court",
    "federal court",
    "dubai courts",
    "abu dhabi courts",
    "sharjah court",
];

lazy_static! {
    /// Date written as d/m/yy, dd-mm-yyyy and similar
    pub static ref DATE_PATTERN: Regex =
        Regex::new(r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b").unwrap();

    /// Hedge words and discretionary phrases that weaken an obligation
    pub static ref AMBIGUOUS_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?i)\bmay\b").unwrap(),
        Regex::new(r"(?i)\bendeavour\b").unwrap(),
        Regex::new(r"(?i)\bbest endeavours\b").unwrap(),
        Regex::new(r"(?i)\bsubject to\b").unwrap(),
        Regex::new(r"(?i)\bat its sole discretion\b").unwrap(),
    ];

    /// Sentence terminator followed by whitespace
    pub static ref SENTENCE_BOUNDARY: Regex = Regex::new(r"[.?!]\s+").unwrap();

    /// Clause headings: `1.`, `1.1`, `(a)`, `(iv)`, `(2)`
    pub static ref NUMBERED_CLAUSE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"^\d+\.").unwrap(),
        Regex::new(r"^\d+\.\d+").unwrap(),
        Regex::new(r"^\([a-z0-9]+\)").unwrap(),
    ];
}

/// Whether any keyword occurs in already lower-cased `text`
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// First `max_chars` characters of `text`
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Index of the first paragraph whose text contains `needle`
pub fn find_paragraph(paragraphs: &[String], needle: &str) -> Option<usize> {
    paragraphs.iter().position(|p| p.contains(needle))
}

/// Title-case `text`: a letter is upper-cased when it follows a non-letter and
/// lower-cased otherwise (`board_resolution` → `Board_Resolution`)
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }
    out
}
