// Ambiguous and non-binding language
use citation_index::CitationProvider;
use shared_types::{Issue, Severity};

use crate::patterns::{truncate_chars, AMBIGUOUS_PATTERNS, SENTENCE_BOUNDARY};

/// Citation topic for ambiguous language
pub const TOPIC: &str = "ambiguous";

/// Split after `.`, `?` or `!` followed by whitespace; the terminator stays
/// with its sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for boundary in SENTENCE_BOUNDARY.find_iter(text) {
        // Terminators are single-byte ASCII
        let end = boundary.start() + 1;
        sentences.push(&text[start..end]);
        start = boundary.end();
    }
    sentences.push(&text[start..]);
    sentences
}

/// Trimmed sentences containing at least one hedge pattern, in text order
pub fn find_ambiguous_sentences(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    split_sentences(text)
        .into_iter()
        .filter(|s| AMBIGUOUS_PATTERNS.iter().any(|re| re.is_match(s)))
        .map(|s| s.trim().to_string())
        .collect()
}

/// Medium issues for the first `max_sentences` ambiguous sentences
pub fn check_ambiguous_language(
    full_text: &str,
    paragraphs: &[String],
    max_sentences: usize,
    snippet_chars: usize,
    citations: &dyn CitationProvider,
) -> Vec<Issue> {
    let sentences = find_ambiguous_sentences(full_text);
    if sentences.is_empty() {
        return Vec::new();
    }
    tracing::debug!(
        found = sentences.len(),
        reported = sentences.len().min(max_sentences),
        "ambiguous sentences"
    );

    let reference = citations.query_by_topic(TOPIC);
    sentences
        .iter()
        .take(max_sentences)
        .map(|sentence| {
            let index = paragraphs.iter().position(|p| p.contains(sentence.as_str()));
            Issue::new(
                Severity::Medium,
                format!(
                    "Ambiguous/non-binding language detected: \"{}\"",
                    truncate_chars(sentence, snippet_chars)
                ),
            )
            .at_paragraph(index)
            .with_suggestion("Consider replacing 'may' with 'shall' or more precise wording.")
            .with_reference(reference.clone())
        })
        .collect()
}
