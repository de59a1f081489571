use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::CitationError;

/// A reference text loaded from the reference directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceDocument {
    /// File name, e.g. `ubo_declaration_form.txt`
    pub file_name: String,
    pub content: String,
}

impl ReferenceDocument {
    pub fn new(file_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    /// Leading `max_chars` characters on a single line
    pub fn excerpt(&self, max_chars: usize) -> String {
        self.content
            .chars()
            .take(max_chars)
            .collect::<String>()
            .replace('\n', " ")
            .trim()
            .to_string()
    }

    /// Citation text quoting this reference
    pub fn citation_text(&self, max_chars: usize) -> String {
        format!("{} - {}...", self.file_name, self.excerpt(max_chars))
    }
}

/// Load every non-empty `*.txt` file in `dir`, sorted by file name.
///
/// A missing directory yields an empty list; unreadable files are skipped.
pub fn load_reference_dir(dir: &Path) -> Result<Vec<ReferenceDocument>, CitationError> {
    if !dir.is_dir() {
        tracing::info!(dir = %dir.display(), "reference directory not found, using static rules");
        return Ok(Vec::new());
    }

    let mut paths: Vec<_> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().and_then(|e| e.to_str()) == Some("txt"))
        .collect();
    paths.sort();

    let mut references = Vec::new();
    for path in paths {
        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    references.push(ReferenceDocument::new(file_name, text));
                }
            }
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "failed to read reference file");
            }
        }
    }

    tracing::info!(count = references.len(), dir = %dir.display(), "loaded reference texts");
    Ok(references)
}
