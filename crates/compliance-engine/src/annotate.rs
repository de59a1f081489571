//! Inline review markers and the summary front page
//!
//! The annotated artifact is a new document: a summary of the checklist and
//! of every issue, a page break, then the source paragraphs with a
//! `[COMMENT: ...]` run appended where an issue points.

use std::path::{Path, PathBuf};

use docx_core::{write_docx, Document, Highlight, Paragraph, Rgb, Run, RunStyle};
use shared_types::{ChecklistResult, Issue};

use crate::config::{MarkerConfig, ReviewConfig};
use crate::error::ReviewError;

pub const SUMMARY_HEADER: &str = "---- REVIEW SUMMARY (ADGM Corporate Agent - MVP) ----";

/// Header size in half-points (12pt)
const SUMMARY_HEADER_SIZE: u32 = 24;

pub struct Annotator<'a> {
    config: &'a ReviewConfig,
}

impl<'a> Annotator<'a> {
    pub fn new(config: &'a ReviewConfig) -> Self {
        Self { config }
    }

    /// `  [COMMENT: issue Suggestion: ... (Ref: ...)]`
    pub fn marker_text(issue: &Issue) -> String {
        let mut body = issue.issue.clone();
        if let Some(suggestion) = issue.suggestion.as_deref().filter(|s| !s.is_empty()) {
            body.push_str(&format!(" Suggestion: {}", suggestion));
        }
        if let Some(reference) = issue.legal_reference.as_deref().filter(|r| !r.is_empty()) {
            body.push_str(&format!(" (Ref: {})", reference));
        }
        format!("  [COMMENT: {}]", body)
    }

    /// Marker style from configuration.
    ///
    /// A colour or highlight that does not parse is dropped with a warning;
    /// the marker itself is always inserted.
    pub fn marker_style(marker: &MarkerConfig) -> RunStyle {
        let color = match Rgb::from_hex(&marker.color) {
            Ok(color) => Some(color),
            Err(e) => {
                tracing::warn!(error = %e, "marker colour ignored");
                None
            }
        };
        let highlight = match Highlight::from_name(&marker.highlight) {
            Ok(highlight) => Some(highlight),
            Err(e) => {
                tracing::warn!(error = %e, "marker highlight ignored");
                None
            }
        };
        RunStyle {
            bold: marker.bold,
            italic: marker.italic,
            color,
            highlight,
            size_half_points: (marker.size_pt > 0).then_some(marker.size_pt * 2),
        }
    }

    /// Copy of `document` with one marker per issue.
    ///
    /// Issues pointing at an existing paragraph get the marker appended to
    /// it; the rest each get a trailing paragraph of their own, in issue
    /// order.
    pub fn insert_markers(&self, document: &Document, issues: &[Issue]) -> Document {
        let style = Self::marker_style(&self.config.marker);
        let mut annotated = document.clone();

        for issue in issues {
            let marker = Run::styled(Self::marker_text(issue), style.clone());
            match issue.paragraph_index {
                Some(index) if index < annotated.paragraphs.len() => {
                    annotated.paragraphs[index].push_run(marker);
                }
                _ => {
                    let mut paragraph = Paragraph::default();
                    paragraph.push_run(marker);
                    annotated.paragraphs.push(paragraph);
                }
            }
        }
        annotated
    }

    /// Summary front page, a page break, then the annotated body
    pub fn merge_with_summary(
        &self,
        annotated: &Document,
        issues: &[Issue],
        checklist: &ChecklistResult,
    ) -> Document {
        let mut merged = Document::new();

        merged.add_paragraph("").runs = vec![Run::styled(
            SUMMARY_HEADER,
            RunStyle {
                bold: true,
                size_half_points: Some(SUMMARY_HEADER_SIZE),
                ..RunStyle::default()
            },
        )];

        merged.add_paragraph(format!("Detected process: {}", checklist.process));
        merged.add_paragraph(format!("Documents uploaded: {}", checklist.documents_uploaded));
        merged.add_paragraph(format!("Required documents: {}", checklist.required_documents));

        if !checklist.missing_documents.is_empty() {
            merged.add_paragraph("Missing documents:");
            for missing in &checklist.missing_documents {
                merged.add_paragraph(format!(
                    " - {} ({})",
                    missing.document, missing.legal_citation
                ));
            }
        }

        merged.add_paragraph("");
        merged.add_paragraph("Issues found:");
        if issues.is_empty() {
            merged.add_paragraph(" No issues detected by automated checks.");
        } else {
            for (n, issue) in issues.iter().enumerate() {
                merged.add_paragraph(format!("{}. [{}] {}", n + 1, issue.severity, issue.issue));
                if let Some(suggestion) = issue.suggestion.as_deref().filter(|s| !s.is_empty()) {
                    merged.add_paragraph(format!("   Suggestion: {}", suggestion));
                }
                if let Some(reference) = issue.legal_reference.as_deref().filter(|r| !r.is_empty()) {
                    merged.add_paragraph(format!("   Legal Reference: {}", reference));
                }
                merged.add_paragraph("");
            }
        }

        merged.add_page_break();
        merged
            .paragraphs
            .extend(annotated.paragraphs.iter().cloned());
        merged
    }

    pub fn annotate(
        &self,
        document: &Document,
        issues: &[Issue],
        checklist: &ChecklistResult,
    ) -> Document {
        let annotated = self.insert_markers(document, issues);
        self.merge_with_summary(&annotated, issues, checklist)
    }

    /// `{output_dir}/{stem}{suffix}.docx`, made absolute
    pub fn reviewed_path(&self, input: &Path, output_dir: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        let path = output_dir.join(format!(
            "{}{}.{}",
            stem,
            self.config.reviewed_suffix,
            docx_core::ACCEPTED_EXTENSION
        ));
        if path.is_absolute() {
            return path;
        }
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path,
        }
    }

    /// Build the artifact and write it under `output_dir`
    pub fn save(
        &self,
        document: &Document,
        issues: &[Issue],
        checklist: &ChecklistResult,
        input: &Path,
        output_dir: &Path,
    ) -> Result<PathBuf, ReviewError> {
        let merged = self.annotate(document, issues, checklist);
        let path = self.reviewed_path(input, output_dir);

        tracing::debug!(path = %path.display(), "saving reviewed document");
        write_docx(&merged, &path).map_err(|source| ReviewError::Save {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "reviewed document saved");

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::{MissingDocument, Severity};

    fn issue(index: Option<usize>) -> Issue {
        Issue::new(Severity::High, "No signature block detected in the final paragraphs.")
            .at_paragraph(index)
            .with_suggestion("Add signature block.")
            .with_reference("STATIC_RULE: Sign it (score=1.00)")
    }

    #[test]
    fn test_marker_text() {
        assert_eq!(
            Annotator::marker_text(&issue(None)),
            "  [COMMENT: No signature block detected in the final paragraphs. \
             Suggestion: Add signature block. (Ref: STATIC_RULE: Sign it (score=1.00))]"
        );
        assert_eq!(
            Annotator::marker_text(&Issue::new(Severity::Low, "Bare")),
            "  [COMMENT: Bare]"
        );
    }

    #[test]
    fn test_default_marker_style() {
        let style = Annotator::marker_style(&MarkerConfig::default());
        assert!(style.bold);
        assert_eq!(style.color, Some(Rgb(255, 0, 0)));
        assert_eq!(style.highlight, Some(Highlight::Yellow));
        assert_eq!(style.size_half_points, Some(18));
    }

    #[test]
    fn test_bad_styling_degrades() {
        let marker = MarkerConfig {
            color: "crimson".to_string(),
            highlight: "plaid".to_string(),
            ..MarkerConfig::default()
        };
        let style = Annotator::marker_style(&marker);
        assert_eq!(style.color, None);
        assert_eq!(style.highlight, None);
        assert!(style.bold);
    }

    #[test]
    fn test_markers_placed_by_index() {
        let config = ReviewConfig::default();
        let annotator = Annotator::new(&config);
        let document = Document::from_texts(["Preamble", "Body"]);

        let annotated = annotator.insert_markers(&document, &[issue(Some(1)), issue(Some(7)), issue(None)]);

        assert_eq!(annotated.paragraphs.len(), 4);
        assert_eq!(annotated.paragraphs[0].text(), "Preamble");
        assert!(annotated.paragraphs[1].text().starts_with("Body  [COMMENT: "));
        assert!(annotated.paragraphs[2].text().starts_with("  [COMMENT: "));
        assert!(annotated.paragraphs[3].text().starts_with("  [COMMENT: "));
        // The source is untouched
        assert_eq!(document.paragraphs.len(), 2);
    }

    #[test]
    fn test_summary_layout() {
        let config = ReviewConfig::default();
        let annotator = Annotator::new(&config);
        let checklist = ChecklistResult {
            process: "Company Incorporation".to_string(),
            documents_uploaded: 1,
            uploaded_documents: vec!["Board Resolution".to_string()],
            required_documents: 7,
            missing_documents: vec![MissingDocument {
                document: "UBO Declaration Form".to_string(),
                legal_citation: "Section 5".to_string(),
            }],
        };

        let merged = annotator.annotate(&Document::from_texts(["Body"]), &[issue(None)], &checklist);
        let texts = merged.paragraph_texts();

        assert_eq!(
            texts[..12].to_vec(),
            vec![
                SUMMARY_HEADER,
                "Detected process: Company Incorporation",
                "Documents uploaded: 1",
                "Required documents: 7",
                "Missing documents:",
                " - UBO Declaration Form (Section 5)",
                "",
                "Issues found:",
                "1. [High] No signature block detected in the final paragraphs.",
                "   Suggestion: Add signature block.",
                "   Legal Reference: STATIC_RULE: Sign it (score=1.00)",
                "",
            ]
        );
        assert!(merged.paragraphs[12].page_break);
        assert_eq!(texts[13], "Body");
        assert!(texts[14].starts_with("  [COMMENT: "));
        assert!(merged.paragraphs[0].runs[0].style.bold);
    }

    #[test]
    fn test_summary_without_issues() {
        let config = ReviewConfig::default();
        let annotator = Annotator::new(&config);
        let merged = annotator.annotate(&Document::new(), &[], &ChecklistResult::default());
        let texts = merged.paragraph_texts();
        assert!(texts.contains(&" No issues detected by automated checks.".to_string()));
        assert!(!texts.contains(&"Missing documents:".to_string()));
    }

    #[test]
    fn test_reviewed_path() {
        let config = ReviewConfig::default();
        let annotator = Annotator::new(&config);
        let path = annotator.reviewed_path(Path::new("/in/Board Resolution.docx"), Path::new("/out"));
        assert_eq!(path, PathBuf::from("/out/Board Resolution_reviewed.docx"));
        assert!(annotator
            .reviewed_path(Path::new("a.docx"), Path::new("relative"))
            .is_absolute());
    }

    #[test]
    fn test_save_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReviewConfig::default();
        let annotator = Annotator::new(&config);
        let out = dir.path().join("nested").join("out");

        let path = annotator
            .save(
                &Document::from_texts(["Body"]),
                &[],
                &ChecklistResult::default(),
                Path::new("memo.docx"),
                &out,
            )
            .unwrap();

        assert_eq!(path, out.join("memo_reviewed.docx"));
        assert!(path.exists());
    }
}
