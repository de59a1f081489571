//! Paragraph-level .docx reading and writing
//!
//! A .docx file is a zip package of WordprocessingML parts. This crate reads
//! the main document part into a flat paragraph list and writes documents
//! back as a minimal, valid package with optional run styling.

pub mod document;
pub mod error;
pub mod read;
pub mod write;

pub use document::{Document, Highlight, Paragraph, Rgb, Run, RunStyle};
pub use error::DocxError;
pub use read::{parse_document_xml, read_docx, read_docx_bytes};
pub use write::{document_xml, to_docx_bytes, write_docx};

/// Extension of files accepted for review
pub const ACCEPTED_EXTENSION: &str = "docx";

/// Package part holding the document body
pub const DOCUMENT_PART: &str = "word/document.xml";

/// Whether `path` carries the accepted upload extension
pub fn is_docx(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(ACCEPTED_EXTENSION))
        .unwrap_or(false)
}
