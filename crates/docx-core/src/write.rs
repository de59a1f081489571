//! Writing a minimal .docx package

use std::io::{Cursor, Write};
use std::path::Path;

use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::document::{Document, Paragraph, Run, RunStyle};
use crate::error::DocxError;
use crate::DOCUMENT_PART;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_OPEN: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#;

const DOCUMENT_CLOSE: &str = "<w:sectPr/></w:body></w:document>";

/// Write `document` to `path`, creating parent directories as needed
pub fn write_docx(document: &Document, path: &Path) -> Result<(), DocxError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let bytes = to_docx_bytes(document)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Serialize `document` into .docx package bytes
pub fn to_docx_bytes(document: &Document) -> Result<Vec<u8>, DocxError> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(CONTENT_TYPES.as_bytes())?;

    zip.start_file("_rels/.rels", options)?;
    zip.write_all(PACKAGE_RELS.as_bytes())?;

    zip.start_file(DOCUMENT_PART, options)?;
    zip.write_all(document_xml(document).as_bytes())?;

    Ok(zip.finish()?.into_inner())
}

/// Render the `word/document.xml` part
pub fn document_xml(document: &Document) -> String {
    let mut xml = String::from(DOCUMENT_OPEN);
    for paragraph in &document.paragraphs {
        write_paragraph(&mut xml, paragraph);
    }
    xml.push_str(DOCUMENT_CLOSE);
    xml
}

fn write_paragraph(xml: &mut String, paragraph: &Paragraph) {
    xml.push_str("<w:p>");
    if paragraph.page_break {
        xml.push_str(r#"<w:r><w:br w:type="page"/></w:r>"#);
    }
    for run in &paragraph.runs {
        write_run(xml, run);
    }
    xml.push_str("</w:p>");
}

fn write_run(xml: &mut String, run: &Run) {
    xml.push_str("<w:r>");
    write_run_properties(xml, &run.style);

    // Tabs and line breaks are elements of their own, not text
    let mut first_line = true;
    for line in run.text.split('\n') {
        if !first_line {
            xml.push_str("<w:br/>");
        }
        first_line = false;

        let mut first_cell = true;
        for cell in line.split('\t') {
            if !first_cell {
                xml.push_str("<w:tab/>");
            }
            first_cell = false;
            if !cell.is_empty() {
                xml.push_str(r#"<w:t xml:space="preserve">"#);
                xml.push_str(&escape(cell));
                xml.push_str("</w:t>");
            }
        }
    }
    xml.push_str("</w:r>");
}

fn write_run_properties(xml: &mut String, style: &RunStyle) {
    if style.is_plain() {
        return;
    }
    xml.push_str("<w:rPr>");
    if style.bold {
        xml.push_str("<w:b/>");
    }
    if style.italic {
        xml.push_str("<w:i/>");
    }
    if let Some(color) = style.color {
        xml.push_str(&format!(r#"<w:color w:val="{}"/>"#, color.to_hex()));
    }
    if let Some(size) = style.size_half_points {
        xml.push_str(&format!(r#"<w:sz w:val="{}"/>"#, size));
    }
    if let Some(highlight) = style.highlight {
        xml.push_str(&format!(
            r#"<w:highlight w:val="{}"/>"#,
            highlight.as_xml_value()
        ));
    }
    xml.push_str("</w:rPr>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Highlight, Rgb};
    use crate::read::{read_docx, read_docx_bytes};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_written_package_reads_back() {
        let mut doc = Document::from_texts(["1. Name", "2. Registered office", "Signed: ____"]);
        doc.add_page_break();
        doc.add_paragraph("Tabs\tand\nbreaks & <brackets>");

        let bytes = to_docx_bytes(&doc).unwrap();
        let back = read_docx_bytes(&bytes).unwrap();

        assert_eq!(back.paragraph_texts(), doc.paragraph_texts());
        assert!(back.paragraphs[3].page_break);
    }

    #[test]
    fn test_styled_run_properties() {
        let style = RunStyle {
            bold: true,
            italic: false,
            color: Some(Rgb(255, 0, 0)),
            highlight: Some(Highlight::Yellow),
            size_half_points: Some(18),
        };
        let mut doc = Document::new();
        doc.add_paragraph("Clause").push_run(Run::styled("  [COMMENT: x]", style));

        let xml = document_xml(&doc);
        assert!(xml.contains(r#"<w:color w:val="FF0000"/>"#));
        assert!(xml.contains(r#"<w:highlight w:val="yellow"/>"#));
        assert!(xml.contains(r#"<w:sz w:val="18"/>"#));
        assert!(xml.contains("<w:b/>"));
    }

    #[test]
    fn test_write_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("out.docx");
        write_docx(&Document::from_texts(["hello"]), &path).unwrap();
        assert_eq!(read_docx(&path).unwrap().paragraph_texts(), vec!["hello"]);
    }
}
