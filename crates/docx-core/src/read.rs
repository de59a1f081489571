//! Reading paragraphs out of a .docx package

use std::io::{Cursor, Read};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::document::{Document, Paragraph, Run};
use crate::error::DocxError;
use crate::DOCUMENT_PART;

/// Read a .docx file from disk
pub fn read_docx(path: &Path) -> Result<Document, DocxError> {
    let bytes = std::fs::read(path)?;
    read_docx_bytes(&bytes)
}

/// Read a .docx package held in memory
pub fn read_docx_bytes(bytes: &[u8]) -> Result<Document, DocxError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    match archive.by_name(DOCUMENT_PART) {
        Ok(mut part) => {
            part.read_to_string(&mut xml)?;
        }
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(DocxError::MissingPart(DOCUMENT_PART.to_string()));
        }
        Err(e) => return Err(e.into()),
    }
    parse_document_xml(&xml)
}

/// Paragraph being collected; text boxes can nest paragraphs inside paragraphs
#[derive(Default)]
struct OpenParagraph {
    text: String,
    page_break: bool,
}

impl OpenParagraph {
    fn finish(self) -> Paragraph {
        let runs = if self.text.is_empty() {
            Vec::new()
        } else {
            vec![Run::plain(self.text)]
        };
        Paragraph {
            runs,
            page_break: self.page_break,
        }
    }
}

/// Extract paragraphs from the `word/document.xml` part
pub fn parse_document_xml(xml: &str) -> Result<Document, DocxError> {
    let mut reader = Reader::from_str(xml);
    let mut document = Document::new();
    let mut open: Vec<OpenParagraph> = Vec::new();
    let mut in_text = false;
    // Depth inside `mc:Fallback`, the legacy copy of an `mc:Choice` text box
    let mut fallback_depth = 0usize;

    loop {
        let event = reader.read_event()?;
        if fallback_depth > 0 {
            match &event {
                Event::Start(e) if e.name().as_ref() == b"mc:Fallback" => fallback_depth += 1,
                Event::End(e) if e.name().as_ref() == b"mc:Fallback" => fallback_depth -= 1,
                Event::Eof => break,
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(e) => match e.name().as_ref() {
                b"mc:Fallback" => fallback_depth = 1,
                b"w:p" => open.push(OpenParagraph::default()),
                b"w:t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:p" => document.paragraphs.push(Paragraph::default()),
                b"w:tab" => push_text(&mut open, "\t"),
                b"w:br" | b"w:cr" => {
                    if is_page_break(&e) {
                        if let Some(current) = open.last_mut() {
                            current.page_break = true;
                        }
                    } else {
                        push_text(&mut open, "\n");
                    }
                }
                _ => {}
            },
            Event::Text(t) if in_text => {
                let text = t.unescape()?;
                push_text(&mut open, &text);
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => {
                    let paragraph = open
                        .pop()
                        .ok_or_else(|| DocxError::Xml("unbalanced </w:p>".to_string()))?;
                    document.paragraphs.push(paragraph.finish());
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if !open.is_empty() {
        return Err(DocxError::Xml("unterminated <w:p>".to_string()));
    }
    if fallback_depth > 0 {
        return Err(DocxError::Xml("unterminated <mc:Fallback>".to_string()));
    }

    tracing::debug!(paragraphs = document.paragraphs.len(), "parsed document part");
    Ok(document)
}

fn push_text(open: &mut [OpenParagraph], text: &str) {
    if let Some(current) = open.last_mut() {
        current.text.push_str(text);
    }
}

fn is_page_break(element: &BytesStart<'_>) -> bool {
    element
        .attributes()
        .flatten()
        .any(|attr| attr.key.as_ref() == b"w:type" && attr.value.as_ref() == b"page")
}
