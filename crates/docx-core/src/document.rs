//! Paragraph-level document model
//!
//! Only what the review pipeline needs survives a read: the text of each
//! paragraph and explicit page breaks. Run styling is write-side only.

use serde::{Deserialize, Serialize};

use crate::error::DocxError;

/// RGB colour for run text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse a six-digit hex colour such as `FF0000` (a leading `#` is allowed)
    pub fn from_hex(hex: &str) -> Result<Self, DocxError> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(DocxError::InvalidStyle(format!("colour '{}'", hex)));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| DocxError::InvalidStyle(format!("colour '{}'", hex)))
        };
        Ok(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Highlight colours accepted by WordprocessingML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Highlight {
    Yellow,
    Green,
    Cyan,
    Magenta,
    Red,
    LightGray,
}

impl Highlight {
    pub fn from_name(name: &str) -> Result<Self, DocxError> {
        match name.trim().to_lowercase().as_str() {
            "yellow" => Ok(Highlight::Yellow),
            "green" => Ok(Highlight::Green),
            "cyan" => Ok(Highlight::Cyan),
            "magenta" => Ok(Highlight::Magenta),
            "red" => Ok(Highlight::Red),
            "lightgray" | "light_gray" => Ok(Highlight::LightGray),
            other => Err(DocxError::InvalidStyle(format!("highlight '{}'", other))),
        }
    }

    pub fn as_xml_value(self) -> &'static str {
        match self {
            Highlight::Yellow => "yellow",
            Highlight::Green => "green",
            Highlight::Cyan => "cyan",
            Highlight::Magenta => "magenta",
            Highlight::Red => "red",
            Highlight::LightGray => "lightGray",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    pub color: Option<Rgb>,
    pub highlight: Option<Highlight>,
    /// Font size in half-points (`w:sz`), so 24 means 12pt
    pub size_half_points: Option<u32>,
}

impl RunStyle {
    pub fn is_plain(&self) -> bool {
        *self == RunStyle::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    pub style: RunStyle,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: RunStyle::default(),
        }
    }

    pub fn styled(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    /// Paragraph starts with a hard page break
    pub page_break: bool,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            runs: vec![Run::plain(text)],
            page_break: false,
        }
    }

    pub fn page_break() -> Self {
        Self {
            runs: Vec::new(),
            page_break: true,
        }
    }

    /// Concatenated text of every run
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn push_run(&mut self, run: Run) {
        self.runs.push(run);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paragraphs: texts.into_iter().map(Paragraph::new).collect(),
        }
    }

    pub fn add_paragraph(&mut self, text: impl Into<String>) -> &mut Paragraph {
        self.paragraphs.push(Paragraph::new(text));
        let last = self.paragraphs.len() - 1;
        &mut self.paragraphs[last]
    }

    pub fn add_page_break(&mut self) {
        self.paragraphs.push(Paragraph::page_break());
    }

    pub fn paragraph_texts(&self) -> Vec<String> {
        self.paragraphs.iter().map(Paragraph::text).collect()
    }

    /// Non-blank paragraph texts joined with newlines
    pub fn full_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .filter(|t| !t.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_from_hex() {
        assert_eq!(Rgb::from_hex("FF0000").unwrap(), Rgb(255, 0, 0));
        assert_eq!(Rgb::from_hex("#00ff7f").unwrap(), Rgb(0, 255, 127));
        assert_eq!(Rgb(255, 0, 0).to_hex(), "FF0000");
    }

    #[test]
    fn test_rgb_rejects_garbage() {
        assert!(Rgb::from_hex("red").is_err());
        assert!(Rgb::from_hex("FF00").is_err());
        assert!(Rgb::from_hex("GG0000").is_err());
    }

    #[test]
    fn test_highlight_names() {
        assert_eq!(Highlight::from_name("Yellow").unwrap(), Highlight::Yellow);
        assert_eq!(Highlight::LightGray.as_xml_value(), "lightGray");
        assert!(Highlight::from_name("plaid").is_err());
    }

    #[test]
    fn test_full_text_skips_blank_paragraphs() {
        let doc = Document::from_texts(["1. Name", "   ", "", "2. Objects"]);
        assert_eq!(doc.full_text(), "1. Name\n2. Objects");
        assert_eq!(doc.paragraph_texts().len(), 4);
    }

    #[test]
    fn test_paragraph_text_concatenates_runs() {
        let mut p = Paragraph::new("Clause one.");
        p.push_run(Run::plain("  [COMMENT: check]"));
        assert_eq!(p.text(), "Clause one.  [COMMENT: check]");
        assert!(Paragraph::page_break().text().is_empty());
    }
}
