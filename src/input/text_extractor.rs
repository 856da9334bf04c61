//! Text extraction from uploaded documents

use crate::error::{CvTailorError, Result};
use crate::input::file_detector::FileType;
use pulldown_cmark::{Event, Parser, Tag};

/// Raw bytes of an uploaded file together with its declared name
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn file_type(&self) -> FileType {
        FileType::from_name(&self.name)
    }
}

pub trait TextExtractor {
    fn extract(&self, document: &UploadedDocument) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, document: &UploadedDocument) -> Result<String> {
        pdf_extract::extract_text_from_mem(&document.bytes).map_err(|e| {
            CvTailorError::DocumentUnreadable(format!(
                "Failed to extract text from PDF '{}': {}",
                document.name, e
            ))
        })
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, document: &UploadedDocument) -> Result<String> {
        String::from_utf8(document.bytes.clone()).map_err(|e| {
            CvTailorError::DocumentUnreadable(format!(
                "'{}' is not valid UTF-8 text: {}",
                document.name, e
            ))
        })
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, document: &UploadedDocument) -> Result<String> {
        let markdown = PlainTextExtractor.extract(document)?;
        Ok(self.flatten(&markdown))
    }
}

impl MarkdownExtractor {
    /// Keep the text runs of a markdown document, one block per line
    fn flatten(&self, markdown: &str) -> String {
        let mut text = String::new();

        for event in Parser::new(markdown) {
            match event {
                Event::Text(run) | Event::Code(run) => text.push_str(&run),
                Event::SoftBreak | Event::HardBreak => text.push('\n'),
                Event::End(Tag::Paragraph | Tag::Heading(..) | Tag::Item | Tag::CodeBlock(_)) => {
                    text.push('\n')
                }
                _ => {}
            }
        }

        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Route a document to the extractor for its declared type
pub fn extract_document(document: &UploadedDocument) -> Result<String> {
    match document.file_type() {
        FileType::Pdf => PdfExtractor.extract(document),
        FileType::Text => PlainTextExtractor.extract(document),
        FileType::Markdown => MarkdownExtractor.extract(document),
        FileType::Csv | FileType::Unknown => Err(CvTailorError::UnsupportedFormat(format!(
            "Cannot extract text from '{}' (expected PDF, TXT or MD)",
            document.name
        ))),
    }
}
