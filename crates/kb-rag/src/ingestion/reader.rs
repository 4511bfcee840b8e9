//! Per-format text extraction

use crate::error::{Error, Result};

use super::router::ReaderKind;

/// Text pulled out of an uploaded file
#[derive(Debug, Clone)]
pub struct ExtractedText {
    /// Full extracted text
    pub text: String,
    /// Page count, when the format has pages
    pub pages: Option<u32>,
}

/// Extract text from `data` using the reader for `kind`.
///
/// `filename` is only used in error messages.
pub fn extract(kind: ReaderKind, filename: &str, data: &[u8]) -> Result<ExtractedText> {
    match kind {
        ReaderKind::Pdf => extract_pdf(filename, data),
        ReaderKind::PlainText => extract_plain(data),
        ReaderKind::Tabular => extract_csv(filename, data),
        ReaderKind::WordProcessor => extract_docx(filename, data),
    }
}

fn extract_pdf(filename: &str, data: &[u8]) -> Result<ExtractedText> {
    let text = pdf_extract::extract_text_from_mem(data)
        .map_err(|e| Error::extraction(filename, e.to_string()))?;

    let pages = match lopdf::Document::load_mem(data) {
        Ok(doc) => Some(doc.get_pages().len() as u32),
        Err(_) => None,
    };

    Ok(ExtractedText { text, pages })
}

fn extract_plain(data: &[u8]) -> Result<ExtractedText> {
    Ok(ExtractedText {
        text: String::from_utf8_lossy(data).to_string(),
        pages: None,
    })
}

fn extract_csv(filename: &str, data: &[u8]) -> Result<ExtractedText> {
    let mut reader = csv::Reader::from_reader(data);
    let mut text = String::new();

    if let Ok(headers) = reader.headers() {
        text.push_str(&headers.iter().collect::<Vec<_>>().join(", "));
        text.push('\n');
    }

    for record in reader.records() {
        let record = record.map_err(|e| Error::extraction(filename, e.to_string()))?;
        text.push_str(&record.iter().collect::<Vec<_>>().join(", "));
        text.push('\n');
    }

    Ok(ExtractedText { text, pages: None })
}

fn extract_docx(filename: &str, data: &[u8]) -> Result<ExtractedText> {
    let doc = docx_rs::read_docx(data).map_err(|e| Error::extraction(filename, e.to_string()))?;

    let mut text = String::new();
    for child in doc.document.children {
        if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
            let line = paragraph_text(&paragraph);
            text.push_str(&line);
            text.push('\n');
        }
    }

    Ok(ExtractedText { text, pages: None })
}

fn paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
    let mut line = String::new();
    for child in &paragraph.children {
        if let docx_rs::ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let docx_rs::RunChild::Text(t) = run_child {
                    line.push_str(&t.text);
                }
            }
        }
    }
    line
}
