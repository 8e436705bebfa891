//! Text extraction — turns an uploaded PDF, DOCX or TXT document into plain text.
//!
//! The decoder is picked from the file name's extension alone; the bytes are
//! never sniffed. Each format has its own submodule with a pure
//! `bytes -> String` function.

use thiserror::Error;

use crate::models::evaluation::UploadedFile;

pub mod docx;
pub mod pdf;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported document format: {0} (only PDF, DOCX and TXT are accepted)")]
    UnsupportedFormat(String),

    #[error("failed to decode {format} document: {message}")]
    Decode {
        format: &'static str,
        message: String,
    },
}

impl ExtractError {
    pub(crate) fn decode(format: &'static str, message: impl ToString) -> Self {
        ExtractError::Decode {
            format,
            message: message.to_string(),
        }
    }
}

/// Declared format of an upload, derived from its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
    Unsupported,
}

impl DocumentFormat {
    /// Case-insensitive suffix match on the file name.
    pub fn from_file_name(name: &str) -> Self {
        let name = name.to_lowercase();
        if name.ends_with(".pdf") {
            DocumentFormat::Pdf
        } else if name.ends_with(".docx") {
            DocumentFormat::Docx
        } else if name.ends_with(".txt") {
            DocumentFormat::Txt
        } else {
            DocumentFormat::Unsupported
        }
    }
}

/// Extracts the plain text of `file` according to its extension.
pub fn extract_text(file: &UploadedFile) -> Result<String, ExtractError> {
    match DocumentFormat::from_file_name(&file.name) {
        DocumentFormat::Pdf => pdf::extract_pdf_text(&file.bytes),
        DocumentFormat::Docx => docx::extract_docx_text(&file.bytes),
        DocumentFormat::Txt => extract_plain_text(&file.bytes),
        DocumentFormat::Unsupported => Err(ExtractError::UnsupportedFormat(file.name.clone())),
    }
}

fn extract_plain_text(bytes: &[u8]) -> Result<String, ExtractError> {
    String::from_utf8(bytes.to_vec()).map_err(|e| ExtractError::decode("txt", e))
}

/// Seam for the evaluator so tests can count or replace extraction.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, file: &UploadedFile) -> Result<String, ExtractError>;
}

/// Production extractor: dispatches on [`DocumentFormat`].
pub struct DocumentExtractor;

impl TextExtractor for DocumentExtractor {
    fn extract(&self, file: &UploadedFile) -> Result<String, ExtractError> {
        extract_text(file)
    }
}
