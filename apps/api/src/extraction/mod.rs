//! PDF upload validation and text extraction.
//!
//! Two extractors run over every upload: `pdf-extract` (layout aware) and a
//! page-by-page `lopdf` pass. The longer trimmed output wins; an upload where
//! both come back blank is reported as unreadable rather than analyzed.
//!
//! Extraction is CPU-bound. Async callers must go through
//! `tokio::task::spawn_blocking`.

use std::panic::{self, AssertUnwindSafe};

use lopdf::Document;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const MEGABYTE: usize = 1024 * 1024;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("No file uploaded")]
    MissingFile,

    #[error("File must be a PDF")]
    NotPdf,

    #[error("File size must be less than {limit_mb}MB")]
    TooLarge { limit_mb: usize },

    #[error("Invalid PDF file: {0}")]
    InvalidPdf(String),

    #[error("Could not extract text from PDF. The PDF might be image-based or corrupted.")]
    NoText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionMethod {
    PdfExtract,
    Lopdf,
}

/// A single text extraction backend. Failures are reported as strings since
/// the caller only logs them and moves on to the next backend.
pub trait TextExtractor: Send + Sync {
    fn method(&self) -> ExtractionMethod;
    fn extract(&self, bytes: &[u8]) -> Result<String, String>;
}

pub struct PdfExtractBackend;

impl TextExtractor for PdfExtractBackend {
    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::PdfExtract
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, String> {
        // pdf-extract panics on some malformed font tables.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(bytes)
        }));
        match outcome {
            Ok(Ok(text)) => Ok(text.trim().to_string()),
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => Err("pdf-extract panicked while decoding the document".to_string()),
        }
    }
}

pub struct LopdfBackend;

impl TextExtractor for LopdfBackend {
    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::Lopdf
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, String> {
        let doc = Document::load_mem(bytes).map_err(|e| e.to_string())?;

        let mut text = String::new();
        for page_num in doc.get_pages().keys() {
            match doc.extract_text(&[*page_num]) {
                Ok(page_text) if !page_text.trim().is_empty() => {
                    text.push_str(&page_text);
                    text.push('\n');
                }
                Ok(_) => {}
                Err(e) => debug!("lopdf could not extract page {page_num}: {e}"),
            }
        }
        Ok(text.trim().to_string())
    }
}

/// Winning extraction output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedText {
    pub text: String,
    pub method: ExtractionMethod,
    pub word_count: usize,
    pub char_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub file_name: String,
    pub file_size: usize,
    pub extraction_method: ExtractionMethod,
    pub word_count: usize,
    pub char_count: usize,
}

#[derive(Debug, Clone)]
pub struct ExtractedResume {
    pub text: String,
    pub metadata: DocumentMetadata,
}

/// Checks the upload before any extraction work: present, `.pdf` name, within
/// the size limit, and loadable as a PDF document.
pub fn validate_upload(
    file_name: &str,
    bytes: &[u8],
    max_bytes: usize,
) -> Result<(), ExtractionError> {
    if bytes.is_empty() {
        return Err(ExtractionError::MissingFile);
    }
    if !file_name.to_lowercase().ends_with(".pdf") {
        return Err(ExtractionError::NotPdf);
    }
    if bytes.len() > max_bytes {
        return Err(ExtractionError::TooLarge {
            limit_mb: max_bytes.div_ceil(MEGABYTE),
        });
    }
    Document::load_mem(bytes)
        .map(|_| ())
        .map_err(|e| ExtractionError::InvalidPdf(e.to_string()))
}

/// Runs both default backends and keeps the longer output.
pub fn extract_text(bytes: &[u8]) -> Result<ExtractedText, ExtractionError> {
    extract_best(bytes, &[&PdfExtractBackend, &LopdfBackend])
}

/// Runs each backend in order. A later backend wins ties, so the first
/// backend only wins when it produced strictly more text.
pub fn extract_best(
    bytes: &[u8],
    backends: &[&dyn TextExtractor],
) -> Result<ExtractedText, ExtractionError> {
    let mut best: Option<(ExtractionMethod, String)> = None;

    for backend in backends {
        let text = match backend.extract(bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!("{:?} extraction failed: {e}", backend.method());
                String::new()
            }
        };
        let chars = text.chars().count();
        info!("{:?} extracted {chars} chars", backend.method());

        let replace = match &best {
            Some((_, current)) => chars >= current.chars().count(),
            None => true,
        };
        if replace {
            best = Some((backend.method(), text));
        }
    }

    match best {
        Some((method, text)) if !text.trim().is_empty() => {
            info!("Using {method:?} extraction");
            Ok(ExtractedText {
                word_count: text.split_whitespace().count(),
                char_count: text.chars().count(),
                text,
                method,
            })
        }
        _ => {
            warn!("All extraction methods failed");
            Err(ExtractionError::NoText)
        }
    }
}

/// Full upload pipeline: validate, then extract.
pub fn process_upload(
    file_name: &str,
    bytes: &[u8],
    max_bytes: usize,
) -> Result<ExtractedResume, ExtractionError> {
    validate_upload(file_name, bytes, max_bytes)?;
    let extracted = extract_text(bytes)?;

    Ok(ExtractedResume {
        metadata: DocumentMetadata {
            file_name: file_name.to_string(),
            file_size: bytes.len(),
            extraction_method: extracted.method,
            word_count: extracted.word_count,
            char_count: extracted.char_count,
        },
        text: extracted.text,
    })
}
