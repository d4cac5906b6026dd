//! PDF text extraction.

use tracing::debug;

use crate::error::{QaError, Result};

/// Extracts plain text from raw document bytes.
///
/// Implementations must preserve page order and keep a page-boundary
/// marker between pages so chunking never silently merges unrelated pages.
pub trait TextExtractor: Send + Sync {
    /// Extract all text from the given bytes.
    ///
    /// A page without an extractable text layer contributes an empty
    /// string, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`QaError::ExtractionError`] on corrupt, truncated, or
    /// encrypted input.
    fn extract(&self, data: &[u8]) -> Result<String>;
}

/// A [`TextExtractor`] for PDF files backed by the `pdf-extract` crate.
///
/// Pages are extracted in document order and joined with a single newline.
/// There is no OCR fallback: image-only pages contribute no text.
#[derive(Debug, Clone, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    /// Create a new PDF text extractor.
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, data: &[u8]) -> Result<String> {
        debug!(bytes = data.len(), "extracting PDF text");

        let pages = pdf_extract::extract_text_from_mem_by_pages(data)
            .map_err(|e| QaError::ExtractionError(format!("failed to read PDF: {e}")))?;

        let text = pages.join("\n");
        debug!(pages = pages.len(), chars = text.len(), "extracted PDF text");
        Ok(text)
    }
}
