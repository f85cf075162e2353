//! Statement text extraction
//!
//! Turns an uploaded document into a flat text string before anything is
//! sent to the extraction model. PDFs go through `pdf-extract`; everything
//! else is treated as plain text. An empty result is always an error: a
//! statement that yields no text is an image-only, encrypted, or corrupt
//! document, not an empty statement.

use tracing::debug;

use crate::error::{Error, Result};

/// Magic bytes at the start of every PDF file
const PDF_MAGIC: &[u8] = b"%PDF";

/// Extract plain text from an uploaded statement document
///
/// Accepts raw PDF bytes or plain text bytes and returns the statement text.
pub fn extract_statement_text(bytes: &[u8]) -> Result<String> {
    if bytes.is_empty() {
        return Err(Error::Extraction("the uploaded file is empty".into()));
    }

    let text = if is_pdf(bytes) {
        debug!(size = bytes.len(), "Extracting text from PDF statement");
        pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| Error::Extraction(format!("PDF parsing failed: {}", e)))?
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    };

    if text.trim().is_empty() {
        return Err(Error::Extraction(
            "the document contains no extractable text (it may be image-only or encrypted)".into(),
        ));
    }

    Ok(text)
}

/// Check whether the payload looks like a PDF
pub fn is_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_MAGIC)
}
