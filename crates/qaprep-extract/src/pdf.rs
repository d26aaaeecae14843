//! PDF page extraction.
//!
//! Produces the primary document for nested-key resolution: a JSON object
//! mapping `Page_1`, `Page_2`, … to each page's text. Page boundaries come
//! from the form feeds `pdf-extract` emits between pages; a document with
//! no form feeds becomes a single `Page_1`.

use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    #[error("PDF extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF feature not enabled. Compile with --features pdf")]
    FeatureNotEnabled,
}

/// Extract page texts keyed by page label.
#[cfg(feature = "pdf")]
pub fn extract_pages(path: &Path) -> Result<BTreeMap<String, String>, PdfError> {
    let text = pdf_extract::extract_text(path)
        .map_err(|e| PdfError::ExtractionFailed(e.to_string()))?;
    Ok(pages_from_text(&text))
}

/// Fallback when the pdf feature is not enabled.
#[cfg(not(feature = "pdf"))]
pub fn extract_pages(_path: &Path) -> Result<BTreeMap<String, String>, PdfError> {
    Err(PdfError::FeatureNotEnabled)
}

/// Split extracted text on form feeds into the page-keyed map. Interior
/// blank pages keep their number; a trailing form feed does not create a
/// phantom page.
pub fn pages_from_text(text: &str) -> BTreeMap<String, String> {
    let mut chunks: Vec<&str> = text.split('\x0C').collect();
    while chunks.last().is_some_and(|c| c.trim().is_empty()) {
        chunks.pop();
    }

    chunks
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| (format!("Page_{}", i + 1), chunk.to_string()))
        .collect()
}
