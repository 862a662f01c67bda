#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Per-page text loading for batch bill documents.
//!
//! Bills arrive as one PDF with one tenant bill per page. Extraction only
//! needs each page's text, in page order, so this crate turns a document
//! into a `Vec<String>` with one entry per page.
//!
//! PDFs go through [`pdf_extract`]. Anything else is treated as
//! already-extracted text with pages separated by form feeds (`\x0c`), the
//! format `pdftotext` writes.

use std::path::Path;

/// Page separator in extracted text.
pub const PAGE_BREAK: char = '\x0c';

/// Errors specific to page text loading.
#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    /// PDF text extraction failed.
    #[error("PDF extraction error: {0}")]
    Extraction(String),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Extracts the text of every page of an in-memory PDF.
///
/// # Errors
///
/// Returns [`PdfError::Extraction`] if the PDF cannot be parsed.
pub fn page_texts_from_mem(bytes: &[u8]) -> Result<Vec<String>, PdfError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| PdfError::Extraction(format!("failed to extract text from PDF: {e}")))?;

    log::debug!(
        "Extracted {} page(s), {} characters of text",
        pages.len(),
        pages.iter().map(String::len).sum::<usize>()
    );

    Ok(pages)
}

/// Splits already-extracted text into pages on form feeds.
///
/// Blank pages are kept so page numbers stay aligned with the source
/// document. A single trailing form feed does not start a new page.
#[must_use]
pub fn page_texts_from_text(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let text = text.strip_suffix(PAGE_BREAK).unwrap_or(text);
    text.split(PAGE_BREAK).map(str::to_owned).collect()
}

/// Returns `true` if `path` has a `.pdf` extension (any case).
#[must_use]
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Loads the page texts of a document from disk.
///
/// # Errors
///
/// Returns [`PdfError::Io`] if the file cannot be read, or
/// [`PdfError::Extraction`] if a PDF cannot be parsed.
pub fn load_pages(path: &Path) -> Result<Vec<String>, PdfError> {
    let pages = if is_pdf(path) {
        let bytes = std::fs::read(path)?;
        log::debug!("Read {} bytes from {}", bytes.len(), path.display());
        page_texts_from_mem(&bytes)?
    } else {
        page_texts_from_text(&std::fs::read_to_string(path)?)
    };

    log::info!("Loaded {} page(s) from {}", pages.len(), path.display());

    Ok(pages)
}
