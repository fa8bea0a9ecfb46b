//! PDF text extraction.

mod extractor;

pub use extractor::PdfExtractor;

#[cfg(test)]
pub(crate) use extractor::fixtures;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Source of per-page plain text for a document.
///
/// Pages come back in document order with line breaks preserved. The
/// extraction pipeline only ever sees these strings.
pub trait PageTextSource {
    /// Extract the text of every page from a fully buffered document.
    fn page_texts(&self, data: &[u8]) -> Result<Vec<String>>;
}

impl<T: PageTextSource + ?Sized> PageTextSource for &T {
    fn page_texts(&self, data: &[u8]) -> Result<Vec<String>> {
        (**self).page_texts(data)
    }
}

impl<T: PageTextSource + ?Sized> PageTextSource for Box<T> {
    fn page_texts(&self, data: &[u8]) -> Result<Vec<String>> {
        (**self).page_texts(data)
    }
}
