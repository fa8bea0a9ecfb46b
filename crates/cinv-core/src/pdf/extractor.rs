//! PDF text extraction using lopdf and pdf-extract.

use std::borrow::Cow;

use lopdf::Document;
use tracing::{debug, trace};

use super::{PageTextSource, Result};
use crate::error::PdfError;

/// Page text extractor backed by lopdf (loading, decryption) and
/// pdf-extract (text layout).
#[derive(Debug, Clone, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self
    }

    /// Load a document, decrypting it when it only has an empty password.
    ///
    /// Returns the bytes text extraction should read: the input itself, or
    /// a decrypted copy.
    fn prepare<'a>(&self, data: &'a [u8]) -> Result<(Cow<'a, [u8]>, usize)> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        let bytes = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            Cow::Owned(decrypted)
        } else {
            Cow::Borrowed(data)
        };

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        Ok((bytes, page_count))
    }
}

impl PageTextSource for PdfExtractor {
    fn page_texts(&self, data: &[u8]) -> Result<Vec<String>> {
        let (bytes, page_count) = self.prepare(data)?;
        debug!("Loaded PDF with {} pages", page_count);

        // pdf-extract panics on some documents lopdf accepts
        let pages = match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(&bytes)
        })) {
            Ok(Ok(pages)) => pages,
            Ok(Err(e)) => return Err(PdfError::TextExtraction(e.to_string())),
            Err(panic) => return Err(PdfError::TextExtraction(panic_message(panic.as_ref()))),
        };

        trace!(
            "Extracted {} chars from {} pages",
            pages.iter().map(String::len).sum::<usize>(),
            pages.len()
        );
        Ok(pages)
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    let detail = panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string());
    format!("text extraction panicked: {}", detail)
}
