//! Text extraction from document bytes
//!
//! Extraction is a capability: anything that turns bytes into text can
//! implement [`TextExtractor`]. Failures are reported as `None` and logged;
//! callers that need text turn that into [`crate::PdfSumError::NoText`].

pub mod reader;

pub use reader::PdfReader;

use std::path::Path;

/// Turns raw document bytes into plain text
pub trait TextExtractor: Send + Sync {
    /// Extract the text of `bytes`, or `None` if it cannot be read
    fn extract(&self, bytes: &[u8]) -> Option<String>;
}

/// UTF-8 text, invalid sequences replaced
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Option<String> {
        Some(String::from_utf8_lossy(bytes).into_owned())
    }
}

/// PDF text layer via `pdf-extract`
#[cfg(feature = "pdf")]
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

#[cfg(feature = "pdf")]
impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Option<String> {
        // pdf-extract panics on some malformed fonts
        let result = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));
        match result {
            Ok(Ok(text)) => Some(text),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "PDF extraction failed");
                None
            }
            Err(_) => {
                tracing::warn!("PDF extraction panicked");
                None
            }
        }
    }
}

/// Pick an extractor by file extension
///
/// `.pdf` files need the `pdf` feature; every other extension is read as
/// plain text.
pub fn extractor_for_path(path: &Path) -> Option<Box<dyn TextExtractor>> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        #[cfg(feature = "pdf")]
        "pdf" => Some(Box::new(PdfExtractor)),
        #[cfg(not(feature = "pdf"))]
        "pdf" => {
            tracing::warn!(path = %path.display(), "built without PDF support");
            None
        }
        _ => Some(Box::new(PlainTextExtractor)),
    }
}
