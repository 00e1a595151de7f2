//! Path-based document reader

use super::{extractor_for_path, TextExtractor};
use crate::errors::{PdfSumError, Result};
use std::path::{Path, PathBuf};

/// Reads a document from disk and flattens it to a single line of text
pub struct PdfReader {
    path: PathBuf,
    extractor: Option<Box<dyn TextExtractor>>,
    text_len: usize,
}

impl std::fmt::Debug for PdfReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfReader")
            .field("path", &self.path)
            .field("text_len", &self.text_len)
            .finish()
    }
}

impl PdfReader {
    /// Create a reader choosing the extractor from the file extension
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let extractor = extractor_for_path(&path);
        Self {
            path,
            extractor,
            text_len: 0,
        }
    }

    /// Create a reader with an explicit extractor
    pub fn with_extractor(path: impl Into<PathBuf>, extractor: impl TextExtractor + 'static) -> Self {
        Self {
            path: path.into(),
            extractor: Some(Box::new(extractor)),
            text_len: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Extract the document text
    ///
    /// Newlines become spaces and carriage returns are dropped. Returns
    /// `None` if the file cannot be read or extraction fails.
    pub fn get_text(&mut self) -> Option<String> {
        let extractor = self.extractor.as_deref()?;
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read document");
                return None;
            }
        };

        let text = extractor.extract(&bytes)?.replace('\n', " ").replace('\r', "");
        self.text_len = text.chars().count();
        tracing::debug!(path = %self.path.display(), chars = self.text_len, "extracted text");
        Some(text)
    }

    /// Character length of the last extracted text, 0 before extraction
    pub fn len(&self) -> usize {
        self.text_len
    }

    pub fn is_empty(&self) -> bool {
        self.text_len == 0
    }

    /// Extract the text and write it to `out`, creating parent directories
    pub fn save_text(&mut self, out: impl AsRef<Path>) -> Result<()> {
        let text = self.get_text().ok_or(PdfSumError::NoText)?;
        let out = out.as_ref();
        if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(out, text)?;
        Ok(())
    }
}
