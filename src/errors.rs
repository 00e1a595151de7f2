//! Error types for pdfsum
//!
//! Degenerate input (empty text, every sentence filtered out) is not an
//! error anywhere in the crate; it yields empty summaries and match lists.

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, PdfSumError>;

/// Errors reported by the summarization and matching pipeline
#[derive(Debug, Error)]
pub enum PdfSumError {
    /// No tokenizer capability has been installed in the context
    #[error("tokenizer is not loaded")]
    TokenizerNotLoaded,

    /// A parameter failed validation before any work was done
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Text extraction produced nothing where text was required
    #[error("no text could be extracted from the document")]
    NoText,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed configuration file: {0}")]
    Config(#[from] serde_json::Error),
}

impl PdfSumError {
    /// Shorthand for [`PdfSumError::InvalidConfig`]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// `true` for errors caused by parameters rather than by the data
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidConfig(_) | Self::Config(_))
    }
}
