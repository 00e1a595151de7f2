//! End-to-end summarization pipeline
//!
//! See [`runner::PdfSum`] for the stage sequence.

pub mod runner;

pub use runner::PdfSum;
