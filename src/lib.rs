//! # pdfsum
//!
//! Extractive summaries and entity matching for scientific PDFs.
//!
//! Text is cleaned, tokenized into sentences of lemmatized tokens, and the
//! qualifying lemmas are linked in a co-occurrence graph. Weighted PageRank
//! over that graph gives every lemma an importance score; sentences are
//! scored by the mean rank of their lemmas and the best ones are returned in
//! document order. Independently, keyword and phrase patterns locate the
//! sentences that mention given entities.
//!
//! ## Quick Start
//!
//! ```
//! use pdfsum::{PdfSum, SummarizerConfig};
//!
//! let config = SummarizerConfig::default().with_limit_sentences(2);
//! let pdfsum = PdfSum::with_rule_tokenizer(config).unwrap();
//!
//! let summary = pdfsum
//!     .summarize_text(
//!         "Lactic acid bacteria colonize the human gut during pregnancy. \
//!          Maternal gut bacteria shape the infant immune response after birth.",
//!     )
//!     .unwrap();
//! assert_eq!(summary.len(), 2);
//! ```

pub mod errors;
pub mod extract;
pub mod graph;
pub mod nlp;
pub mod pagerank;
pub mod phrase;
pub mod pipeline;
pub mod summarizer;
pub mod types;

pub use errors::{PdfSumError, Result};
pub use extract::{extractor_for_path, PdfReader, PlainTextExtractor, TextExtractor};
#[cfg(feature = "pdf")]
pub use extract::PdfExtractor;
pub use nlp::cleaner::{select_sentences, Selected, SelectionOutput, TextCleaner};
pub use nlp::stopwords::StopwordFilter;
pub use nlp::tokenizer::{RuleTokenizer, Tokenizer};
pub use pagerank::RankVector;
pub use phrase::{build_patterns, Match, MatchMode, MatchSpan, PatternSet, PhraseMatcher};
pub use pipeline::PdfSum;
pub use summarizer::{ScoredSentence, Summary};
pub use types::{
    Document, LengthBounds, PosTag, SelectionStrategy, Sentence, SummarizerConfig, Token,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
