//! Core types for pdfsum
//!
//! This module defines the document model produced by tokenization
//! (documents, sentences, tokens) and the summarizer configuration.

use crate::errors::{PdfSumError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Token
// ============================================================================

/// Part-of-speech tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PosTag {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Determiner,
    Preposition,
    Conjunction,
    Interjection,
    Numeral,
    Particle,
    Punctuation,
    Symbol,
    ProperNoun,
    Space,
    #[default]
    Other,
}

impl PosTag {
    /// Parse from spaCy-style POS tag
    pub fn from_spacy(tag: &str) -> Self {
        match tag.to_uppercase().as_str() {
            "NOUN" => PosTag::Noun,
            "VERB" | "AUX" => PosTag::Verb,
            "ADJ" => PosTag::Adjective,
            "ADV" => PosTag::Adverb,
            "PRON" => PosTag::Pronoun,
            "DET" => PosTag::Determiner,
            "ADP" => PosTag::Preposition,
            "CCONJ" | "SCONJ" => PosTag::Conjunction,
            "INTJ" => PosTag::Interjection,
            "NUM" => PosTag::Numeral,
            "PART" => PosTag::Particle,
            "PUNCT" => PosTag::Punctuation,
            "SYM" => PosTag::Symbol,
            "PROPN" => PosTag::ProperNoun,
            "SPACE" => PosTag::Space,
            _ => PosTag::Other,
        }
    }

    /// Get the spaCy-style POS tag string for this enum.
    pub fn as_str(&self) -> &'static str {
        match self {
            PosTag::Noun => "NOUN",
            PosTag::Verb => "VERB",
            PosTag::Adjective => "ADJ",
            PosTag::Adverb => "ADV",
            PosTag::Pronoun => "PRON",
            PosTag::Determiner => "DET",
            PosTag::Preposition => "ADP",
            PosTag::Conjunction => "CCONJ",
            PosTag::Interjection => "INTJ",
            PosTag::Numeral => "NUM",
            PosTag::Particle => "PART",
            PosTag::Punctuation => "PUNCT",
            PosTag::Symbol => "SYM",
            PosTag::ProperNoun => "PROPN",
            PosTag::Space => "SPACE",
            PosTag::Other => "X",
        }
    }
}

/// An annotated token
///
/// `start` and `end` are character (not byte) offsets relative to the start
/// of the owning sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The surface form (original text)
    pub text: String,
    /// The lemmatized form (normalized)
    pub lemma: String,
    /// Part-of-speech tag
    pub pos: PosTag,
    /// Character offset (start) within the sentence
    pub start: usize,
    /// Character offset (end, exclusive) within the sentence
    pub end: usize,
    pub is_alpha: bool,
    pub is_stopword: bool,
    pub is_punct: bool,
    pub is_numeric: bool,
    pub is_space: bool,
}

impl Token {
    /// Create a new token, deriving the character-class flags from `text`
    pub fn new(
        text: impl Into<String>,
        lemma: impl Into<String>,
        pos: PosTag,
        start: usize,
        end: usize,
    ) -> Self {
        let text = text.into();
        let is_space = !text.is_empty() && text.chars().all(char::is_whitespace);
        let is_alpha = !text.is_empty() && text.chars().all(char::is_alphabetic);
        let is_punct = !text.is_empty()
            && text
                .chars()
                .all(|c| c.is_ascii_punctuation() || (!c.is_alphanumeric() && !c.is_whitespace()));
        let is_numeric = looks_numeric(&text);

        Self {
            text,
            lemma: lemma.into(),
            pos,
            start,
            end,
            is_alpha,
            is_stopword: false,
            is_punct,
            is_numeric,
            is_space,
        }
    }

    /// Builder method: mark the token as a stopword
    pub fn with_stopword(mut self, is_stopword: bool) -> Self {
        self.is_stopword = is_stopword;
        self
    }

    /// Check if this token should become a node of the rank graph
    pub fn is_graph_candidate(&self) -> bool {
        self.is_alpha
            && !(self.is_space || self.is_punct || self.is_stopword || self.is_numeric)
            && self.lemma.chars().count() > 1
    }

    /// Lower-cased surface form, the key used by pattern matching
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }
}

/// Digits with optional grouping/decimal separators, e.g. `12`, `3.5`, `1,000`
fn looks_numeric(text: &str) -> bool {
    let mut digits = 0;
    for c in text.chars() {
        if c.is_ascii_digit() {
            digits += 1;
        } else if !matches!(c, '.' | ',' | '-' | '+' | '%') {
            return false;
        }
    }
    digits > 0
}

// ============================================================================
// Sentence & Document
// ============================================================================

/// A sentence of a tokenized document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    /// The sentence text
    pub text: String,
    /// Start character offset in the document text
    pub start: usize,
    /// End character offset (exclusive) in the document text
    pub end: usize,
    /// Sentence index within the tokenized document
    pub index: usize,
    /// Tokens in text order
    pub tokens: Vec<Token>,
}

impl Sentence {
    /// Create a new sentence
    pub fn new(
        text: impl Into<String>,
        start: usize,
        end: usize,
        index: usize,
        tokens: Vec<Token>,
    ) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            index,
            tokens,
        }
    }

    /// Length of the sentence text in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Lemmas of the tokens that qualify as graph nodes, in order
    pub fn graph_lemmas(&self) -> impl Iterator<Item = &str> + '_ {
        self.tokens
            .iter()
            .filter(|t| t.is_graph_candidate())
            .map(|t| t.lemma.as_str())
    }

    /// Substring between two character offsets of this sentence
    pub fn slice_chars(&self, start: usize, end: usize) -> &str {
        let byte_at = |pos: usize| {
            self.text
                .char_indices()
                .nth(pos)
                .map_or(self.text.len(), |(b, _)| b)
        };
        let (from, to) = (byte_at(start), byte_at(end.max(start)));
        &self.text[from..to]
    }
}

/// An ordered, non-overlapping sequence of sentences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    sentences: Vec<Sentence>,
}

impl Document {
    /// Create a document from sentences already in text order
    pub fn new(sentences: Vec<Sentence>) -> Self {
        debug_assert!(sentences.windows(2).all(|w| w[0].end <= w[1].start));
        Self { sentences }
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn into_sentences(self) -> Vec<Sentence> {
        self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Total number of tokens across all sentences
    pub fn token_count(&self) -> usize {
        self.sentences.iter().map(|s| s.tokens.len()).sum()
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Exclusive length bounds (in characters) for sentence candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthBounds {
    pub min_len: usize,
    pub max_len: usize,
}

impl Default for LengthBounds {
    fn default() -> Self {
        Self {
            min_len: 40,
            max_len: 400,
        }
    }
}

impl LengthBounds {
    /// Create validated bounds
    pub fn new(min_len: usize, max_len: usize) -> Result<Self> {
        let bounds = Self { min_len, max_len };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_len >= self.max_len {
            return Err(PdfSumError::invalid_config(format!(
                "min_len ({}) must be smaller than max_len ({})",
                self.min_len, self.max_len
            )));
        }
        Ok(())
    }

    /// Strict on both ends
    pub fn contains(&self, len: usize) -> bool {
        self.min_len < len && len < self.max_len
    }
}

/// How sentences are picked once they are scored
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Highest mean rank first, ties by document order
    #[default]
    TopScore,
    /// Maximal Marginal Relevance: `lambda` weighs relevance against
    /// similarity to sentences already chosen
    Diverse { lambda: f64 },
}

/// Configuration for summarization
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Damping factor for rank propagation (typically 0.85)
    pub damping: f64,
    /// Hard cap on propagation iterations
    pub max_iterations: usize,
    /// Stop when the L1 change between iterations drops below this
    pub convergence_threshold: f64,
    /// Co-occurrence window, counted in qualifying-token positions
    pub window_size: usize,
    /// Number of sentences in the summary
    pub limit_sentences: usize,
    /// Sentence length bounds applied after tokenization
    pub bounds: LengthBounds,
    /// Drop the trailing reference section and bracketed citations
    pub remove_references: bool,
    /// Language code for the built-in stopword list
    pub language: String,
    /// Extra stopwords on top of the built-in list
    pub stopwords: Vec<String>,
    pub selection: SelectionStrategy,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            convergence_threshold: 1e-6,
            window_size: 3,
            limit_sentences: 20,
            bounds: LengthBounds::default(),
            remove_references: true,
            language: "en".to_string(),
            stopwords: Vec::new(),
            selection: SelectionStrategy::TopScore,
        }
    }
}

impl SummarizerConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a JSON file; absent fields take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(PdfSumError::invalid_config(format!(
                "damping must be between 0 and 1, got {}",
                self.damping
            )));
        }

        if self.max_iterations == 0 {
            return Err(PdfSumError::invalid_config("max_iterations must be > 0"));
        }

        // Negated so that NaN fails as well
        if !(self.convergence_threshold > 0.0) {
            return Err(PdfSumError::invalid_config(
                "convergence_threshold must be > 0",
            ));
        }

        if self.window_size < 2 {
            return Err(PdfSumError::invalid_config("window_size must be >= 2"));
        }

        if self.limit_sentences == 0 {
            return Err(PdfSumError::invalid_config("limit_sentences must be > 0"));
        }

        if let SelectionStrategy::Diverse { lambda } = self.selection {
            if !(0.0..=1.0).contains(&lambda) {
                return Err(PdfSumError::invalid_config(format!(
                    "lambda must be between 0 and 1, got {lambda}"
                )));
            }
        }

        self.bounds.validate()
    }

    /// Builder method: set damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Builder method: set max iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Builder method: set convergence threshold
    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    /// Builder method: set window size
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Builder method: set the summary length
    pub fn with_limit_sentences(mut self, limit: usize) -> Self {
        self.limit_sentences = limit;
        self
    }

    /// Builder method: set sentence length bounds
    pub fn with_bounds(mut self, min_len: usize, max_len: usize) -> Self {
        self.bounds = LengthBounds { min_len, max_len };
        self
    }

    pub fn with_remove_references(mut self, remove: bool) -> Self {
        self.remove_references = remove;
        self
    }

    /// Builder method: set language
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_selection(mut self, selection: SelectionStrategy) -> Self {
        self.selection = selection;
        self
    }
}
