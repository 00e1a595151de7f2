//! Summarization components
//!
//! Sentences are scored by the mean rank of their lemmas
//! ([`scorer::SentenceScorer`]) and picked either by score alone or with an
//! MMR redundancy penalty ([`selector::SentenceSelector`]).

pub mod scorer;
pub mod selector;
pub mod unit_vector;

use crate::types::Sentence;
use serde::Serialize;

/// A selected sentence with its mean-rank score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSentence {
    pub sentence: Sentence,
    pub score: f64,
}

impl ScoredSentence {
    pub fn new(sentence: Sentence, score: f64) -> Self {
        Self { sentence, score }
    }
}

/// Result of summarizing one document
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    /// Selected sentences in document order
    pub sentences: Vec<ScoredSentence>,
    /// Rank propagation iterations
    pub iterations: usize,
    /// Whether rank propagation converged before the iteration cap
    pub converged: bool,
}

impl Summary {
    /// The summary as plain text, sentences joined by a single space
    pub fn text(&self) -> String {
        self.sentences
            .iter()
            .map(|s| s.sentence.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}
