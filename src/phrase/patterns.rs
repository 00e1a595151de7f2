//! Token and phrase patterns
//!
//! Patterns are lower-cased word sequences compared against the lower-cased
//! surface text of document tokens. Token patterns are a single word; phrase
//! patterns are produced by running each key through the same [`Tokenizer`]
//! that produced the document, so both sides split words identically.

use crate::nlp::tokenizer::Tokenizer;
use crate::types::Token;
use serde::{Deserialize, Serialize};

/// Label attached to spans when the caller does not supply one
pub const DEFAULT_LABEL: &str = "MATCH";

/// How keys are turned into patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Each key must equal a single token (case-insensitive)
    #[default]
    Token,
    /// Each key is tokenized and must match a contiguous token run
    Phrase,
}

/// A lower-cased word sequence with the label its matches carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub words: Vec<String>,
    pub label: String,
}

impl Pattern {
    /// Whether the pattern matches `tokens` starting at `pos`
    pub fn matches_at(&self, tokens: &[&Token], pos: usize) -> bool {
        let Some(window) = tokens.get(pos..pos + self.words.len()) else {
            return false;
        };
        window
            .iter()
            .zip(&self.words)
            .all(|(token, word)| token.text.to_lowercase() == *word)
    }
}

/// Patterns built from one list of keys
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    mode: MatchMode,
    patterns: Vec<Pattern>,
}

impl PatternSet {
    /// Build patterns labeled [`DEFAULT_LABEL`]
    pub fn build<S, T>(keys: &[S], mode: MatchMode, tokenizer: &T) -> Self
    where
        S: AsRef<str>,
        T: Tokenizer + ?Sized,
    {
        let entries: Vec<_> = keys.iter().map(|k| (k.as_ref(), DEFAULT_LABEL)).collect();
        Self::labeled(&entries, mode, tokenizer)
    }

    /// Build patterns from `(key, label)` pairs
    ///
    /// Keys that are empty after trimming (or tokenize to nothing) are
    /// skipped.
    pub fn labeled<S, L, T>(entries: &[(S, L)], mode: MatchMode, tokenizer: &T) -> Self
    where
        S: AsRef<str>,
        L: AsRef<str>,
        T: Tokenizer + ?Sized,
    {
        let patterns = entries
            .iter()
            .filter_map(|(key, label)| {
                let key = key.as_ref().trim().to_lowercase();
                let words = match mode {
                    MatchMode::Token => vec![key],
                    MatchMode::Phrase => tokenizer
                        .tokenize_phrase(&key)
                        .iter()
                        .map(Token::lower)
                        .collect(),
                };
                if words.is_empty() || words.iter().any(String::is_empty) {
                    return None;
                }
                Some(Pattern {
                    words,
                    label: label.as_ref().to_string(),
                })
            })
            .collect();

        Self { mode, patterns }
    }

    /// Give every pattern the same label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        for pattern in &mut self.patterns {
            pattern.label.clone_from(&label);
        }
        self
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Lower-case `keys` and build token or phrase patterns from them
pub fn build_patterns<S, T>(keys: &[S], mode: MatchMode, tokenizer: &T) -> PatternSet
where
    S: AsRef<str>,
    T: Tokenizer + ?Sized,
{
    PatternSet::build(keys, mode, tokenizer)
}
