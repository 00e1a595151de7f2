//! Pattern matching over tokenized documents
//!
//! The matcher owns its result buffer. Every [`PhraseMatcher::match_document`]
//! call clears the buffer first, so results never leak from one document
//! into the next.

use super::patterns::PatternSet;
use crate::types::{Document, Sentence, Token};
use serde::Serialize;

/// One matched span, in characters relative to its sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
    pub label: String,
}

/// All spans found in one sentence
///
/// Serializes as `{"text": ..., "ents": [{"start", "end", "label"}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    #[serde(skip)]
    pub sentence_index: usize,
    #[serde(rename = "text")]
    pub sentence_text: String,
    #[serde(rename = "ents")]
    pub spans: Vec<MatchSpan>,
}

impl Match {
    /// Surface text of each span
    pub fn span_texts<'a>(&'a self) -> impl Iterator<Item = &'a str> + 'a {
        self.spans.iter().map(move |span| {
            let from = byte_offset(&self.sentence_text, span.start);
            let to = byte_offset(&self.sentence_text, span.end);
            &self.sentence_text[from..to]
        })
    }
}

fn byte_offset(text: &str, char_pos: usize) -> usize {
    text.char_indices()
        .nth(char_pos)
        .map_or(text.len(), |(b, _)| b)
}

/// Finds pattern occurrences sentence by sentence
#[derive(Debug, Default)]
pub struct PhraseMatcher {
    matches: Vec<Match>,
}

impl PhraseMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match `patterns` against every sentence of `document`
    ///
    /// Returns one [`Match`] per sentence with at least one hit, in
    /// document order. Spans within a sentence are in scan order: by start
    /// token, then pattern order. Overlapping hits are all reported.
    pub fn match_document(&mut self, document: &Document, patterns: &PatternSet) -> &[Match] {
        self.matches.clear();

        if !patterns.is_empty() {
            for sentence in document.sentences() {
                if let Some(found) = match_sentence(sentence, patterns) {
                    self.matches.push(found);
                }
            }
        }

        tracing::debug!(
            patterns = patterns.len(),
            sentences = document.len(),
            matched = self.matches.len(),
            "matched patterns"
        );

        &self.matches
    }

    /// Results of the last call to [`Self::match_document`]
    ///
    /// Empty before the first call.
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// Total number of spans in the current results
    pub fn span_count(&self) -> usize {
        self.matches.iter().map(|m| m.spans.len()).sum()
    }

    pub fn clear(&mut self) {
        self.matches.clear();
    }

    pub fn into_matches(self) -> Vec<Match> {
        self.matches
    }
}

fn match_sentence(sentence: &Sentence, patterns: &PatternSet) -> Option<Match> {
    let tokens: Vec<&Token> = sentence.tokens.iter().filter(|t| !t.is_space).collect();
    let mut spans = Vec::new();

    for pos in 0..tokens.len() {
        for pattern in patterns.patterns() {
            if pattern.matches_at(&tokens, pos) {
                let last = tokens[pos + pattern.words.len() - 1];
                spans.push(MatchSpan {
                    start: tokens[pos].start,
                    end: last.end,
                    label: pattern.label.clone(),
                });
            }
        }
    }

    if spans.is_empty() {
        return None;
    }

    Some(Match {
        sentence_index: sentence.index,
        sentence_text: sentence.text.clone(),
        spans,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::tokenizer::{RuleTokenizer, Tokenizer};
    use crate::phrase::patterns::{build_patterns, MatchMode, PatternSet};

    const TEXT: &str = "Intro here. The bacteria Lactobacillus was found. \
                        Lactic acid bacteria protect the host.";

    #[test]
    fn test_token_match_offsets() {
        let tokenizer = RuleTokenizer::default();
        let doc = tokenizer.tokenize(TEXT);
        let patterns = build_patterns(&["lactobacillus"], MatchMode::Token, &tokenizer);

        let mut matcher = PhraseMatcher::new();
        let found = matcher.match_document(&doc, &patterns);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].sentence_index, 1);
        assert_eq!(found[0].sentence_text, "The bacteria Lactobacillus was found.");
        assert_eq!(
            found[0].spans,
            vec![MatchSpan {
                start: 13,
                end: 26,
                label: "MATCH".into()
            }]
        );
    }

    #[test]
    fn test_case_insensitive() {
        let tokenizer = RuleTokenizer::default();
        let doc = tokenizer.tokenize(TEXT);
        let patterns = build_patterns(&["LACTOBACILLUS", "Bacteria"], MatchMode::Token, &tokenizer);

        let mut matcher = PhraseMatcher::new();
        matcher.match_document(&doc, &patterns);

        assert_eq!(matcher.matches().len(), 2);
        assert_eq!(matcher.span_count(), 3);
        let texts: Vec<_> = matcher.matches()[0].span_texts().collect();
        assert_eq!(texts, vec!["bacteria", "Lactobacillus"]);
    }

    #[test]
    fn test_phrase_match_spans_tokens() {
        let tokenizer = RuleTokenizer::default();
        let doc = tokenizer.tokenize(TEXT);
        let patterns = build_patterns(&["lactic acid bacteria"], MatchMode::Phrase, &tokenizer);

        let mut matcher = PhraseMatcher::new();
        let found = matcher.match_document(&doc, &patterns);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].sentence_index, 2);
        assert_eq!((found[0].spans[0].start, found[0].spans[0].end), (0, 20));
        assert_eq!(found[0].span_texts().next(), Some("Lactic acid bacteria"));
    }

    #[test]
    fn test_multiword_key_in_token_mode_never_matches() {
        let tokenizer = RuleTokenizer::default();
        let doc = tokenizer.tokenize(TEXT);
        let patterns = build_patterns(&["lactic acid"], MatchMode::Token, &tokenizer);

        let mut matcher = PhraseMatcher::new();
        assert!(matcher.match_document(&doc, &patterns).is_empty());
    }

    #[test]
    fn test_results_reset_between_documents() {
        let tokenizer = RuleTokenizer::default();
        let patterns = build_patterns(&["bacteria"], MatchMode::Token, &tokenizer);
        let mut matcher = PhraseMatcher::new();

        assert!(matcher.matches().is_empty());

        matcher.match_document(&tokenizer.tokenize(TEXT), &patterns);
        assert_eq!(matcher.matches().len(), 2);

        matcher.match_document(&tokenizer.tokenize("Nothing relevant in here."), &patterns);
        assert!(matcher.matches().is_empty());

        matcher.match_document(&tokenizer.tokenize(TEXT), &patterns);
        matcher.clear();
        assert_eq!(matcher.span_count(), 0);
    }

    #[test]
    fn test_custom_labels() {
        let tokenizer = RuleTokenizer::default();
        let doc = tokenizer.tokenize(TEXT);
        let patterns = PatternSet::labeled(
            &[("lactobacillus", "GENUS"), ("host", "ROLE")],
            MatchMode::Token,
            &tokenizer,
        );

        let mut matcher = PhraseMatcher::new();
        matcher.match_document(&doc, &patterns);
        let labels: Vec<_> = matcher
            .into_matches()
            .into_iter()
            .flat_map(|m| m.spans)
            .map(|s| s.label)
            .collect();
        assert_eq!(labels, vec!["GENUS", "ROLE"]);
    }

    #[test]
    fn test_match_report_json() {
        let tokenizer = RuleTokenizer::default();
        let doc = tokenizer.tokenize(TEXT);
        let patterns = build_patterns(&["lactobacillus"], MatchMode::Token, &tokenizer);

        let mut matcher = PhraseMatcher::new();
        let found = matcher.match_document(&doc, &patterns);
        let json = serde_json::to_value(&found[0]).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "text": "The bacteria Lactobacillus was found.",
                "ents": [{ "start": 13, "end": 26, "label": "MATCH" }]
            })
        );
    }
}
