//! Text normalization and sentence length filtering
//!
//! Text coming out of PDF extraction is full of layout debris: hard line
//! breaks, dot leaders from tables of contents, stray control bytes. The
//! cleaner flattens it into single-spaced prose before tokenization.

use crate::errors::Result;
use crate::types::{Document, LengthBounds};
use regex::Regex;
use std::sync::LazyLock;

/// One or more full stops, optionally separated or followed by whitespace
static FULL_STOP_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.(?:\s*\.)*\s*").unwrap());

static REFERENCES_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\breferences\b").unwrap());

/// Square-bracketed citation markers such as `[12]` or `[3, 4]`
static BRACKET_CITATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[^\]]*\]").unwrap());

/// Shape of the result returned by [`TextCleaner::select_sentences`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionOutput {
    #[default]
    List,
    Joined,
}

/// Sentences that survived length filtering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selected {
    List(Vec<String>),
    /// The kept sentences joined by a single space
    Joined(String),
}

impl Selected {
    pub fn into_list(self) -> Vec<String> {
        match self {
            Selected::List(list) => list,
            Selected::Joined(text) if text.is_empty() => Vec::new(),
            Selected::Joined(text) => vec![text],
        }
    }
}

/// Normalizes raw text and filters sentence candidates by length
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCleaner {
    bounds: LengthBounds,
}

impl TextCleaner {
    /// Create a cleaner with validated length bounds
    pub fn new(bounds: LengthBounds) -> Result<Self> {
        bounds.validate()?;
        Ok(Self { bounds })
    }

    pub fn bounds(&self) -> LengthBounds {
        self.bounds
    }

    /// Normalize extracted text
    ///
    /// Carriage returns and other non-whitespace control characters are
    /// dropped, every whitespace run becomes a single space, and every run of
    /// full stops (`...`, `. . .`) becomes a single `". "`.
    /// `clean(clean(x)) == clean(x)`.
    pub fn clean(text: &str) -> String {
        let mut flat = String::with_capacity(text.len());
        let mut prev_was_space = false;

        for ch in text.chars() {
            if ch == '\r' || (ch.is_control() && !ch.is_whitespace()) {
                continue;
            }
            if ch.is_whitespace() {
                if !prev_was_space {
                    flat.push(' ');
                    prev_was_space = true;
                }
            } else {
                flat.push(ch);
                prev_was_space = false;
            }
        }

        FULL_STOP_RUN.replace_all(&flat, ". ").into_owned()
    }

    /// Drop the trailing reference section and bracketed citation markers
    ///
    /// The cut happens at the last occurrence of the word "references" (any
    /// case); words that merely contain it, such as "preferences", are kept.
    /// Text that never mentions references keeps its whole body.
    pub fn strip_references(text: &str) -> String {
        let body = match REFERENCES_HEADING.find_iter(text).last() {
            Some(heading) => &text[..heading.start()],
            None => text,
        };
        BRACKET_CITATION.replace_all(body, "").into_owned()
    }

    /// Keep the sentences whose cleaned length lies strictly inside the bounds
    pub fn select_sentences<S: AsRef<str>>(
        &self,
        sentences: &[S],
        output: SelectionOutput,
    ) -> Selected {
        let kept: Vec<String> = sentences
            .iter()
            .map(|s| Self::clean(s.as_ref().trim()).trim().to_string())
            .filter(|s| self.bounds.contains(s.chars().count()))
            .collect();

        match output {
            SelectionOutput::List => Selected::List(kept),
            SelectionOutput::Joined => Selected::Joined(kept.join(" ")),
        }
    }

    /// Apply the length bounds to an already tokenized document
    ///
    /// Sentence order and indices are preserved.
    pub fn filter_document(&self, document: Document) -> Document {
        let before = document.len();
        let kept: Vec<_> = document
            .into_sentences()
            .into_iter()
            .filter(|s| self.bounds.contains(s.char_len()))
            .collect();

        tracing::debug!(
            before,
            after = kept.len(),
            min_len = self.bounds.min_len,
            max_len = self.bounds.max_len,
            "filtered sentences by length"
        );
        Document::new(kept)
    }
}

/// Standalone form of [`TextCleaner::select_sentences`] taking raw bounds
pub fn select_sentences<S: AsRef<str>>(
    sentences: &[S],
    min_len: usize,
    max_len: usize,
    output: SelectionOutput,
) -> Result<Selected> {
    let cleaner = TextCleaner::new(LengthBounds::new(min_len, max_len)?)?;
    Ok(cleaner.select_sentences(sentences, output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sentence;

    #[test]
    fn test_collapses_full_stop_runs() {
        assert_eq!(TextCleaner::clean("Wait... what"), "Wait. what");
        assert_eq!(TextCleaner::clean("Wait. . . what"), "Wait. what");
        assert_eq!(TextCleaner::clean("Wait.\n.\t. what"), "Wait. what");
        assert_eq!(TextCleaner::clean("End."), "End. ");
    }

    #[test]
    fn test_strips_control_characters() {
        assert_eq!(
            TextCleaner::clean("line one\r\nline\u{7} two\t\tend"),
            "line one line two end"
        );
    }

    #[test]
    fn test_clean_is_idempotent() {
        let samples = [
            "",
            "   ",
            "Plain sentence",
            "Dot leaders.......... 12",
            "Mixed . .\n . whitespace\r\n\r\n runs.  Next",
            "e.g. E. coli and i.e. nothing...",
            " leading and trailing . ",
            "\u{0}\u{1}.\u{2}.",
        ];
        for sample in samples {
            let once = TextCleaner::clean(sample);
            assert_eq!(TextCleaner::clean(&once), once, "input: {sample:?}");
        }
    }

    #[test]
    fn test_strip_references() {
        let text = "Lactobacillus dominates [12]. Other taxa [3, 4] vary. References 1. Smith";
        assert_eq!(
            TextCleaner::strip_references(text),
            "Lactobacillus dominates . Other taxa  vary. "
        );
    }

    #[test]
    fn test_strip_references_keeps_body_without_heading() {
        let text = "No bibliography here.";
        assert_eq!(TextCleaner::strip_references(text), text);
    }

    #[test]
    fn test_strip_references_matches_whole_word_only() {
        let text = "Women reported dietary preferences during pregnancy. \
            Maternal gut bacteria shape infant immunity.";
        assert_eq!(TextCleaner::strip_references(text), text);

        let text = "Self-referencing preferences vary. REFERENCES: [1] Doe.";
        assert_eq!(
            TextCleaner::strip_references(text),
            "Self-referencing preferences vary. "
        );
    }

    #[test]
    fn test_select_sentences_scenario() {
        let sentences = [
            "Short.",
            "This is a sentence of moderate length about bacteria and pregnancy outcomes in humans.",
            "X.",
        ];
        let selected = select_sentences(&sentences, 10, 100, SelectionOutput::List).unwrap();
        assert_eq!(
            selected,
            Selected::List(vec![sentences[1].to_string()])
        );
    }

    #[test]
    fn test_select_sentences_boundaries() {
        let sentence = |len: usize| "a".repeat(len);
        let input = [sentence(40), sentence(41), sentence(399), sentence(400)];

        let cleaner = TextCleaner::default();
        let kept = cleaner
            .select_sentences(&input, SelectionOutput::List)
            .into_list();

        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].len(), 41);
        assert_eq!(kept[1].len(), 399);
    }

    #[test]
    fn test_select_sentences_joined() {
        let sentences = ["First sentence is long enough.", "Second one is long too."];
        let selected = select_sentences(&sentences, 5, 100, SelectionOutput::Joined).unwrap();
        assert_eq!(
            selected,
            Selected::Joined("First sentence is long enough. Second one is long too.".into())
        );
    }

    #[test]
    fn test_select_sentences_rejects_inverted_bounds() {
        let err = select_sentences(&["anything"], 100, 10, SelectionOutput::List).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_filter_document_preserves_order_and_indices() {
        let doc = Document::new(vec![
            Sentence::new("Tiny.", 0, 5, 0, Vec::new()),
            Sentence::new("A sentence that is long enough.", 6, 37, 1, Vec::new()),
            Sentence::new("Another sentence long enough.", 38, 67, 2, Vec::new()),
        ]);
        let cleaner = TextCleaner::new(LengthBounds::new(10, 100).unwrap()).unwrap();

        let filtered = cleaner.filter_document(doc);
        let indices: Vec<_> = filtered.sentences().iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![1, 2]);
    }
}
