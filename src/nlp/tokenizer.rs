//! Tokenizer capability and a rule-based implementation
//!
//! The ranking and matching stages only see [`Document`]s, so any linguistic
//! annotator (a spaCy bridge, a JSON token dump, a statistical model) can be
//! plugged in by implementing [`Tokenizer`]. [`RuleTokenizer`] is the
//! built-in fallback: punctuation-driven sentence boundaries, UAX #29 word
//! boundaries, suffix-stripping lemmas and a stopword list.

use crate::nlp::stopwords::StopwordFilter;
use crate::types::{Document, PosTag, Sentence, Token};
use unicode_segmentation::UnicodeSegmentation;

/// Turns raw text into an annotated [`Document`]
///
/// Implementations must return sentences in text order with
/// non-overlapping character offsets, and must accept empty input.
pub trait Tokenizer: Send + Sync {
    /// Split `text` into sentences of annotated tokens
    fn tokenize(&self, text: &str) -> Document;

    /// Tokenize a short phrase without regard to sentence structure
    ///
    /// Used to turn phrase patterns into token sequences.
    fn tokenize_phrase(&self, text: &str) -> Vec<Token> {
        self.tokenize(text)
            .into_sentences()
            .into_iter()
            .flat_map(|s| s.tokens)
            .filter(|t| !t.is_space)
            .collect()
    }
}

/// Words that end in a full stop without ending the sentence
const ABBREVIATIONS: &[&str] = &[
    "al", "approx", "ca", "cf", "dr", "eq", "eqs", "fig", "figs", "mr", "mrs", "ms", "no", "nos",
    "prof", "ref", "refs", "resp", "sp", "spp", "st", "vol", "vs",
];

/// Rule-based sentence splitter and word tokenizer
#[derive(Debug, Clone, Default)]
pub struct RuleTokenizer {
    stopwords: StopwordFilter,
}

impl RuleTokenizer {
    /// Create a tokenizer using the built-in stopwords for `language`
    pub fn new(language: &str) -> Self {
        Self {
            stopwords: StopwordFilter::new(language),
        }
    }

    /// Create a tokenizer with a custom stopword filter
    pub fn with_stopwords(stopwords: StopwordFilter) -> Self {
        Self { stopwords }
    }

    pub fn stopwords(&self) -> &StopwordFilter {
        &self.stopwords
    }

    /// Sentence spans as `[start, end)` character offsets
    fn sentence_spans(chars: &[char]) -> Vec<(usize, usize)> {
        let mut spans = Vec::new();
        let mut start = None;

        for (i, &ch) in chars.iter().enumerate() {
            if start.is_none() {
                if ch.is_whitespace() {
                    continue;
                }
                start = Some(i);
            }

            if !matches!(ch, '.' | '!' | '?') {
                continue;
            }

            // A real boundary is followed by whitespace or the end of text
            let at_end = i + 1 >= chars.len();
            if !at_end && !chars[i + 1].is_whitespace() {
                continue;
            }
            if ch == '.' && !at_end && ends_with_abbreviation(&chars[..i], &chars[i + 1..]) {
                continue;
            }

            if let Some(s) = start.take() {
                spans.push((s, i + 1));
            }
        }

        // Remaining text that didn't end with punctuation
        if let Some(s) = start {
            let end = chars
                .iter()
                .rposition(|c| !c.is_whitespace())
                .map_or(s, |p| p + 1);
            if end > s {
                spans.push((s, end));
            }
        }

        spans
    }

    fn tokenize_sentence(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut char_pos = 0;

        for (_, segment) in text.split_word_bound_indices() {
            let start = char_pos;
            char_pos += segment.chars().count();

            if segment.chars().all(char::is_whitespace) {
                continue;
            }

            let lower = segment.to_lowercase();
            let mut token = Token::new(segment, lemmatize(&lower), PosTag::Other, start, char_pos);
            token.pos = guess_pos(&token);
            token.is_stopword = self.stopwords.is_stopword(&lower);
            tokens.push(token);
        }

        tokens
    }
}

impl Tokenizer for RuleTokenizer {
    fn tokenize(&self, text: &str) -> Document {
        let chars: Vec<char> = text.chars().collect();
        let sentences = Self::sentence_spans(&chars)
            .into_iter()
            .enumerate()
            .map(|(index, (start, end))| {
                let sentence_text: String = chars[start..end].iter().collect();
                let tokens = self.tokenize_sentence(&sentence_text);
                Sentence::new(sentence_text, start, end, index, tokens)
            })
            .collect();

        Document::new(sentences)
    }
}

/// Whether the word right before a full stop is an abbreviation or initial
///
/// A single letter only counts when it is lower case ("e. g.") or the next
/// word starts in lower case ("E. coli"). "vitamin D. Outcomes" splits.
fn ends_with_abbreviation(prefix: &[char], rest: &[char]) -> bool {
    let word_start = prefix
        .iter()
        .rposition(|c| !c.is_alphabetic())
        .map_or(0, |p| p + 1);
    let word = &prefix[word_start..];

    match word {
        [] => false,
        [letter] => {
            letter.is_lowercase()
                || rest
                    .iter()
                    .find(|c| !c.is_whitespace())
                    .is_some_and(|c| c.is_lowercase())
        }
        _ => {
            let word: String = word.iter().collect::<String>().to_lowercase();
            ABBREVIATIONS.contains(&word.as_str())
        }
    }
}

/// Suffix-stripping lemma for a lower-cased word
fn lemmatize(lower: &str) -> String {
    if lower.chars().count() <= 3 || !lower.chars().all(char::is_alphabetic) {
        return lower.to_string();
    }

    if let Some(stem) = lower.strip_suffix("ies") {
        return format!("{stem}y");
    }
    if let Some(stem) = lower.strip_suffix("sses") {
        return format!("{stem}ss");
    }
    if lower.ends_with('s') && !["ss", "us", "is", "as"].iter().any(|s| lower.ends_with(s)) {
        return lower[..lower.len() - 1].to_string();
    }

    lower.to_string()
}

fn guess_pos(token: &Token) -> PosTag {
    if token.is_punct {
        PosTag::Punctuation
    } else if token.is_numeric {
        PosTag::Numeral
    } else if token.is_alpha && token.text.chars().next().is_some_and(char::is_uppercase) {
        PosTag::ProperNoun
    } else {
        PosTag::Other
    }
}
