//! Stopword filtering
//!
//! Base lists come from the `stop-words` crate. Scientific articles add
//! their own function words (figure and table callouts, "et al", "doi")
//! that carry no topical weight, so [`StopwordFilter::scientific`] layers
//! those on top of the language list.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

/// Boilerplate of scientific articles, lower-case
const SCIENTIFIC_STOPWORDS: &[&str] = &[
    "al", "cf", "doi", "eg", "et", "fig", "figs", "figure", "figures", "ie", "pp", "suppl",
    "supplementary", "table", "tables", "vol", "vs",
];

/// Case-insensitive stopword set
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    words: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::new("en")
    }
}

impl StopwordFilter {
    /// Built-in list for an ISO code or English language name
    ///
    /// Unknown languages fall back to English.
    pub fn new(language: &str) -> Self {
        Self {
            words: get(language_of(language))
                .iter()
                .map(|w| w.to_string())
                .collect(),
        }
    }

    /// Built-in list plus scientific-article boilerplate
    pub fn scientific(language: &str) -> Self {
        let mut filter = Self::new(language);
        filter.add_stopwords(SCIENTIFIC_STOPWORDS);
        filter
    }

    /// No stopwords at all
    pub fn empty() -> Self {
        Self {
            words: FxHashSet::default(),
        }
    }

    pub fn from_list<S: AsRef<str>>(words: &[S]) -> Self {
        let mut filter = Self::empty();
        filter.add_stopwords(words);
        filter
    }

    pub fn add_stopwords<S: AsRef<str>>(&mut self, words: &[S]) {
        self.words
            .extend(words.iter().map(|w| w.as_ref().trim().to_lowercase()));
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn language_of(code: &str) -> LANGUAGE {
    match code.trim().to_lowercase().as_str() {
        "de" | "german" => LANGUAGE::German,
        "fr" | "french" => LANGUAGE::French,
        "es" | "spanish" => LANGUAGE::Spanish,
        "it" | "italian" => LANGUAGE::Italian,
        "pt" | "portuguese" => LANGUAGE::Portuguese,
        "nl" | "dutch" => LANGUAGE::Dutch,
        _ => LANGUAGE::English,
    }
}
