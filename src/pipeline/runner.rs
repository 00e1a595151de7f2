//! Pipeline runner: the caller-owned [`PdfSum`] context.
//!
//! `PdfSum` owns the validated configuration and the tokenizer capability and
//! runs the fixed stage sequence:
//!
//! 1. Prepare (reference stripping, text cleaning)
//! 2. Tokenize
//! 3. Length filter
//! 4. Build graph
//! 5. Rank
//! 6. Select sentences
//!
//! Phrase matching reuses stages 1 and 2 and skips the rest. Every stage runs
//! inside a `pipeline_stage` tracing span.

use crate::errors::{PdfSumError, Result};
use crate::graph::builder::GraphBuilder;
use crate::graph::csr::CsrGraph;
use crate::nlp::cleaner::TextCleaner;
use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::tokenizer::{RuleTokenizer, Tokenizer};
use crate::pagerank::standard::PageRank;
use crate::pagerank::RankVector;
use crate::phrase::{build_patterns, Match, MatchMode, PatternSet, PhraseMatcher};
use crate::summarizer::selector::SentenceSelector;
use crate::summarizer::Summary;
use crate::types::{Document, SummarizerConfig};
use rayon::prelude::*;

pub const STAGE_PREPARE: &str = "prepare";
pub const STAGE_TOKENIZE: &str = "tokenize";
pub const STAGE_FILTER: &str = "filter";
pub const STAGE_GRAPH: &str = "graph";
pub const STAGE_RANK: &str = "rank";
pub const STAGE_SELECT: &str = "select";
pub const STAGE_MATCH: &str = "match";

/// Enter a tracing span for a pipeline stage until the end of the block
macro_rules! trace_stage {
    ($name:expr) => {
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

/// Summarization and matching context
///
/// Construct once, install a tokenizer, then reuse for any number of
/// documents. `PdfSum` is `Sync`, so one value can serve a whole batch.
pub struct PdfSum {
    config: SummarizerConfig,
    cleaner: TextCleaner,
    tokenizer: Option<Box<dyn Tokenizer>>,
}

impl std::fmt::Debug for PdfSum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfSum")
            .field("config", &self.config)
            .field("tokenizer_loaded", &self.tokenizer.is_some())
            .finish()
    }
}

impl PdfSum {
    /// Create a context without a tokenizer
    ///
    /// Fails with [`PdfSumError::InvalidConfig`] if the configuration does
    /// not validate.
    pub fn new(config: SummarizerConfig) -> Result<Self> {
        config.validate()?;
        let cleaner = TextCleaner::new(config.bounds)?;
        Ok(Self {
            config,
            cleaner,
            tokenizer: None,
        })
    }

    /// Create a context with a [`RuleTokenizer`] using the scientific
    /// stopwords for the configured language plus the configured extras
    pub fn with_rule_tokenizer(config: SummarizerConfig) -> Result<Self> {
        let mut stopwords = StopwordFilter::scientific(&config.language);
        stopwords.add_stopwords(&config.stopwords);
        Ok(Self::new(config)?.with_tokenizer(RuleTokenizer::with_stopwords(stopwords)))
    }

    /// Install (or replace) the tokenizer
    pub fn load_tokenizer(&mut self, tokenizer: impl Tokenizer + 'static) {
        self.tokenizer = Some(Box::new(tokenizer));
    }

    /// Builder form of [`Self::load_tokenizer`]
    pub fn with_tokenizer(mut self, tokenizer: impl Tokenizer + 'static) -> Self {
        self.load_tokenizer(tokenizer);
        self
    }

    pub fn has_tokenizer(&self) -> bool {
        self.tokenizer.is_some()
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    fn tokenizer(&self) -> Result<&dyn Tokenizer> {
        self.tokenizer
            .as_deref()
            .ok_or(PdfSumError::TokenizerNotLoaded)
    }

    /// Reference stripping (if configured) followed by cleaning
    pub fn prepare_text(&self, text: &str) -> String {
        trace_stage!(STAGE_PREPARE);
        if self.config.remove_references {
            TextCleaner::clean(&TextCleaner::strip_references(text))
        } else {
            TextCleaner::clean(text)
        }
    }

    /// Prepare and tokenize `text` without the length filter
    pub fn tokenize_text(&self, text: &str) -> Result<Document> {
        let tokenizer = self.tokenizer()?;
        let prepared = self.prepare_text(text);

        trace_stage!(STAGE_TOKENIZE);
        let document = tokenizer.tokenize(&prepared);
        tracing::debug!(
            sentences = document.len(),
            tokens = document.token_count(),
            "tokenized document"
        );
        Ok(document)
    }

    /// Prepare, tokenize and length-filter `text`
    pub fn process(&self, text: &str) -> Result<Document> {
        let document = self.tokenize_text(text)?;

        trace_stage!(STAGE_FILTER);
        Ok(self.cleaner.filter_document(document))
    }

    /// Build the co-occurrence graph of `document` and rank its lemmas
    pub fn rank_document(&self, document: &Document) -> RankVector {
        let graph = {
            trace_stage!(STAGE_GRAPH);
            CsrGraph::from_builder(GraphBuilder::from_document(
                document,
                self.config.window_size,
            ))
        };

        trace_stage!(STAGE_RANK);
        PageRank::from_config(&self.config).run(&graph)
    }

    /// Summarize an already processed document
    pub fn summarize_document(&self, document: &Document) -> Summary {
        let ranks = self.rank_document(document);

        trace_stage!(STAGE_SELECT);
        let selector = SentenceSelector::new(self.config.selection, self.config.limit_sentences);
        let sentences = selector.select(document, &ranks);

        tracing::info!(
            selected = sentences.len(),
            candidates = document.len(),
            iterations = ranks.iterations,
            converged = ranks.converged,
            "summarized document"
        );

        Summary {
            sentences,
            iterations: ranks.iterations,
            converged: ranks.converged,
        }
    }

    /// Process and summarize raw text
    pub fn summarize_text(&self, text: &str) -> Result<Summary> {
        let document = self.process(text)?;
        Ok(self.summarize_document(&document))
    }

    /// Summarize independent texts in parallel
    ///
    /// Results are in input order. Each text gets its own graph and rank
    /// vector.
    pub fn summarize_batch<S>(&self, texts: &[S]) -> Vec<Result<Summary>>
    where
        S: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.summarize_text(text.as_ref()))
            .collect()
    }

    /// Build patterns with this context's tokenizer
    pub fn patterns<S: AsRef<str>>(&self, keys: &[S], mode: MatchMode) -> Result<PatternSet> {
        Ok(build_patterns(keys, mode, self.tokenizer()?))
    }

    /// Find the sentences of `text` that mention any of `keys`
    ///
    /// Matching runs on the tokenized text before the length filter, so short
    /// sentences are still searched.
    pub fn match_text<S: AsRef<str>>(
        &self,
        text: &str,
        keys: &[S],
        mode: MatchMode,
    ) -> Result<Vec<Match>> {
        let patterns = self.patterns(keys, mode)?;
        let document = self.tokenize_text(text)?;

        trace_stage!(STAGE_MATCH);
        let mut matcher = PhraseMatcher::new();
        matcher.match_document(&document, &patterns);
        Ok(matcher.into_matches())
    }
}
