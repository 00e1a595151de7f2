//! Sentence selection strategies
//!
//! [`SelectionStrategy::TopScore`] keeps the highest mean-rank sentences.
//! [`SelectionStrategy::Diverse`] applies Maximal Marginal Relevance (MMR):
//! each pick maximizes
//!
//! ```text
//! λ * sim(s, document) - (1 - λ) * max_{s' ∈ selected} sim(s, s')
//! ```
//!
//! so near-duplicate sentences are not selected twice. Both strategies
//! return sentences in document order.

use super::scorer::SentenceScorer;
use super::unit_vector::UnitVector;
use super::ScoredSentence;
use crate::pagerank::RankVector;
use crate::types::{Document, SelectionStrategy};

/// Picks summary sentences from a ranked document
#[derive(Debug, Clone)]
pub struct SentenceSelector {
    strategy: SelectionStrategy,
    limit: usize,
    scorer: SentenceScorer,
}

impl SentenceSelector {
    pub fn new(strategy: SelectionStrategy, limit: usize) -> Self {
        Self {
            strategy,
            limit,
            scorer: SentenceScorer::new(),
        }
    }

    pub fn strategy(&self) -> SelectionStrategy {
        self.strategy
    }

    /// Select up to `limit` sentences
    pub fn select(&self, document: &Document, ranks: &RankVector) -> Vec<ScoredSentence> {
        match self.strategy {
            SelectionStrategy::TopScore => self.scorer.summarize(document, ranks, self.limit),
            SelectionStrategy::Diverse { lambda } => self.select_diverse(document, ranks, lambda),
        }
    }

    fn select_diverse(
        &self,
        document: &Document,
        ranks: &RankVector,
        lambda: f64,
    ) -> Vec<ScoredSentence> {
        let sentences = document.sentences();
        let query_vector = UnitVector::for_document(ranks);
        let sent_vectors: Vec<_> = sentences
            .iter()
            .map(|s| UnitVector::for_sentence(s, ranks))
            .collect();
        let relevance: Vec<f64> = sent_vectors
            .iter()
            .map(|v| v.cosine_similarity(&query_vector))
            .collect();

        let mut selected: Vec<usize> = Vec::new();
        let mut remaining: Vec<usize> = (0..sentences.len()).collect();

        while selected.len() < self.limit && !remaining.is_empty() {
            let mut best: Option<(usize, f64)> = None;

            for (pos, &i) in remaining.iter().enumerate() {
                let max_sim = selected
                    .iter()
                    .map(|&j| sent_vectors[i].cosine_similarity(&sent_vectors[j]))
                    .fold(0.0, f64::max);
                let mmr = lambda * relevance[i] - (1.0 - lambda) * max_sim;

                // Strictly greater keeps the earliest sentence on ties
                if best.is_none_or(|(_, score)| mmr > score) {
                    best = Some((pos, mmr));
                }
            }

            match best {
                Some((pos, _)) => selected.push(remaining.remove(pos)),
                None => break,
            }
        }

        selected.sort_unstable();
        selected
            .into_iter()
            .map(|i| {
                let score = self.scorer.score(&sentences[i], ranks);
                ScoredSentence::new(sentences[i].clone(), score)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PosTag, Sentence, Token};

    fn sentence(index: usize, words: &[&str]) -> Sentence {
        let tokens = words
            .iter()
            .map(|w| Token::new(*w, *w, PosTag::Noun, 0, w.len()))
            .collect();
        Sentence::new(words.join(" "), index * 100, index * 100 + 50, index, tokens)
    }

    fn make_test_data() -> (Document, RankVector) {
        let doc = Document::new(vec![
            sentence(0, &["bacteria", "pregnancy"]),
            sentence(1, &["bacteria", "pregnancy"]),
            sentence(2, &["diet", "outcome"]),
        ]);
        let ranks = RankVector::new(
            vec![0.35, 0.35, 0.15, 0.15],
            vec![
                "bacteria".into(),
                "pregnancy".into(),
                "diet".into(),
                "outcome".into(),
            ],
            10,
            0.0,
            true,
        );
        (doc, ranks)
    }

    #[test]
    fn test_top_score_keeps_duplicates() {
        let (doc, ranks) = make_test_data();

        let selector = SentenceSelector::new(SelectionStrategy::TopScore, 2);
        let indices: Vec<_> = selector
            .select(&doc, &ranks)
            .iter()
            .map(|s| s.sentence.index)
            .collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_diverse_skips_redundant_sentence() {
        let (doc, ranks) = make_test_data();

        let selector = SentenceSelector::new(SelectionStrategy::Diverse { lambda: 0.5 }, 2);
        let indices: Vec<_> = selector
            .select(&doc, &ranks)
            .iter()
            .map(|s| s.sentence.index)
            .collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn test_diverse_relevance_only_matches_top_score() {
        let (doc, ranks) = make_test_data();

        let selector = SentenceSelector::new(SelectionStrategy::Diverse { lambda: 1.0 }, 2);
        let indices: Vec<_> = selector
            .select(&doc, &ranks)
            .iter()
            .map(|s| s.sentence.index)
            .collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_diverse_ties_keep_earliest_sentence() {
        let (doc, ranks) = make_test_data();

        let selector = SentenceSelector::new(SelectionStrategy::Diverse { lambda: 1.0 }, 1);
        let result = selector.select(&doc, &ranks);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].sentence.index, 0);
    }

    #[test]
    fn test_document_order() {
        let (doc, ranks) = make_test_data();

        for strategy in [
            SelectionStrategy::TopScore,
            SelectionStrategy::Diverse { lambda: 0.3 },
        ] {
            let result = SentenceSelector::new(strategy, 3).select(&doc, &ranks);
            assert_eq!(result.len(), 3);
            for pair in result.windows(2) {
                assert!(pair[0].sentence.index < pair[1].sentence.index);
            }
        }
    }

    #[test]
    fn test_empty_input() {
        let selector = SentenceSelector::new(SelectionStrategy::Diverse { lambda: 0.7 }, 3);
        let result = selector.select(&Document::default(), &RankVector::default());

        assert!(result.is_empty());
    }
}
