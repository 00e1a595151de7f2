//! Mean-rank sentence scoring and top-N selection

use super::ScoredSentence;
use crate::pagerank::RankVector;
use crate::types::{Document, Sentence};

/// Scores sentences by the ranks of their lemmas
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceScorer;

impl SentenceScorer {
    pub fn new() -> Self {
        Self
    }

    /// Mean rank of the sentence's qualifying lemmas
    ///
    /// A mean rather than a sum, so long sentences are not favored. A sentence
    /// without qualifying lemmas scores 0.
    pub fn score(&self, sentence: &Sentence, ranks: &RankVector) -> f64 {
        let (sum, count) = sentence
            .graph_lemmas()
            .fold((0.0, 0usize), |(sum, count), lemma| {
                (sum + ranks.score_of(lemma), count + 1)
            });
        sum / count.max(1) as f64
    }

    /// Score every sentence of a document, in document order
    pub fn score_document(&self, document: &Document, ranks: &RankVector) -> Vec<f64> {
        document
            .sentences()
            .iter()
            .map(|s| self.score(s, ranks))
            .collect()
    }

    /// Pick the `limit` best sentences and return them in document order
    ///
    /// Equal scores prefer the earlier sentence. A limit larger than the
    /// document returns every sentence.
    pub fn summarize(
        &self,
        document: &Document,
        ranks: &RankVector,
        limit: usize,
    ) -> Vec<ScoredSentence> {
        let scores = self.score_document(document, ranks);

        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then(a.cmp(&b)));
        order.truncate(limit);
        order.sort_unstable();

        order
            .into_iter()
            .map(|i| ScoredSentence::new(document.sentences()[i].clone(), scores[i]))
            .collect()
    }
}
