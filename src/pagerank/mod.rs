//! Rank propagation
//!
//! [`standard::PageRank`] runs weighted PageRank over a co-occurrence graph
//! and produces a [`RankVector`].

pub mod standard;

use rustc_hash::FxHashMap;

/// Result of a rank propagation run
///
/// Scores are indexed by node ID and sum to 1 (unless the graph is empty).
#[derive(Debug, Clone, Default)]
pub struct RankVector {
    /// Scores for each node (indexed by node ID)
    pub scores: Vec<f64>,
    /// Lemma for each node
    pub lemmas: Vec<String>,
    /// Number of iterations performed
    pub iterations: usize,
    /// Final L1 change between the last two iterations
    pub delta: f64,
    /// Whether the change fell below the threshold before the iteration cap
    pub converged: bool,
    index: FxHashMap<String, u32>,
}

impl RankVector {
    /// Create a new rank vector
    pub fn new(
        scores: Vec<f64>,
        lemmas: Vec<String>,
        iterations: usize,
        delta: f64,
        converged: bool,
    ) -> Self {
        let index = lemmas
            .iter()
            .enumerate()
            .map(|(i, l)| (l.clone(), i as u32))
            .collect();
        Self {
            scores,
            lemmas,
            iterations,
            delta,
            converged,
            index,
        }
    }

    /// Number of ranked nodes
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Get the score for a specific node
    pub fn score(&self, node: u32) -> f64 {
        self.scores.get(node as usize).copied().unwrap_or(0.0)
    }

    /// Node ID of a lemma
    pub fn node_of(&self, lemma: &str) -> Option<u32> {
        self.index.get(lemma).copied()
    }

    /// Score of a lemma; lemmas outside the graph score 0
    pub fn score_of(&self, lemma: &str) -> f64 {
        self.node_of(lemma).map_or(0.0, |id| self.score(id))
    }

    /// Get top N lemmas by score, ties broken by first occurrence
    pub fn top_n(&self, n: usize) -> Vec<(&str, f64)> {
        let mut indexed: Vec<_> = self.scores.iter().copied().enumerate().collect();
        indexed.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        indexed
            .into_iter()
            .take(n)
            .map(|(i, s)| (self.lemmas[i].as_str(), s))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector() -> RankVector {
        RankVector::new(
            vec![0.2, 0.5, 0.3],
            vec!["cell".into(), "bacteria".into(), "host".into()],
            7,
            1e-7,
            true,
        )
    }

    #[test]
    fn test_score_lookup() {
        let ranks = vector();

        assert_eq!(ranks.node_of("bacteria"), Some(1));
        assert!((ranks.score_of("host") - 0.3).abs() < 1e-12);
        assert_eq!(ranks.score_of("unknown"), 0.0);
        assert_eq!(ranks.score(42), 0.0);
    }

    #[test]
    fn test_top_n() {
        let ranks = vector();

        let top = ranks.top_n(2);
        assert_eq!(top, vec![("bacteria", 0.5), ("host", 0.3)]);
        assert_eq!(ranks.top_n(10).len(), 3);
    }

    #[test]
    fn test_top_n_ties_by_first_occurrence() {
        let ranks = RankVector::new(
            vec![0.25, 0.25, 0.5],
            vec!["b".into(), "a".into(), "c".into()],
            1,
            0.0,
            true,
        );

        let lemmas: Vec<_> = ranks.top_n(3).into_iter().map(|(l, _)| l).collect();
        assert_eq!(lemmas, vec!["c", "b", "a"]);
    }
}
