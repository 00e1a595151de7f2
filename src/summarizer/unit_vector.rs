//! Unit vector representation for sentences
//!
//! Sparse vectors over graph nodes, weighted by rank, used to measure how
//! much two sentences (or a sentence and the whole document) overlap.

use crate::pagerank::RankVector;
use crate::types::Sentence;
use rustc_hash::FxHashMap;

/// A sparse, L2-normalized vector keyed by node ID
#[derive(Debug, Clone, Default)]
pub struct UnitVector {
    /// Non-zero dimensions: node ID -> weight
    pub dimensions: FxHashMap<u32, f64>,
    /// L2 norm before normalization
    pub norm: f64,
}

impl UnitVector {
    /// Create a new empty unit vector
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a map of dimensions
    pub fn from_dimensions(mut dimensions: FxHashMap<u32, f64>) -> Self {
        let norm = dimensions.values().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in dimensions.values_mut() {
                *value /= norm;
            }
        }
        Self { dimensions, norm }
    }

    /// One dimension per distinct ranked lemma of the sentence
    pub fn for_sentence(sentence: &Sentence, ranks: &RankVector) -> Self {
        let dimensions = sentence
            .graph_lemmas()
            .filter_map(|lemma| ranks.node_of(lemma))
            .map(|id| (id, ranks.score(id)))
            .collect();
        Self::from_dimensions(dimensions)
    }

    /// Every ranked node, weighted by its score
    pub fn for_document(ranks: &RankVector) -> Self {
        let dimensions = ranks
            .scores
            .iter()
            .enumerate()
            .map(|(id, &score)| (id as u32, score))
            .collect();
        Self::from_dimensions(dimensions)
    }

    /// Compute cosine similarity with another vector
    pub fn cosine_similarity(&self, other: &UnitVector) -> f64 {
        // Iterate the smaller map; both are already normalized
        let (small, large) = if self.dimensions.len() <= other.dimensions.len() {
            (self, other)
        } else {
            (other, self)
        };
        let mut keys: Vec<_> = small.dimensions.keys().copied().collect();
        keys.sort_unstable();
        keys.into_iter()
            .filter_map(|k| Some(small.dimensions[&k] * large.dimensions.get(&k)?))
            .sum()
    }

    /// Check if the vector is empty
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }
}
