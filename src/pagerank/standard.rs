//! Weighted PageRank by power iteration
//!
//! Each iteration computes, for every node `i`,
//!
//! ```text
//! score'(i) = (1 - d) / N + d * Σ_j score(j) * w(i, j) / total_weight(j)
//! ```
//!
//! over the neighbors `j` of `i`. Isolated nodes only receive the base term.
//! The update of one node reads nothing written in the same iteration, so
//! large graphs compute it in parallel; each node's neighbor sum always runs
//! in CSR order, which keeps the result bit-identical to the sequential path.

use super::RankVector;
use crate::graph::csr::CsrGraph;
use crate::types::SummarizerConfig;
use rayon::prelude::*;

/// Graphs with at least this many nodes update scores in parallel
const PARALLEL_THRESHOLD: usize = 4096;

/// Standard PageRank implementation
#[derive(Debug, Clone)]
pub struct PageRank {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Hard cap on iterations
    pub max_iterations: usize,
    /// Convergence threshold on the L1 change
    pub threshold: f64,
    parallel_threshold: usize,
}

impl Default for PageRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            threshold: 1e-6,
            parallel_threshold: PARALLEL_THRESHOLD,
        }
    }
}

impl PageRank {
    /// Create a new PageRank with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Take damping, iteration cap and threshold from a config
    pub fn from_config(config: &SummarizerConfig) -> Self {
        Self::new()
            .with_damping(config.damping)
            .with_max_iterations(config.max_iterations)
            .with_threshold(config.convergence_threshold)
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the maximum iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Node count from which score updates run on the rayon pool
    pub fn with_parallel_threshold(mut self, nodes: usize) -> Self {
        self.parallel_threshold = nodes;
        self
    }

    /// Run PageRank on a graph
    ///
    /// Hitting the iteration cap is not an error: the last vector is returned
    /// with `converged == false`.
    pub fn run(&self, graph: &CsrGraph) -> RankVector {
        let n = graph.len();
        if n == 0 {
            return RankVector::new(Vec::new(), Vec::new(), 0, 0.0, true);
        }

        let mut scores = vec![1.0 / n as f64; n];
        let mut new_scores = vec![0.0; n];
        let teleport = (1.0 - self.damping) / n as f64;
        let parallel = n >= self.parallel_threshold;

        let mut iterations = 0;
        let mut delta = f64::MAX;

        while iterations < self.max_iterations && delta >= self.threshold {
            iterations += 1;

            let current = &scores;
            let update = |node: usize| -> f64 {
                let incoming: f64 = graph
                    .neighbors(node as u32)
                    .map(|(j, w)| current[j as usize] * w / graph.node_total_weight(j))
                    .sum();
                teleport + self.damping * incoming
            };

            if parallel {
                new_scores
                    .par_iter_mut()
                    .enumerate()
                    .for_each(|(node, score)| *score = update(node));
            } else {
                for (node, score) in new_scores.iter_mut().enumerate() {
                    *score = update(node);
                }
            }

            // L1 change between successive vectors
            delta = scores
                .iter()
                .zip(new_scores.iter())
                .map(|(old, new)| (old - new).abs())
                .sum();

            std::mem::swap(&mut scores, &mut new_scores);
        }

        let sum: f64 = scores.iter().sum();
        if sum > 0.0 {
            for score in &mut scores {
                *score /= sum;
            }
        }

        let converged = delta < self.threshold;
        if converged {
            tracing::debug!(nodes = n, iterations, delta, "rank propagation converged");
        } else {
            tracing::warn!(
                nodes = n,
                iterations,
                delta,
                "rank propagation hit the iteration cap before converging"
            );
        }

        RankVector::new(scores, graph.lemmas.clone(), iterations, delta, converged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;

    fn build_graph(lemmas: &[&str], edges: &[(usize, usize, f64)]) -> CsrGraph {
        let mut builder = GraphBuilder::new();
        let ids: Vec<_> = lemmas.iter().map(|l| builder.get_or_create_node(l)).collect();
        for &(a, b, w) in edges {
            builder.increment_edge(ids[a], ids[b], w);
        }
        CsrGraph::from_builder(builder)
    }

    fn build_triangle_graph() -> CsrGraph {
        build_graph(&["a", "b", "c"], &[(0, 1, 1.0), (1, 2, 1.0), (2, 0, 1.0)])
    }

    fn build_star_graph() -> CsrGraph {
        // Hub connected to 3 spokes
        build_graph(
            &["hub", "s1", "s2", "s3"],
            &[(0, 1, 1.0), (0, 2, 1.0), (0, 3, 1.0)],
        )
    }

    #[test]
    fn test_two_nodes_converge_to_half() {
        let graph = build_graph(&["bacteria", "pregnancy"], &[(0, 1, 1.0)]);
        let result = PageRank::new().run(&graph);

        assert!(result.converged);
        assert!(result.iterations <= 100);
        assert_eq!(result.scores, vec![0.5, 0.5]);
    }

    #[test]
    fn test_triangle_graph_equal_scores() {
        let result = PageRank::new().run(&build_triangle_graph());

        assert!(result.converged);
        for score in &result.scores {
            assert!((score - 1.0 / 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_star_graph_hub_highest() {
        let result = PageRank::new().run(&build_star_graph());

        assert!(result.converged);
        let hub_score = result.scores[0];
        for &score in &result.scores[1..] {
            assert!(hub_score > score);
        }
    }

    #[test]
    fn test_heavier_edges_attract_rank() {
        let graph = build_graph(&["a", "b", "c"], &[(0, 1, 5.0), (0, 2, 1.0)]);
        let result = PageRank::new().run(&graph);

        assert!(result.score_of("b") > result.score_of("c"));
    }

    #[test]
    fn test_scores_sum_to_one() {
        let result = PageRank::new().run(&build_star_graph());

        let sum: f64 = result.scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_isolated_nodes_get_base_score_only() {
        // Edgeless graph: every node keeps exactly the teleport term
        let graph = build_graph(&["a", "b", "c", "d"], &[]);
        let result = PageRank::new().run(&graph);

        assert!(result.converged);
        for score in &result.scores {
            assert!((score - 0.25).abs() < 1e-12);
        }

        // Mixed graph: the isolated node stays below the connected ones
        let graph = build_graph(&["a", "b", "c"], &[(0, 1, 1.0)]);
        let result = PageRank::new().run(&graph);
        assert!(result.scores[2] < result.scores[0]);
        let expected_ratio = (0.15 / 3.0) / (0.15 / 3.0 + 0.85 / 3.0);
        assert!((result.scores[2] / result.scores[0] - expected_ratio).abs() < 1e-6);
    }

    #[test]
    fn test_empty_graph() {
        let result = PageRank::new().run(&CsrGraph::default());

        assert!(result.converged);
        assert!(result.scores.is_empty());
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_max_iterations_returns_partial() {
        let pr = PageRank::new().with_max_iterations(1).with_threshold(0.0);

        let result = pr.run(&build_star_graph());

        assert_eq!(result.iterations, 1);
        assert!(!result.converged);
        assert_eq!(result.scores.len(), 4);
    }

    #[test]
    fn test_damping_factor() {
        let graph = build_star_graph();

        let low = PageRank::new().with_damping(0.5).run(&graph);
        let high = PageRank::new().with_damping(0.95).run(&graph);

        let advantage_low = low.scores[0] - low.scores[1];
        let advantage_high = high.scores[0] - high.scores[1];
        assert!(advantage_high > advantage_low);
    }

    #[test]
    fn test_repeated_runs_are_bit_identical() {
        let graph = build_graph(
            &["a", "b", "c", "d", "e"],
            &[(0, 1, 2.0), (1, 2, 1.0), (2, 3, 3.0), (3, 4, 1.0), (4, 0, 1.0), (1, 3, 1.0)],
        );
        let pr = PageRank::new();

        let first = pr.run(&graph);
        for _ in 0..5 {
            let again = pr.run(&graph);
            let same = first
                .scores
                .iter()
                .zip(&again.scores)
                .all(|(a, b)| a.to_bits() == b.to_bits());
            assert!(same);
            assert_eq!(first.iterations, again.iterations);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let lemmas: Vec<String> = (0..64).map(|i| format!("n{i}")).collect();
        let lemma_refs: Vec<&str> = lemmas.iter().map(String::as_str).collect();
        let edges: Vec<_> = (0..64)
            .flat_map(|i| [(i, (i + 1) % 64, 1.0), (i, (i * 7 + 3) % 64, (i % 5 + 1) as f64)])
            .collect();
        let graph = build_graph(&lemma_refs, &edges);

        let sequential = PageRank::new().with_parallel_threshold(usize::MAX).run(&graph);
        let parallel = PageRank::new().with_parallel_threshold(0).run(&graph);

        let bits = |v: &RankVector| v.scores.iter().map(|s| s.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&sequential), bits(&parallel));
    }
}
