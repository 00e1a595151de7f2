//! Compressed Sparse Row (CSR) graph representation
//!
//! CSR stores each node's neighbors contiguously, which is what rank
//! propagation needs: every iteration walks every neighbor list once.

use super::builder::GraphBuilder;

/// A frozen co-occurrence graph in Compressed Sparse Row format
///
/// Neighbor lists are sorted by node ID, so iteration order (and therefore
/// floating-point summation order) is fixed for a given document.
#[derive(Debug, Clone)]
pub struct CsrGraph {
    /// Row pointers: node i's edges are at indices row_ptr[i]..row_ptr[i+1]
    pub row_ptr: Vec<usize>,
    /// Column indices (neighbor nodes) for each edge
    pub col_idx: Vec<u32>,
    /// Edge weights (co-occurrence counts)
    pub weights: Vec<f64>,
    /// Sum of incident edge weights for each node
    pub total_weight: Vec<f64>,
    /// Lemma for each node
    pub lemmas: Vec<String>,
}

impl CsrGraph {
    /// Freeze a [`GraphBuilder`]
    pub fn from_builder(builder: GraphBuilder) -> Self {
        let nodes = builder.into_nodes();
        let mut graph = Self {
            row_ptr: Vec::with_capacity(nodes.len() + 1),
            total_weight: Vec::with_capacity(nodes.len()),
            lemmas: Vec::with_capacity(nodes.len()),
            ..Self::default()
        };
        graph.row_ptr.push(0);

        for node in nodes {
            let mut edges: Vec<_> = node.edges.into_iter().collect();
            edges.sort_unstable_by_key(|&(target, _)| target);

            graph.total_weight.push(edges.iter().map(|(_, w)| w).sum());
            for (target, weight) in edges {
                graph.col_idx.push(target);
                graph.weights.push(weight);
            }
            graph.row_ptr.push(graph.col_idx.len());
            graph.lemmas.push(node.lemma);
        }

        graph
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }

    /// Iterate over neighbors of a node as `(neighbor, weight)`
    pub fn neighbors(&self, node: u32) -> impl Iterator<Item = (u32, f64)> + '_ {
        let range = self.row_ptr[node as usize]..self.row_ptr[node as usize + 1];
        self.col_idx[range.clone()]
            .iter()
            .copied()
            .zip(self.weights[range].iter().copied())
    }

    /// Get the total incident weight of a node
    pub fn node_total_weight(&self, node: u32) -> f64 {
        self.total_weight[node as usize]
    }

    /// Get the lemma for a node
    pub fn lemma(&self, node: u32) -> &str {
        &self.lemmas[node as usize]
    }

    /// Number of undirected edges
    pub fn num_edges(&self) -> usize {
        self.col_idx.len() / 2
    }

    /// Nodes without any edge
    pub fn isolated_nodes(&self) -> Vec<u32> {
        (0..self.len() as u32)
            .filter(|&n| self.row_ptr[n as usize] == self.row_ptr[n as usize + 1])
            .collect()
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self {
            row_ptr: vec![0],
            col_idx: Vec::new(),
            weights: Vec::new(),
            total_weight: Vec::new(),
            lemmas: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_test_graph() -> GraphBuilder {
        let mut builder = GraphBuilder::new();
        let a = builder.get_or_create_node("a");
        let b = builder.get_or_create_node("b");
        let c = builder.get_or_create_node("c");

        builder.increment_edge(a, b, 1.0);
        builder.increment_edge(b, c, 2.0);
        builder.increment_edge(a, c, 1.5);

        builder
    }

    #[test]
    fn test_csr_conversion() {
        let csr = CsrGraph::from_builder(build_test_graph());

        assert_eq!(csr.len(), 3);
        assert_eq!(csr.lemmas, vec!["a", "b", "c"]);
        assert_eq!(csr.num_edges(), 3);
        assert_eq!(csr.row_ptr, vec![0, 2, 4, 6]);
    }

    #[test]
    fn test_neighbors_sorted_by_id() {
        let csr = CsrGraph::from_builder(build_test_graph());

        let neighbors: Vec<_> = csr.neighbors(2).collect();
        assert_eq!(neighbors, vec![(0, 1.5), (1, 2.0)]);
    }

    #[test]
    fn test_total_weight() {
        let csr = CsrGraph::from_builder(build_test_graph());

        assert!((csr.node_total_weight(0) - 2.5).abs() < 1e-10);
        assert!((csr.node_total_weight(1) - 3.0).abs() < 1e-10);
        assert_eq!(csr.lemma(1), "b");
    }

    #[test]
    fn test_empty_graph() {
        let csr = CsrGraph::from_builder(GraphBuilder::new());

        assert!(csr.is_empty());
        assert_eq!(csr.num_edges(), 0);
        assert_eq!(csr.row_ptr, vec![0]);
    }

    #[test]
    fn test_isolated_nodes() {
        let mut builder = GraphBuilder::new();
        let a = builder.get_or_create_node("a");
        let b = builder.get_or_create_node("b");
        builder.get_or_create_node("c");
        builder.increment_edge(a, b, 1.0);

        let csr = CsrGraph::from_builder(builder);
        assert_eq!(csr.isolated_nodes(), vec![2]);
    }
}
