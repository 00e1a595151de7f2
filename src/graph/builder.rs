//! Co-occurrence graph builder
//!
//! Nodes are qualifying lemmas, numbered in order of first occurrence so that
//! every later stage iterates them in a fixed order. Edges count how often two
//! lemmas fall inside the same sliding window of a sentence.

use crate::types::Document;
use rustc_hash::FxHashMap;

/// A node in the graph builder
#[derive(Debug, Clone)]
pub struct BuilderNode {
    /// The lemma for this node
    pub lemma: String,
    /// Adjacency list: target node ID -> co-occurrence count
    pub edges: FxHashMap<u32, f64>,
}

impl BuilderNode {
    pub fn new(lemma: impl Into<String>) -> Self {
        Self {
            lemma: lemma.into(),
            edges: FxHashMap::default(),
        }
    }
}

/// A mutable graph builder optimized for incremental construction
#[derive(Debug, Default)]
pub struct GraphBuilder {
    /// Maps lemma -> node ID
    lemma_to_id: FxHashMap<String, u32>,
    /// Node storage, indexed by node ID
    nodes: Vec<BuilderNode>,
}

impl GraphBuilder {
    /// Create a new empty graph builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph builder with pre-allocated capacity
    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            lemma_to_id: FxHashMap::with_capacity_and_hasher(node_capacity, Default::default()),
            nodes: Vec::with_capacity(node_capacity),
        }
    }

    /// Get or create a node for the given lemma, returning its ID
    pub fn get_or_create_node(&mut self, lemma: &str) -> u32 {
        if let Some(&id) = self.lemma_to_id.get(lemma) {
            return id;
        }

        let id = self.nodes.len() as u32;
        self.lemma_to_id.insert(lemma.to_string(), id);
        self.nodes.push(BuilderNode::new(lemma));
        id
    }

    /// Add `weight` to the undirected edge between two nodes
    ///
    /// Self-loops are ignored.
    pub fn increment_edge(&mut self, from: u32, to: u32, weight: f64) {
        if from == to {
            return;
        }

        if let Some(node) = self.nodes.get_mut(from as usize) {
            *node.edges.entry(to).or_insert(0.0) += weight;
        }
        if let Some(node) = self.nodes.get_mut(to as usize) {
            *node.edges.entry(from).or_insert(0.0) += weight;
        }
    }

    /// Build the co-occurrence graph of a document
    ///
    /// Within each sentence, two qualifying lemmas at positions `j < k` are
    /// linked when `k - j < window_size`. Windows never cross sentences.
    pub fn from_document(document: &Document, window_size: usize) -> Self {
        let mut builder = Self::with_capacity(document.token_count() / 2);

        for sentence in document.sentences() {
            let ids: Vec<u32> = sentence
                .graph_lemmas()
                .map(|lemma| builder.get_or_create_node(lemma))
                .collect();

            for j in 0..ids.len() {
                let end = j.saturating_add(window_size).min(ids.len());
                for k in (j + 1)..end {
                    builder.increment_edge(ids[j], ids[k], 1.0);
                }
            }
        }

        tracing::debug!(
            nodes = builder.node_count(),
            edges = builder.edge_count(),
            window_size,
            "built co-occurrence graph"
        );
        builder
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the total number of edges (counting each undirected edge once)
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum::<usize>() / 2
    }

    /// Get a node by ID
    pub fn get_node(&self, id: u32) -> Option<&BuilderNode> {
        self.nodes.get(id as usize)
    }

    /// Get a node ID by lemma
    pub fn get_node_id(&self, lemma: &str) -> Option<u32> {
        self.lemma_to_id.get(lemma).copied()
    }

    /// Weight of the edge between two lemmas, if they are linked
    pub fn edge_weight(&self, a: &str, b: &str) -> Option<f64> {
        let (a, b) = (self.get_node_id(a)?, self.get_node_id(b)?);
        self.get_node(a)?.edges.get(&b).copied()
    }

    /// Consume the builder, yielding nodes in ID order
    pub fn into_nodes(self) -> Vec<BuilderNode> {
        self.nodes
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
