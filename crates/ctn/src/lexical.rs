//! Lexical co-occurrence graph derived from per-sentence constituent trees.
//!
//! The constituent graph mixes words and phrases; the lexical graph projects
//! it down to words only. Two tokens are linked iff they co-occur inside at
//! least one constituent, with closeness measured through the trees: each
//! sentence both tokens appear in contributes `0.5^(d − 1)`, where `d` is
//! the shortest-path length between them in that sentence's tree. Adjacent
//! tokens (d = 1) contribute exactly 1.0; a pair joined only through the
//! sentence root contributes less.
//!
//! Accumulated weights are normalized by the geometric mean of each token's
//! total weight; an edge exists whenever the normalized similarity is
//! strictly positive, and the similarity is kept as the edge weight.

use crate::decompose::SentenceTree;
use petgraph::graph::{NodeIndex, UnGraph};
use semnet_core::{ConstituentArena, ConstituentId, Vocabulary};
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// Undirected word-level graph with normalized co-occurrence weights.
#[derive(Debug, Clone)]
pub struct LexicalGraph {
    graph: UnGraph<usize, f64>,
    node_index: HashMap<usize, NodeIndex>,
}

impl LexicalGraph {
    /// Derive the lexical graph from the retained sentence trees.
    pub(crate) fn derive(
        vocab: &Vocabulary,
        arena: &ConstituentArena,
        trees: &[SentenceTree],
    ) -> Self {
        let n = vocab.len();
        let mut weight = vec![0.0_f64; n * n];

        for tree in trees {
            accumulate_tree(tree, arena, &mut weight, n);
        }

        // Total emitted weight per token; tokens that never co-occurred get
        // a normalizer of 1 so the division below stays defined.
        let mut normalizer = vec![0.0_f64; n];
        for i in 0..n {
            for j in 0..n {
                normalizer[i] += weight[i * n + j];
            }
        }
        let degenerate = normalizer.iter().filter(|&&total| total == 0.0).count();
        if degenerate > 0 {
            debug!(
                tokens = degenerate,
                "tokens without co-occurrence weight; normalizer forced to 1"
            );
        }
        for total in &mut normalizer {
            if *total == 0.0 {
                *total = 1.0;
            }
        }

        let mut graph = UnGraph::new_undirected();
        let mut node_index = HashMap::with_capacity(n);
        for token_id in 0..n {
            node_index.insert(token_id, graph.add_node(token_id));
        }
        for i in 0..n {
            for j in (i + 1)..n {
                let similarity = weight[i * n + j] / (normalizer[i] * normalizer[j]).sqrt();
                if similarity > 0.0 {
                    graph.add_edge(node_index[&i], node_index[&j], similarity);
                }
            }
        }

        Self { graph, node_index }
    }

    /// Number of word nodes.
    pub fn word_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of lexical links.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Normalized similarity between two tokens, if they are linked.
    pub fn similarity(&self, a: usize, b: usize) -> Option<f64> {
        let a = *self.node_index.get(&a)?;
        let b = *self.node_index.get(&b)?;
        let edge = self.graph.find_edge(a, b)?;
        Some(self.graph[edge])
    }

    /// Whether two tokens co-occur within some constituent.
    pub fn are_linked(&self, a: usize, b: usize) -> bool {
        self.similarity(a, b).is_some()
    }

    /// Token ids directly linked to `token`.
    pub fn neighbors(&self, token: usize) -> Vec<usize> {
        match self.node_index.get(&token) {
            Some(&node) => self.graph.neighbors(node).map(|n| self.graph[n]).collect(),
            None => Vec::new(),
        }
    }

    /// Unweighted shortest-path length between two tokens.
    ///
    /// `None` when the tokens are disconnected (infinite distance).
    pub fn distance(&self, a: usize, b: usize) -> Option<usize> {
        let start = *self.node_index.get(&a)?;
        let goal = *self.node_index.get(&b)?;
        if start == goal {
            return Some(0);
        }

        let mut dist: HashMap<NodeIndex, usize> = HashMap::new();
        dist.insert(start, 0);
        let mut queue = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            let d = dist[&node];
            for next in self.graph.neighbors(node) {
                if next == goal {
                    return Some(d + 1);
                }
                if !dist.contains_key(&next) {
                    dist.insert(next, d + 1);
                    queue.push_back(next);
                }
            }
        }
        None
    }

    /// Token ids within `radius` links of `token`, the token itself included.
    pub fn neighborhood(&self, token: usize, radius: usize) -> Vec<usize> {
        let Some(&start) = self.node_index.get(&token) else {
            return Vec::new();
        };

        let mut dist: HashMap<NodeIndex, usize> = HashMap::new();
        dist.insert(start, 0);
        let mut queue = VecDeque::from([start]);
        let mut out = vec![token];
        while let Some(node) = queue.pop_front() {
            let d = dist[&node];
            if d == radius {
                continue;
            }
            for next in self.graph.neighbors(node) {
                if !dist.contains_key(&next) {
                    dist.insert(next, d + 1);
                    queue.push_back(next);
                    out.push(self.graph[next]);
                }
            }
        }
        out
    }
}

/// Add one sentence's pairwise contributions to the weight matrix.
fn accumulate_tree(tree: &SentenceTree, arena: &ConstituentArena, weight: &mut [f64], n: usize) {
    let mut adjacency: HashMap<ConstituentId, Vec<ConstituentId>> = HashMap::new();
    for &(child, parent) in &tree.edges {
        adjacency.entry(child).or_default().push(parent);
        adjacency.entry(parent).or_default().push(child);
    }

    let leaves = tree.leaves(arena);
    for (position, &(a_node, a_token)) in leaves.iter().enumerate() {
        // One BFS per leaf covers every pair in the sentence.
        let distances = tree_distances(&adjacency, a_node);
        for &(b_node, b_token) in &leaves[position + 1..] {
            if b_token == a_token {
                continue;
            }
            if let Some(&d) = distances.get(&b_node) {
                let contribution = 0.5_f64.powi(d as i32 - 1);
                weight[a_token * n + b_token] += contribution;
                weight[b_token * n + a_token] += contribution;
            }
        }
    }
}

fn tree_distances(
    adjacency: &HashMap<ConstituentId, Vec<ConstituentId>>,
    start: ConstituentId,
) -> HashMap<ConstituentId, u32> {
    let mut dist = HashMap::new();
    dist.insert(start, 0);
    let mut queue = VecDeque::from([start]);
    while let Some(node) = queue.pop_front() {
        let d = dist[&node];
        if let Some(neighbors) = adjacency.get(&node) {
            for &next in neighbors {
                if !dist.contains_key(&next) {
                    dist.insert(next, d + 1);
                    queue.push_back(next);
                }
            }
        }
    }
    dist
}
