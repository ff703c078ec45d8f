//! The built constituent network and its relatedness queries.

use crate::decompose::SentenceTree;
use crate::lexical::LexicalGraph;
use crate::NetError;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use semnet_core::{
    ActivationSpreader, AdjacencyMatrix, Constituent, ConstituentArena, ConstituentId,
    SpreadOutcome, SpreadParams, Vocabulary,
};
use std::collections::HashMap;

/// A trained network over the constituents of a corpus.
///
/// Produced by a [`GraphBuilder`](crate::GraphBuilder) and immutable from
/// then on: the directed constituent graph, the interning arena, the
/// retained per-sentence trees, and the derived lexical graph all stay
/// fixed. Every query owns its activation state, so the network is
/// `Send + Sync` and independent queries may run in parallel over a shared
/// reference.
#[derive(Debug, Clone)]
pub struct ConstituentNet {
    vocab: Vocabulary,
    arena: ConstituentArena,
    graph: DiGraph<ConstituentId, f64>,
    node_index: HashMap<ConstituentId, NodeIndex>,
    trees: Vec<SentenceTree>,
    lexical: LexicalGraph,
}

impl ConstituentNet {
    pub(crate) fn from_parts(
        vocab: Vocabulary,
        arena: ConstituentArena,
        weighted_edges: Vec<(ConstituentId, ConstituentId, f64)>,
        trees: Vec<SentenceTree>,
        lexical: LexicalGraph,
    ) -> Self {
        let mut graph = DiGraph::with_capacity(arena.len(), weighted_edges.len());
        let mut node_index = HashMap::with_capacity(arena.len());
        for id in arena.ids() {
            node_index.insert(id, graph.add_node(id));
        }
        for (child, parent, weight) in weighted_edges {
            graph.add_edge(node_index[&child], node_index[&parent], weight);
        }
        Self {
            vocab,
            arena,
            graph,
            node_index,
            trees,
            lexical,
        }
    }

    /// The vocabulary this network was built over.
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// The constituent arena: id → structure lookups.
    pub fn arena(&self) -> &ConstituentArena {
        &self.arena
    }

    /// The derived word-level co-occurrence graph.
    pub fn lexical(&self) -> &LexicalGraph {
        &self.lexical
    }

    /// The per-sentence trees retained from the build.
    pub fn sentence_trees(&self) -> &[SentenceTree] {
        &self.trees
    }

    /// Number of constituent nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct weighted edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All (child, parent, weight) edges in deterministic insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (ConstituentId, ConstituentId, f64)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (self.graph[e.source()], self.graph[e.target()], *e.weight()))
    }

    /// The graph node carrying a single token.
    ///
    /// # Errors
    ///
    /// [`NetError::UnknownToken`] when the token is outside the vocabulary or
    /// never appeared in the corpus.
    pub fn word_node(&self, token: &str) -> Result<ConstituentId, NetError> {
        let unknown = || NetError::UnknownToken {
            token: token.to_string(),
        };
        let token_id = self.vocab.id(token).ok_or_else(unknown)?;
        self.arena
            .lookup(&Constituent::Word(token_id))
            .ok_or_else(unknown)
    }

    /// The two-word phrase node for (a, b), if the corpus produced one.
    pub fn pair_node(&self, a: &str, b: &str) -> Option<ConstituentId> {
        let a = self.arena.lookup(&Constituent::Word(self.vocab.id(a)?))?;
        let b = self.arena.lookup(&Constituent::Word(self.vocab.id(b)?))?;
        self.arena.lookup(&Constituent::Phrase(vec![a, b]))
    }

    /// Aggregate weight of the (child, parent) edge, if present.
    pub fn edge_weight(&self, child: ConstituentId, parent: ConstituentId) -> Option<f64> {
        let child = *self.node_index.get(&child)?;
        let parent = *self.node_index.get(&parent)?;
        let edge = self.graph.find_edge(child, parent)?;
        Some(self.graph[edge])
    }

    /// Raw directed adjacency over all constituent nodes.
    ///
    /// Arena ids are dense, so they double as matrix indices.
    fn adjacency(&self) -> AdjacencyMatrix {
        let edges = self
            .edges()
            .map(|(child, parent, weight)| (child.index(), parent.index(), weight));
        AdjacencyMatrix::from_edges(self.arena.len(), edges)
            .expect("arena ids are dense matrix indices")
    }

    /// One spreading-activation pass from a source token.
    ///
    /// Returns first-arrival activation per constituent node, indexed by
    /// [`ConstituentId::index`]. `excluded` links are removed (in both
    /// orientations) before propagation.
    pub fn spread_from(
        &self,
        source: &str,
        excluded: &[(ConstituentId, ConstituentId)],
        params: &SpreadParams,
    ) -> Result<SpreadOutcome, NetError> {
        let source = self.word_node(source)?;
        let excluded: Vec<(usize, usize)> = excluded
            .iter()
            .map(|&(a, b)| (a.index(), b.index()))
            .collect();
        let spreader = ActivationSpreader::new(*params);
        Ok(spreader.spread(&self.adjacency(), source.index(), &excluded)?)
    }

    /// Relatedness from a source token to each target token, in input order.
    pub fn relatedness(
        &self,
        source: &str,
        targets: &[&str],
        params: &SpreadParams,
    ) -> Result<Vec<f64>, NetError> {
        let outcome = self.spread_from(source, &[], params)?;
        targets
            .iter()
            .map(|target| Ok(outcome.activation[self.word_node(target)?.index()]))
            .collect()
    }
}
