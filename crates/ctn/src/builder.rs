//! Graph builders: a parsed corpus into a queryable constituent network.
//!
//! Builders differ only in which structural relations become graph edges;
//! everything downstream (edge aggregation, log-weighting, lexical
//! derivation, the activation spreader) is shared.
//!
//! - [`ConstituentTreeBuilder`] joins the constituent trees of the corpus by
//!   their shared constituents.
//! - [`LinearOrderBuilder`] ignores tree structure and chains adjacent
//!   tokens in sentence order.

use crate::decompose::{decompose, SentenceTree};
use crate::lexical::LexicalGraph;
use crate::network::ConstituentNet;
use crate::NetError;
use semnet_core::{ConstituentArena, ConstituentId, ParseNode, Vocabulary};
use std::collections::HashMap;
use tracing::debug;

/// Builds a relatedness network from a corpus of parsed sentences.
///
/// The vocabulary is handed in at construction time; implementations never
/// read shared tokenizer state. A build either produces a complete network
/// or fails as a whole; no partially built graph is ever returned.
pub trait GraphBuilder {
    /// Consume the corpus and produce an immutable, queryable network.
    fn build(&self, corpus: &[ParseNode]) -> Result<ConstituentNet, NetError>;
}

/// Joins the constituent trees of a corpus by their shared constituents.
///
/// Each sentence decomposes into (child, parent) edges over interned
/// constituents; edges are counted across the corpus and weighted
/// `log10(count + 1)`. The per-sentence trees are retained for lexical
/// derivation and within-sentence distance lookups.
///
/// # Example
///
/// ```rust
/// use semnet_core::{ParseNode, Vocabulary};
/// use semnet_ctn::{ConstituentTreeBuilder, GraphBuilder};
///
/// let vocab = Vocabulary::from_tokens(["wash", "dish", "bowl"]);
/// let corpus = vec![
///     ParseNode::phrase([ParseNode::leaf("wash"), ParseNode::leaf("dish")]),
///     ParseNode::phrase([ParseNode::leaf("wash"), ParseNode::leaf("bowl")]),
/// ];
///
/// let net = ConstituentTreeBuilder::new(vocab).build(&corpus).unwrap();
/// assert_eq!(net.node_count(), 5); // 3 words + 2 sentence phrases
/// ```
#[derive(Debug, Clone)]
pub struct ConstituentTreeBuilder {
    vocab: Vocabulary,
}

impl ConstituentTreeBuilder {
    /// Create a builder over the given vocabulary.
    pub fn new(vocab: Vocabulary) -> Self {
        Self { vocab }
    }
}

impl GraphBuilder for ConstituentTreeBuilder {
    fn build(&self, corpus: &[ParseNode]) -> Result<ConstituentNet, NetError> {
        let mut arena = ConstituentArena::new();
        let mut trees = Vec::with_capacity(corpus.len());
        for sentence in corpus {
            trees.push(decompose(&mut arena, &self.vocab, sentence)?);
        }
        assemble(self.vocab.clone(), arena, trees)
    }
}

/// Chains adjacent tokens in sentence order, ignoring tree structure.
///
/// The linear-order alternative to [`ConstituentTreeBuilder`]: every
/// sentence contributes edges w₁→w₂→…→wₙ over its leaf sequence. Aggregation,
/// weighting, and querying are identical, so the two builders are directly
/// comparable on the same corpus.
#[derive(Debug, Clone)]
pub struct LinearOrderBuilder {
    vocab: Vocabulary,
}

impl LinearOrderBuilder {
    /// Create a builder over the given vocabulary.
    pub fn new(vocab: Vocabulary) -> Self {
        Self { vocab }
    }
}

impl GraphBuilder for LinearOrderBuilder {
    fn build(&self, corpus: &[ParseNode]) -> Result<ConstituentNet, NetError> {
        let mut arena = ConstituentArena::new();
        let mut trees = Vec::with_capacity(corpus.len());

        for sentence in corpus {
            let mut word_ids: Vec<ConstituentId> = Vec::new();
            for token in sentence.leaves() {
                let token_id = self.vocab.id(token).ok_or_else(|| NetError::UnknownToken {
                    token: token.to_string(),
                })?;
                word_ids.push(arena.intern_word(token_id));
            }
            let Some(&root) = word_ids.last() else {
                continue; // nothing to chain in an empty sentence
            };

            let edges: Vec<(ConstituentId, ConstituentId)> = word_ids
                .windows(2)
                .map(|pair| (pair[0], pair[1]))
                .collect();
            trees.push(SentenceTree {
                root,
                nodes: word_ids,
                edges,
            });
        }

        assemble(self.vocab.clone(), arena, trees)
    }
}

/// Shared assembly: count edges, weight them, derive the lexical graph.
fn assemble(
    vocab: Vocabulary,
    arena: ConstituentArena,
    trees: Vec<SentenceTree>,
) -> Result<ConstituentNet, NetError> {
    let mut edge_counts: HashMap<(ConstituentId, ConstituentId), u64> = HashMap::new();
    for tree in &trees {
        for &edge in &tree.edges {
            *edge_counts.entry(edge).or_insert(0) += 1;
        }
    }

    let mut weighted: Vec<(ConstituentId, ConstituentId, f64)> = edge_counts
        .into_iter()
        .map(|((child, parent), count)| (child, parent, ((count + 1) as f64).log10()))
        .collect();
    // Edge-insertion order must not depend on hash iteration.
    weighted.sort_by_key(|&(child, parent, _)| (child, parent));

    debug!(
        nodes = arena.len(),
        edges = weighted.len(),
        sentences = trees.len(),
        "assembled constituent graph"
    );

    let lexical = LexicalGraph::derive(&vocab, &arena, &trees);
    Ok(ConstituentNet::from_parts(
        vocab, arena, weighted, trees, lexical,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_leaf(a: &str, b: &str) -> ParseNode {
        ParseNode::phrase([ParseNode::leaf(a), ParseNode::leaf(b)])
    }

    #[test]
    fn test_edge_weight_is_log_smoothed_count() {
        let vocab = Vocabulary::from_tokens(["wash", "dish"]);
        let corpus = vec![two_leaf("wash", "dish")];
        let net = ConstituentTreeBuilder::new(vocab).build(&corpus).unwrap();

        let wash = net.word_node("wash").unwrap();
        let pair = net.pair_node("wash", "dish").unwrap();
        let weight = net.edge_weight(wash, pair).unwrap();
        assert!((weight - 2.0_f64.log10()).abs() < 1e-10);
    }

    #[test]
    fn test_repeated_edges_gain_weight() {
        let vocab = Vocabulary::from_tokens(["wash", "dish"]);
        let once = vec![two_leaf("wash", "dish")];
        let thrice = vec![
            two_leaf("wash", "dish"),
            two_leaf("wash", "dish"),
            two_leaf("wash", "dish"),
        ];

        let net_once = ConstituentTreeBuilder::new(vocab.clone())
            .build(&once)
            .unwrap();
        let net_thrice = ConstituentTreeBuilder::new(vocab).build(&thrice).unwrap();

        let weight = |net: &ConstituentNet| {
            let wash = net.word_node("wash").unwrap();
            let pair = net.pair_node("wash", "dish").unwrap();
            net.edge_weight(wash, pair).unwrap()
        };
        assert!(weight(&net_thrice) > weight(&net_once));
        assert!((weight(&net_thrice) - 4.0_f64.log10()).abs() < 1e-10);
    }

    #[test]
    fn test_builds_are_deterministic() {
        let vocab = Vocabulary::from_tokens(["wash", "dish", "bowl", "cup"]);
        let corpus = vec![
            two_leaf("wash", "dish"),
            two_leaf("wash", "bowl"),
            two_leaf("bowl", "cup"),
            two_leaf("wash", "dish"),
        ];

        let first = ConstituentTreeBuilder::new(vocab.clone())
            .build(&corpus)
            .unwrap();
        let second = ConstituentTreeBuilder::new(vocab).build(&corpus).unwrap();

        let edges = |net: &ConstituentNet| net.edges().collect::<Vec<_>>();
        assert_eq!(edges(&first), edges(&second));
    }

    #[test]
    fn test_unknown_corpus_token_aborts_build() {
        let vocab = Vocabulary::from_tokens(["wash"]);
        let corpus = vec![two_leaf("wash", "zebra")];
        let result = ConstituentTreeBuilder::new(vocab).build(&corpus);
        assert!(matches!(result, Err(NetError::UnknownToken { .. })));
    }

    #[test]
    fn test_linear_order_chains_adjacent_tokens() {
        let vocab = Vocabulary::from_tokens(["a", "b", "c"]);
        let corpus = vec![ParseNode::phrase([
            ParseNode::leaf("a"),
            ParseNode::leaf("b"),
            ParseNode::leaf("c"),
        ])];
        let net = LinearOrderBuilder::new(vocab).build(&corpus).unwrap();

        // Words only, no phrase nodes.
        assert_eq!(net.node_count(), 3);
        assert_eq!(net.edge_count(), 2);

        let a = net.word_node("a").unwrap();
        let b = net.word_node("b").unwrap();
        let c = net.word_node("c").unwrap();
        assert!(net.edge_weight(a, b).is_some());
        assert!(net.edge_weight(b, c).is_some());
        assert!(net.edge_weight(a, c).is_none());
    }

    #[test]
    fn test_linear_order_skips_empty_sentences() {
        let vocab = Vocabulary::from_tokens(["a", "b"]);
        let corpus = vec![ParseNode::Phrase(vec![]), two_leaf("a", "b")];
        let net = LinearOrderBuilder::new(vocab).build(&corpus).unwrap();
        assert_eq!(net.node_count(), 2);
        assert_eq!(net.edge_count(), 1);
    }
}
