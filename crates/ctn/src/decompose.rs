//! Tree decomposition: nested parses into constituent edges and nodes.
//!
//! A parsed sentence arrives as a nested structure of tokens and sub-phrases.
//! Decomposition walks that structure bottom-up, interning every constituent
//! in the arena, and emits the tree as flat data: one (child, parent) edge
//! per direct nesting relation, and a node list covering every constituent of
//! the sentence, the sentence-level root included.
//!
//! # Example
//!
//! ```rust
//! use semnet_core::{ConstituentArena, ParseNode, Vocabulary};
//! use semnet_ctn::decompose;
//!
//! let vocab = Vocabulary::from_tokens(["wash", "dish"]);
//! let mut arena = ConstituentArena::new();
//! let sentence = ParseNode::phrase([ParseNode::leaf("wash"), ParseNode::leaf("dish")]);
//!
//! let tree = decompose(&mut arena, &vocab, &sentence).unwrap();
//! assert_eq!(tree.edges.len(), 2); // wash→(wash dish), dish→(wash dish)
//! assert_eq!(tree.nodes.len(), 3); // both words plus the sentence itself
//! assert!(tree.nodes.contains(&tree.root));
//! ```

use crate::NetError;
use semnet_core::{ConstituentArena, ConstituentId, ParseNode, Vocabulary};
use std::collections::HashSet;

/// The edge and node set of one decomposed sentence.
///
/// Retained by builders after graph assembly so that within-sentence
/// distances between tokens can be looked up later.
#[derive(Debug, Clone)]
pub struct SentenceTree {
    /// The constituent with no parent: the sentence phrase for constituent
    /// trees, the final token for linear-order chains.
    pub root: ConstituentId,
    /// One (child, parent) pair per direct nesting relation.
    pub edges: Vec<(ConstituentId, ConstituentId)>,
    /// Every constituent of the sentence, the root included. May repeat an
    /// id when the same constituent occurs twice in one sentence.
    pub nodes: Vec<ConstituentId>,
}

impl SentenceTree {
    /// Token-level nodes of this tree with their vocabulary ids,
    /// deduplicated, in first-occurrence order.
    pub fn leaves(&self, arena: &ConstituentArena) -> Vec<(ConstituentId, usize)> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for &node in &self.nodes {
            if let Some(token_id) = arena.get(node).word_id() {
                if seen.insert(node) {
                    out.push((node, token_id));
                }
            }
        }
        out
    }
}

/// Decompose a parsed sentence into its constituent tree.
///
/// Every constituent is interned into `arena`; leaf tokens are resolved
/// against `vocab`. A single-token sentence yields one node and no edges.
///
/// # Errors
///
/// Returns [`NetError::UnknownToken`] when a leaf is outside the vocabulary:
/// the corpus and the vocabulary are then inconsistent, and graph
/// construction must abort rather than build a partial network.
pub fn decompose(
    arena: &mut ConstituentArena,
    vocab: &Vocabulary,
    sentence: &ParseNode,
) -> Result<SentenceTree, NetError> {
    let mut edges = Vec::new();
    let mut nodes = Vec::new();
    let root = walk(arena, vocab, sentence, &mut edges, &mut nodes)?;
    nodes.push(root);
    Ok(SentenceTree { root, edges, nodes })
}

fn walk(
    arena: &mut ConstituentArena,
    vocab: &Vocabulary,
    node: &ParseNode,
    edges: &mut Vec<(ConstituentId, ConstituentId)>,
    nodes: &mut Vec<ConstituentId>,
) -> Result<ConstituentId, NetError> {
    match node {
        ParseNode::Leaf(token) => {
            let token_id = vocab.id(token).ok_or_else(|| NetError::UnknownToken {
                token: token.clone(),
            })?;
            Ok(arena.intern_word(token_id))
        }
        ParseNode::Phrase(children) => {
            let mut child_ids = Vec::with_capacity(children.len());
            for child in children {
                let child_id = walk(arena, vocab, child, edges, nodes)?;
                nodes.push(child_id);
                child_ids.push(child_id);
            }
            let parent = arena.intern_phrase(child_ids.clone());
            for &child_id in &child_ids {
                edges.push((child_id, parent));
            }
            Ok(parent)
        }
    }
}
