//! Constituents and the interning arena.
//!
//! A constituent is a syntactic unit from a parse tree: either a single word
//! or an ordered phrase of sub-constituents. Graph construction needs cheap
//! structural identity for arbitrarily deep trees, so every distinct
//! constituent is interned once in a [`ConstituentArena`] and referenced by a
//! stable integer [`ConstituentId`] from then on. Phrases hold child *ids*
//! rather than child values, which means interning a tree bottom-up reduces
//! deep structural equality to equality of small keys, and the dense ids
//! double as indices into activation vectors and adjacency matrices.
//!
//! # Example
//!
//! ```rust
//! use semnet_core::{Constituent, ConstituentArena};
//!
//! let mut arena = ConstituentArena::new();
//! let wash = arena.intern_word(0);
//! let dish = arena.intern_word(1);
//! let phrase = arena.intern_phrase(vec![wash, dish]);
//!
//! // Structural equality: interning the same phrase again yields the same id.
//! assert_eq!(arena.intern_phrase(vec![wash, dish]), phrase);
//! assert_eq!(arena.len(), 3);
//! ```

use crate::Vocabulary;
use std::collections::HashMap;

/// Identifier of an interned constituent.
///
/// Ids are dense and assigned in first-encounter order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstituentId(u32);

impl ConstituentId {
    /// The id as a vector/matrix index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A syntactic unit: a single word or an ordered phrase of sub-constituents.
///
/// Never mutated after interning.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Constituent {
    /// A single token, by vocabulary id.
    Word(usize),
    /// An ordered phrase of previously interned sub-constituents.
    Phrase(Vec<ConstituentId>),
}

impl Constituent {
    /// Check if this is a word-level constituent.
    pub fn is_word(&self) -> bool {
        matches!(self, Constituent::Word(_))
    }

    /// The vocabulary id, for word constituents.
    pub fn word_id(&self) -> Option<usize> {
        match self {
            Constituent::Word(token_id) => Some(*token_id),
            Constituent::Phrase(_) => None,
        }
    }
}

/// A parsed sentence as handed over by an external parser.
///
/// Consumed read-only by graph builders; leaves carry raw token strings that
/// are resolved against a [`Vocabulary`] at decomposition time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseNode {
    /// A single token.
    Leaf(String),
    /// An ordered sub-phrase.
    Phrase(Vec<ParseNode>),
}

impl ParseNode {
    /// Create a leaf node.
    pub fn leaf(token: impl Into<String>) -> Self {
        ParseNode::Leaf(token.into())
    }

    /// Create a phrase node.
    pub fn phrase(children: impl IntoIterator<Item = ParseNode>) -> Self {
        ParseNode::Phrase(children.into_iter().collect())
    }

    /// All leaf tokens in left-to-right order.
    pub fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            ParseNode::Leaf(token) => out.push(token),
            ParseNode::Phrase(children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }
}

/// Interning arena for constituents.
///
/// Every distinct constituent observed while decomposing a corpus gets
/// exactly one id; interning the same structure again returns the original.
#[derive(Debug, Clone, Default)]
pub struct ConstituentArena {
    items: Vec<Constituent>,
    index: HashMap<Constituent, ConstituentId>,
}

impl ConstituentArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a constituent, returning its stable id.
    pub fn intern(&mut self, constituent: Constituent) -> ConstituentId {
        if let Some(&id) = self.index.get(&constituent) {
            return id;
        }
        let id = ConstituentId(self.items.len() as u32);
        self.index.insert(constituent.clone(), id);
        self.items.push(constituent);
        id
    }

    /// Intern a word-level constituent.
    pub fn intern_word(&mut self, token_id: usize) -> ConstituentId {
        self.intern(Constituent::Word(token_id))
    }

    /// Intern a phrase of previously interned children.
    pub fn intern_phrase(&mut self, children: Vec<ConstituentId>) -> ConstituentId {
        self.intern(Constituent::Phrase(children))
    }

    /// The constituent behind an id.
    pub fn get(&self, id: ConstituentId) -> &Constituent {
        &self.items[id.index()]
    }

    /// Find the id of an already interned constituent.
    pub fn lookup(&self, constituent: &Constituent) -> Option<ConstituentId> {
        self.index.get(constituent).copied()
    }

    /// Number of distinct constituents.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All ids in assignment order.
    pub fn ids(&self) -> impl Iterator<Item = ConstituentId> {
        (0..self.items.len() as u32).map(ConstituentId)
    }

    /// Render a constituent as bracketed text, e.g. `(wash (the dish))`.
    pub fn render(&self, id: ConstituentId, vocab: &Vocabulary) -> String {
        match self.get(id) {
            Constituent::Word(token_id) => vocab.token(*token_id).unwrap_or("?").to_string(),
            Constituent::Phrase(children) => {
                let parts: Vec<String> = children.iter().map(|&c| self.render(c, vocab)).collect();
                format!("({})", parts.join(" "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interning_is_structural() {
        let mut arena = ConstituentArena::new();
        let a = arena.intern_word(0);
        let b = arena.intern_word(1);
        let first = arena.intern_phrase(vec![a, b]);
        let second = arena.intern_phrase(vec![a, b]);

        assert_eq!(first, second);
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_order_matters_for_phrases() {
        let mut arena = ConstituentArena::new();
        let a = arena.intern_word(0);
        let b = arena.intern_word(1);

        let ab = arena.intern_phrase(vec![a, b]);
        let ba = arena.intern_phrase(vec![b, a]);
        assert_ne!(ab, ba);
    }

    #[test]
    fn test_ids_are_dense() {
        let mut arena = ConstituentArena::new();
        arena.intern_word(0);
        arena.intern_word(1);

        let indices: Vec<usize> = arena.ids().map(ConstituentId::index).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_parse_node_leaves() {
        let sentence = ParseNode::phrase([
            ParseNode::leaf("the"),
            ParseNode::phrase([ParseNode::leaf("red"), ParseNode::leaf("ball")]),
        ]);
        assert_eq!(sentence.leaves(), vec!["the", "red", "ball"]);
    }

    #[test]
    fn test_render() {
        let vocab = Vocabulary::from_tokens(["wash", "dish"]);
        let mut arena = ConstituentArena::new();
        let wash = arena.intern_word(0);
        let dish = arena.intern_word(1);
        let phrase = arena.intern_phrase(vec![wash, dish]);

        assert_eq!(arena.render(phrase, &vocab), "(wash dish)");
    }
}
