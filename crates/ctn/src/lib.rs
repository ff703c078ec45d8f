//! # Semnet CTN - Constituent Tree Networks
//!
//! This crate turns a corpus of parsed sentences into a queryable semantic
//! relatedness network:
//!
//! - **Decomposition**: nested parses become flat constituent trees
//! - **Builders**: a [`GraphBuilder`] trait with constituent-tree and
//!   linear-order implementations sharing one aggregation path
//! - **Lexical graph**: a normalized word-level co-occurrence projection
//! - **Scoring**: verb+theme instrument relatedness via two
//!   spreading-activation passes
//!
//! ## Example
//!
//! ```rust
//! use semnet_core::{ParseNode, Vocabulary};
//! use semnet_ctn::{ConstituentTreeBuilder, GraphBuilder, InstrumentScorer};
//!
//! let vocab = Vocabulary::from_tokens(["wash", "dish", "bowl", "soap"]);
//! let corpus = vec![
//!     ParseNode::phrase([ParseNode::leaf("wash"), ParseNode::leaf("dish")]),
//!     ParseNode::phrase([ParseNode::leaf("wash"), ParseNode::leaf("bowl")]),
//!     ParseNode::phrase([ParseNode::leaf("soap"), ParseNode::leaf("dish")]),
//! ];
//!
//! let net = ConstituentTreeBuilder::new(vocab).build(&corpus).unwrap();
//! let scorer = InstrumentScorer::default();
//! let scores = scorer.score(&net, "wash", "dish", &["soap", "bowl"]).unwrap();
//! assert_eq!(scores.len(), 2);
//! ```

pub mod builder;
pub mod decompose;
mod error;
pub mod lexical;
pub mod network;
pub mod score;

pub use builder::{ConstituentTreeBuilder, GraphBuilder, LinearOrderBuilder};
pub use decompose::{decompose, SentenceTree};
pub use error::NetError;
pub use lexical::LexicalGraph;
pub use network::ConstituentNet;
pub use score::{InstrumentQuery, InstrumentScorer, ScoreParams, ZeroActivationPolicy};
