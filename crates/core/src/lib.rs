//! # Semnet Core - Vocabulary, Constituents, and Spreading Activation
//!
//! This crate provides the foundations for semantic relatedness networks:
//!
//! - **Vocabulary**: a stable token→id mapping, built once and handed to
//!   graph builders as an explicit dependency
//! - **Constituents**: interned syntactic units (words and phrases) with
//!   cheap structural identity via dense arena ids
//! - **Spreading activation**: first-arrival activation propagation over a
//!   row-normalized adjacency matrix, with a provable termination guard
//!
//! ## Design Philosophy
//!
//! Relatedness is a graph property, not a vector property: two words are
//! related to the degree that activation injected at one reaches the other
//! through shared syntactic structure. This crate owns the propagation
//! machinery; how the graph gets built from a corpus is the concern of the
//! network crates layered on top.
//!
//! ## Example
//!
//! ```rust
//! use semnet_core::{ActivationSpreader, AdjacencyMatrix, SpreadParams};
//!
//! // A path graph: 0 - 1 - 2
//! let adjacency = AdjacencyMatrix::from_edges(3, [(0, 1, 1.0), (1, 2, 1.0)]).unwrap();
//! let spreader = ActivationSpreader::new(SpreadParams::default());
//! let outcome = spreader.spread(&adjacency, 0, &[]).unwrap();
//!
//! // The neighbor fires with more activation than the node two hops out.
//! assert!(outcome.activation[1] > outcome.activation[2]);
//! ```

pub mod constituent;
pub mod error;
pub mod spread;
pub mod vocab;

// Re-export key types at crate root for convenience
pub use constituent::{Constituent, ConstituentArena, ConstituentId, ParseNode};
pub use error::CoreError;
pub use spread::{ActivationSpreader, AdjacencyMatrix, SpreadOutcome, SpreadParams};
pub use vocab::Vocabulary;
