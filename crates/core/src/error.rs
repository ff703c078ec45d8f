//! Error types for vocabulary and spreading operations.

use thiserror::Error;

/// Errors that can occur in core computations.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    /// Token not found in the vocabulary.
    #[error("Unknown token: '{token}'")]
    UnknownToken { token: String },

    /// Node index outside the matrix.
    #[error("Node index {index} out of bounds for size {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    /// Spreading over an empty matrix.
    #[error("Adjacency matrix cannot be empty")]
    EmptyMatrix,
}
