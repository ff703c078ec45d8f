//! Error types for network construction and scoring.

use semnet_core::CoreError;
use thiserror::Error;

/// Errors that can occur while building or querying a network.
#[derive(Debug, Clone, Error)]
pub enum NetError {
    /// A token referenced by the corpus or a query is not in the vocabulary,
    /// or never appeared in the built graph.
    #[error("Unknown token: '{token}'")]
    UnknownToken { token: String },

    /// An instrument received zero activation from the verb or theme pass
    /// under the erroring zero-activation policy.
    #[error("No relatedness found for instrument '{instrument}'")]
    NoRelatedness { instrument: String },

    /// Error from the underlying spreading engine.
    #[error(transparent)]
    Core(#[from] CoreError),
}
