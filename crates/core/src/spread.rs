//! Spreading activation over a weighted adjacency matrix.
//!
//! The spreader measures relatedness from one source node to every other
//! node of a graph. A unit of activation starts at the source and is pushed
//! outward through a row-stochastic transition matrix; the activation level a
//! node carries the first time it is reached ("fires") is its relatedness to
//! the source. Later, weaker arrivals never overwrite the recorded value.
//!
//! ## Algorithm
//!
//! 1. Symmetrize the raw weights (`W ← W + Wᵀ`) so activation flows along
//!    every edge in both directions.
//! 2. Zero out excluded links (used by scoring to cut the direct edge
//!    between a verb-theme pair and isolate indirect association).
//! 3. Row-normalize: each node emits total mass 1; rows summing to zero stay
//!    zero, so isolated nodes send nothing.
//! 4. Iterate `activation ← activation × W`, recording first arrivals.
//! 5. Stop when every node has fired, when the activation vector reaches a
//!    fixed point, or at the step bound; nodes unreachable from the source
//!    keep relatedness 0 instead of spinning the loop forever.
//!
//! # Example
//!
//! ```rust
//! use semnet_core::{ActivationSpreader, AdjacencyMatrix, SpreadParams};
//!
//! let adjacency = AdjacencyMatrix::from_edges(2, [(0, 1, 1.0)]).unwrap();
//! let spreader = ActivationSpreader::new(SpreadParams::default());
//! let outcome = spreader.spread(&adjacency, 0, &[]).unwrap();
//!
//! assert_eq!(outcome.activation[0], 1.0); // the source fires immediately
//! assert_eq!(outcome.activation[1], 1.0); // all mass arrives in one hop
//! ```

use crate::CoreError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parameters for a spreading-activation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpreadParams {
    /// Fixed-point guard: stop once the L1 change of the activation vector
    /// falls below this tolerance, even if some nodes never fired.
    pub convergence_tolerance: f64,
    /// Hard bound on propagation steps. `None` uses twice the node count.
    pub max_steps: Option<usize>,
}

impl Default for SpreadParams {
    fn default() -> Self {
        Self {
            convergence_tolerance: 1e-12,
            max_steps: None,
        }
    }
}

/// Dense square matrix of non-negative edge weights, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyMatrix {
    n: usize,
    w: Vec<f64>,
}

impl AdjacencyMatrix {
    /// An all-zero matrix over `n` nodes.
    pub fn zeros(n: usize) -> Self {
        Self { n, w: vec![0.0; n * n] }
    }

    /// Build from directed weighted edges; parallel edges accumulate.
    pub fn from_edges(
        n: usize,
        edges: impl IntoIterator<Item = (usize, usize, f64)>,
    ) -> Result<Self, CoreError> {
        let mut matrix = Self::zeros(n);
        for (i, j, weight) in edges {
            if i >= n {
                return Err(CoreError::IndexOutOfBounds { index: i, size: n });
            }
            if j >= n {
                return Err(CoreError::IndexOutOfBounds { index: j, size: n });
            }
            matrix.w[i * n + j] += weight;
        }
        Ok(matrix)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// The weight at (i, j).
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.w[i * self.n + j]
    }

    /// Set the weight at (i, j).
    pub fn set(&mut self, i: usize, j: usize, weight: f64) {
        self.w[i * self.n + j] = weight;
    }

    /// `W ← W + Wᵀ`: let activation flow along every edge in both directions.
    pub fn symmetrize(&mut self) {
        for i in 0..self.n {
            for j in (i + 1)..self.n {
                let sum = self.w[i * self.n + j] + self.w[j * self.n + i];
                self.w[i * self.n + j] = sum;
                self.w[j * self.n + i] = sum;
            }
        }
    }

    /// Remove the undirected link between two nodes (both entries zeroed).
    pub fn zero_pair(&mut self, i: usize, j: usize) {
        self.w[i * self.n + j] = 0.0;
        self.w[j * self.n + i] = 0.0;
    }

    /// Sum of row `i`.
    pub fn row_sum(&self, i: usize) -> f64 {
        self.w[i * self.n..(i + 1) * self.n].iter().sum()
    }

    /// Divide each row by its sum, producing a row-stochastic matrix.
    ///
    /// Rows summing to zero are left untouched (isolated nodes send no
    /// activation). Returns the number of such rows.
    pub fn row_normalize(&mut self) -> usize {
        let mut zero_rows = 0;
        for i in 0..self.n {
            let sum = self.row_sum(i);
            if sum == 0.0 {
                zero_rows += 1;
                continue;
            }
            for weight in &mut self.w[i * self.n..(i + 1) * self.n] {
                *weight /= sum;
            }
        }
        zero_rows
    }

    /// One propagation step: `out[j] = Σᵢ activation[i] · w[i][j]`.
    pub fn propagate(&self, activation: &[f64]) -> Vec<f64> {
        let mut out = vec![0.0; self.n];
        for (i, &mass) in activation.iter().enumerate() {
            if mass == 0.0 {
                continue;
            }
            let row = &self.w[i * self.n..(i + 1) * self.n];
            for (j, &weight) in row.iter().enumerate() {
                if weight != 0.0 {
                    out[j] += mass * weight;
                }
            }
        }
        out
    }
}

/// Result of one spreading pass.
#[derive(Debug, Clone)]
pub struct SpreadOutcome {
    /// First-arrival activation per node: the relatedness of each node to
    /// the source. The source itself carries 1.0; nodes never reached stay 0.
    pub activation: Vec<f64>,
    /// Propagation steps taken.
    pub steps: usize,
    /// Whether every node fired (as opposed to stopping at the fixed-point
    /// or step-bound guard with unreachable nodes left over).
    pub all_fired: bool,
}

/// The spreading-activation engine.
///
/// Each call to [`spread`](ActivationSpreader::spread) owns its activation
/// state, so independent queries over a shared matrix may run in parallel.
#[derive(Debug, Clone, Default)]
pub struct ActivationSpreader {
    params: SpreadParams,
}

impl ActivationSpreader {
    /// Create a spreader with the given parameters.
    pub fn new(params: SpreadParams) -> Self {
        Self { params }
    }

    /// Propagate a unit activation from `source`, recording each node's
    /// first-arrival level.
    ///
    /// `adjacency` holds the raw directed weights; this method symmetrizes,
    /// removes `excluded` links, and row-normalizes its own copy, leaving the
    /// input untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is empty or any node index is out of
    /// bounds.
    pub fn spread(
        &self,
        adjacency: &AdjacencyMatrix,
        source: usize,
        excluded: &[(usize, usize)],
    ) -> Result<SpreadOutcome, CoreError> {
        let n = adjacency.len();
        if n == 0 {
            return Err(CoreError::EmptyMatrix);
        }
        if source >= n {
            return Err(CoreError::IndexOutOfBounds { index: source, size: n });
        }

        let mut w = adjacency.clone();
        w.symmetrize();
        for &(i, j) in excluded {
            if i >= n {
                return Err(CoreError::IndexOutOfBounds { index: i, size: n });
            }
            if j >= n {
                return Err(CoreError::IndexOutOfBounds { index: j, size: n });
            }
            w.zero_pair(i, j);
        }
        let zero_rows = w.row_normalize();
        if zero_rows > 0 {
            debug!(zero_rows, "isolated nodes send no activation");
        }

        let mut activation = vec![0.0; n];
        activation[source] = 1.0;
        let mut recorder = activation.clone();

        // true = has not yet fired; the source fires immediately.
        let mut unfired = vec![true; n];
        unfired[source] = false;
        let mut remaining = n - 1;

        let max_steps = self.params.max_steps.unwrap_or(2 * n);
        let mut steps = 0;

        while remaining > 0 && steps < max_steps {
            let next = w.propagate(&activation);
            let delta: f64 = next
                .iter()
                .zip(&activation)
                .map(|(a, b)| (a - b).abs())
                .sum();

            for j in 0..n {
                if unfired[j] && next[j] > 0.0 {
                    recorder[j] = next[j];
                    unfired[j] = false;
                    remaining -= 1;
                }
            }

            activation = next;
            steps += 1;

            if delta < self.params.convergence_tolerance {
                // Fixed point: anything still unfired is unreachable.
                break;
            }
        }

        if remaining > 0 {
            debug!(
                unreached = remaining,
                steps, "activation settled before reaching every node"
            );
        }

        Ok(SpreadOutcome {
            activation: recorder,
            steps,
            all_fired: remaining == 0,
        })
    }
}
