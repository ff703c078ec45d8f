//! Instrument relatedness scoring.
//!
//! Given a verb+theme pair ("preserve pepper") and candidate instruments
//! ("vinegar", "dehydrator", "saw"), scoring runs two spreading-activation
//! passes (one from the verb, one from the theme) and combines each
//! instrument's first-arrival activations into a single log-relatedness
//! score. When the corpus contains the (verb, theme) constituent itself,
//! each pass removes the link between that pair node and the opposite word,
//! so scores reflect indirect, multi-hop association rather than the direct
//! syntactic edge.

use crate::network::ConstituentNet;
use crate::NetError;
use semnet_core::SpreadParams;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Policy for an instrument whose activation product is zero.
///
/// `ln(0)` is undefined, so the zero case must be decided explicitly rather
/// than left to produce `-inf` or a panic downstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ZeroActivationPolicy {
    /// Substitute this floor for the product before taking the log:
    /// "valid but very small relatedness".
    Floor(f64),
    /// Report [`NetError::NoRelatedness`]: "no relatedness found".
    Error,
}

/// Parameters for instrument scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreParams {
    /// How to treat a zero activation product.
    pub zero_activation: ZeroActivationPolicy,
    /// Parameters forwarded to both spreading passes.
    pub spread: SpreadParams,
}

impl Default for ScoreParams {
    fn default() -> Self {
        Self {
            zero_activation: ZeroActivationPolicy::Floor(1e-12),
            spread: SpreadParams::default(),
        }
    }
}

/// One relatedness query: a verb+theme pair and its candidate instruments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentQuery {
    pub verb: String,
    pub theme: String,
    pub instruments: Vec<String>,
}

impl InstrumentQuery {
    /// Create a query.
    pub fn new(
        verb: impl Into<String>,
        theme: impl Into<String>,
        instruments: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            verb: verb.into(),
            theme: theme.into(),
            instruments: instruments.into_iter().map(Into::into).collect(),
        }
    }
}

/// Scores how strongly candidate instruments associate with a verb+theme
/// pair over a built network.
#[derive(Debug, Clone, Default)]
pub struct InstrumentScorer {
    params: ScoreParams,
}

impl InstrumentScorer {
    /// Create a scorer with the given parameters.
    pub fn new(params: ScoreParams) -> Self {
        Self { params }
    }

    /// Score each instrument as `ln(sr_verb[i] · sr_theme[i])`, in input
    /// order.
    ///
    /// # Errors
    ///
    /// - [`NetError::UnknownToken`] when the verb, theme, or any instrument
    ///   is absent from the network.
    /// - [`NetError::NoRelatedness`] for a zero activation product under
    ///   [`ZeroActivationPolicy::Error`].
    pub fn score(
        &self,
        net: &ConstituentNet,
        verb: &str,
        theme: &str,
        instruments: &[&str],
    ) -> Result<Vec<f64>, NetError> {
        let verb_node = net.word_node(verb)?;
        let theme_node = net.word_node(theme)?;

        // Cut the direct pair↔word links when the pair itself is a node, so
        // activation cannot leak straight across the verb-theme edge.
        let (verb_excluded, theme_excluded) = match net.pair_node(verb, theme) {
            Some(pair) => (vec![(pair, theme_node)], vec![(pair, verb_node)]),
            None => (Vec::new(), Vec::new()),
        };

        let sr_verb = net.spread_from(verb, &verb_excluded, &self.params.spread)?;
        let sr_theme = net.spread_from(theme, &theme_excluded, &self.params.spread)?;

        let mut scores = Vec::with_capacity(instruments.len());
        for &instrument in instruments {
            let node = net.word_node(instrument)?;
            let product =
                sr_verb.activation[node.index()] * sr_theme.activation[node.index()];
            let score = match self.params.zero_activation {
                ZeroActivationPolicy::Floor(floor) => product.max(floor).ln(),
                ZeroActivationPolicy::Error => {
                    if product <= 0.0 {
                        return Err(NetError::NoRelatedness {
                            instrument: instrument.to_string(),
                        });
                    }
                    product.ln()
                }
            };
            scores.push(score);
        }

        debug!(
            verb,
            theme,
            instruments = instruments.len(),
            "scored instrument relatedness"
        );
        Ok(scores)
    }

    /// Score a batch of independent queries.
    ///
    /// One failing query does not abort the rest; each slot carries its own
    /// result, in query order.
    pub fn score_batch(
        &self,
        net: &ConstituentNet,
        queries: &[InstrumentQuery],
    ) -> Vec<Result<Vec<f64>, NetError>> {
        queries
            .iter()
            .map(|query| {
                let instruments: Vec<&str> =
                    query.instruments.iter().map(String::as_str).collect();
                self.score(net, &query.verb, &query.theme, &instruments)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{ConstituentTreeBuilder, GraphBuilder};
    use semnet_core::{ParseNode, Vocabulary};

    fn two_leaf(a: &str, b: &str) -> ParseNode {
        ParseNode::phrase([ParseNode::leaf(a), ParseNode::leaf(b)])
    }

    fn kitchen_net() -> ConstituentNet {
        let vocab = Vocabulary::from_tokens([
            "preserve",
            "pepper",
            "vinegar",
            "dehydrator",
            "wood",
            "saw",
        ]);
        let corpus = vec![
            two_leaf("preserve", "pepper"),
            two_leaf("preserve", "vinegar"),
            two_leaf("pepper", "vinegar"),
            two_leaf("preserve", "vinegar"),
            two_leaf("dehydrator", "pepper"),
            two_leaf("wood", "saw"),
            two_leaf("preserve", "wood"),
        ];
        ConstituentTreeBuilder::new(vocab).build(&corpus).unwrap()
    }

    #[test]
    fn test_strong_instrument_outranks_weak() {
        let net = kitchen_net();
        let scorer = InstrumentScorer::default();
        let scores = net_scores(&net, &scorer);

        // vinegar co-occurs with both words of the pair; saw is hops away.
        assert!(scores[0] > scores[2]);
    }

    fn net_scores(net: &ConstituentNet, scorer: &InstrumentScorer) -> Vec<f64> {
        scorer
            .score(net, "preserve", "pepper", &["vinegar", "dehydrator", "saw"])
            .unwrap()
    }

    #[test]
    fn test_scores_are_finite_under_floor_policy() {
        let net = kitchen_net();
        let scorer = InstrumentScorer::default();
        for score in net_scores(&net, &scorer) {
            assert!(score.is_finite());
        }
    }

    #[test]
    fn test_unknown_instrument_is_reported() {
        let net = kitchen_net();
        let scorer = InstrumentScorer::default();
        let result = scorer.score(&net, "preserve", "pepper", &["chainsaw"]);
        assert!(matches!(result, Err(NetError::UnknownToken { .. })));
    }

    #[test]
    fn test_zero_product_floor_vs_error() {
        // Two disconnected components: (a b) and (c d). Instrument d gets
        // zero activation from both passes.
        let vocab = Vocabulary::from_tokens(["a", "b", "c", "d"]);
        let corpus = vec![two_leaf("a", "b"), two_leaf("c", "d")];
        let net = ConstituentTreeBuilder::new(vocab).build(&corpus).unwrap();

        let floored = InstrumentScorer::new(ScoreParams {
            zero_activation: ZeroActivationPolicy::Floor(1e-12),
            spread: SpreadParams::default(),
        });
        let scores = floored.score(&net, "a", "b", &["d"]).unwrap();
        assert!((scores[0] - 1e-12_f64.ln()).abs() < 1e-10);

        let erroring = InstrumentScorer::new(ScoreParams {
            zero_activation: ZeroActivationPolicy::Error,
            spread: SpreadParams::default(),
        });
        let result = erroring.score(&net, "a", "b", &["d"]);
        assert!(matches!(result, Err(NetError::NoRelatedness { .. })));
    }

    #[test]
    fn test_unknown_pair_scores_without_exclusions() {
        // "vinegar saw" never forms a constituent, so both passes run
        // unexcluded and still produce finite scores.
        let net = kitchen_net();
        let scorer = InstrumentScorer::default();
        assert!(net.pair_node("vinegar", "saw").is_none());

        let scores = scorer.score(&net, "vinegar", "saw", &["preserve"]).unwrap();
        assert_eq!(scores.len(), 1);
        assert!(scores[0].is_finite());
    }

    #[test]
    fn test_batch_isolates_failures() {
        let net = kitchen_net();
        let scorer = InstrumentScorer::default();
        let queries = vec![
            InstrumentQuery::new("preserve", "pepper", ["vinegar"]),
            InstrumentQuery::new("preserve", "pepper", ["chainsaw"]),
            InstrumentQuery::new("preserve", "vinegar", ["pepper"]),
        ];

        let results = scorer.score_batch(&net, &queries);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }
}
