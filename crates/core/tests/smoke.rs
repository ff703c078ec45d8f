//! Smoke tests for the core crate.
//!
//! These tests verify that the basic infrastructure works:
//! - Vocabularies assign stable, injective ids
//! - The arena interns constituents by structure
//! - The spreader terminates and records first arrivals correctly

use semnet_core::{
    ActivationSpreader, AdjacencyMatrix, Constituent, ConstituentArena, CoreError, SpreadParams,
    Vocabulary,
};

// ============================================================================
// Vocabulary Tests
// ============================================================================

#[test]
fn smoke_vocabulary_ids_stable() {
    let vocab = Vocabulary::from_tokens(["preserve", "pepper", "vinegar"]);
    assert_eq!(vocab.len(), 3);
    assert_eq!(vocab.id("preserve"), Some(0));
    assert_eq!(vocab.id("vinegar"), Some(2));
    assert_eq!(vocab.token(1), Some("pepper"));
}

#[test]
fn smoke_vocabulary_rejects_unknown() {
    let vocab = Vocabulary::from_tokens(["a"]);
    assert!(matches!(
        vocab.require_id("missing"),
        Err(CoreError::UnknownToken { .. })
    ));
}

// ============================================================================
// Arena Tests
// ============================================================================

#[test]
fn smoke_arena_structural_identity() {
    let mut arena = ConstituentArena::new();
    let a = arena.intern_word(0);
    let b = arena.intern_word(1);
    let ab = arena.intern_phrase(vec![a, b]);

    // Looking up the same structure finds the same id.
    assert_eq!(arena.lookup(&Constituent::Phrase(vec![a, b])), Some(ab));
    assert_eq!(arena.lookup(&Constituent::Word(0)), Some(a));
    assert_eq!(arena.lookup(&Constituent::Word(7)), None);
}

// ============================================================================
// Spreader Tests
// ============================================================================

#[test]
fn smoke_rows_stochastic_after_normalization() {
    let mut w =
        AdjacencyMatrix::from_edges(4, [(0, 1, 0.3), (1, 2, 1.2), (2, 3, 0.5), (0, 3, 2.0)])
            .unwrap();
    w.symmetrize();
    w.row_normalize();

    for i in 0..4 {
        let sum = w.row_sum(i);
        assert!(
            (sum - 1.0).abs() < 1e-10 || sum == 0.0,
            "row {} sums to {}",
            i,
            sum
        );
        for j in 0..4 {
            assert!(w.get(i, j) >= 0.0);
            assert!(w.get(i, j) <= 1.0 + 1e-10);
        }
    }
}

#[test]
fn smoke_spread_star_graph() {
    // Hub 0 connected to 1, 2, 3: all spokes fire with equal activation.
    let adjacency =
        AdjacencyMatrix::from_edges(4, [(0, 1, 1.0), (0, 2, 1.0), (0, 3, 1.0)]).unwrap();
    let spreader = ActivationSpreader::new(SpreadParams::default());
    let outcome = spreader.spread(&adjacency, 0, &[]).unwrap();

    assert!(outcome.all_fired);
    assert!(outcome.activation[1] > 0.0);
    assert!((outcome.activation[1] - outcome.activation[2]).abs() < 1e-10);
    assert!((outcome.activation[1] - outcome.activation[3]).abs() < 1e-10);
}

#[test]
fn smoke_spread_respects_edge_weights() {
    // 0 is tied to 1 nine times as strongly as to 2.
    let adjacency = AdjacencyMatrix::from_edges(3, [(0, 1, 0.9), (0, 2, 0.1)]).unwrap();
    let spreader = ActivationSpreader::new(SpreadParams::default());
    let outcome = spreader.spread(&adjacency, 0, &[]).unwrap();

    assert!(outcome.activation[1] > outcome.activation[2]);
}

#[test]
fn smoke_spread_step_bound_holds() {
    // A two-component graph oscillates and never reaches a fixed point;
    // the step bound must still end the run.
    let adjacency = AdjacencyMatrix::from_edges(4, [(0, 1, 1.0), (2, 3, 1.0)]).unwrap();
    let spreader = ActivationSpreader::new(SpreadParams {
        convergence_tolerance: 1e-12,
        max_steps: Some(5),
    });
    let outcome = spreader.spread(&adjacency, 0, &[]).unwrap();

    assert_eq!(outcome.steps, 5);
    assert!(!outcome.all_fired);
    assert_eq!(outcome.activation[2], 0.0);
    assert_eq!(outcome.activation[3], 0.0);
}
