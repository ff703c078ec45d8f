//! Spreading activation on a small hand-built graph.
//!
//! Run with: cargo run -p semnet-core --example spreading
//!
//! Builds a tiny association graph by hand and shows how first-arrival
//! activation falls off with distance from the source, and what removing an
//! edge does to the flow.

use semnet_core::{ActivationSpreader, AdjacencyMatrix, SpreadParams};

fn main() {
    println!("=== Spreading Activation ===\n");

    // A small graph:
    //
    //   0 (kitchen) - 1 (knife) - 2 (cut)
    //        \
    //         3 (stove) - 4 (pot)
    //
    let labels = ["kitchen", "knife", "cut", "stove", "pot"];
    let adjacency = AdjacencyMatrix::from_edges(
        5,
        [(0, 1, 1.0), (1, 2, 1.0), (0, 3, 1.0), (3, 4, 1.0)],
    )
    .unwrap();

    let spreader = ActivationSpreader::new(SpreadParams::default());

    println!("Activation from '{}':\n", labels[0]);
    let outcome = spreader.spread(&adjacency, 0, &[]).unwrap();
    for (i, label) in labels.iter().enumerate() {
        println!("  {:>8} : {:.4}", label, outcome.activation[i]);
    }
    println!("\n  ({} steps, all fired: {})\n", outcome.steps, outcome.all_fired);

    // Cut the kitchen-knife edge: 'knife' and 'cut' are now unreachable.
    println!("Same source with the {}-{} edge removed:\n", labels[0], labels[1]);
    let outcome = spreader.spread(&adjacency, 0, &[(0, 1)]).unwrap();
    for (i, label) in labels.iter().enumerate() {
        println!("  {:>8} : {:.4}", label, outcome.activation[i]);
    }
    println!("\n  ({} steps, all fired: {})", outcome.steps, outcome.all_fired);
}
