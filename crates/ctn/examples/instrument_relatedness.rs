//! Instrument relatedness over a toy kitchen corpus.
//!
//! Run with: cargo run -p semnet-ctn --example instrument_relatedness
//!
//! Builds a constituent network from a handful of parsed sentences, shows
//! the lexical projection, and ranks candidate instruments for a verb+theme
//! pair with the spreading-activation scorer.

use semnet_core::{ParseNode, Vocabulary};
use semnet_ctn::{ConstituentTreeBuilder, GraphBuilder, InstrumentScorer};

fn two_leaf(a: &str, b: &str) -> ParseNode {
    ParseNode::phrase([ParseNode::leaf(a), ParseNode::leaf(b)])
}

fn main() {
    println!("=== Instrument Relatedness ===\n");

    let vocab = Vocabulary::from_tokens([
        "preserve",
        "pepper",
        "vinegar",
        "dehydrator",
        "wood",
        "saw",
    ]);

    // A toy corpus of parsed two-word utterances.
    let corpus = vec![
        two_leaf("preserve", "pepper"),
        two_leaf("preserve", "vinegar"),
        two_leaf("preserve", "vinegar"),
        two_leaf("pepper", "vinegar"),
        two_leaf("dehydrator", "pepper"),
        two_leaf("wood", "saw"),
        two_leaf("preserve", "wood"),
    ];

    let net = ConstituentTreeBuilder::new(vocab)
        .build(&corpus)
        .expect("corpus tokens are all in the vocabulary");

    println!(
        "Built network: {} constituents, {} edges\n",
        net.node_count(),
        net.edge_count()
    );

    // -------------------------------------------------------------------------
    // 1. The constituent graph
    // -------------------------------------------------------------------------
    println!("1. Constituent edges (child → parent, log-weighted)");
    println!("---------------------------------------------------\n");
    for (child, parent, weight) in net.edges() {
        println!(
            "  {:>12} → {:<22} {:.3}",
            net.arena().render(child, net.vocab()),
            net.arena().render(parent, net.vocab()),
            weight
        );
    }
    println!();

    // -------------------------------------------------------------------------
    // 2. The lexical projection
    // -------------------------------------------------------------------------
    println!("2. Lexical links (normalized co-occurrence)");
    println!("-------------------------------------------\n");
    let lexical = net.lexical();
    for (a, a_token) in net.vocab().iter() {
        for (b, b_token) in net.vocab().iter() {
            if a < b {
                if let Some(similarity) = lexical.similarity(a, b) {
                    println!("  {:>10} - {:<10} {:.3}", a_token, b_token, similarity);
                }
            }
        }
    }
    println!();

    // -------------------------------------------------------------------------
    // 3. Scoring instruments for "preserve pepper"
    // -------------------------------------------------------------------------
    println!("3. Which instrument goes with \"preserve pepper\"?");
    println!("------------------------------------------------\n");

    let instruments = ["vinegar", "dehydrator", "saw"];
    let scorer = InstrumentScorer::default();
    let scores = scorer
        .score(&net, "preserve", "pepper", &instruments)
        .expect("all query tokens are in the network");

    let mut ranked: Vec<(&str, f64)> = instruments.iter().copied().zip(scores).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    for (instrument, score) in ranked {
        println!("  {:>10} : {:.4}", instrument, score);
    }
}
