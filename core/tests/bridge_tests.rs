use rand::rngs::StdRng;
use rand::SeedableRng;
use wordgraph_core::tokenizer::tokenize;
use wordgraph_core::{bridge_words, generate_text_with, BridgeOutcome, WordGraph};

fn sample() -> WordGraph {
    let text = "the quick brown fox jumps over the lazy dog. \
        the fox jumps over the dog again. quick brown fox jumps. quick red fox jumps.";
    WordGraph::from_tokens(&tokenize(text))
}

fn found(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[test]
fn unknown_words_are_reported_separately() {
    let g = sample();
    assert_eq!(
        bridge_words(&g, "nope", "quick"),
        BridgeOutcome::UnknownFrom { word: "nope".into() }
    );
    assert_eq!(bridge_words(&g, "quick", "nope"), BridgeOutcome::UnknownTo { word: "nope".into() });
    assert_eq!(bridge_words(&g, "", ""), BridgeOutcome::UnknownFrom { word: "".into() });
    assert_eq!(bridge_words(&g, "nope", "quick").to_string(), "No \"nope\" in the graph!");
}

#[test]
fn multiple_bridges_are_sorted() {
    let g = sample();
    match bridge_words(&g, "QUICK", "Fox") {
        BridgeOutcome::Found { from, to, words } => {
            assert_eq!((from.as_str(), to.as_str()), ("quick", "fox"));
            assert_eq!(words, found(&["brown", "red"]));
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(
        bridge_words(&g, "quick", "fox").to_string(),
        "The bridge words from \"quick\" to \"fox\" are: brown, red"
    );
}

#[test]
fn no_bridge_when_pair_is_not_two_hops_apart() {
    let g = sample();
    let outcome = bridge_words(&g, "the", "fox");
    assert_eq!(outcome, BridgeOutcome::NoBridge { from: "the".into(), to: "fox".into() });
    assert_eq!(outcome.to_string(), "No bridge words from \"the\" to \"fox\"!");
}

#[test]
fn bridge_through_repeated_node() {
    let g = WordGraph::from_tokens(&tokenize("a b c b d"));
    assert_eq!(
        bridge_words(&g, "a", "d"),
        BridgeOutcome::Found { from: "a".into(), to: "d".into(), words: found(&["b"]) }
    );
    // bridges are directional
    assert_eq!(
        bridge_words(&g, "d", "a"),
        BridgeOutcome::NoBridge { from: "d".into(), to: "a".into() }
    );
}

#[test]
fn query_words_never_bridge_themselves() {
    let g = WordGraph::from_tokens(&["a", "a", "b"]);
    assert_eq!(
        bridge_words(&g, "a", "b"),
        BridgeOutcome::NoBridge { from: "a".into(), to: "b".into() }
    );
}

#[test]
fn generate_inserts_only_valid_bridges_and_keeps_input_order() {
    let g = sample();
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..20 {
        let out = generate_text_with(&g, "Quick fox over lazy", &mut rng);
        let words: Vec<&str> = out.split(' ').collect();
        // quick [brown|red] fox [jumps] over [the] lazy
        assert_eq!(words.len(), 7, "{out}");
        assert_eq!(words[0], "quick");
        assert!(words[1] == "brown" || words[1] == "red");
        assert_eq!(&words[2..], &["fox", "jumps", "over", "the", "lazy"]);
    }
}

#[test]
fn generate_leaves_unknown_words_alone() {
    let g = sample();
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(generate_text_with(&g, "hello world", &mut rng), "hello world");
    assert_eq!(generate_text_with(&g, "Quick", &mut rng), "quick");
    assert_eq!(generate_text_with(&g, "fox. jumps", &mut rng), "fox. jumps");
}

#[test]
fn generate_skips_pairs_ending_in_a_sink_word() {
    // z only ends the document, so it has no out-edges and is never bridged into
    let g = WordGraph::from_tokens(&["x", "y", "z"]);
    assert_eq!(generate_text_with(&g, "x z", &mut StdRng::seed_from_u64(9)), "x z");

    let g = WordGraph::from_tokens(&tokenize("a b c"));
    assert_eq!(generate_text_with(&g, "a c", &mut StdRng::seed_from_u64(0)), "a c");
}

#[test]
fn generate_bridges_between_words_with_out_edges() {
    let g = WordGraph::from_tokens(&tokenize("a b c a"));
    assert_eq!(generate_text_with(&g, "a c", &mut StdRng::seed_from_u64(0)), "a b c");
}
