use rand::rngs::StdRng;
use rand::SeedableRng;
use wordgraph_core::tokenizer::tokenize;
use wordgraph_core::{
    page_rank, page_rank_scores, page_rank_with, top_ranked, PageRankConfig, RankReport, WordGraph,
};

fn graph(text: &str) -> WordGraph {
    WordGraph::from_tokens(&tokenize(text))
}

#[test]
fn vector_is_normalized_over_full_universe() {
    let g = graph("the cat sat on the mat and the dog sat on the cat");
    let scores = page_rank_scores(&g, &PageRankConfig::default(), &mut StdRng::seed_from_u64(11));
    assert_eq!(scores.len(), g.node_universe().len());
    let total: f64 = scores.values().sum();
    assert!((total - 1.0).abs() < 1e-9, "sum = {total}");
    assert!(scores.values().all(|&s| s >= 0.0));
}

#[test]
fn converged_scores_do_not_depend_on_seed() {
    let g = graph("a b c a b d b c a");
    let config = PageRankConfig::default();
    let first = page_rank_scores(&g, &config, &mut StdRng::seed_from_u64(1));
    let second = page_rank_scores(&g, &config, &mut StdRng::seed_from_u64(99));
    for (word, score) in &first {
        assert!((score - second[word]).abs() < 1e-4, "{word}: {score} vs {}", second[word]);
    }
}

#[test]
fn hub_outranks_leaf() {
    let g = graph("a hub b hub c hub d hub");
    let scores = page_rank_scores(&g, &PageRankConfig::default(), &mut StdRng::seed_from_u64(5));
    assert!(scores["hub"] > scores["a"]);
    assert_eq!(top_ranked(&scores, 1)[0].0, "hub");
}

#[test]
fn dangling_node_still_receives_mass() {
    // "end" has no out-edges and only one in-edge
    let g = graph("a b a b end");
    let scores = page_rank_scores(&g, &PageRankConfig::default(), &mut StdRng::seed_from_u64(2));
    assert!(scores["end"] > 0.0);
}

#[test]
fn without_seed_walk_steps_iteration_still_converges() {
    let g = graph("x y z x");
    let config = PageRankConfig { seed_steps: 0, ..PageRankConfig::default() };
    let scores = page_rank_scores(&g, &config, &mut StdRng::seed_from_u64(0));
    let total: f64 = scores.values().sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[test]
fn empty_document_scores_zero() {
    let g = graph("");
    assert_eq!(page_rank(&g, "anything"), 0.0);
    let mut rng = StdRng::seed_from_u64(0);
    assert!(page_rank_scores(&g, &PageRankConfig::default(), &mut rng).is_empty());
}

#[test]
fn lookup_is_case_insensitive() {
    let g = graph("one two three one");
    let mut rng = StdRng::seed_from_u64(3);
    let score = page_rank_with(&g, "TWO", &PageRankConfig::default(), &mut rng);
    assert!(score > 0.0);
}

#[test]
fn report_prints_six_decimals() {
    let report = RankReport { word: "cat".into(), score: 0.125 };
    assert_eq!(report.to_string(), "PageRank of \"cat\": 0.125000");
}
