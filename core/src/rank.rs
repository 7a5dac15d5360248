//! PageRank over the word graph.
//!
//! Scores are seeded from the visit frequencies of a long random walk, then
//! refined by power iteration with teleportation. The seeding walk picks
//! neighbors uniformly while the iteration weights edges by count; the two
//! phases intentionally differ.

use crate::graph::WordGraph;
use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRankConfig {
    pub damping: f64,
    pub max_iterations: usize,
    /// Stop once the summed absolute change of one iteration drops below this.
    pub tolerance: f64,
    /// Length of the seeding walk.
    pub seed_steps: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self { damping: 0.85, max_iterations: 100, tolerance: 1e-6, seed_steps: 10_000 }
    }
}

/// Normalized score of every node in the universe. Empty for an edgeless graph.
pub fn page_rank_scores<R: Rng>(
    graph: &WordGraph,
    config: &PageRankConfig,
    rng: &mut R,
) -> BTreeMap<String, f64> {
    let nodes: Vec<&str> = graph.node_universe().into_iter().collect();
    if nodes.is_empty() {
        return BTreeMap::new();
    }

    let mut ranks = seed_from_walk(graph, &nodes, config.seed_steps, rng);
    for iteration in 0..config.max_iterations {
        let next = iterate_once(graph, &nodes, &ranks, config.damping);
        let delta: f64 = nodes.iter().map(|n| (next[n] - ranks[n]).abs()).sum();
        ranks = next;
        if delta < config.tolerance {
            tracing::debug!(iteration, delta, "pagerank converged");
            break;
        }
    }

    normalize(&mut ranks);
    ranks.into_iter().map(|(n, r)| (n.to_string(), r)).collect()
}

/// Score of a single word; 0 when the word is not a node.
pub fn page_rank_with<R: Rng>(
    graph: &WordGraph,
    word: &str,
    config: &PageRankConfig,
    rng: &mut R,
) -> f64 {
    let word = word.to_lowercase();
    if !graph.contains_node(&word) {
        return 0.0;
    }
    page_rank_scores(graph, config, rng).get(&word).copied().unwrap_or(0.0)
}

/// [`page_rank_with`] using the default configuration and the OS CSPRNG.
pub fn page_rank(graph: &WordGraph, word: &str) -> f64 {
    page_rank_with(graph, word, &PageRankConfig::default(), &mut OsRng)
}

/// Highest-scoring words first; ties broken by label.
pub fn top_ranked(scores: &BTreeMap<String, f64>, k: usize) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = scores.iter().map(|(n, &s)| (n.clone(), s)).collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    ranked.truncate(k);
    ranked
}

#[allow(clippy::cast_precision_loss)]
fn seed_from_walk<'g, R: Rng>(
    graph: &'g WordGraph,
    nodes: &[&'g str],
    steps: usize,
    rng: &mut R,
) -> HashMap<&'g str, f64> {
    let sources = graph.sources();
    let mut visits: HashMap<&str, usize> = HashMap::new();
    let mut current = sources.choose(rng).copied();

    for _ in 0..steps {
        let Some(node) = current else { break };
        *visits.entry(node).or_insert(0) += 1;
        current = match graph.neighbors(node) {
            Some(neighbors) => {
                let idx = rng.gen_range(0..neighbors.len());
                neighbors.keys().nth(idx).map(String::as_str)
            }
            None => sources.choose(rng).copied(),
        };
    }

    let total = visits.values().sum::<usize>().max(1) as f64;
    nodes
        .iter()
        .map(|&n| (n, visits.get(n).copied().unwrap_or(0) as f64 / total))
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn iterate_once<'g>(
    graph: &'g WordGraph,
    nodes: &[&'g str],
    ranks: &HashMap<&'g str, f64>,
    damping: f64,
) -> HashMap<&'g str, f64> {
    let n = nodes.len() as f64;
    let mut next: HashMap<&str, f64> =
        nodes.iter().map(|&node| (node, (1.0 - damping) / n)).collect();

    for &node in nodes {
        let rank = ranks[node];
        match graph.neighbors(node) {
            Some(neighbors) => {
                let total = graph.out_weight(node) as f64;
                for (to, &weight) in neighbors {
                    if let Some(slot) = next.get_mut(to.as_str()) {
                        *slot += damping * rank * f64::from(weight) / total;
                    }
                }
            }
            // Dangling: spread evenly over every node.
            None => {
                let share = damping * rank / n;
                for slot in next.values_mut() {
                    *slot += share;
                }
            }
        }
    }
    next
}

fn normalize(ranks: &mut HashMap<&str, f64>) {
    let total: f64 = ranks.values().sum();
    if total > 0.0 {
        for rank in ranks.values_mut() {
            *rank /= total;
        }
    }
}

/// A single PageRank lookup, for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankReport {
    pub word: String,
    pub score: f64,
}

impl fmt::Display for RankReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PageRank of \"{}\": {:.6}", self.word, self.score)
    }
}
