use crate::graph::{Neighbors, WordGraph};
use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WalkOutcome {
    EmptyGraph,
    Walk { nodes: Vec<String> },
}

/// Walk from a random node, choosing each step in proportion to edge weight.
///
/// Stops at a node without out-edges, or right after an edge is traversed for
/// the second time (its destination is included once more).
pub fn random_walk_with<R: Rng>(graph: &WordGraph, rng: &mut R) -> WalkOutcome {
    let sources = graph.sources();
    let Some(&start) = sources.choose(rng) else {
        return WalkOutcome::EmptyGraph;
    };

    let mut path = vec![start.to_string()];
    let mut traversed: HashSet<(&str, &str)> = HashSet::new();
    let mut current = start;
    while let Some(neighbors) = graph.neighbors(current) {
        let Some(next) = weighted_choice(neighbors, rng) else { break };
        path.push(next.to_string());
        let repeated = !traversed.insert((current, next));
        current = next;
        if repeated {
            break;
        }
    }
    tracing::debug!(start, steps = path.len() - 1, "random walk finished");
    WalkOutcome::Walk { nodes: path }
}

/// [`random_walk_with`] drawing from the operating system CSPRNG.
pub fn random_walk(graph: &WordGraph) -> WalkOutcome {
    random_walk_with(graph, &mut OsRng)
}

/// Cumulative-weight sampling over a uniform draw in `[0, total)`.
fn weighted_choice<'g, R: Rng>(neighbors: &'g Neighbors, rng: &mut R) -> Option<&'g str> {
    let total: u64 = neighbors.values().map(|&w| u64::from(w)).sum();
    if total == 0 {
        return None;
    }
    let draw = rng.gen_range(0..total);
    let mut cumulative = 0u64;
    for (node, &weight) in neighbors {
        cumulative += u64::from(weight);
        if draw < cumulative {
            return Some(node.as_str());
        }
    }
    None
}

impl fmt::Display for WalkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGraph => write!(f, "Graph is empty!"),
            Self::Walk { nodes } => write!(f, "Random walk: {}", nodes.join(" -> ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn chain_ends_at_sink() {
        let g = WordGraph::from_tokens(&["a", "b", "c"]);
        let mut rng = StdRng::seed_from_u64(3);
        match random_walk_with(&g, &mut rng) {
            WalkOutcome::Walk { nodes } => assert_eq!(nodes.last().map(String::as_str), Some("c")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn self_loop_stops_on_second_traversal() {
        let g = WordGraph::from_tokens(&["x", "x"]);
        let outcome = random_walk_with(&g, &mut StdRng::seed_from_u64(0));
        assert_eq!(outcome, WalkOutcome::Walk { nodes: vec!["x".into(), "x".into(), "x".into()] });
        assert_eq!(outcome.to_string(), "Random walk: x -> x -> x");
    }
}
