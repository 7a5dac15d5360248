use crate::graph::WordGraph;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap, HashMap, HashSet};
use std::fmt;

/// Distance held by nodes the search has not reached.
pub const UNREACHABLE: u64 = u64::MAX;

/// Result of a single-source Dijkstra run that keeps every tied predecessor.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    source: String,
    distances: HashMap<String, u64>,
    predecessors: HashMap<String, Vec<String>>,
}

impl ShortestPaths {
    /// Run Dijkstra from `source` over `nodes`, stopping early once `target` is settled.
    ///
    /// Neighbors outside `nodes` are ignored.
    pub fn compute(
        graph: &WordGraph,
        nodes: &BTreeSet<String>,
        source: &str,
        target: Option<&str>,
    ) -> Self {
        let mut distances: HashMap<String, u64> =
            nodes.iter().map(|n| (n.clone(), UNREACHABLE)).collect();
        let mut predecessors: HashMap<String, Vec<String>> = HashMap::new();
        let mut settled: HashSet<String> = HashSet::new();
        let mut frontier = BinaryHeap::new();

        distances.insert(source.to_string(), 0);
        frontier.push(Reverse((0u64, source.to_string())));

        while let Some(Reverse((dist, current))) = frontier.pop() {
            if !settled.insert(current.clone()) {
                continue;
            }
            if target == Some(current.as_str()) {
                break;
            }
            let Some(neighbors) = graph.neighbors(&current) else {
                continue;
            };
            for (next, &weight) in neighbors {
                let Some(known) = distances.get_mut(next) else {
                    continue;
                };
                let candidate = dist + u64::from(weight);
                if candidate < *known {
                    *known = candidate;
                    predecessors.insert(next.clone(), vec![current.clone()]);
                    frontier.push(Reverse((candidate, next.clone())));
                } else if candidate == *known && *known != UNREACHABLE {
                    predecessors.entry(next.clone()).or_default().push(current.clone());
                }
            }
        }

        tracing::debug!(source, settled = settled.len(), nodes = nodes.len(), "dijkstra finished");
        Self { source: source.to_string(), distances, predecessors }
    }

    pub fn source(&self) -> &str { &self.source }

    pub fn distance(&self, node: &str) -> Option<u64> {
        self.distances.get(node).copied().filter(|&d| d != UNREACHABLE)
    }

    pub fn predecessors(&self, node: &str) -> &[String] {
        self.predecessors.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every minimal-weight path from the source to `target`.
    ///
    /// Walks the predecessor sets backwards with an explicit stack; each path
    /// is reversed into source-to-target order before it is reported.
    pub fn paths_to(&self, target: &str) -> Vec<Vec<String>> {
        if self.distance(target).is_none() {
            return Vec::new();
        }
        let mut paths = Vec::new();
        // (node, index of the next predecessor to try)
        let mut stack: Vec<(&str, usize)> = vec![(target, 0)];
        while let Some(top) = stack.last_mut() {
            let (node, next) = *top;
            if node == self.source {
                let mut path: Vec<String> = stack.iter().map(|(n, _)| n.to_string()).collect();
                path.reverse();
                paths.push(path);
                stack.pop();
                continue;
            }
            top.1 += 1;
            match self.predecessors(node).get(next) {
                Some(pred) => stack.push((pred.as_str(), 0)),
                None => {
                    stack.pop();
                }
            }
        }
        paths
    }

    /// Reachable nodes other than the source, by distance then label.
    pub fn reachable(&self) -> Vec<(&str, u64)> {
        let mut out: Vec<(&str, u64)> = self
            .distances
            .iter()
            .filter(|&(node, &d)| d != UNREACHABLE && node.as_str() != self.source)
            .map(|(node, &d)| (node.as_str(), d))
            .collect();
        out.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub target: String,
    pub distance: u64,
    pub paths: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PathOutcome {
    EmptyGraph,
    UnknownSource { word: String },
    UnknownTarget { word: String },
    NoPath { source: String, target: String },
    /// Source and target were the same word.
    ToItself { source: String },
    Found { source: String, route: Route },
    /// No target requested; `routes` is empty when nothing is reachable.
    AllTargets { source: String, routes: Vec<Route> },
}

/// Nodes eligible for path queries.
///
/// Falls back to the bare vocabulary when the document produced no edges.
pub fn path_universe(graph: &WordGraph) -> BTreeSet<String> {
    let nodes: BTreeSet<String> = graph.node_universe().into_iter().map(str::to_string).collect();
    if nodes.is_empty() {
        graph.vocabulary().clone()
    } else {
        nodes
    }
}

/// Shortest paths from `source` to `target`, or to every reachable node when
/// `target` is `None`.
pub fn shortest_path(graph: &WordGraph, source: &str, target: Option<&str>) -> PathOutcome {
    let nodes = path_universe(graph);
    if nodes.is_empty() {
        return PathOutcome::EmptyGraph;
    }
    if !nodes.contains(source) {
        return PathOutcome::UnknownSource { word: source.to_string() };
    }
    if let Some(t) = target {
        if !nodes.contains(t) {
            return PathOutcome::UnknownTarget { word: t.to_string() };
        }
    }

    let sp = ShortestPaths::compute(graph, &nodes, source, target);
    let source = sp.source().to_string();
    match target {
        Some(t) if t == source => PathOutcome::ToItself { source },
        Some(t) => match sp.distance(t) {
            None => PathOutcome::NoPath { source, target: t.to_string() },
            Some(distance) => PathOutcome::Found {
                source,
                route: Route { target: t.to_string(), distance, paths: sp.paths_to(t) },
            },
        },
        None => {
            let routes = sp
                .reachable()
                .into_iter()
                .map(|(node, distance)| Route {
                    target: node.to_string(),
                    distance,
                    paths: sp.paths_to(node),
                })
                .collect();
            PathOutcome::AllTargets { source, routes }
        }
    }
}

impl fmt::Display for PathOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGraph => {
                write!(f, "The graph is effectively empty. No words to calculate paths for.")
            }
            Self::UnknownSource { word } | Self::UnknownTarget { word } => {
                write!(f, "Word \"{word}\" not in the graph!")
            }
            Self::NoPath { source, target } => {
                write!(f, "No path from \"{source}\" to \"{target}\"!")
            }
            Self::ToItself { source } => {
                writeln!(f, "Shortest path from \"{source}\" to itself:")?;
                write!(f, "Distance: 0\n\nPath 1: {source}\n")
            }
            Self::Found { source, route } => {
                writeln!(f, "Shortest path from \"{source}\" to \"{}\":", route.target)?;
                write!(f, "Distance: {}\n\n", route.distance)?;
                for (i, path) in route.paths.iter().enumerate() {
                    writeln!(f, "Path {}: {}", i + 1, path.join(" -> "))?;
                }
                Ok(())
            }
            Self::AllTargets { source, routes } => {
                write!(f, "Shortest paths from \"{source}\" to all other reachable words:\n\n")?;
                if routes.is_empty() {
                    return writeln!(f, "No other words are reachable from \"{source}\".");
                }
                for route in routes {
                    writeln!(f, "To \"{}\" (distance: {}):", route.target, route.distance)?;
                    for (i, path) in route.paths.iter().enumerate() {
                        writeln!(f, "  Path {}: {}", i + 1, path.join(" -> "))?;
                    }
                    writeln!(f)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diamond_has_two_tied_paths() {
        let g = WordGraph::from_tokens(&["s", "a", "t", "s", "b", "t"]);
        let nodes = path_universe(&g);
        let sp = ShortestPaths::compute(&g, &nodes, "s", None);
        assert_eq!(sp.distance("t"), Some(2));
        let mut paths = sp.paths_to("t");
        paths.sort();
        assert_eq!(paths, vec![vec!["s", "a", "t"], vec!["s", "b", "t"]]);
    }

    #[test]
    fn isolated_vocabulary_when_no_edges() {
        let g = WordGraph::from_tokens(&["lonely"]);
        assert_eq!(
            shortest_path(&g, "lonely", Some("lonely")),
            PathOutcome::ToItself { source: "lonely".into() }
        );
        assert_eq!(
            shortest_path(&g, "lonely", None),
            PathOutcome::AllTargets { source: "lonely".into(), routes: vec![] }
        );
    }
}
