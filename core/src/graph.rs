use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

pub type Weight = u32;

/// Out-edges of one node: neighbor label -> number of times the pair occurred.
pub type Neighbors = BTreeMap<String, Weight>;

/// Directed word-adjacency graph built from a token sequence.
///
/// `edges[u][v]` is the number of times `u` is immediately followed by `v`.
/// Only nodes with at least one out-edge appear as keys; a word that only
/// ever ends the document is reachable as a neighbor but has no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordGraph {
    edges: BTreeMap<String, Neighbors>,
    /// Every distinct token seen, including those with no edges at all.
    vocabulary: BTreeSet<String>,
    num_tokens: usize,
}

impl WordGraph {
    pub fn new() -> Self { Self::default() }

    /// Fold a token sequence into a graph in one pass.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut graph = Self::new();
        graph.num_tokens = tokens.len();
        for t in tokens {
            graph.vocabulary.insert(t.as_ref().to_string());
        }
        for pair in tokens.windows(2) {
            let (from, to) = (pair[0].as_ref(), pair[1].as_ref());
            *graph
                .edges
                .entry(from.to_string())
                .or_default()
                .entry(to.to_string())
                .or_insert(0) += 1;
        }
        tracing::debug!(
            tokens = graph.num_tokens,
            sources = graph.edges.len(),
            edges = graph.edge_count(),
            "built word graph"
        );
        graph
    }

    /// True when there are no edges. A one-word document yields an empty graph.
    pub fn is_empty(&self) -> bool { self.edges.values().all(|n| n.is_empty()) }

    pub fn num_tokens(&self) -> usize { self.num_tokens }

    pub fn edge_count(&self) -> usize { self.edges.values().map(|n| n.len()).sum() }

    pub fn vocabulary(&self) -> &BTreeSet<String> { &self.vocabulary }

    pub fn knows_word(&self, word: &str) -> bool { self.vocabulary.contains(word) }

    /// Out-edges of `node`, or `None` when it has none.
    pub fn neighbors(&self, node: &str) -> Option<&Neighbors> {
        self.edges.get(node).filter(|n| !n.is_empty())
    }

    pub fn has_out_edges(&self, node: &str) -> bool { self.neighbors(node).is_some() }

    pub fn edge_weight(&self, from: &str, to: &str) -> Option<Weight> {
        self.edges.get(from).and_then(|n| n.get(to)).copied()
    }

    /// Sum of all out-edge weights of `node`.
    pub fn out_weight(&self, node: &str) -> u64 {
        self.neighbors(node)
            .map(|n| n.values().map(|&w| u64::from(w)).sum())
            .unwrap_or(0)
    }

    /// Nodes with at least one out-edge, in lexicographic order.
    pub fn sources(&self) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|(_, n)| !n.is_empty())
            .map(|(k, _)| k.as_str())
            .collect()
    }

    /// All labels appearing as a source or a destination.
    pub fn node_universe(&self) -> BTreeSet<&str> {
        let mut nodes = BTreeSet::new();
        for (from, neighbors) in &self.edges {
            if neighbors.is_empty() {
                continue;
            }
            nodes.insert(from.as_str());
            nodes.extend(neighbors.keys().map(String::as_str));
        }
        nodes
    }

    pub fn contains_node(&self, word: &str) -> bool {
        self.has_out_edges(word) || self.edges.values().any(|n| n.contains_key(word))
    }

    /// Sources and their sorted out-edges, for display.
    pub fn adjacency(&self) -> Vec<AdjacencyEntry> {
        self.edges
            .iter()
            .filter(|(_, n)| !n.is_empty())
            .map(|(node, neighbors)| AdjacencyEntry {
                node: node.clone(),
                edges: neighbors.iter().map(|(to, &w)| (to.clone(), w)).collect(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdjacencyEntry {
    pub node: String,
    pub edges: Vec<(String, Weight)>,
}

impl fmt::Display for WordGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "Graph is empty!");
        }
        writeln!(f, "Directed Weighted Graph Structure:")?;
        writeln!(f)?;
        for entry in self.adjacency() {
            let edges: Vec<String> = entry
                .edges
                .iter()
                .map(|(to, w)| format!("{to}({w})"))
                .collect();
            writeln!(f, "{} -> {}", entry.node, edges.join(", "))?;
        }
        Ok(())
    }
}
