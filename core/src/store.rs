use crate::graph::WordGraph;
use crate::persist::read_document;
use crate::tokenizer::tokenize;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub tokens: usize,
    pub nodes: usize,
    pub edges: usize,
}

/// Owns the graph for the currently loaded document.
///
/// Each load builds a fresh graph and swaps it in whole; queries only ever
/// borrow the graph, so they cannot observe a partial rebuild.
#[derive(Debug, Default)]
pub struct GraphStore {
    graph: WordGraph,
    loaded: bool,
}

impl GraphStore {
    pub fn new() -> Self { Self::default() }

    pub fn graph(&self) -> &WordGraph { &self.graph }

    pub fn is_loaded(&self) -> bool { self.loaded }

    pub fn load_text(&mut self, text: &str) -> LoadSummary {
        let tokens = tokenize(text);
        let graph = WordGraph::from_tokens(&tokens);
        let summary = LoadSummary {
            tokens: graph.num_tokens(),
            nodes: graph.node_universe().len(),
            edges: graph.edge_count(),
        };
        self.graph = graph;
        self.loaded = true;
        tracing::info!(
            tokens = summary.tokens,
            nodes = summary.nodes,
            edges = summary.edges,
            "graph rebuilt"
        );
        summary
    }

    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<LoadSummary> {
        let text = read_document(path)?;
        Ok(self.load_text(&text))
    }
}
