use crate::graph::WordGraph;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs::{create_dir_all, File};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Read a UTF-8 text document, joining its lines with a single space.
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut content = String::new();
    for line in BufReader::new(f).lines() {
        let line = line.with_context(|| format!("reading {}", path.display()))?;
        content.push_str(&line);
        content.push(' ');
    }
    Ok(content)
}

/// Render the graph as a Graphviz DOT document.
pub fn to_dot(graph: &WordGraph) -> String {
    render_dot(graph, &HashSet::new())
}

/// Render the graph with every edge along `paths` drawn in red.
pub fn to_dot_with_paths(graph: &WordGraph, paths: &[Vec<String>]) -> String {
    let highlighted: HashSet<(&str, &str)> = paths
        .iter()
        .flat_map(|p| p.windows(2))
        .map(|w| (w[0].as_str(), w[1].as_str()))
        .collect();
    render_dot(graph, &highlighted)
}

fn render_dot(graph: &WordGraph, highlighted: &HashSet<(&str, &str)>) -> String {
    let mut out = String::from("digraph G {\n  rankdir=LR;\n  node [shape=circle];\n\n");
    for node in graph.node_universe() {
        out.push_str(&format!("  \"{}\";\n", node));
    }
    out.push('\n');
    for entry in graph.adjacency() {
        for (to, weight) in &entry.edges {
            let style = if highlighted.contains(&(entry.node.as_str(), to.as_str())) {
                ", color=red, penwidth=2"
            } else {
                ""
            };
            out.push_str(&format!(
                "  \"{}\" -> \"{}\" [label=\"{}\"{}];\n",
                entry.node, to, weight, style
            ));
        }
    }
    out.push_str("}\n");
    out
}

pub fn write_dot<P: AsRef<Path>>(graph: &WordGraph, path: P) -> Result<()> {
    write_file(path.as_ref(), to_dot(graph).as_bytes())
}

pub fn write_dot_with_paths<P: AsRef<Path>>(
    graph: &WordGraph,
    paths: &[Vec<String>],
    path: P,
) -> Result<()> {
    write_file(path.as_ref(), to_dot_with_paths(graph, paths).as_bytes())
}

/// Save a random walk as one line of space-separated words.
pub fn save_walk<P: AsRef<Path>>(path: P, nodes: &[String]) -> Result<()> {
    let mut line = nodes.join(" ");
    line.push('\n');
    write_file(path.as_ref(), line.as_bytes())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent)?;
    }
    let mut f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    f.write_all(bytes)?;
    Ok(())
}
