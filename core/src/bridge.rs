use crate::graph::WordGraph;
use crate::tokenizer::split_words;
use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BridgeOutcome {
    UnknownFrom { word: String },
    UnknownTo { word: String },
    /// Covers both "`from` has no out-edges" and "no neighbor leads to `to`".
    NoBridge { from: String, to: String },
    /// Sorted lexicographically.
    Found { from: String, to: String, words: Vec<String> },
}

/// Words `x` with edges `from -> x` and `x -> to`, excluding the query words.
///
/// Both words are lowercased; membership is checked against every token seen,
/// not just nodes with edges.
pub fn bridge_words(graph: &WordGraph, from: &str, to: &str) -> BridgeOutcome {
    let from = from.to_lowercase();
    let to = to.to_lowercase();
    if !graph.knows_word(&from) {
        return BridgeOutcome::UnknownFrom { word: from };
    }
    if !graph.knows_word(&to) {
        return BridgeOutcome::UnknownTo { word: to };
    }
    let words = collect_bridges(graph, &from, &to);
    if words.is_empty() {
        BridgeOutcome::NoBridge { from, to }
    } else {
        BridgeOutcome::Found { from, to, words }
    }
}

fn collect_bridges(graph: &WordGraph, from: &str, to: &str) -> Vec<String> {
    let Some(neighbors) = graph.neighbors(from) else {
        return Vec::new();
    };
    neighbors
        .keys()
        .filter(|x| x.as_str() != from && x.as_str() != to)
        .filter(|x| graph.edge_weight(x, to).is_some())
        .cloned()
        .collect()
}

/// Insert one random bridge word between every adjacent pair that has any.
///
/// Input words are never dropped or reordered. `text` must contain at least
/// one word; an empty input yields an empty string.
pub fn generate_text_with<R: Rng>(graph: &WordGraph, text: &str, rng: &mut R) -> String {
    let words = split_words(text);
    let Some(last) = words.last() else {
        return String::new();
    };
    let mut out: Vec<String> = Vec::with_capacity(words.len() * 2);
    for pair in words.windows(2) {
        let (a, b) = (pair[0].as_str(), pair[1].as_str());
        out.push(a.to_string());
        // Only words with out-edges take part, matching graph keys.
        if !graph.has_out_edges(a) || !graph.has_out_edges(b) {
            continue;
        }
        let bridges = collect_bridges(graph, a, b);
        if let Some(choice) = bridges.choose(rng) {
            tracing::debug!(
                from = a,
                to = b,
                candidates = bridges.len(),
                bridge = %choice,
                "inserted bridge word"
            );
            out.push(choice.clone());
        }
    }
    out.push(last.clone());
    out.join(" ")
}

/// [`generate_text_with`] drawing from the operating system CSPRNG.
pub fn generate_text(graph: &WordGraph, text: &str) -> String {
    generate_text_with(graph, text, &mut OsRng)
}

impl fmt::Display for BridgeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFrom { word } | Self::UnknownTo { word } => {
                write!(f, "No \"{word}\" in the graph!")
            }
            Self::NoBridge { from, to } => {
                write!(f, "No bridge words from \"{from}\" to \"{to}\"!")
            }
            Self::Found { from, to, words } => write!(
                f,
                "The bridge words from \"{from}\" to \"{to}\" are: {}",
                words.join(", ")
            ),
        }
    }
}
