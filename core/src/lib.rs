//! Word-adjacency graphs built from plain text, with bridge-word, shortest
//! path, PageRank and random-walk queries.

pub mod bridge;
pub mod graph;
pub mod paths;
pub mod persist;
pub mod rank;
pub mod store;
pub mod tokenizer;
pub mod walk;

pub use bridge::{bridge_words, generate_text, generate_text_with, BridgeOutcome};
pub use graph::{AdjacencyEntry, Neighbors, Weight, WordGraph};
pub use paths::{shortest_path, PathOutcome, Route, ShortestPaths};
pub use rank::{page_rank, page_rank_scores, page_rank_with, top_ranked, PageRankConfig, RankReport};
pub use store::{GraphStore, LoadSummary};
pub use walk::{random_walk, random_walk_with, WalkOutcome};
