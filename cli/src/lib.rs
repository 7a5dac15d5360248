use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use rand::rngs::OsRng;
use serde::Serialize;
use std::path::PathBuf;
use wordgraph_core::persist::{save_walk, write_dot, write_dot_with_paths};
use wordgraph_core::{
    bridge_words, generate_text, page_rank_scores, page_rank_with, random_walk, shortest_path,
    top_ranked, GraphStore, PageRankConfig, PathOutcome, RankReport, WalkOutcome,
};

#[derive(Parser)]
#[command(name = "wordgraph")]
#[command(about = "Query the word-adjacency graph of a text document", long_about = None)]
pub struct Cli {
    /// Text document to load
    #[arg(long, short)]
    pub input: PathBuf,
    /// Print results as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print every node with its sorted out-edges and weights
    Show,
    /// Find the words bridging FROM to TO
    Bridge { from: String, to: String },
    /// Insert random bridge words into the given text
    Generate {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Shortest paths from SOURCE to TARGET, or to every reachable word
    Path {
        source: String,
        target: Option<String>,
        /// Write the graph as DOT with the shortest paths drawn in red
        #[arg(long, requires = "target")]
        dot: Option<PathBuf>,
    },
    /// PageRank of WORD, or the top-k words
    Rank {
        word: Option<String>,
        /// Show the k highest-ranked words instead of a single lookup
        #[arg(long, conflicts_with = "word")]
        top: Option<usize>,
        #[arg(long, default_value_t = 0.85)]
        damping: f64,
        #[arg(long, default_value_t = 100)]
        max_iterations: usize,
        #[arg(long, default_value_t = 1e-6)]
        tolerance: f64,
        #[arg(long, default_value_t = 10_000)]
        seed_steps: usize,
    },
    /// Weighted random walk until a dead end or a repeated edge
    Walk {
        /// Also write the walk to this file
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Write the graph as a Graphviz DOT file
    Dot {
        #[arg(long)]
        output: PathBuf,
    },
}

#[derive(Serialize)]
struct RankList {
    top: Vec<RankReport>,
}

/// Load the input document and run one command, returning the text to print.
pub fn run(cli: &Cli) -> Result<String> {
    let mut store = GraphStore::new();
    let summary = store.load_file(&cli.input)?;
    tracing::info!(
        input = %cli.input.display(),
        tokens = summary.tokens,
        nodes = summary.nodes,
        "document loaded"
    );
    let graph = store.graph();

    match &cli.command {
        Commands::Show => {
            if cli.json {
                render(true, &graph.adjacency(), "")
            } else {
                Ok(graph.to_string())
            }
        }
        Commands::Bridge { from, to } => {
            require_word(from)?;
            require_word(to)?;
            let outcome = bridge_words(graph, from, to);
            render(cli.json, &outcome, &outcome.to_string())
        }
        Commands::Generate { text } => {
            let text = text.join(" ");
            require_word(&text)?;
            let generated = generate_text(graph, &text);
            let value = serde_json::json!({ "input": text, "generated": generated });
            render(cli.json, &value, &generated)
        }
        Commands::Path { source, target, dot } => {
            require_word(source)?;
            let source = source.to_lowercase();
            let target = target.as_deref().map(str::to_lowercase).filter(|t| !t.trim().is_empty());
            let outcome = shortest_path(graph, &source, target.as_deref());
            if let Some(output) = dot {
                let paths: &[Vec<String>] = match &outcome {
                    PathOutcome::Found { route, .. } => route.paths.as_slice(),
                    _ => &[],
                };
                write_dot_with_paths(graph, paths, output)?;
                tracing::info!(path = %output.display(), paths = paths.len(), "path graph written");
            }
            render(cli.json, &outcome, &outcome.to_string())
        }
        Commands::Rank { word, top, damping, max_iterations, tolerance, seed_steps } => {
            let config = PageRankConfig {
                damping: *damping,
                max_iterations: *max_iterations,
                tolerance: *tolerance,
                seed_steps: *seed_steps,
            };
            match (word, top) {
                (Some(word), _) => {
                    require_word(word)?;
                    let score = page_rank_with(graph, word, &config, &mut OsRng);
                    let report = RankReport { word: word.to_lowercase(), score };
                    render(cli.json, &report, &report.to_string())
                }
                (None, Some(k)) => {
                    let scores = page_rank_scores(graph, &config, &mut OsRng);
                    let top: Vec<RankReport> = top_ranked(&scores, *k)
                        .into_iter()
                        .map(|(word, score)| RankReport { word, score })
                        .collect();
                    let text: Vec<String> = top.iter().map(ToString::to_string).collect();
                    render(cli.json, &RankList { top }, &text.join("\n"))
                }
                (None, None) => bail!("pass a word or --top <k>"),
            }
        }
        Commands::Walk { save } => {
            let outcome = random_walk(graph);
            if let (Some(path), WalkOutcome::Walk { nodes }) = (save, &outcome) {
                save_walk(path, nodes)?;
                tracing::info!(path = %path.display(), steps = nodes.len(), "walk saved");
            }
            render(cli.json, &outcome, &outcome.to_string())
        }
        Commands::Dot { output } => {
            write_dot(graph, output)?;
            let message = format!("Graph written to {}", output.display());
            render(cli.json, &serde_json::json!({ "output": output }), &message)
        }
    }
}

// Empty words are rejected here; the core would only report them as unknown.
fn require_word(word: &str) -> Result<()> {
    if word.trim().is_empty() {
        bail!("word must not be empty");
    }
    Ok(())
}

fn render<T: Serialize>(json: bool, value: &T, text: &str) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(text.to_string())
    }
}
