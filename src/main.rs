use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use framealign::{
    graph::explain_intermediate, AlignConfig, AlignmentSession, FrameId, MethodId, NodeSide,
    ParamUpdate, RawDataset,
};

#[derive(Parser, Debug)]
#[command(name = "framealign", about = "Frame alignment graph CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by every subcommand.
#[derive(Args, Debug)]
struct Common {
    /// Path to the dataset document (JSON)
    #[arg(long)]
    dataset: PathBuf,
    /// Alignment method id; defaults to the first method
    #[arg(long)]
    method: Option<String>,
    /// Path to config file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Score threshold
    #[arg(long)]
    threshold: Option<f64>,
    /// Maximum related items / edges per frame
    #[arg(long, allow_negative_numbers = true)]
    top_k: Option<i64>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print frame and method options.
    Options {
        #[command(flatten)]
        common: Common,
    },

    /// Print flow-diagram edges.
    Flow {
        #[command(flatten)]
        common: Common,
        /// Selected frame id (repeatable); defaults to all frames
        #[arg(long = "frame")]
        frames: Vec<String>,
        /// Keep only the top-k edges per source frame
        #[arg(long)]
        limit_edges: bool,
        /// Require both endpoints to be selected
        #[arg(long)]
        intersection: bool,
    },

    /// Print the detail graph of a frame pair and its score.
    Detail {
        #[command(flatten)]
        common: Common,
        /// Frame id of the first inventory
        #[arg(long)]
        source: String,
        /// Frame id of the second inventory
        #[arg(long)]
        target: String,
    },

    /// Explain an intermediate node of a detail graph.
    Explain {
        #[command(flatten)]
        common: Common,
        /// Frame id of the first inventory
        #[arg(long)]
        source: String,
        /// Frame id of the second inventory
        #[arg(long)]
        target: String,
        /// Intermediate node name (synset or neighbour token)
        #[arg(long)]
        node: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Options { common } => {
            let session = open_session(&common, ParamUpdate::default())?;
            print_json(&serde_json::json!({
                "frames": session.frame_options(),
                "methods": session.method_options(),
            }))?;
        }
        Commands::Flow {
            common,
            frames,
            limit_edges,
            intersection,
        } => {
            let mut update = ParamUpdate::default();
            if limit_edges {
                update = update.limit_edges(true);
            }
            if intersection {
                update = update.filter_to_selected_frames(true);
            }
            let mut session = open_session(&common, update)?;
            let selected: Vec<FrameId> = if frames.is_empty() {
                session.frame_options().into_iter().map(|o| o.id).collect()
            } else {
                frames.into_iter().map(FrameId::from).collect()
            };
            session.select_frames(selected);
            print_json(&session.flow_edges())?;
        }
        Commands::Detail {
            common,
            source,
            target,
        } => {
            let session = pair_session(&common, source, target)?;
            print_json(&serde_json::json!({
                "graph": session.detail_graph(),
                "summary": session.detail_summary(),
            }))?;
        }
        Commands::Explain {
            common,
            source,
            target,
            node,
        } => {
            let session = pair_session(&common, source, target)?;
            let graph = session.detail_graph();
            let idx = graph
                .find(&node, NodeSide::Intermediate)
                .with_context(|| format!("no intermediate node {node} in the detail graph"))?;
            let dataset = session.dataset().context("no dataset loaded")?;
            print_json(&explain_intermediate(&graph, idx, dataset.resources()))?;
        }
    }

    Ok(())
}

fn open_session(common: &Common, mut update: ParamUpdate) -> anyhow::Result<AlignmentSession> {
    let config = match &common.config {
        Some(path) => {
            let s = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            AlignConfig::from_json(&s)?
        }
        None => AlignConfig::default(),
    };

    let raw = RawDataset::from_path(&common.dataset)
        .with_context(|| format!("reading dataset {}", common.dataset.display()))?;
    let mut session = AlignmentSession::new(config);
    session.load(&raw)?;

    if let Some(id) = &common.method {
        session.select_method(&MethodId::from(id.as_str()))?;
    }

    update.threshold = common.threshold;
    if let Some(k) = common.top_k {
        update = update.top_k(Some(k));
    }
    if session.active_method().is_some() {
        session.update_params(&update)?;
    }
    Ok(session)
}

fn pair_session(common: &Common, source: String, target: String) -> anyhow::Result<AlignmentSession> {
    let mut session = open_session(common, ParamUpdate::default())?;
    if !session.select_pair(FrameId::from(source), FrameId::from(target)) {
        anyhow::bail!("the selected method has no detail view");
    }
    Ok(session)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
