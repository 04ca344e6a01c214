//! `tg prim` and `tg kruskal`: minimum spanning trees.

use std::io::Write;

use clap::Args;
use serde::Serialize;
use taskgraph_core::Edge;
use taskgraph_core::algo::mst::SpanningTree;
use taskgraph_core::config::EngineConfig;

use super::GraphArgs;
use crate::output::{OutputMode, kv, render};

#[derive(Args, Debug)]
pub struct PrimArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Task id the tree grows from.
    #[arg(long, short = 's')]
    pub start: usize,
}

#[derive(Args, Debug)]
pub struct KruskalArgs {
    #[command(flatten)]
    pub graph: GraphArgs,
}

#[derive(Debug, Serialize)]
struct TreeReport {
    algorithm: &'static str,
    total_weight: i64,
    edges: Vec<Edge>,
}

impl TreeReport {
    fn new(algorithm: &'static str, tree: SpanningTree) -> Self {
        Self {
            algorithm,
            total_weight: tree.total_weight(),
            edges: tree.edges,
        }
    }
}

fn print(report: &TreeReport, w: &mut dyn Write) -> std::io::Result<()> {
    kv(w, "algorithm", report.algorithm)?;
    kv(w, "edges", report.edges.len().to_string())?;
    kv(w, "total weight", report.total_weight.to_string())?;
    for edge in &report.edges {
        writeln!(w, "  {} - {} ({})", edge.from, edge.to, edge.weight)?;
    }
    Ok(())
}

pub fn run_prim(args: &PrimArgs, config: &EngineConfig, output: OutputMode) -> anyhow::Result<()> {
    let session = args.graph.session(config)?;
    let tree = session.prim(args.start)?;
    render(output, &TreeReport::new("prim", tree), print)
}

pub fn run_kruskal(
    args: &KruskalArgs,
    config: &EngineConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let session = args.graph.session(config)?;
    render(output, &TreeReport::new("kruskal", session.kruskal()), print)
}
