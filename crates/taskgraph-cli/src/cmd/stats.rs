//! `tg stats`: summary of the built graph.

use std::io::Write;

use clap::Args;
use taskgraph_core::config::EngineConfig;
use taskgraph_core::graph::GraphStats;

use super::GraphArgs;
use crate::output::{OutputMode, kv, render};

#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub graph: GraphArgs,
}

fn print(stats: &GraphStats, w: &mut dyn Write) -> std::io::Result<()> {
    kv(w, "vertices", stats.capacity.to_string())?;
    kv(w, "edges", stats.edge_count.to_string())?;
    kv(w, "arcs", stats.arc_count.to_string())?;
    kv(w, "components", stats.component_count.to_string())?;
    kv(w, "isolated", stats.isolated_vertex_count.to_string())?;
    kv(w, "self loops", stats.self_loop_count.to_string())?;
    kv(w, "parallel", stats.parallel_edge_count.to_string())?;
    kv(w, "dangling", stats.dangling_count.to_string())?;
    kv(w, "max degree", stats.max_degree.to_string())?;
    kv(w, "hash", &stats.content_hash)
}

pub fn run_stats(args: &StatsArgs, config: &EngineConfig, output: OutputMode) -> anyhow::Result<()> {
    let session = args.graph.session(config)?;
    render(output, &session.stats(), print)
}
