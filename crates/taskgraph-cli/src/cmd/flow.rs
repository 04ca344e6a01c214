//! `tg flow`: maximum flow over a capacity matrix.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use taskgraph_core::algo::flow::max_flow;
use taskgraph_core::config::{EngineConfig, FlowMethod};
use taskgraph_core::graph::CapacityMatrix;
use taskgraph_core::{Vertex, Weight};

use super::FlowArg;
use crate::output::{OutputMode, kv, render};

#[derive(Args, Debug)]
pub struct FlowArgs {
    /// JSON file holding a square array of capacity rows.
    #[arg(long, short = 'c', value_name = "FILE")]
    pub capacity: PathBuf,

    #[arg(long)]
    pub source: usize,

    #[arg(long)]
    pub sink: usize,

    /// Augmenting-path search; defaults to the configured method.
    #[arg(long, value_enum)]
    pub method: Option<FlowArg>,
}

#[derive(Debug, Serialize)]
struct FlowReport {
    method: FlowMethod,
    source: Vertex,
    sink: Vertex,
    value: Weight,
    augmentations: usize,
    min_cut_source_side: Vec<Vertex>,
}

fn load_capacity(path: &Path) -> anyhow::Result<CapacityMatrix> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse capacity matrix {}", path.display()))
}

pub fn run_flow(args: &FlowArgs, config: &EngineConfig, output: OutputMode) -> anyhow::Result<()> {
    let capacity = load_capacity(&args.capacity)?;
    let method = args.method.map_or(config.flow, FlowMethod::from);
    let result = max_flow(&capacity, args.source, args.sink, method)?;

    let report = FlowReport {
        method,
        source: result.source(),
        sink: result.sink(),
        value: result.value(),
        augmentations: result.augmentations(),
        min_cut_source_side: result.min_cut_source_side(),
    };
    render(output, &report, |r, w: &mut dyn Write| {
        kv(w, "method", r.method.to_string())?;
        kv(w, "max flow", r.value.to_string())?;
        kv(w, "augmentations", r.augmentations.to_string())?;
        let side: Vec<String> = r.min_cut_source_side.iter().map(ToString::to_string).collect();
        kv(w, "min cut", format!("{{{}}}", side.join(", ")))
    })
}
