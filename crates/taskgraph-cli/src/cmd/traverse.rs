//! `tg bfs` and `tg dfs`: reachability from one task.

use std::io::Write;

use clap::Args;
use serde::Serialize;
use taskgraph_core::config::EngineConfig;

use super::GraphArgs;
use crate::output::{OutputMode, arrow_path, kv, render};

#[derive(Args, Debug)]
pub struct BfsArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Task id to start from.
    #[arg(long, short = 's')]
    pub start: usize,

    /// Also list the visit order.
    #[arg(long)]
    pub order: bool,
}

#[derive(Args, Debug)]
pub struct DfsArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Task id to start from.
    #[arg(long, short = 's')]
    pub start: usize,
}

#[derive(Debug, Serialize)]
struct Reachability {
    search: &'static str,
    start: usize,
    reachable: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<Vec<usize>>,
}

fn print(value: &Reachability, w: &mut dyn Write) -> std::io::Result<()> {
    kv(w, "search", value.search)?;
    kv(w, "start", value.start.to_string())?;
    kv(w, "reachable", value.reachable.to_string())?;
    if let Some(order) = &value.order {
        kv(w, "order", arrow_path(order))?;
    }
    Ok(())
}

pub fn run_bfs(args: &BfsArgs, config: &EngineConfig, output: OutputMode) -> anyhow::Result<()> {
    let session = args.graph.session(config)?;
    let reachable = session.bfs_count(args.start)?;
    let order = if args.order {
        Some(session.bfs_order(args.start)?)
    } else {
        None
    };
    render(
        output,
        &Reachability {
            search: "bfs",
            start: args.start,
            reachable,
            order,
        },
        print,
    )
}

pub fn run_dfs(args: &DfsArgs, config: &EngineConfig, output: OutputMode) -> anyhow::Result<()> {
    let session = args.graph.session(config)?;
    let reachable = session.dfs_count(args.start)?;
    render(
        output,
        &Reachability {
            search: "dfs",
            start: args.start,
            reachable,
            order: None,
        },
        print,
    )
}
