//! `tg dijkstra` and `tg bellman-ford`: single-source shortest paths.

use std::io::Write;

use clap::Args;
use serde::Serialize;
use taskgraph_core::algo::shortest_path::{BellmanFordOutcome, ShortestPaths};
use taskgraph_core::config::EngineConfig;
use taskgraph_core::{Edge, Vertex, Weight};

use super::GraphArgs;
use crate::output::{OutputMode, arrow_path, kv, render};

#[derive(Args, Debug)]
pub struct PathArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Source task id.
    #[arg(long, short = 's')]
    pub start: usize,

    /// Report the path to this task instead of the whole distance table.
    #[arg(long)]
    pub to: Option<usize>,
}

#[derive(Debug, Serialize)]
struct Distance {
    vertex: Vertex,
    distance: Weight,
}

#[derive(Debug, Serialize)]
struct PathReport {
    algorithm: &'static str,
    start: Vertex,
    #[serde(skip_serializing_if = "Option::is_none")]
    negative_cycle: Option<Edge>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    distances: Vec<Distance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<Target>,
}

#[derive(Debug, Serialize)]
struct Target {
    vertex: Vertex,
    distance: Option<Weight>,
    path: Option<Vec<Vertex>>,
}

impl PathReport {
    fn from_paths(algorithm: &'static str, paths: &ShortestPaths, to: Option<Vertex>) -> Self {
        let target = to.map(|vertex| Target {
            vertex,
            distance: paths.distance_to(vertex),
            path: paths.path_to(vertex),
        });
        let distances = if target.is_some() {
            Vec::new()
        } else {
            paths
                .reachable()
                .map(|(vertex, distance)| Distance { vertex, distance })
                .collect()
        };
        Self {
            algorithm,
            start: paths.source,
            negative_cycle: None,
            distances,
            target,
        }
    }
}

fn print(report: &PathReport, w: &mut dyn Write) -> std::io::Result<()> {
    kv(w, "algorithm", report.algorithm)?;
    kv(w, "start", report.start.to_string())?;
    if let Some(edge) = &report.negative_cycle {
        kv(
            w,
            "negative cycle",
            format!("through {} -> {} ({})", edge.from, edge.to, edge.weight),
        )?;
        return Ok(());
    }
    if let Some(target) = &report.target {
        match (&target.distance, &target.path) {
            (Some(distance), Some(path)) => {
                kv(w, "distance", distance.to_string())?;
                kv(w, "path", arrow_path(path))?;
            }
            _ => kv(w, "distance", format!("{} is unreachable", target.vertex))?,
        }
        return Ok(());
    }
    for entry in &report.distances {
        writeln!(w, "  {:>6}  {}", entry.vertex, entry.distance)?;
    }
    Ok(())
}

pub fn run_dijkstra(args: &PathArgs, config: &EngineConfig, output: OutputMode) -> anyhow::Result<()> {
    let session = args.graph.session(config)?;
    let paths = session.dijkstra(args.start)?;
    render(output, &PathReport::from_paths("dijkstra", &paths, args.to), print)
}

pub fn run_bellman_ford(
    args: &PathArgs,
    config: &EngineConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let session = args.graph.session(config)?;
    let report = match session.bellman_ford(args.start)? {
        BellmanFordOutcome::Distances(paths) => {
            PathReport::from_paths("bellman-ford", &paths, args.to)
        }
        BellmanFordOutcome::NegativeCycle(edge) => PathReport {
            algorithm: "bellman-ford",
            start: args.start,
            negative_cycle: Some(edge),
            distances: Vec::new(),
            target: None,
        },
    };
    render(output, &report, print)
}
