//! Subcommand handlers.
//!
//! Each handler takes its parsed arguments, the resolved [`EngineConfig`]
//! and the [`OutputMode`], loads what it needs, and renders one result.

pub mod flow;
pub mod mst;
pub mod paths;
pub mod scc;
pub mod stats;
pub mod traverse;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, ValueEnum};
use taskgraph_core::TaskAnalytics;
use taskgraph_core::config::{DfsStrategy, EngineConfig, FlowMethod};
use taskgraph_core::task::load_records;

/// Task record input shared by every graph subcommand.
#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    /// JSON file holding an array of task records.
    #[arg(long, short = 't', value_name = "FILE")]
    pub tasks: PathBuf,
}

impl GraphArgs {
    /// Load the records and build a query session.
    pub fn session(&self, config: &EngineConfig) -> anyhow::Result<TaskAnalytics> {
        let records = load_records(&self.tasks)?;
        TaskAnalytics::build(&records, config)
            .with_context(|| format!("Failed to build graph from {}", self.tasks.display()))
    }
}

/// `--dfs` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DfsArg {
    Recursive,
    Iterative,
}

impl From<DfsArg> for DfsStrategy {
    fn from(arg: DfsArg) -> Self {
        match arg {
            DfsArg::Recursive => Self::Recursive,
            DfsArg::Iterative => Self::Iterative,
        }
    }
}

/// `--method` values for `tg flow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FlowArg {
    FordFulkerson,
    EdmondsKarp,
}

impl From<FlowArg> for FlowMethod {
    fn from(arg: FlowArg) -> Self {
        match arg {
            FlowArg::FordFulkerson => Self::FordFulkerson,
            FlowArg::EdmondsKarp => Self::EdmondsKarp,
        }
    }
}
