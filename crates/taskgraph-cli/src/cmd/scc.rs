//! `tg scc`: strongly connected components of the dependency graph.

use std::io::Write;

use clap::Args;
use serde::Serialize;
use taskgraph_core::config::EngineConfig;

use super::GraphArgs;
use crate::output::{OutputMode, kv, render};

#[derive(Args, Debug)]
pub struct SccArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Only report components that contain a dependency cycle.
    #[arg(long)]
    pub cycles: bool,
}

#[derive(Debug, Serialize)]
struct SccReport {
    count: usize,
    components: Vec<Vec<usize>>,
}

pub fn run_scc(args: &SccArgs, config: &EngineConfig, output: OutputMode) -> anyhow::Result<()> {
    let session = args.graph.session(config)?;
    let components = if args.cycles {
        session.dependency_cycles()
    } else {
        session.strongly_connected_components()
    };

    let report = SccReport {
        count: components.len(),
        components,
    };
    render(output, &report, |r, w: &mut dyn Write| {
        kv(w, "components", r.count.to_string())?;
        for component in &r.components {
            let members: Vec<String> = component.iter().map(ToString::to_string).collect();
            writeln!(w, "  {{{}}}", members.join(", "))?;
        }
        Ok(())
    })
}
