#![forbid(unsafe_code)]

mod cmd;
mod output;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use output::{CliError, OutputMode, render_error};
use taskgraph_core::config::{EngineConfig, load_config};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "tg: dependency-graph analytics for task records",
    long_about = None
)]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Engine config file (defaults to ./taskgraph.toml when present).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the size of the vertex universe.
    #[arg(long, global = true, value_name = "N")]
    max_vertices: Option<usize>,

    /// Override the depth-first search strategy.
    #[arg(long, global = true, value_enum)]
    dfs: Option<cmd::DfsArg>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    const fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }

    /// File config, then environment, then command-line flags.
    fn engine_config(&self) -> anyhow::Result<EngineConfig> {
        let cwd = env::current_dir()?;
        let mut config = load_config(self.config.as_deref(), &cwd)?;
        if let Some(max_vertices) = self.max_vertices {
            config.max_vertices = max_vertices;
        }
        if let Some(dfs) = self.dfs {
            config.dfs = dfs.into();
        }
        config.validate()?;
        debug!(?config, "engine config resolved");
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Summarize the task graph",
        after_help = "EXAMPLES:\n    tg stats --tasks tasks.json"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        about = "Count tasks reachable from a start task (breadth-first)",
        after_help = "EXAMPLES:\n    tg bfs --tasks tasks.json --start 1\n\n    # Include the visit order\n    tg bfs --tasks tasks.json --start 1 --order"
    )]
    Bfs(cmd::traverse::BfsArgs),

    #[command(
        about = "Count tasks reachable from a start task (depth-first)",
        after_help = "EXAMPLES:\n    tg dfs --tasks tasks.json --start 1 --dfs recursive"
    )]
    Dfs(cmd::traverse::DfsArgs),

    #[command(
        about = "Strongly connected components of the dependency graph",
        after_help = "EXAMPLES:\n    tg scc --tasks tasks.json\n\n    # Only components that contain a cycle\n    tg scc --tasks tasks.json --cycles"
    )]
    Scc(cmd::scc::SccArgs),

    #[command(
        about = "Minimum spanning tree grown from a start task (Prim)",
        after_help = "EXAMPLES:\n    tg prim --tasks tasks.json --start 1"
    )]
    Prim(cmd::mst::PrimArgs),

    #[command(
        about = "Minimum spanning forest over all tasks (Kruskal)",
        after_help = "EXAMPLES:\n    tg kruskal --tasks tasks.json --json"
    )]
    Kruskal(cmd::mst::KruskalArgs),

    #[command(
        about = "Shortest paths from a start task (Dijkstra)",
        after_help = "EXAMPLES:\n    tg dijkstra --tasks tasks.json --start 1\n\n    # Path to one task\n    tg dijkstra --tasks tasks.json --start 1 --to 3"
    )]
    Dijkstra(cmd::paths::PathArgs),

    #[command(
        name = "bellman-ford",
        about = "Shortest paths with negative-cycle detection (Bellman-Ford)",
        after_help = "EXAMPLES:\n    tg bellman-ford --tasks tasks.json --start 1"
    )]
    BellmanFord(cmd::paths::PathArgs),

    #[command(
        about = "Maximum flow between two tasks over a capacity matrix",
        after_help = "EXAMPLES:\n    tg flow --capacity caps.json --source 0 --sink 5\n\n    # Force depth-first augmenting paths\n    tg flow --capacity caps.json --source 0 --sink 5 --method ford-fulkerson"
    )]
    Flow(cmd::flow::FlowArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("TASKGRAPH_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| {
            EnvFilter::new(if verbose {
                "taskgraph_core=debug,taskgraph_cli=debug,info"
            } else {
                "warn"
            })
        });

    let format = env::var("TASKGRAPH_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.engine_config()?;
    let output = cli.output_mode();

    match &cli.command {
        Commands::Stats(args) => cmd::stats::run_stats(args, &config, output),
        Commands::Bfs(args) => cmd::traverse::run_bfs(args, &config, output),
        Commands::Dfs(args) => cmd::traverse::run_dfs(args, &config, output),
        Commands::Scc(args) => cmd::scc::run_scc(args, &config, output),
        Commands::Prim(args) => cmd::mst::run_prim(args, &config, output),
        Commands::Kruskal(args) => cmd::mst::run_kruskal(args, &config, output),
        Commands::Dijkstra(args) => cmd::paths::run_dijkstra(args, &config, output),
        Commands::BellmanFord(args) => cmd::paths::run_bellman_ford(args, &config, output),
        Commands::Flow(args) => cmd::flow::run_flow(args, &config, output),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let rendered = render_error(cli.output_mode(), &CliError::from_anyhow(&error));
            if rendered.is_err() {
                eprintln!("error: {error:#}");
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_sets_output_mode() {
        let cli = Cli::parse_from(["tg", "--json", "stats", "--tasks", "t.json"]);
        assert_eq!(cli.output_mode(), OutputMode::Json);
    }

    #[test]
    fn json_flag_after_subcommand() {
        let cli = Cli::parse_from(["tg", "kruskal", "--tasks", "t.json", "--json"]);
        assert!(cli.json);
    }

    #[test]
    fn default_output_is_human() {
        let cli = Cli::parse_from(["tg", "bfs", "--tasks", "t.json", "--start", "1"]);
        assert_eq!(cli.output_mode(), OutputMode::Human);
        assert!(matches!(cli.command, Commands::Bfs(ref args) if args.start == 1 && !args.order));
    }

    #[test]
    fn bellman_ford_uses_kebab_case_name() {
        let cli = Cli::parse_from(["tg", "bellman-ford", "-t", "t.json", "-s", "2", "--to", "3"]);
        assert!(matches!(cli.command, Commands::BellmanFord(ref args) if args.to == Some(3)));
    }

    #[test]
    fn flow_method_parses() {
        let cli = Cli::parse_from([
            "tg",
            "flow",
            "--capacity",
            "c.json",
            "--source",
            "0",
            "--sink",
            "3",
            "--method",
            "ford-fulkerson",
        ]);
        assert!(matches!(
            cli.command,
            Commands::Flow(ref args) if args.method == Some(cmd::FlowArg::FordFulkerson)
        ));
    }

    #[test]
    fn dfs_override_parses_globally() {
        let cli = Cli::parse_from(["tg", "dfs", "-t", "t.json", "-s", "0", "--dfs", "iterative"]);
        assert_eq!(cli.dfs, Some(cmd::DfsArg::Iterative));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
