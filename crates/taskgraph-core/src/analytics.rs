//! Query session over one task graph.
//!
//! [`TaskAnalytics`] owns the [`TaskGraph`] built from one batch of task
//! records together with the [`EngineConfig`] it was built under. Every
//! query borrows the graph immutably, so a session can answer any number of
//! queries in any order and repeated queries return identical results.
//! Dropping the session releases the graph; nothing is shared across
//! sessions.

#![allow(clippy::module_name_repetitions)]

use tracing::{info, instrument};

use crate::algo::flow::{FlowResult, max_flow};
use crate::algo::mst::{SpanningTree, kruskal, prim};
use crate::algo::scc::{cyclic_components, strongly_connected_components};
use crate::algo::shortest_path::{BellmanFordOutcome, ShortestPaths, bellman_ford, dijkstra};
use crate::algo::traversal::{bfs_count, bfs_order, dfs_count};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::graph::adjacency::Vertex;
use crate::graph::build::{GraphBuilder, TaskGraph};
use crate::graph::capacity::CapacityMatrix;
use crate::graph::stats::GraphStats;
use crate::task::TaskRecord;

/// A built task graph plus the engine settings that drive its queries.
#[derive(Debug, Clone)]
pub struct TaskAnalytics {
    graph: TaskGraph,
    config: EngineConfig,
}

impl TaskAnalytics {
    /// Validate `config`, then build the graph from `records`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GraphError::EmptyGraph`] for a zero-sized universe,
    /// or any record validation error from [`GraphBuilder::build`].
    #[instrument(skip(records, config), fields(records = records.len()))]
    pub fn build(records: &[TaskRecord], config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let graph = GraphBuilder::from_config(config).build(records)?;
        info!(
            capacity = graph.capacity(),
            edges = graph.edge_count(),
            hash = %graph.content_hash,
            "task graph ready"
        );
        Ok(Self {
            graph,
            config: config.clone(),
        })
    }

    /// Wrap an already-built graph.
    #[must_use]
    pub const fn from_graph(graph: TaskGraph, config: EngineConfig) -> Self {
        Self { graph, config }
    }

    #[must_use]
    pub const fn graph(&self) -> &TaskGraph {
        &self.graph
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn stats(&self) -> GraphStats {
        GraphStats::from_graph(&self.graph)
    }

    // -----------------------------------------------------------------------
    // Traversal
    // -----------------------------------------------------------------------

    /// # Errors
    ///
    /// Returns [`crate::GraphError::InvalidVertex`] for a start outside the
    /// universe.
    pub fn bfs_count(&self, start: Vertex) -> Result<usize> {
        bfs_count(&self.graph.undirected, start)
    }

    /// Depth-first count using the configured [`crate::config::DfsStrategy`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::GraphError::InvalidVertex`] for a start outside the
    /// universe.
    pub fn dfs_count(&self, start: Vertex) -> Result<usize> {
        dfs_count(&self.graph.undirected, start, self.config.dfs)
    }

    /// # Errors
    ///
    /// Returns [`crate::GraphError::InvalidVertex`] for a start outside the
    /// universe.
    pub fn bfs_order(&self, start: Vertex) -> Result<Vec<Vertex>> {
        bfs_order(&self.graph.undirected, start)
    }

    // -----------------------------------------------------------------------
    // Components
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn strongly_connected_components(&self) -> Vec<Vec<Vertex>> {
        strongly_connected_components(&self.graph.directed, self.config.dfs)
    }

    #[must_use]
    pub fn dependency_cycles(&self) -> Vec<Vec<Vertex>> {
        cyclic_components(&self.graph.directed, self.config.dfs)
    }

    // -----------------------------------------------------------------------
    // Spanning trees
    // -----------------------------------------------------------------------

    /// # Errors
    ///
    /// Returns [`crate::GraphError::InvalidVertex`] for a start outside the
    /// universe.
    pub fn prim(&self, start: Vertex) -> Result<SpanningTree> {
        prim(&self.graph.undirected, start)
    }

    #[must_use]
    pub fn kruskal(&self) -> SpanningTree {
        kruskal(&self.graph.undirected)
    }

    // -----------------------------------------------------------------------
    // Shortest paths
    // -----------------------------------------------------------------------

    /// # Errors
    ///
    /// Returns [`crate::GraphError::InvalidVertex`] for a start outside the
    /// universe.
    pub fn dijkstra(&self, start: Vertex) -> Result<ShortestPaths> {
        dijkstra(&self.graph.undirected, start)
    }

    /// # Errors
    ///
    /// Returns [`crate::GraphError::InvalidVertex`] for a start outside the
    /// universe.
    pub fn bellman_ford(&self, start: Vertex) -> Result<BellmanFordOutcome> {
        bellman_ford(&self.graph.undirected, start)
    }

    // -----------------------------------------------------------------------
    // Flow
    // -----------------------------------------------------------------------

    /// Maximum flow over `capacity` with the configured
    /// [`crate::config::FlowMethod`].
    ///
    /// # Errors
    ///
    /// See [`crate::algo::flow::max_flow`].
    pub fn max_flow(&self, capacity: &CapacityMatrix, source: Vertex, sink: Vertex) -> Result<FlowResult> {
        max_flow(capacity, source, sink, self.config.flow)
    }
}
