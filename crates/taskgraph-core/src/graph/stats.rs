//! Summary statistics for a built task graph.
//!
//! # Statistics Provided
//!
//! - **capacity**: size of the vertex universe.
//! - **edge_count**: logical undirected edges (one per task dependency).
//! - **arc_count**: arcs in the directed SCC view.
//! - **self_loop_count**: edges whose endpoints coincide.
//! - **parallel_edge_count**: edges repeating an earlier unordered pair.
//! - **dangling_count**: dependencies pointing outside the universe.
//! - **isolated_vertex_count**: universe vertices with no adjacency entry.
//! - **component_count**: connected components of the undirected view,
//!   counting isolated vertices as components of their own.
//! - **max_degree**: largest adjacency list length.

use std::collections::HashSet;

use petgraph::algo::connected_components;
use serde::Serialize;

use crate::graph::adjacency::Vertex;
use crate::graph::build::TaskGraph;

/// Summary statistics for a [`TaskGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub capacity: usize,
    pub edge_count: usize,
    pub arc_count: usize,
    pub self_loop_count: usize,
    pub parallel_edge_count: usize,
    pub dangling_count: usize,
    pub isolated_vertex_count: usize,
    pub component_count: usize,
    pub max_degree: usize,
    pub content_hash: String,
}

impl GraphStats {
    #[must_use]
    pub fn from_graph(graph: &TaskGraph) -> Self {
        let g = &graph.undirected;

        let self_loop_count = g.edges().iter().filter(|e| e.from == e.to).count();

        let mut pairs: HashSet<(Vertex, Vertex)> = HashSet::with_capacity(g.edge_count());
        let parallel_edge_count = g
            .edges()
            .iter()
            .filter(|e| !pairs.insert((e.from.min(e.to), e.from.max(e.to))))
            .count();

        let isolated_vertex_count = (0..g.capacity()).filter(|&v| g.degree(v) == 0).count();
        let max_degree = (0..g.capacity()).map(|v| g.degree(v)).max().unwrap_or(0);

        Self {
            capacity: g.capacity(),
            edge_count: g.edge_count(),
            arc_count: graph.directed.arc_count(),
            self_loop_count,
            parallel_edge_count,
            dangling_count: graph.dangling.len(),
            isolated_vertex_count,
            component_count: connected_components(&g.to_petgraph()),
            max_degree,
            content_hash: graph.content_hash.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build::GraphBuilder;
    use crate::task::TaskRecord;

    #[test]
    fn empty_records_leave_every_vertex_isolated() {
        let graph = GraphBuilder::new(4).build(&[]).expect("build");
        let stats = GraphStats::from_graph(&graph);
        assert_eq!(stats.capacity, 4);
        assert_eq!(stats.edge_count, 0);
        assert_eq!(stats.isolated_vertex_count, 4);
        assert_eq!(stats.component_count, 4);
        assert_eq!(stats.max_degree, 0);
    }

    #[test]
    fn counts_anomalies() {
        let records = vec![
            TaskRecord::new(1, [2, 2, 1]),
            TaskRecord::new(3, [9]),
            TaskRecord::new(2, [1]),
        ];
        let graph = GraphBuilder::new(5).build(&records).expect("build");
        let stats = GraphStats::from_graph(&graph);

        assert_eq!(stats.edge_count, 5);
        assert_eq!(stats.self_loop_count, 1);
        // (1,2) repeated once inside task 1 and once more as (2,1).
        assert_eq!(stats.parallel_edge_count, 2);
        assert_eq!(stats.dangling_count, 1);
        assert_eq!(stats.arc_count, 4);
        // {0}, {1,2}, {3}, {4}
        assert_eq!(stats.component_count, 4);
        assert_eq!(stats.isolated_vertex_count, 2);
        // 1: (2),(2),(1),(1),(2) = 5 entries
        assert_eq!(stats.max_degree, 5);
    }
}
