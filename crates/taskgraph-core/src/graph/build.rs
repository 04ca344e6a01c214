//! Graph construction from task records.
//!
//! # Edge Convention
//!
//! For every task `t` and every dependency `d` listed by `t`, the builder
//! adds one undirected edge `(t.id, d)` with weight `t.id + d`, in record
//! order then dependency order. The same pair also becomes the directed arc
//! `d -> t` ("dependency before dependent") in the SCC view.
//!
//! Self-dependencies and repeated dependency ids are kept as self-loops and
//! parallel edges. A dependency id outside the universe is recorded on the
//! task's side of the undirected view only and listed in
//! [`TaskGraph::dangling`]; it never reaches the directed view.
//!
//! ## Identity
//!
//! [`TaskGraph::content_hash`] is a BLAKE3 hash of the undirected edge list
//! in insertion order, so two builds from the same records hash equally.

#![allow(clippy::module_name_repetitions)]

use tracing::{debug, instrument, warn};

use crate::config::EngineConfig;
use crate::error::{GraphError, Result};
use crate::graph::adjacency::{Digraph, Edge, Graph, Vertex};
use crate::task::{MAX_DEPENDENCIES, TaskRecord, validate_records};

// ---------------------------------------------------------------------------
// TaskGraph
// ---------------------------------------------------------------------------

/// Both views of the task dependency graph, built together.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    /// Undirected weighted view (traversal, MST, shortest paths).
    pub undirected: Graph,
    /// Directed `dependency -> dependent` view (SCC).
    pub directed: Digraph,
    /// `(task, dependency)` pairs whose dependency id is outside the universe.
    pub dangling: Vec<(Vertex, Vertex)>,
    /// BLAKE3 hash of the undirected edge list.
    pub content_hash: String,
}

impl TaskGraph {
    /// Size of the vertex universe.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.undirected.capacity()
    }

    /// Number of logical undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.undirected.edge_count()
    }
}

// ---------------------------------------------------------------------------
// GraphBuilder
// ---------------------------------------------------------------------------

/// Builds a [`TaskGraph`] from task records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphBuilder {
    max_vertices: usize,
    max_dependencies: usize,
}

impl GraphBuilder {
    /// Builder over the universe `[0, max_vertices)` with the default
    /// dependency bound.
    #[must_use]
    pub const fn new(max_vertices: usize) -> Self {
        Self {
            max_vertices,
            max_dependencies: MAX_DEPENDENCIES,
        }
    }

    #[must_use]
    pub const fn from_config(config: &EngineConfig) -> Self {
        Self {
            max_vertices: config.max_vertices,
            max_dependencies: config.max_dependencies,
        }
    }

    #[must_use]
    pub const fn with_max_dependencies(mut self, max_dependencies: usize) -> Self {
        self.max_dependencies = max_dependencies;
        self
    }

    /// Validate `records` and build both graph views.
    ///
    /// Validation runs over the whole batch first, so a malformed record
    /// leaves nothing half-built.
    ///
    /// # Errors
    ///
    /// - [`crate::GraphError::EmptyGraph`] if the universe is empty.
    /// - Any error from [`validate_records`].
    #[instrument(skip(self, records), fields(records = records.len(), max_vertices = self.max_vertices))]
    pub fn build(&self, records: &[TaskRecord]) -> Result<TaskGraph> {
        let mut undirected = Graph::new(self.max_vertices)?;
        let mut directed = Digraph::new(self.max_vertices)?;
        validate_records(records, self.max_vertices, self.max_dependencies)?;

        let mut dangling = Vec::new();

        for record in records {
            let task = record.id;
            for &dependency in &record.dependency_ids {
                if dependency == task {
                    warn!(task, "task depends on itself; keeping self-loop");
                }

                let weight = Edge::task_weight(task, dependency)
                    .ok_or(GraphError::WeightOverflow { task, dependency })?;
                undirected.add_edge(task, dependency, weight)?;

                if undirected.contains(dependency) {
                    directed.add_arc(dependency, task)?;
                } else {
                    warn!(
                        task,
                        dependency, "dependency outside the vertex universe; keeping one-sided edge"
                    );
                    dangling.push((task, dependency));
                }
            }
        }

        let content_hash = compute_edge_hash(undirected.edges());

        debug!(
            edges = undirected.edge_count(),
            arcs = directed.arc_count(),
            dangling = dangling.len(),
            %content_hash,
            "task graph built"
        );

        Ok(TaskGraph {
            undirected,
            directed,
            dangling,
            content_hash,
        })
    }
}

/// Compute a BLAKE3 hash of the edge list for build identity.
fn compute_edge_hash(edges: &[Edge]) -> String {
    let mut hasher = blake3::Hasher::new();
    for edge in edges {
        hasher.update(&(edge.from as u64).to_le_bytes());
        hasher.update(&(edge.to as u64).to_le_bytes());
        hasher.update(&edge.weight.to_le_bytes());
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::adjacency::Neighbor;

    fn three_tasks() -> Vec<TaskRecord> {
        vec![
            TaskRecord::new(1, []),
            TaskRecord::new(2, [1]),
            TaskRecord::new(3, [1, 2]),
        ]
    }

    #[test]
    fn edges_follow_record_order_with_sum_weights() {
        let graph = GraphBuilder::new(10).build(&three_tasks()).expect("build");
        assert_eq!(
            graph.undirected.edges(),
            &[Edge::new(2, 1, 3), Edge::new(3, 1, 4), Edge::new(3, 2, 5)]
        );
    }

    #[test]
    fn undirected_view_is_symmetric() {
        let graph = GraphBuilder::new(10).build(&three_tasks()).expect("build");
        let g = &graph.undirected;
        for (vertex, neighbor) in g.entries() {
            let back = Neighbor {
                vertex,
                weight: neighbor.weight,
            };
            assert!(
                g.neighbors(neighbor.vertex).contains(&back),
                "missing reverse entry for {vertex} -> {}",
                neighbor.vertex
            );
        }
        assert_eq!(
            g.neighbors(1),
            &[
                Neighbor { vertex: 2, weight: 3 },
                Neighbor { vertex: 3, weight: 4 }
            ]
        );
    }

    #[test]
    fn directed_view_points_from_dependency_to_dependent() {
        let graph = GraphBuilder::new(10).build(&three_tasks()).expect("build");
        assert_eq!(graph.directed.successors(1), &[2, 3]);
        assert_eq!(graph.directed.successors(2), &[3]);
        assert!(graph.directed.successors(3).is_empty());
    }

    #[test]
    fn duplicates_and_self_dependencies_are_kept() {
        let records = vec![TaskRecord::new(1, []), TaskRecord::new(2, [1, 1, 2])];
        let graph = GraphBuilder::new(5).build(&records).expect("build");
        assert_eq!(graph.edge_count(), 3);
        // Two parallel (2,1) entries plus the self-loop stored twice.
        assert_eq!(graph.undirected.degree(2), 4);
        assert_eq!(graph.directed.successors(1), &[2, 2]);
        assert_eq!(graph.directed.successors(2), &[2]);
    }

    #[test]
    fn dangling_dependency_is_one_sided() {
        let records = vec![TaskRecord::new(1, [42])];
        let graph = GraphBuilder::new(5).build(&records).expect("build");
        assert_eq!(graph.dangling, vec![(1, 42)]);
        assert_eq!(
            graph.undirected.neighbors(1),
            &[Neighbor {
                vertex: 42,
                weight: 43
            }]
        );
        assert_eq!(graph.directed.arc_count(), 0);
    }

    #[test]
    fn oversized_dependency_id_is_rejected() {
        let records = vec![TaskRecord::new(1, []), TaskRecord::new(3, [1, usize::MAX])];
        let err = GraphBuilder::new(5).build(&records).expect_err("must fail");
        assert_eq!(
            err,
            GraphError::WeightOverflow {
                task: 3,
                dependency: usize::MAX
            }
        );
        assert_eq!(err.code().to_string(), "E2001");
    }

    #[test]
    fn malformed_batch_builds_nothing() {
        let records = vec![TaskRecord::new(1, []), TaskRecord::new(7, [1])];
        let err = GraphBuilder::new(5).build(&records).expect_err("must fail");
        assert_eq!(
            err,
            GraphError::InvalidVertex {
                vertex: 7,
                capacity: 5
            }
        );
    }

    #[test]
    fn dependency_bound_is_configurable() {
        let records = vec![TaskRecord::new(0, [1, 2, 3])];
        let builder = GraphBuilder::new(5).with_max_dependencies(2);
        assert!(matches!(
            builder.build(&records),
            Err(GraphError::TooManyDependencies { count: 3, max: 2, .. })
        ));
    }

    #[test]
    fn empty_universe_is_rejected() {
        assert_eq!(
            GraphBuilder::new(0).build(&[]).map(|g| g.edge_count()),
            Err(GraphError::EmptyGraph)
        );
    }

    #[test]
    fn content_hash_is_stable_and_edge_sensitive() {
        let a = GraphBuilder::new(10).build(&three_tasks()).expect("build");
        let b = GraphBuilder::new(10).build(&three_tasks()).expect("build");
        assert_eq!(a.content_hash, b.content_hash);
        assert!(a.content_hash.starts_with("blake3:"));

        let mut records = three_tasks();
        records[1].dependency_ids.clear();
        let c = GraphBuilder::new(10).build(&records).expect("build");
        assert_ne!(a.content_hash, c.content_hash);
    }

    #[test]
    fn builds_are_independent() {
        let builder = GraphBuilder::new(10);
        let first = builder.build(&three_tasks()).expect("build");
        let second = builder.build(&[TaskRecord::new(4, [5])]).expect("build");
        assert_eq!(first.edge_count(), 3);
        assert_eq!(second.edge_count(), 1);
        assert!(second.undirected.neighbors(1).is_empty());
    }
}
