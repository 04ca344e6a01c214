//! Minimum spanning trees over the undirected view.
//!
//! # Tie-breaking
//!
//! Both algorithms are deterministic, and their tie rules are part of the
//! contract:
//!
//! - **Prim** keeps frontier candidates in an ordered set keyed by
//!   `(weight, vertex)`, so among equally cheap candidates the lowest vertex
//!   id joins first. Edges are emitted in the order vertices join the tree,
//!   as `(parent, child, weight)`.
//! - **Kruskal** stably sorts the edge list by weight, so equal weights keep
//!   insertion order. Accepted edges are emitted in acceptance order, with
//!   endpoints as inserted.
//!
//! Under weight ties the two edge sets may differ; their total weight does
//! not.
//!
//! Prim covers only the component of its start vertex. Kruskal returns a
//! spanning forest over every component that has edges.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::graph::adjacency::{Edge, Graph, Vertex, Weight};

/// Edges of a spanning tree (or forest) in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpanningTree {
    pub edges: Vec<Edge>,
}

impl SpanningTree {
    #[must_use]
    pub fn total_weight(&self) -> Weight {
        self.edges.iter().map(|e| e.weight).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Prim
// ---------------------------------------------------------------------------

/// Prim's algorithm from `start`.
///
/// # Errors
///
/// Returns [`crate::GraphError::InvalidVertex`] if `start` is outside the
/// universe.
#[instrument(skip(graph), fields(capacity = graph.capacity()))]
pub fn prim(graph: &Graph, start: Vertex) -> Result<SpanningTree> {
    graph.check(start)?;
    let n = graph.capacity();

    let mut key: Vec<Option<Weight>> = vec![None; n];
    let mut parent: Vec<Option<Vertex>> = vec![None; n];
    let mut in_tree = vec![false; n];
    let mut frontier: BTreeSet<(Weight, Vertex)> = BTreeSet::new();

    key[start] = Some(0);
    frontier.insert((0, start));

    let mut edges = Vec::new();

    while let Some((weight, vertex)) = frontier.pop_first() {
        in_tree[vertex] = true;
        if let Some(p) = parent[vertex] {
            edges.push(Edge::new(p, vertex, weight));
        }

        for neighbor in graph.neighbors(vertex) {
            let next = neighbor.vertex;
            if !graph.contains(next) || in_tree[next] {
                continue;
            }
            let improves = key[next].is_none_or(|current| neighbor.weight < current);
            if improves {
                if let Some(old) = key[next] {
                    frontier.remove(&(old, next));
                }
                key[next] = Some(neighbor.weight);
                parent[next] = Some(vertex);
                frontier.insert((neighbor.weight, next));
            }
        }
    }

    let tree = SpanningTree { edges };
    debug!(edges = tree.len(), weight = tree.total_weight(), "prim mst");
    Ok(tree)
}

// ---------------------------------------------------------------------------
// Kruskal
// ---------------------------------------------------------------------------

/// Kruskal's algorithm over the whole edge list.
///
/// Edges with an endpoint outside the universe are skipped.
#[must_use]
#[instrument(skip(graph), fields(capacity = graph.capacity(), edges = graph.edge_count()))]
pub fn kruskal(graph: &Graph) -> SpanningTree {
    let mut candidates: Vec<Edge> = graph
        .edges()
        .iter()
        .copied()
        .filter(|e| graph.contains(e.from) && graph.contains(e.to))
        .collect();
    // Stable: equal weights keep insertion order.
    candidates.sort_by_key(|e| e.weight);

    let mut sets = DisjointSet::new(graph.capacity());
    let edges: Vec<Edge> = candidates
        .into_iter()
        .filter(|e| sets.union(e.from, e.to) == Some(true))
        .collect();

    let tree = SpanningTree { edges };
    debug!(edges = tree.len(), weight = tree.total_weight(), "kruskal mst");
    tree
}

/// Union-find without path compression or rank.
///
/// `find` chases parent links iteratively; `union` hangs the first root
/// under the second. Ids outside `[0, size)` yield `None`.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<Vertex>,
}

impl DisjointSet {
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
        }
    }

    /// Root of `x`'s set.
    #[must_use]
    pub fn find(&self, mut x: Vertex) -> Option<Vertex> {
        loop {
            let parent = *self.parent.get(x)?;
            if parent == x {
                return Some(x);
            }
            x = parent;
        }
    }

    /// Merge the sets of `x` and `y`. Returns `Some(false)` if they were
    /// already one set.
    pub fn union(&mut self, x: Vertex, y: Vertex) -> Option<bool> {
        let root_x = self.find(x)?;
        let root_y = self.find(y)?;
        if root_x == root_y {
            return Some(false);
        }
        self.parent[root_x] = root_y;
        Some(true)
    }
}
