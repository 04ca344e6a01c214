//! Adjacency storage over a fixed vertex universe.
//!
//! Both [`Graph`] and [`Digraph`] own one adjacency list per vertex in
//! `[0, capacity)`. The capacity is fixed at construction; there is no
//! resizing and no shared storage between instances.
//!
//! Neighbor lists preserve insertion order. Every algorithm in
//! [`crate::algo`] iterates them front to back, so insertion order is what
//! makes traversal order, SCC finish order and tie-breaking reproducible.

#![allow(clippy::module_name_repetitions)]

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

/// A vertex id. Valid ids lie in `[0, capacity)` of the owning graph.
pub type Vertex = usize;

/// Edge weight. Signed so Bellman-Ford can model negative arcs.
pub type Weight = i64;

/// A weighted edge as inserted (or as reported by an algorithm).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: Vertex,
    pub to: Vertex,
    pub weight: Weight,
}

impl Edge {
    #[must_use]
    pub const fn new(from: Vertex, to: Vertex, weight: Weight) -> Self {
        Self { from, to, weight }
    }

    /// The task-graph weight convention: the sum of both endpoint ids.
    /// `None` when that sum does not fit in a [`Weight`].
    #[must_use]
    pub fn task_weight(from: Vertex, to: Vertex) -> Option<Weight> {
        Weight::try_from(from)
            .ok()?
            .checked_add(Weight::try_from(to).ok()?)
    }
}

/// One adjacency entry: the vertex on the other end and the edge weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Neighbor {
    pub vertex: Vertex,
    pub weight: Weight,
}

// ---------------------------------------------------------------------------
// Graph (weighted, undirected by default)
// ---------------------------------------------------------------------------

/// Weighted adjacency-list graph over `[0, capacity)`.
///
/// [`Graph::add_edge`] stores an undirected edge once from each endpoint;
/// [`Graph::add_arc`] stores a single directed entry. Either way the logical
/// edge is appended once to the flat edge list returned by [`Graph::edges`].
///
/// An endpoint at or beyond `capacity` may appear as a neighbor (it has no
/// adjacency slot of its own). Algorithms skip such neighbors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    capacity: usize,
    adjacency: Vec<Vec<Neighbor>>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Create an edgeless graph over `[0, capacity)`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyGraph`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(GraphError::EmptyGraph);
        }
        Ok(Self {
            capacity,
            adjacency: vec![Vec::new(); capacity],
            edges: Vec::new(),
        })
    }

    /// Size of the vertex universe.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// `true` if `vertex` has an adjacency slot.
    #[must_use]
    pub const fn contains(&self, vertex: Vertex) -> bool {
        vertex < self.capacity
    }

    /// Validate a vertex id against the universe.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertex`] for ids `>= capacity`.
    pub const fn check(&self, vertex: Vertex) -> Result<Vertex> {
        if self.contains(vertex) {
            Ok(vertex)
        } else {
            Err(GraphError::InvalidVertex {
                vertex,
                capacity: self.capacity,
            })
        }
    }

    /// Add an undirected edge: `(to, weight)` on `from`'s list and, when `to`
    /// is inside the universe, `(from, weight)` on `to`'s list.
    ///
    /// A self-loop therefore appears twice on its vertex's list.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertex`] if `from` is outside the universe.
    pub fn add_edge(&mut self, from: Vertex, to: Vertex, weight: Weight) -> Result<()> {
        self.check(from)?;
        self.adjacency[from].push(Neighbor { vertex: to, weight });
        if let Some(list) = self.adjacency.get_mut(to) {
            list.push(Neighbor {
                vertex: from,
                weight,
            });
        }
        self.edges.push(Edge::new(from, to, weight));
        Ok(())
    }

    /// Add a directed arc `from -> to`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertex`] if `from` is outside the universe.
    pub fn add_arc(&mut self, from: Vertex, to: Vertex, weight: Weight) -> Result<()> {
        self.check(from)?;
        self.adjacency[from].push(Neighbor { vertex: to, weight });
        self.edges.push(Edge::new(from, to, weight));
        Ok(())
    }

    /// Adjacency list of `vertex` in insertion order (empty when outside
    /// the universe).
    #[must_use]
    pub fn neighbors(&self, vertex: Vertex) -> &[Neighbor] {
        self.adjacency.get(vertex).map_or(&[], Vec::as_slice)
    }

    /// Every logical edge, once, in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Every adjacency entry as `(vertex, neighbor)`, vertex-major.
    pub fn entries(&self) -> impl Iterator<Item = (Vertex, Neighbor)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(vertex, list)| list.iter().map(move |&n| (vertex, n)))
    }

    /// Number of adjacency entries on `vertex`.
    #[must_use]
    pub fn degree(&self, vertex: Vertex) -> usize {
        self.neighbors(vertex).len()
    }
}

// ---------------------------------------------------------------------------
// Digraph (unweighted, directed)
// ---------------------------------------------------------------------------

/// Unweighted directed graph over `[0, capacity)`.
///
/// The task view stores `dependency -> dependent`. Used by the SCC analyzer,
/// which also needs [`Digraph::transpose`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digraph {
    capacity: usize,
    successors: Vec<Vec<Vertex>>,
}

impl Digraph {
    /// Create an arc-less digraph over `[0, capacity)`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyGraph`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(GraphError::EmptyGraph);
        }
        Ok(Self {
            capacity,
            successors: vec![Vec::new(); capacity],
        })
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Add the arc `from -> to`. Both ends must be inside the universe.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertex`] for the first endpoint that is
    /// outside the universe.
    pub fn add_arc(&mut self, from: Vertex, to: Vertex) -> Result<()> {
        for vertex in [from, to] {
            if vertex >= self.capacity {
                return Err(GraphError::InvalidVertex {
                    vertex,
                    capacity: self.capacity,
                });
            }
        }
        self.successors[from].push(to);
        Ok(())
    }

    /// Successors of `vertex` in insertion order.
    #[must_use]
    pub fn successors(&self, vertex: Vertex) -> &[Vertex] {
        self.successors.get(vertex).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn arc_count(&self) -> usize {
        self.successors.iter().map(Vec::len).sum()
    }

    /// Reverse every arc.
    ///
    /// Arcs are visited source-major in insertion order, so the transpose's
    /// lists are ordered by source vertex.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut successors = vec![Vec::new(); self.capacity];
        for (from, targets) in self.successors.iter().enumerate() {
            for &to in targets {
                successors[to].push(from);
            }
        }
        Self {
            capacity: self.capacity,
            successors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_weight_is_checked() {
        assert_eq!(Edge::task_weight(2, 1), Some(3));
        assert_eq!(Edge::task_weight(0, 0), Some(0));
        assert_eq!(Edge::task_weight(0, usize::MAX), None);
        let max = usize::try_from(Weight::MAX).expect("i64::MAX fits in usize");
        assert_eq!(Edge::task_weight(0, max), Some(Weight::MAX));
        assert_eq!(Edge::task_weight(1, max), None);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert_eq!(Graph::new(0), Err(GraphError::EmptyGraph));
        assert_eq!(Digraph::new(0), Err(GraphError::EmptyGraph));
    }

    #[test]
    fn undirected_edge_is_stored_from_both_ends() {
        let mut g = Graph::new(4).expect("graph");
        g.add_edge(2, 1, 3).expect("edge");

        assert_eq!(g.neighbors(2), &[Neighbor { vertex: 1, weight: 3 }]);
        assert_eq!(g.neighbors(1), &[Neighbor { vertex: 2, weight: 3 }]);
        assert_eq!(g.edges(), &[Edge::new(2, 1, 3)]);
    }

    #[test]
    fn arc_is_stored_once() {
        let mut g = Graph::new(2).expect("graph");
        g.add_arc(1, 0, -3).expect("arc");
        assert!(g.neighbors(0).is_empty());
        assert_eq!(g.neighbors(1), &[Neighbor { vertex: 0, weight: -3 }]);
    }

    #[test]
    fn self_loop_appears_twice() {
        let mut g = Graph::new(3).expect("graph");
        g.add_edge(2, 2, 4).expect("edge");
        assert_eq!(g.degree(2), 2);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn out_of_universe_neighbor_is_one_sided() {
        let mut g = Graph::new(3).expect("graph");
        g.add_edge(1, 9, 10).expect("edge");
        assert_eq!(g.neighbors(1), &[Neighbor { vertex: 9, weight: 10 }]);
        assert!(g.neighbors(9).is_empty());
    }

    #[test]
    fn edge_from_outside_universe_is_rejected() {
        let mut g = Graph::new(3).expect("graph");
        assert_eq!(
            g.add_edge(3, 0, 3),
            Err(GraphError::InvalidVertex {
                vertex: 3,
                capacity: 3
            })
        );
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn neighbors_keep_insertion_order() {
        let mut g = Graph::new(5).expect("graph");
        g.add_edge(0, 3, 3).expect("edge");
        g.add_edge(0, 1, 1).expect("edge");
        g.add_edge(0, 4, 4).expect("edge");
        let order: Vec<Vertex> = g.neighbors(0).iter().map(|n| n.vertex).collect();
        assert_eq!(order, vec![3, 1, 4]);
    }

    #[test]
    fn transpose_reverses_arcs() {
        let mut d = Digraph::new(3).expect("digraph");
        d.add_arc(0, 1).expect("arc");
        d.add_arc(1, 2).expect("arc");
        d.add_arc(0, 2).expect("arc");

        let t = d.transpose();
        assert!(t.successors(0).is_empty());
        assert_eq!(t.successors(1), &[0]);
        assert_eq!(t.successors(2), &[0, 1]);
        assert_eq!(t.arc_count(), d.arc_count());
        assert_eq!(t.transpose(), d);
    }

    #[test]
    fn digraph_rejects_either_endpoint_outside() {
        let mut d = Digraph::new(2).expect("digraph");
        assert!(d.add_arc(0, 2).is_err());
        assert!(d.add_arc(2, 0).is_err());
        assert_eq!(d.arc_count(), 0);
    }
}
