//! Export to [`petgraph`] for callers that want its wider algorithm set.
//!
//! Node index `i` of an exported graph is vertex `i`, so results map back
//! without a lookup table. Edges to vertices outside the universe have no
//! node to attach to and are dropped.

use petgraph::graph::{DiGraph, NodeIndex, UnGraph};

use crate::graph::adjacency::{Digraph, Graph, Vertex, Weight};

impl Graph {
    /// Export the logical edge list as an undirected petgraph graph.
    #[must_use]
    pub fn to_petgraph(&self) -> UnGraph<Vertex, Weight> {
        let mut out = UnGraph::with_capacity(self.capacity(), self.edge_count());
        for vertex in 0..self.capacity() {
            out.add_node(vertex);
        }
        for edge in self.edges() {
            if self.contains(edge.to) {
                out.add_edge(NodeIndex::new(edge.from), NodeIndex::new(edge.to), edge.weight);
            }
        }
        out
    }
}

impl Digraph {
    /// Export as a directed petgraph graph.
    #[must_use]
    pub fn to_petgraph(&self) -> DiGraph<Vertex, ()> {
        let mut out = DiGraph::with_capacity(self.capacity(), self.arc_count());
        for vertex in 0..self.capacity() {
            out.add_node(vertex);
        }
        for from in 0..self.capacity() {
            for &to in self.successors(from) {
                out.add_edge(NodeIndex::new(from), NodeIndex::new(to), ());
            }
        }
        out
    }
}
