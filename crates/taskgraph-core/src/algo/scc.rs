//! Strongly connected components via Kosaraju's two-pass algorithm.
//!
//! # Algorithm
//!
//! 1. DFS from every unvisited vertex `0..N` in ascending order on the
//!    directed graph, pushing each vertex onto a finish stack when its DFS
//!    call completes.
//! 2. Build the transpose.
//! 3. Pop the finish stack; every still-unvisited vertex roots a DFS on the
//!    transpose, and the vertices that DFS discovers (in discovery order)
//!    form one component.
//!
//! Components are reported in pop order. Successor lists are walked in
//! insertion order, which fixes both the finish order and the order inside
//! each component. Vertices without arcs are singleton components, so the
//! result always partitions the whole universe.

use fixedbitset::FixedBitSet;
use tracing::{debug, instrument};

use crate::config::DfsStrategy;
use crate::graph::adjacency::{Digraph, Vertex};

/// Partition the universe of `graph` into strongly connected components.
#[must_use]
#[instrument(skip(graph), fields(capacity = graph.capacity(), arcs = graph.arc_count()))]
pub fn strongly_connected_components(graph: &Digraph, strategy: DfsStrategy) -> Vec<Vec<Vertex>> {
    let n = graph.capacity();

    // Pass 1: finish order on the original graph.
    let mut visited = FixedBitSet::with_capacity(n);
    let mut finish: Vec<Vertex> = Vec::with_capacity(n);
    for vertex in 0..n {
        if !visited.contains(vertex) {
            walk(graph, vertex, &mut visited, strategy, &mut |_| {}, &mut |v| {
                finish.push(v);
            });
        }
    }

    // Pass 2: collect trees on the transpose in reverse finish order.
    let transpose = graph.transpose();
    visited.clear();
    let mut components: Vec<Vec<Vertex>> = Vec::new();
    while let Some(vertex) = finish.pop() {
        if visited.contains(vertex) {
            continue;
        }
        let mut component = Vec::new();
        walk(
            &transpose,
            vertex,
            &mut visited,
            strategy,
            &mut |v| component.push(v),
            &mut |_| {},
        );
        components.push(component);
    }

    debug!(components = components.len(), "kosaraju scc");
    components
}

/// Components with more than one member, or a single member with a
/// self-arc: the vertex sets that actually contain a dependency cycle.
#[must_use]
pub fn cyclic_components(graph: &Digraph, strategy: DfsStrategy) -> Vec<Vec<Vertex>> {
    strongly_connected_components(graph, strategy)
        .into_iter()
        .filter(|component| match component.as_slice() {
            [only] => graph.successors(*only).contains(only),
            _ => true,
        })
        .collect()
}

/// DFS from `root`, calling `on_enter` in preorder and `on_exit` in
/// postorder.
fn walk(
    graph: &Digraph,
    root: Vertex,
    visited: &mut FixedBitSet,
    strategy: DfsStrategy,
    on_enter: &mut dyn FnMut(Vertex),
    on_exit: &mut dyn FnMut(Vertex),
) {
    match strategy {
        DfsStrategy::Recursive => walk_recursive(graph, root, visited, on_enter, on_exit),
        DfsStrategy::Iterative => walk_iterative(graph, root, visited, on_enter, on_exit),
    }
}

fn walk_recursive(
    graph: &Digraph,
    vertex: Vertex,
    visited: &mut FixedBitSet,
    on_enter: &mut dyn FnMut(Vertex),
    on_exit: &mut dyn FnMut(Vertex),
) {
    visited.insert(vertex);
    on_enter(vertex);
    for &next in graph.successors(vertex) {
        if !visited.contains(next) {
            walk_recursive(graph, next, visited, on_enter, on_exit);
        }
    }
    on_exit(vertex);
}

fn walk_iterative(
    graph: &Digraph,
    root: Vertex,
    visited: &mut FixedBitSet,
    on_enter: &mut dyn FnMut(Vertex),
    on_exit: &mut dyn FnMut(Vertex),
) {
    // Each frame: (vertex, index of the next successor to examine).
    let mut stack: Vec<(Vertex, usize)> = vec![(root, 0)];
    visited.insert(root);
    on_enter(root);

    while let Some(frame) = stack.last_mut() {
        let (vertex, cursor) = *frame;
        if let Some(&next) = graph.successors(vertex).get(cursor) {
            frame.1 += 1;
            if !visited.contains(next) {
                visited.insert(next);
                on_enter(next);
                stack.push((next, 0));
            }
        } else {
            stack.pop();
            on_exit(vertex);
        }
    }
}
