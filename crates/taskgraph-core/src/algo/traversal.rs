//! Reachability counts over the undirected view.
//!
//! Both walks count the vertices reachable from `start`, `start` included,
//! using only existing adjacency entries. Neighbors are visited in insertion
//! order; neighbors outside the universe are skipped.
//!
//! DFS accumulates its count in post-order (a vertex reports `1 +` the
//! counts of the subtrees it discovered). The recursive and explicit-stack
//! variants visit vertices in the same order and return the same count.

use std::collections::VecDeque;

use fixedbitset::FixedBitSet;
use tracing::{debug, instrument};

use crate::config::DfsStrategy;
use crate::error::Result;
use crate::graph::adjacency::{Graph, Vertex};

/// Breadth-first reachability count from `start`.
///
/// # Errors
///
/// Returns [`crate::GraphError::InvalidVertex`] if `start` is outside the
/// universe.
#[instrument(skip(graph), fields(capacity = graph.capacity()))]
pub fn bfs_count(graph: &Graph, start: Vertex) -> Result<usize> {
    graph.check(start)?;

    let mut visited = FixedBitSet::with_capacity(graph.capacity());
    let mut queue: VecDeque<Vertex> = VecDeque::from([start]);
    visited.insert(start);
    let mut count = 0;

    while let Some(current) = queue.pop_front() {
        count += 1;
        for neighbor in graph.neighbors(current) {
            let next = neighbor.vertex;
            if graph.contains(next) && !visited.put(next) {
                queue.push_back(next);
            }
        }
    }

    debug!(count, "bfs reachability");
    Ok(count)
}

/// Depth-first reachability count from `start`.
///
/// # Errors
///
/// Returns [`crate::GraphError::InvalidVertex`] if `start` is outside the
/// universe.
#[instrument(skip(graph), fields(capacity = graph.capacity()))]
pub fn dfs_count(graph: &Graph, start: Vertex, strategy: DfsStrategy) -> Result<usize> {
    graph.check(start)?;

    let mut visited = FixedBitSet::with_capacity(graph.capacity());
    let count = match strategy {
        DfsStrategy::Recursive => dfs_recursive(graph, start, &mut visited),
        DfsStrategy::Iterative => dfs_iterative(graph, start, &mut visited),
    };

    debug!(count, "dfs reachability");
    Ok(count)
}

/// Vertices reachable from `start` in breadth-first discovery order.
///
/// # Errors
///
/// Returns [`crate::GraphError::InvalidVertex`] if `start` is outside the
/// universe.
pub fn bfs_order(graph: &Graph, start: Vertex) -> Result<Vec<Vertex>> {
    graph.check(start)?;

    let mut visited = FixedBitSet::with_capacity(graph.capacity());
    let mut order = Vec::new();
    let mut queue: VecDeque<Vertex> = VecDeque::from([start]);
    visited.insert(start);

    while let Some(current) = queue.pop_front() {
        order.push(current);
        for neighbor in graph.neighbors(current) {
            let next = neighbor.vertex;
            if graph.contains(next) && !visited.put(next) {
                queue.push_back(next);
            }
        }
    }

    Ok(order)
}

fn dfs_recursive(graph: &Graph, vertex: Vertex, visited: &mut FixedBitSet) -> usize {
    visited.insert(vertex);
    let mut count = 1;
    for neighbor in graph.neighbors(vertex) {
        let next = neighbor.vertex;
        if graph.contains(next) && !visited.contains(next) {
            count += dfs_recursive(graph, next, visited);
        }
    }
    count
}

/// One suspended call of the recursive walk.
struct Frame {
    vertex: Vertex,
    cursor: usize,
    count: usize,
}

fn dfs_iterative(graph: &Graph, start: Vertex, visited: &mut FixedBitSet) -> usize {
    visited.insert(start);
    let mut stack = vec![Frame {
        vertex: start,
        cursor: 0,
        count: 1,
    }];

    loop {
        let Some(frame) = stack.last_mut() else {
            // Unreachable: the root frame returns below.
            return 0;
        };

        let neighbors = graph.neighbors(frame.vertex);
        if let Some(neighbor) = neighbors.get(frame.cursor) {
            frame.cursor += 1;
            let next = neighbor.vertex;
            if graph.contains(next) && !visited.contains(next) {
                visited.insert(next);
                stack.push(Frame {
                    vertex: next,
                    cursor: 0,
                    count: 1,
                });
            }
            continue;
        }

        let finished = frame.count;
        stack.pop();
        match stack.last_mut() {
            Some(parent) => parent.count += finished,
            None => return finished,
        }
    }
}
