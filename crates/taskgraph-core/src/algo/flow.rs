//! Maximum flow over a [`CapacityMatrix`].
//!
//! # Algorithm
//!
//! The residual graph starts as a copy of the capacities. Each iteration:
//!
//! 1. find an augmenting path `source -> sink` using only edges with
//!    strictly positive residual (DFS for Ford-Fulkerson, BFS for
//!    Edmonds-Karp),
//! 2. take the bottleneck, the smallest residual along the path,
//! 3. subtract it from every forward residual on the path and add it to the
//!    matching reverse residual,
//! 4. add it to the total.
//!
//! The loop ends when no augmenting path remains. Both searches reach the
//! same maximum; they differ in which paths they pick and how many
//! iterations they take. BFS picks shortest paths, which bounds the
//! iteration count polynomially.
//!
//! `source == sink` short-circuits to zero flow.

use std::collections::VecDeque;

use fixedbitset::FixedBitSet;
use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::config::FlowMethod;
use crate::error::{GraphError, Result};
use crate::graph::adjacency::{Vertex, Weight};
use crate::graph::capacity::{CapacityMatrix, Residual};

/// Outcome of a max-flow computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowResult {
    source: Vertex,
    sink: Vertex,
    value: Weight,
    augmentations: usize,
    #[serde(skip)]
    residual: Residual,
}

impl FlowResult {
    #[must_use]
    pub const fn source(&self) -> Vertex {
        self.source
    }

    #[must_use]
    pub const fn sink(&self) -> Vertex {
        self.sink
    }

    /// Total flow pushed from `source` to `sink`.
    #[must_use]
    pub const fn value(&self) -> Weight {
        self.value
    }

    /// Number of augmenting paths used.
    #[must_use]
    pub const fn augmentations(&self) -> usize {
        self.augmentations
    }

    /// Final residual capacity of `from -> to`, or `None` outside the
    /// matrix. Reverse residuals can exceed `i64::MAX`.
    #[must_use]
    pub fn residual(&self, from: Vertex, to: Vertex) -> Option<i128> {
        self.residual.try_get(from, to)
    }

    /// Source side of a minimum cut: vertices still reachable from `source`
    /// through positive residual edges, in ascending order.
    #[must_use]
    pub fn min_cut_source_side(&self) -> Vec<Vertex> {
        let n = self.residual.size();
        let mut visited = FixedBitSet::with_capacity(n);
        let mut queue = VecDeque::from([self.source]);
        visited.insert(self.source);

        while let Some(u) = queue.pop_front() {
            for v in 0..n {
                if self.residual.get(u, v) > 0 && !visited.put(v) {
                    queue.push_back(v);
                }
            }
        }

        visited.ones().collect()
    }
}

/// Maximum flow from `source` to `sink` with the chosen path search.
///
/// # Errors
///
/// - [`GraphError::InvalidVertex`] if `source` or `sink` is outside the
///   matrix.
/// - [`GraphError::FlowOverflow`] if the total does not fit in `i64`.
#[instrument(skip(capacity), fields(size = capacity.size()))]
pub fn max_flow(
    capacity: &CapacityMatrix,
    source: Vertex,
    sink: Vertex,
    method: FlowMethod,
) -> Result<FlowResult> {
    capacity.check(source)?;
    capacity.check(sink)?;

    let mut residual = Residual::from_capacity(capacity);
    let mut total: i128 = 0;
    let mut augmentations = 0;

    if source != sink {
        let mut parent: Vec<Option<Vertex>> = vec![None; residual.size()];
        loop {
            let found = match method {
                FlowMethod::FordFulkerson => dfs_path(&residual, source, sink, &mut parent),
                FlowMethod::EdmondsKarp => bfs_path(&residual, source, sink, &mut parent),
            };
            if !found {
                break;
            }

            let bottleneck = path_edges(&parent, source, sink)
                .map(|(u, v)| residual.get(u, v))
                .min()
                .unwrap_or(0);
            if bottleneck <= 0 {
                break;
            }

            for (u, v) in path_edges(&parent, source, sink) {
                residual.push(u, v, bottleneck);
            }

            total += bottleneck;
            augmentations += 1;
            trace!(augmentations, bottleneck, total, "augmented");
        }
    }

    let value = Weight::try_from(total).map_err(|_| GraphError::FlowOverflow {
        from: source,
        to: sink,
    })?;
    debug!(value, augmentations, ?method, "max flow");
    Ok(FlowResult {
        source,
        sink,
        value,
        augmentations,
        residual,
    })
}

/// Ford-Fulkerson with depth-first augmenting paths.
///
/// # Errors
///
/// See [`max_flow`].
pub fn ford_fulkerson(capacity: &CapacityMatrix, source: Vertex, sink: Vertex) -> Result<Weight> {
    max_flow(capacity, source, sink, FlowMethod::FordFulkerson).map(|r| r.value())
}

/// Edmonds-Karp: Ford-Fulkerson with breadth-first augmenting paths.
///
/// # Errors
///
/// See [`max_flow`].
pub fn edmonds_karp(capacity: &CapacityMatrix, source: Vertex, sink: Vertex) -> Result<Weight> {
    max_flow(capacity, source, sink, FlowMethod::EdmondsKarp).map(|r| r.value())
}

/// Walk `parent` links back from `sink`, yielding path edges `(u, v)` from
/// the sink end towards the source.
fn path_edges(
    parent: &[Option<Vertex>],
    source: Vertex,
    sink: Vertex,
) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
    let mut v = sink;
    std::iter::from_fn(move || {
        if v == source {
            return None;
        }
        let u = parent[v]?;
        let edge = (u, v);
        v = u;
        Some(edge)
    })
}

/// Breadth-first search for an augmenting path. Fills `parent` and returns
/// `true` when `sink` is reached.
fn bfs_path(residual: &Residual, source: Vertex, sink: Vertex, parent: &mut [Option<Vertex>]) -> bool {
    let n = residual.size();
    let mut visited = FixedBitSet::with_capacity(n);
    parent.fill(None);

    let mut queue = VecDeque::from([source]);
    visited.insert(source);

    while let Some(u) = queue.pop_front() {
        for v in 0..n {
            if residual.get(u, v) > 0 && !visited.contains(v) {
                visited.insert(v);
                parent[v] = Some(u);
                if v == sink {
                    return true;
                }
                queue.push_back(v);
            }
        }
    }

    false
}

/// Depth-first search for an augmenting path. Same contract as
/// [`bfs_path`]. Each stack frame keeps a cursor into its row, so a vertex
/// is fully explored before its siblings are tried.
fn dfs_path(residual: &Residual, source: Vertex, sink: Vertex, parent: &mut [Option<Vertex>]) -> bool {
    let n = residual.size();
    let mut visited = FixedBitSet::with_capacity(n);
    parent.fill(None);

    let mut stack: Vec<(Vertex, Vertex)> = vec![(source, 0)];
    visited.insert(source);

    while let Some(frame) = stack.last_mut() {
        let (u, cursor) = *frame;
        let next = (cursor..n).find(|&v| residual.get(u, v) > 0 && !visited.contains(v));
        let Some(v) = next else {
            stack.pop();
            continue;
        };
        frame.1 = v + 1;
        visited.insert(v);
        parent[v] = Some(u);
        if v == sink {
            return true;
        }
        stack.push((v, 0));
    }

    false
}
