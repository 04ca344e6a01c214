//! Single-source shortest paths.
//!
//! - [`dijkstra`]: linear-scan selection of the unvisited vertex with the
//!   smallest tentative distance; ties go to the lowest vertex id. Requires
//!   non-negative weights, which task graphs always have (`u + v >= 0`).
//! - [`bellman_ford`]: `|V| - 1` relaxation rounds over every adjacency
//!   entry, then one verification round. Handles negative weights and
//!   reports a reachable negative cycle as
//!   [`BellmanFordOutcome::NegativeCycle`] instead of a distance table.
//!
//! Unreachable vertices have no distance (`None`), which keeps "no path"
//! distinct from a zero-weight path.

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::error::{GraphError, Result};
use crate::graph::adjacency::{Edge, Graph, Vertex, Weight};

/// Distances and predecessor links from one source vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortestPaths {
    pub source: Vertex,
    distances: Vec<Option<Weight>>,
    predecessors: Vec<Option<Vertex>>,
}

impl ShortestPaths {
    fn new(capacity: usize, source: Vertex) -> Self {
        let mut distances = vec![None; capacity];
        distances[source] = Some(0);
        Self {
            source,
            distances,
            predecessors: vec![None; capacity],
        }
    }

    /// Distance to `vertex`, or `None` if it is unreachable or outside the
    /// universe.
    #[must_use]
    pub fn distance_to(&self, vertex: Vertex) -> Option<Weight> {
        self.distances.get(vertex).copied().flatten()
    }

    /// Per-vertex distances indexed by vertex id.
    #[must_use]
    pub fn distances(&self) -> &[Option<Weight>] {
        &self.distances
    }

    /// Reachable vertices and their distances, in vertex order.
    pub fn reachable(&self) -> impl Iterator<Item = (Vertex, Weight)> + '_ {
        self.distances
            .iter()
            .enumerate()
            .filter_map(|(vertex, d)| d.map(|d| (vertex, d)))
    }

    /// Vertices on a shortest path `source ..= vertex`, or `None` when
    /// `vertex` is unreachable.
    #[must_use]
    pub fn path_to(&self, vertex: Vertex) -> Option<Vec<Vertex>> {
        self.distance_to(vertex)?;
        let mut path = vec![vertex];
        let mut cursor = vertex;
        while let Some(previous) = self.predecessors[cursor] {
            path.push(previous);
            cursor = previous;
            if path.len() > self.distances.len() {
                // Predecessor links only cycle after a negative cycle, which
                // never yields a ShortestPaths value.
                return None;
            }
        }
        path.reverse();
        Some(path)
    }

    fn relax(&mut self, from: Vertex, to: Vertex, candidate: Weight) -> bool {
        let improves = self.distances[to].is_none_or(|current| candidate < current);
        if improves {
            self.distances[to] = Some(candidate);
            self.predecessors[to] = Some(from);
        }
        improves
    }
}

// ---------------------------------------------------------------------------
// Dijkstra
// ---------------------------------------------------------------------------

/// Dijkstra's algorithm from `start`.
///
/// # Errors
///
/// Returns [`GraphError::InvalidVertex`] if `start` is outside the universe.
#[instrument(skip(graph), fields(capacity = graph.capacity()))]
pub fn dijkstra(graph: &Graph, start: Vertex) -> Result<ShortestPaths> {
    graph.check(start)?;
    let n = graph.capacity();

    let mut paths = ShortestPaths::new(n, start);
    let mut visited = vec![false; n];

    for _ in 0..n {
        let Some((current, distance)) = select_closest(&paths.distances, &visited) else {
            break;
        };
        visited[current] = true;

        for neighbor in graph.neighbors(current) {
            let next = neighbor.vertex;
            if !graph.contains(next) || visited[next] {
                continue;
            }
            paths.relax(current, next, distance.saturating_add(neighbor.weight));
        }
    }

    debug!(reachable = paths.reachable().count(), "dijkstra");
    Ok(paths)
}

/// Unvisited vertex with the smallest finite distance; the first (lowest id)
/// wins ties.
fn select_closest(distances: &[Option<Weight>], visited: &[bool]) -> Option<(Vertex, Weight)> {
    let mut best: Option<(Vertex, Weight)> = None;
    for (vertex, distance) in distances.iter().enumerate() {
        let Some(distance) = *distance else { continue };
        if visited[vertex] {
            continue;
        }
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((vertex, distance));
        }
    }
    best
}

// ---------------------------------------------------------------------------
// Bellman-Ford
// ---------------------------------------------------------------------------

/// Result of [`bellman_ford`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BellmanFordOutcome {
    /// No negative cycle is reachable from the source.
    Distances(ShortestPaths),
    /// This edge still relaxed after `|V| - 1` rounds.
    NegativeCycle(Edge),
}

impl BellmanFordOutcome {
    /// Collapse the outcome into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NegativeCycleDetected`] for the negative-cycle
    /// outcome.
    pub fn into_result(self) -> Result<ShortestPaths> {
        match self {
            Self::Distances(paths) => Ok(paths),
            Self::NegativeCycle(edge) => Err(GraphError::NegativeCycleDetected {
                from: edge.from,
                to: edge.to,
            }),
        }
    }

    #[must_use]
    pub const fn has_negative_cycle(&self) -> bool {
        matches!(self, Self::NegativeCycle(_))
    }
}

/// Bellman-Ford from `start`.
///
/// Stops early once a full round relaxes nothing; the verification round
/// always runs.
///
/// # Errors
///
/// Returns [`GraphError::InvalidVertex`] if `start` is outside the universe.
#[instrument(skip(graph), fields(capacity = graph.capacity()))]
pub fn bellman_ford(graph: &Graph, start: Vertex) -> Result<BellmanFordOutcome> {
    graph.check(start)?;
    let n = graph.capacity();
    let mut paths = ShortestPaths::new(n, start);

    for round in 1..n {
        let mut changed = false;
        for (from, neighbor) in graph.entries() {
            if !graph.contains(neighbor.vertex) {
                continue;
            }
            if let Some(distance) = paths.distances[from] {
                changed |= paths.relax(from, neighbor.vertex, distance.saturating_add(neighbor.weight));
            }
        }
        if !changed {
            debug!(round, "bellman-ford converged early");
            break;
        }
    }

    for (from, neighbor) in graph.entries() {
        let to = neighbor.vertex;
        if !graph.contains(to) {
            continue;
        }
        let (Some(distance), current) = (paths.distances[from], paths.distances[to]) else {
            continue;
        };
        let candidate = distance.saturating_add(neighbor.weight);
        if current.is_none_or(|current| candidate < current) {
            warn!(from, to, "negative cycle reachable from source");
            return Ok(BellmanFordOutcome::NegativeCycle(Edge::new(
                from,
                to,
                neighbor.weight,
            )));
        }
    }

    debug!(reachable = paths.reachable().count(), "bellman-ford");
    Ok(BellmanFordOutcome::Distances(paths))
}
