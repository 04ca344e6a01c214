//! Graph algorithms.
//!
//! Every function borrows its graph (or capacity matrix) immutably and
//! returns a fresh value, so repeated queries against the same input give
//! identical output.
//!
//! | Module            | Question answered                          | View            |
//! |-------------------|--------------------------------------------|-----------------|
//! | [`traversal`]     | How many tasks are connected to this one?  | undirected      |
//! | [`scc`]           | Which tasks depend on each other in a loop? | directed        |
//! | [`mst`]           | Cheapest edge set connecting the tasks     | undirected      |
//! | [`shortest_path`] | Cheapest route from one task to the rest   | undirected/arcs |
//! | [`flow`]          | Maximum flow between two tasks             | capacity matrix |

pub mod flow;
pub mod mst;
pub mod scc;
pub mod shortest_path;
pub mod traversal;

pub use flow::{FlowResult, edmonds_karp, ford_fulkerson, max_flow};
pub use mst::{DisjointSet, SpanningTree, kruskal, prim};
pub use scc::{cyclic_components, strongly_connected_components};
pub use shortest_path::{BellmanFordOutcome, ShortestPaths, bellman_ford, dijkstra};
pub use traversal::{bfs_count, bfs_order, dfs_count};
