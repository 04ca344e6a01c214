//! Graph data model and construction.
//!
//! # Overview
//!
//! Task records become two views over a fixed vertex universe `[0, N)`:
//!
//! ```text
//! &[TaskRecord]
//!        ↓  build::GraphBuilder::build()
//! TaskGraph
//!   ├─ undirected: Graph    (weighted, each edge stored from both ends)
//!   └─ directed:   Digraph  (dependency -> dependent, for SCC)
//!        ↓  stats::GraphStats::from_graph()
//! GraphStats
//! ```
//!
//! Max-flow queries use a separate [`capacity::CapacityMatrix`] supplied by
//! the caller.
//!
//! A graph is built fresh for each query session and dropped afterwards;
//! every algorithm borrows it immutably.

pub mod adjacency;
pub mod build;
pub mod capacity;
pub mod interop;
pub mod stats;

pub use adjacency::{Digraph, Edge, Graph, Neighbor, Vertex, Weight};
pub use build::{GraphBuilder, TaskGraph};
pub use capacity::CapacityMatrix;
pub use stats::GraphStats;
