#![forbid(unsafe_code)]
//! taskgraph-core library.
//!
//! Builds a weighted dependency graph from task records and answers
//! connectivity, strongly-connected-component, spanning-tree, shortest-path
//! and maximum-flow queries over it.
//!
//! # Conventions
//!
//! - **Errors**: Engine operations return [`error::GraphError`]; loaders
//!   (config, task records) return `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).
//! - **Lifecycle**: A graph is a plain value built per query session. Nothing
//!   in this crate keeps adjacency state between calls.
//!
//! # Typical Usage
//!
//! ```rust,ignore
//! use taskgraph_core::{analytics::TaskAnalytics, config::EngineConfig, task::TaskRecord};
//!
//! let records = vec![
//!     TaskRecord::new(1, []),
//!     TaskRecord::new(2, [1]),
//!     TaskRecord::new(3, [1, 2]),
//! ];
//! let session = TaskAnalytics::build(&records, &EngineConfig::default())?;
//! assert_eq!(session.bfs_count(1)?, 3);
//! assert_eq!(session.kruskal().total_weight(), 7);
//! ```

pub mod algo;
pub mod analytics;
pub mod config;
pub mod error;
pub mod graph;
pub mod task;

pub use analytics::TaskAnalytics;
pub use error::{GraphError, Result};
pub use graph::{Digraph, Edge, Graph, GraphBuilder, Neighbor, TaskGraph, Vertex, Weight};
pub use task::TaskRecord;
