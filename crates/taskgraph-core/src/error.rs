//! Error taxonomy for the graph engine.
//!
//! Construction problems (bad vertex ids, malformed task records, malformed
//! capacity matrices) are rejected as [`GraphError`] before any algorithm
//! runs. Conditions that arise *inside* an algorithm are part of its result
//! value instead: an unreachable vertex is a `None` distance, a negative
//! cycle is [`crate::algo::shortest_path::BellmanFordOutcome::NegativeCycle`].
//! [`GraphError::NegativeCycleDetected`] exists for callers that prefer to
//! collapse that outcome into a `Result`.

use std::fmt;

use crate::graph::{Vertex, Weight};

/// Convenience alias for engine results.
pub type Result<T, E = GraphError> = std::result::Result<T, E>;

/// Errors reported by the graph engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A vertex id outside the universe `[0, capacity)`.
    #[error("vertex {vertex} is outside the vertex universe [0, {capacity})")]
    InvalidVertex { vertex: Vertex, capacity: usize },

    /// The operation needs at least one vertex.
    #[error("graph has no vertices")]
    EmptyGraph,

    /// Bellman-Ford could still relax `from -> to` after `|V| - 1` rounds.
    #[error("negative cycle detected through edge {from} -> {to}")]
    NegativeCycleDetected { from: Vertex, to: Vertex },

    /// A task record lists more dependencies than the configured bound.
    #[error("task {task} has {count} dependencies (max {max})")]
    TooManyDependencies { task: Vertex, count: usize, max: usize },

    /// Two task records share an id.
    #[error("task id {task} appears more than once")]
    DuplicateTask { task: Vertex },

    /// A capacity cell was negative.
    #[error("capacity {from} -> {to} is negative ({capacity})")]
    NegativeCapacity {
        from: Vertex,
        to: Vertex,
        capacity: Weight,
    },

    /// A capacity matrix was not square or did not match the expected size.
    #[error("capacity matrix row {row} has {actual} columns, expected {expected}")]
    MatrixShape {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Summing capacities for `from -> to` left the `i64` range.
    #[error("capacity {from} -> {to} overflows i64")]
    CapacityOverflow { from: Vertex, to: Vertex },

    /// The maximum flow from `from` to `to` does not fit in `i64`.
    #[error("maximum flow {from} -> {to} overflows i64")]
    FlowOverflow { from: Vertex, to: Vertex },

    /// `task + dependency` does not fit in an edge weight.
    #[error("edge weight for task {task} -> dependency {dependency} overflows i64")]
    WeightOverflow { task: Vertex, dependency: Vertex },
}

impl GraphError {
    /// Machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidVertex { .. } => ErrorCode::InvalidVertex,
            Self::EmptyGraph => ErrorCode::EmptyGraph,
            Self::NegativeCycleDetected { .. } => ErrorCode::NegativeCycleDetected,
            Self::TooManyDependencies { .. }
            | Self::DuplicateTask { .. }
            | Self::WeightOverflow { .. } => ErrorCode::MalformedTaskRecord,
            Self::NegativeCapacity { .. }
            | Self::MatrixShape { .. }
            | Self::CapacityOverflow { .. } => ErrorCode::MalformedCapacityMatrix,
            Self::FlowOverflow { .. } => ErrorCode::FlowOverflow,
        }
    }
}

/// Stable error codes, grouped by family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidVertex,
    EmptyGraph,
    MalformedTaskRecord,
    MalformedCapacityMatrix,
    NegativeCycleDetected,
    FlowOverflow,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidVertex => "E1001",
            Self::EmptyGraph => "E1002",
            Self::MalformedTaskRecord => "E2001",
            Self::MalformedCapacityMatrix => "E2002",
            Self::NegativeCycleDetected => "E3001",
            Self::FlowOverflow => "E3002",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidVertex => "Vertex outside the vertex universe",
            Self::EmptyGraph => "Graph has no vertices",
            Self::MalformedTaskRecord => "Malformed task record",
            Self::MalformedCapacityMatrix => "Malformed capacity matrix",
            Self::NegativeCycleDetected => "Negative cycle detected",
            Self::FlowOverflow => "Maximum flow overflows i64",
        }
    }

    /// Optional remediation hint.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::InvalidVertex => Some("Raise `max_vertices` or use a task id below the bound."),
            Self::EmptyGraph => Some("Set `max_vertices` to at least 1."),
            Self::MalformedTaskRecord => {
                Some("Keep task ids unique and dependency lists within `max_dependencies`.")
            }
            Self::MalformedCapacityMatrix => {
                Some("Supply a square matrix of non-negative capacities.")
            }
            Self::NegativeCycleDetected => None,
            Self::FlowOverflow => {
                Some("Scale capacities down so their total stays below i64::MAX.")
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
