//! Dense capacity matrix for max-flow queries.
//!
//! Capacities model directed flow between task ids and are independent of
//! the dependency graph: nothing here is derived from task records. Callers
//! populate the matrix themselves.
//!
//! Storage is one contiguous row-major buffer. Every accessor is
//! bounds-checked and returns `None`/`Err` instead of panicking.

#![allow(clippy::module_name_repetitions)]

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::graph::adjacency::{Vertex, Weight};

/// Square `size x size` matrix of non-negative capacities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Weight>>", into = "Vec<Vec<Weight>>")]
pub struct CapacityMatrix {
    size: usize,
    cells: Vec<Weight>,
}

impl CapacityMatrix {
    /// Zero-filled matrix over `[0, size)`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyGraph`] when `size` is zero.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(GraphError::EmptyGraph);
        }
        Ok(Self {
            size,
            cells: vec![0; size * size],
        })
    }

    /// Build from explicit rows.
    ///
    /// # Errors
    ///
    /// - [`GraphError::EmptyGraph`] for zero rows.
    /// - [`GraphError::MatrixShape`] if any row length differs from the row
    ///   count.
    /// - [`GraphError::NegativeCapacity`] for any negative cell.
    pub fn from_rows(rows: &[Vec<Weight>]) -> Result<Self> {
        let mut matrix = Self::new(rows.len())?;
        for (from, row) in rows.iter().enumerate() {
            if row.len() != matrix.size {
                return Err(GraphError::MatrixShape {
                    row: from,
                    expected: matrix.size,
                    actual: row.len(),
                });
            }
            for (to, &capacity) in row.iter().enumerate() {
                matrix.set(from, to, capacity)?;
            }
        }
        Ok(matrix)
    }

    /// Build from `(from, to, capacity)` triples. Repeated pairs add up.
    ///
    /// # Errors
    ///
    /// Same as [`CapacityMatrix::new`] and [`CapacityMatrix::add`].
    pub fn from_arcs(size: usize, arcs: &[(Vertex, Vertex, Weight)]) -> Result<Self> {
        let mut matrix = Self::new(size)?;
        for &(from, to, capacity) in arcs {
            matrix.add(from, to, capacity)?;
        }
        Ok(matrix)
    }

    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Capacity of `from -> to`, or `None` outside the matrix.
    #[must_use]
    pub fn get(&self, from: Vertex, to: Vertex) -> Option<Weight> {
        self.index(from, to).ok().map(|i| self.cells[i])
    }

    /// Overwrite the capacity of `from -> to`.
    ///
    /// # Errors
    ///
    /// [`GraphError::InvalidVertex`] for an endpoint outside the matrix,
    /// [`GraphError::NegativeCapacity`] for `capacity < 0`.
    pub fn set(&mut self, from: Vertex, to: Vertex, capacity: Weight) -> Result<()> {
        let i = self.index(from, to)?;
        if capacity < 0 {
            return Err(GraphError::NegativeCapacity { from, to, capacity });
        }
        self.cells[i] = capacity;
        Ok(())
    }

    /// Increase the capacity of `from -> to` by `capacity`.
    ///
    /// # Errors
    ///
    /// Same as [`CapacityMatrix::set`], plus [`GraphError::CapacityOverflow`]
    /// when the sum leaves the `i64` range.
    pub fn add(&mut self, from: Vertex, to: Vertex, capacity: Weight) -> Result<()> {
        let current = self
            .get(from, to)
            .ok_or(GraphError::InvalidVertex {
                vertex: from.max(to),
                capacity: self.size,
            })?;
        if capacity < 0 {
            return Err(GraphError::NegativeCapacity { from, to, capacity });
        }
        let total = current
            .checked_add(capacity)
            .ok_or(GraphError::CapacityOverflow { from, to })?;
        self.set(from, to, total)
    }

    /// Validate a vertex id against the matrix size.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidVertex`] for ids `>= size`.
    pub const fn check(&self, vertex: Vertex) -> Result<Vertex> {
        if vertex < self.size {
            Ok(vertex)
        } else {
            Err(GraphError::InvalidVertex {
                vertex,
                capacity: self.size,
            })
        }
    }

    /// Row `from` as a slice.
    #[must_use]
    pub fn row(&self, from: Vertex) -> Option<&[Weight]> {
        (from < self.size).then(|| &self.cells[from * self.size..(from + 1) * self.size])
    }

    /// Iterate rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[Weight]> + '_ {
        self.cells.chunks_exact(self.size)
    }

    fn index(&self, from: Vertex, to: Vertex) -> Result<usize> {
        self.check(from)?;
        self.check(to)?;
        Ok(from * self.size + to)
    }
}

// ---------------------------------------------------------------------------
// Residual graph
// ---------------------------------------------------------------------------

/// Remaining forward capacity plus accumulated reverse capacity during one
/// max-flow computation. Same layout as [`CapacityMatrix`], widened to
/// `i128`: a cell never exceeds `c(u, v) + c(v, u)`, which can pass
/// `i64::MAX` but always fits here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Residual {
    size: usize,
    cells: Vec<i128>,
}

impl Residual {
    pub(crate) fn from_capacity(capacity: &CapacityMatrix) -> Self {
        Self {
            size: capacity.size,
            cells: capacity.cells.iter().map(|&c| i128::from(c)).collect(),
        }
    }

    pub(crate) const fn size(&self) -> usize {
        self.size
    }

    /// Residual of `from -> to`. Callers pass in-range ids.
    pub(crate) fn get(&self, from: Vertex, to: Vertex) -> i128 {
        self.cells[from * self.size + to]
    }

    /// Bounds-checked [`Residual::get`].
    pub(crate) fn try_get(&self, from: Vertex, to: Vertex) -> Option<i128> {
        (from < self.size && to < self.size).then(|| self.get(from, to))
    }

    /// Push `amount` along `from -> to`: forward residual shrinks, reverse
    /// residual grows. `amount` is at most the forward residual.
    pub(crate) fn push(&mut self, from: Vertex, to: Vertex, amount: i128) {
        self.cells[from * self.size + to] -= amount;
        self.cells[to * self.size + from] += amount;
    }
}

// ---------------------------------------------------------------------------
// Serde shape: a JSON array of rows
// ---------------------------------------------------------------------------

impl TryFrom<Vec<Vec<Weight>>> for CapacityMatrix {
    type Error = GraphError;

    fn try_from(rows: Vec<Vec<Weight>>) -> Result<Self> {
        Self::from_rows(&rows)
    }
}

impl From<CapacityMatrix> for Vec<Vec<Weight>> {
    fn from(matrix: CapacityMatrix) -> Self {
        matrix.rows().map(<[Weight]>::to_vec).collect()
    }
}
