//! Task records: the engine's only input from the record store.
//!
//! A record is an id plus a bounded list of dependency ids. Everything else
//! a task carries (owner, deadline, category, ...) belongs to the store and
//! is ignored here, except an optional display name.
//!
//! Records arrive as a JSON array:
//!
//! ```json
//! [
//!   { "id": 1, "name": "design", "dependencies": [] },
//!   { "id": 2, "dependencies": [1] }
//! ]
//! ```

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::graph::{Edge, Vertex};

/// Default bound on dependency ids per record.
pub const MAX_DEPENDENCIES: usize = 10;

/// One task as seen by the graph engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: Vertex,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Ids of the tasks this one depends on, in stored order.
    #[serde(default, rename = "dependencies", alias = "dependency_ids")]
    pub dependency_ids: Vec<Vertex>,
}

impl TaskRecord {
    #[must_use]
    pub fn new(id: Vertex, dependency_ids: impl IntoIterator<Item = Vertex>) -> Self {
        Self {
            id,
            name: None,
            dependency_ids: dependency_ids.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Check a batch of records before any graph is built from it.
///
/// Dependency ids are deliberately *not* range-checked: an out-of-universe
/// dependency still produces an adjacency entry on the task's side.
///
/// # Errors
///
/// - [`GraphError::InvalidVertex`] if a task id is `>= max_vertices`.
/// - [`GraphError::TooManyDependencies`] if a record exceeds
///   `max_dependencies`.
/// - [`GraphError::DuplicateTask`] if two records share an id.
/// - [`GraphError::WeightOverflow`] if `id + dependency` does not fit in an
///   edge weight.
pub fn validate_records(
    records: &[TaskRecord],
    max_vertices: usize,
    max_dependencies: usize,
) -> Result<()> {
    let mut seen: HashSet<Vertex> = HashSet::with_capacity(records.len());

    for record in records {
        if record.id >= max_vertices {
            return Err(GraphError::InvalidVertex {
                vertex: record.id,
                capacity: max_vertices,
            });
        }
        if record.dependency_ids.len() > max_dependencies {
            return Err(GraphError::TooManyDependencies {
                task: record.id,
                count: record.dependency_ids.len(),
                max: max_dependencies,
            });
        }
        if !seen.insert(record.id) {
            return Err(GraphError::DuplicateTask { task: record.id });
        }
        if let Some(&dependency) = record
            .dependency_ids
            .iter()
            .find(|&&dependency| Edge::task_weight(record.id, dependency).is_none())
        {
            return Err(GraphError::WeightOverflow {
                task: record.id,
                dependency,
            });
        }
    }

    Ok(())
}

/// Parse task records from a JSON reader.
///
/// # Errors
///
/// Returns an error if the input is not a JSON array of task records.
pub fn read_records(reader: impl Read) -> anyhow::Result<Vec<TaskRecord>> {
    serde_json::from_reader(reader).context("Failed to parse task records")
}

/// Load task records from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or parsed.
pub fn load_records(path: &Path) -> anyhow::Result<Vec<TaskRecord>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    read_records(std::io::BufReader::new(file))
        .with_context(|| format!("Failed to load tasks from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_dependency_spellings() {
        let json = r#"[
            {"id": 1, "name": "design"},
            {"id": 2, "dependencies": [1]},
            {"id": 3, "dependency_ids": [1, 2]}
        ]"#;
        let records = read_records(json.as_bytes()).expect("parse");
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].name.as_deref(), Some("design"));
        assert!(records[0].dependency_ids.is_empty());
        assert_eq!(records[1].dependency_ids, vec![1]);
        assert_eq!(records[2].dependency_ids, vec![1, 2]);
    }

    #[test]
    fn negative_ids_do_not_parse() {
        assert!(read_records(r#"[{"id": -1}]"#.as_bytes()).is_err());
    }

    #[test]
    fn validate_accepts_out_of_universe_dependencies() {
        let records = vec![TaskRecord::new(1, [500])];
        assert!(validate_records(&records, 10, MAX_DEPENDENCIES).is_ok());
    }

    #[test]
    fn validate_rejects_task_outside_universe() {
        let records = vec![TaskRecord::new(10, [])];
        assert_eq!(
            validate_records(&records, 10, MAX_DEPENDENCIES),
            Err(GraphError::InvalidVertex {
                vertex: 10,
                capacity: 10
            })
        );
    }

    #[test]
    fn validate_rejects_long_dependency_lists() {
        let records = vec![TaskRecord::new(0, 1..=11)];
        assert_eq!(
            validate_records(&records, 100, MAX_DEPENDENCIES),
            Err(GraphError::TooManyDependencies {
                task: 0,
                count: 11,
                max: 10
            })
        );
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let records = vec![TaskRecord::new(4, []), TaskRecord::new(4, [1])];
        assert_eq!(
            validate_records(&records, 10, MAX_DEPENDENCIES),
            Err(GraphError::DuplicateTask { task: 4 })
        );
    }

    #[test]
    fn validate_rejects_dependency_ids_beyond_weight_range() {
        let records = vec![TaskRecord::new(2, [1, usize::MAX])];
        assert_eq!(
            validate_records(&records, 10, MAX_DEPENDENCIES),
            Err(GraphError::WeightOverflow {
                task: 2,
                dependency: usize::MAX
            })
        );

        let max = usize::try_from(i64::MAX).expect("i64::MAX fits in usize");
        assert!(validate_records(&[TaskRecord::new(0, [max])], 10, MAX_DEPENDENCIES).is_ok());
        assert!(validate_records(&[TaskRecord::new(1, [max])], 10, MAX_DEPENDENCIES).is_err());
    }

    #[test]
    fn load_records_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tasks.json");
        std::fs::write(&path, r#"[{"id": 0}, {"id": 1, "dependencies": [0]}]"#)
            .expect("write tasks");
        let records = load_records(&path).expect("load");
        assert_eq!(records, vec![TaskRecord::new(0, []), TaskRecord::new(1, [0])]);
    }

    #[test]
    fn serialized_records_omit_missing_names() {
        let json = serde_json::to_string(&TaskRecord::new(2, [1])).expect("serialize");
        assert_eq!(json, r#"{"id":2,"dependencies":[1]}"#);
        let named = serde_json::to_string(&TaskRecord::new(2, []).with_name("ship"))
            .expect("serialize");
        assert_eq!(named, r#"{"id":2,"name":"ship","dependencies":[]}"#);
    }
}
