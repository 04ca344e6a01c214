//! Engine configuration.
//!
//! Every field has a default, so an empty or missing `taskgraph.toml` yields
//! [`EngineConfig::default`]. Environment overrides are applied on top of
//! the file:
//!
//! | Variable                 | Field          |
//! |--------------------------|----------------|
//! | `TASKGRAPH_MAX_VERTICES` | `max_vertices` |
//! | `TASKGRAPH_DFS`          | `dfs`          |
//!
//! ```toml
//! max_vertices = 256
//! max_dependencies = 10
//! dfs = "iterative"
//! flow = "edmonds-karp"
//! ```

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// File name looked up in the working directory when no path is given.
pub const CONFIG_FILE_NAME: &str = "taskgraph.toml";

/// How depth-first walks are executed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DfsStrategy {
    /// Native recursion. Stack depth grows with the longest path.
    Recursive,
    /// Explicit frame stack on the heap; same visit and finish order.
    #[default]
    Iterative,
}

/// Augmenting-path search used by max-flow queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlowMethod {
    /// Ford-Fulkerson with depth-first path search.
    FordFulkerson,
    /// Edmonds-Karp: breadth-first (shortest) augmenting paths.
    #[default]
    EdmondsKarp,
}

impl FlowMethod {
    /// Name as written in config files and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FordFulkerson => "ford-fulkerson",
            Self::EdmondsKarp => "edmonds-karp",
        }
    }
}

impl fmt::Display for FlowMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Size of the vertex universe `[0, max_vertices)`.
    #[serde(default = "default_max_vertices")]
    pub max_vertices: usize,
    /// Maximum dependency ids per task record.
    #[serde(default = "default_max_dependencies")]
    pub max_dependencies: usize,
    #[serde(default)]
    pub dfs: DfsStrategy,
    #[serde(default)]
    pub flow: FlowMethod,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_vertices: default_max_vertices(),
            max_dependencies: default_max_dependencies(),
            dfs: DfsStrategy::default(),
            flow: FlowMethod::default(),
        }
    }
}

impl EngineConfig {
    /// Reject configurations the engine cannot build a graph from.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyGraph`] when `max_vertices` is zero.
    pub const fn validate(&self) -> Result<(), GraphError> {
        if self.max_vertices == 0 {
            return Err(GraphError::EmptyGraph);
        }
        Ok(())
    }

    /// Parse a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this schema.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content).context("Failed to parse engine config")
    }

    /// Apply `TASKGRAPH_*` environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an override is set but cannot be parsed.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_overrides(
            std::env::var("TASKGRAPH_MAX_VERTICES").ok().as_deref(),
            std::env::var("TASKGRAPH_DFS").ok().as_deref(),
        )
    }

    fn apply_overrides(mut self, max_vertices: Option<&str>, dfs: Option<&str>) -> Result<Self> {
        if let Some(raw) = max_vertices {
            self.max_vertices = raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid TASKGRAPH_MAX_VERTICES value '{raw}'"))?;
        }
        if let Some(raw) = dfs {
            self.dfs = match raw.trim().to_ascii_lowercase().as_str() {
                "recursive" => DfsStrategy::Recursive,
                "iterative" | "stack" => DfsStrategy::Iterative,
                other => anyhow::bail!("Invalid TASKGRAPH_DFS value '{other}'"),
            };
        }
        Ok(self)
    }
}

/// Load the engine config.
///
/// With `path = Some(..)` the file must exist. With `None`, `taskgraph.toml`
/// in `dir` is used if present and defaults otherwise. Environment
/// overrides are applied last and the result is validated.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, an override is
/// malformed, or the resulting config fails [`EngineConfig::validate`].
pub fn load_config(path: Option<&Path>, dir: &Path) -> Result<EngineConfig> {
    let config = match path {
        Some(path) => read_config(path)?,
        None => {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.exists() {
                read_config(&candidate)?
            } else {
                EngineConfig::default()
            }
        }
    };

    let config = config.apply_env()?;
    config.validate()?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<EngineConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<EngineConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

const fn default_max_vertices() -> usize {
    100
}

const fn default_max_dependencies() -> usize {
    10
}
