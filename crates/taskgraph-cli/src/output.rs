//! Shared output layer: human text or stable JSON for every subcommand.
//!
//! Results go to stdout, errors to stderr. In JSON mode an error is wrapped
//! as `{"error": {...}}` so scripts can tell the two apart without parsing
//! exit codes.

use std::io::{self, Write};

use serde::Serialize;
use taskgraph_core::GraphError;

/// Width of the key column in human output.
const KEY_WIDTH: usize = 14;

/// Output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Render a left-aligned key/value line in human output.
pub fn kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<KEY_WIDTH$} {}", format!("{key}:"), value.as_ref())
}

/// Join vertex ids as `a -> b -> c`.
pub fn arrow_path(path: &[usize]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Render a serializable value to stdout.
///
/// JSON mode serializes `value`; human mode calls `human_fn`.
pub fn render<T: Serialize>(
    mode: OutputMode,
    value: &T,
    human_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)?;
        }
        OutputMode::Human => human_fn(value, &mut out)?,
    }
    Ok(())
}

/// A structured error with optional hint and error code.
#[derive(Debug, Serialize)]
pub struct CliError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Stable `E####` code for engine errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            hint: None,
            error_code: None,
        }
    }

    /// Build from a command failure, surfacing the engine's code and hint
    /// when a [`GraphError`] is anywhere in the chain.
    pub fn from_anyhow(error: &anyhow::Error) -> Self {
        let message = format!("{error:#}");
        match error.chain().find_map(|cause| cause.downcast_ref::<GraphError>()) {
            Some(graph_error) => {
                let code = graph_error.code();
                Self {
                    message,
                    hint: code.hint().map(str::to_string),
                    error_code: Some(code.to_string()),
                }
            }
            None => Self::new(message),
        }
    }
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({ "error": error });
            serde_json::to_writer_pretty(&mut out, &wrapper)?;
            writeln!(out)?;
        }
        OutputMode::Human => {
            match &error.error_code {
                Some(code) => writeln!(out, "error[{code}]: {}", error.message)?,
                None => writeln!(out, "error: {}", error.message)?,
            }
            if let Some(hint) = &error.hint {
                writeln!(out, "  hint: {hint}")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_pads_key_column() {
        let mut buf = Vec::new();
        kv(&mut buf, "reachable", "3").expect("write");
        assert_eq!(String::from_utf8(buf).expect("utf8"), "reachable:     3\n");
    }

    #[test]
    fn arrow_path_joins_vertices() {
        assert_eq!(arrow_path(&[1, 2, 3]), "1 -> 2 -> 3");
        assert_eq!(arrow_path(&[4]), "4");
    }

    #[test]
    fn graph_error_carries_code_and_hint() {
        let error = anyhow::Error::new(GraphError::EmptyGraph).context("Failed to build graph");
        let cli = CliError::from_anyhow(&error);
        assert_eq!(cli.error_code.as_deref(), Some("E1002"));
        assert!(cli.hint.is_some());
        assert!(cli.message.starts_with("Failed to build graph"));
    }

    #[test]
    fn other_errors_are_plain() {
        let cli = CliError::from_anyhow(&anyhow::anyhow!("no such file"));
        assert_eq!(cli.message, "no such file");
        assert!(cli.error_code.is_none());
        assert!(cli.hint.is_none());
    }

    #[test]
    fn json_error_shape() {
        let cli = CliError::new("boom");
        let value = serde_json::json!({ "error": cli });
        assert_eq!(value["error"]["message"], "boom");
        assert!(value["error"].get("hint").is_none());
    }
}
