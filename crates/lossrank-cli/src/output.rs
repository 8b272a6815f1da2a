//! Shared output layer for human/JSON parity across CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its report
//! accordingly: plain text for humans and pipes, or one stable JSON document.
//! Errors go to stderr in the same mode so scripts can parse failures.

use std::io::{self, Write};

use lossrank_core::{ErrorCode, GraphError};
use lossrank_metrics::CompareError;
use serde::Serialize;

/// Shared width for human separators.
pub const RULE_WIDTH: usize = 48;

/// Write a horizontal separator used by human output.
pub fn rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = RULE_WIDTH)
}

/// The output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Line-oriented text.
    Human,
    /// A single pretty-printed JSON document.
    Json,
}

impl OutputMode {
    /// Returns `true` if JSON output was requested.
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Render a serializable value to stdout in the requested format.
///
/// In JSON mode the value is serialized with `serde_json`; otherwise
/// `human_fn` writes the text report.
pub fn render<T: Serialize>(
    mode: OutputMode,
    value: &T,
    human_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if mode.is_json() {
        serde_json::to_writer_pretty(&mut out, value)?;
        writeln!(out)?;
    } else {
        human_fn(value, &mut out)?;
    }
    out.flush()?;
    Ok(())
}

/// A structured error with optional suggestion and error code.
#[derive(Debug, Serialize)]
pub struct CliError {
    /// Human-readable error message.
    pub message: String,
    /// Optional suggestion for how to fix the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Machine-readable error code (e.g. `E1002`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    /// Create a simple error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            error_code: None,
        }
    }

    fn with_code(message: String, code: ErrorCode) -> Self {
        Self {
            message,
            suggestion: code.hint().map(str::to_string),
            error_code: Some(code.code().to_string()),
        }
    }

    /// Build a structured error from an `anyhow` chain, attaching the code
    /// and hint of the first library error found in it.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let message = format!("{err:#}");
        for cause in err.chain() {
            if let Some(graph) = cause.downcast_ref::<GraphError>() {
                return Self::with_code(message, graph.code());
            }
            if let Some(compare) = cause.downcast_ref::<CompareError>() {
                return Self::with_code(message, compare.code());
            }
        }
        Self::new(message)
    }
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    write_error(mode, error, &mut out)?;
    Ok(())
}

fn write_error(mode: OutputMode, error: &CliError, w: &mut dyn Write) -> anyhow::Result<()> {
    if mode.is_json() {
        let wrapper = serde_json::json!({
            "error": error,
        });
        serde_json::to_writer_pretty(&mut *w, &wrapper)?;
        writeln!(w)?;
        return Ok(());
    }

    match error.error_code {
        Some(ref code) => writeln!(w, "error[{code}]: {}", error.message)?,
        None => writeln!(w, "error: {}", error.message)?,
    }
    if let Some(ref suggestion) = error.suggestion {
        writeln!(w, "  suggestion: {suggestion}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn graph_error_code_is_attached() {
        let err = anyhow::Error::new(GraphError::InvalidWeightBounds { min: 5, max: 1 })
            .context("invalid generator configuration");
        let cli = CliError::from_anyhow(&err);
        assert_eq!(cli.error_code.as_deref(), Some("E1002"));
        assert!(cli.suggestion.is_some());
        assert!(cli.message.starts_with("invalid generator configuration: "));
    }

    #[test]
    fn compare_error_code_is_attached() {
        let err: anyhow::Result<()> =
            Err(CompareError::ConstantScores("first")).context("comparison failed");
        let cli = CliError::from_anyhow(&err.expect_err("error"));
        assert_eq!(cli.error_code.as_deref(), Some("E3003"));
    }

    #[test]
    fn plain_error_has_no_code() {
        let cli = CliError::from_anyhow(&anyhow::anyhow!("boom"));
        assert_eq!(cli.message, "boom");
        assert!(cli.error_code.is_none());
        assert!(cli.suggestion.is_none());
    }

    #[test]
    fn error_output_follows_mode() {
        let err = anyhow::Error::new(GraphError::DuplicateNode("A".to_string()));
        let cli = CliError::from_anyhow(&err);

        let mut human = Vec::new();
        write_error(OutputMode::Human, &cli, &mut human).expect("write");
        let human = String::from_utf8(human).expect("utf8");
        assert!(human.starts_with("error[E2001]: "));
        assert!(human.contains("  suggestion: "));

        let mut json = Vec::new();
        write_error(OutputMode::Json, &cli, &mut json).expect("write");
        let json: serde_json::Value = serde_json::from_slice(&json).expect("valid JSON");
        assert_eq!(json["error"]["error_code"], "E2001");
    }

    #[test]
    fn json_error_skips_empty_fields() {
        let json = serde_json::to_value(CliError::new("boom")).expect("serialize");
        assert_eq!(json, serde_json::json!({ "message": "boom" }));
    }
}
