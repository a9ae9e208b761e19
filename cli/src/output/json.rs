//! JSON output helpers.
//!
//! Provides `JsonRenderer` and the error-object formatter used by all
//! `--json` code paths when a command fails.

use anyhow::{Context, Result};
use serde_json::json;

use crate::domain::config::DlabConfig;

/// Renders results as pretty-printed JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// Render the CLI version.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        print_pretty(&json!({ "version": version }))
    }

    /// Render the effective configuration and where it was loaded from.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized.
    pub fn render_config(&self, config: &DlabConfig, path: &std::path::Path) -> Result<()> {
        let config = serde_json::to_value(config).context("cannot serialize config")?;
        print_pretty(&json!({ "path": path.display().to_string(), "config": config }))
    }

    /// Render the raw output of a Terraform command.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_command_output(&self, command: &str, output: &str) -> Result<()> {
        print_pretty(&json!({ "command": command, "output": output }))
    }

    /// Render parsed `terraform output` values unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_outputs(&self, outputs: &serde_json::Value) -> Result<()> {
        print_pretty(outputs)
    }
}

fn print_pretty(value: &serde_json::Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
    println!("{text}");
    Ok(())
}

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails (should not happen in
/// practice: `serde_json` only fails on non-finite floats and maps with
/// non-string keys, neither of which appear here).
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Stable error code for the `code` field of JSON error objects.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    use crate::domain::error::{ConfigError, ParameterError, TerraformError};

    if err.downcast_ref::<ParameterError>().is_some() {
        "invalid_parameter"
    } else if let Some(tf) = err.downcast_ref::<TerraformError>() {
        match tf {
            TerraformError::Provisioning { .. } => "provisioning_failed",
            TerraformError::OutputParse(_) => "invalid_output",
        }
    } else if err.downcast_ref::<ConfigError>().is_some() {
        "invalid_config"
    } else {
        "command_failed"
    }
}
