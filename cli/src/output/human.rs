//! Human-readable terminal renderer.

use anyhow::{Context, Result};
use owo_colors::OwoColorize as _;

use crate::domain::config::DlabConfig;
use crate::infra::config::CONFIG_ENV;
use crate::output::OutputContext;

/// Placeholder shown instead of sensitive output values.
pub const SENSITIVE_PLACEHOLDER: &str = "<sensitive>";

/// Renders results as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        if self.ctx.quiet {
            return;
        }
        println!("dlab {version}");
    }

    /// Render the effective configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the option overrides cannot be serialized.
    pub fn render_config(&self, config: &DlabConfig, path: &std::path::Path) -> Result<()> {
        if self.ctx.quiet {
            return Ok(());
        }
        let tf = &config.terraform;
        println!();
        self.ctx
            .header(&format!("Configuration ({})", path.display()));
        println!();
        let workdir = tf.workdir.as_deref().unwrap_or("(not set)");
        self.ctx.kv(&format!("{:<23}", "terraform.workdir:"), workdir);
        self.ctx
            .kv("terraform.timeout_secs:", &tf.timeout_secs.to_string());
        if !tf.options.is_empty() {
            let options = serde_yaml::to_string(&tf.options).context("cannot render options")?;
            println!("  {}", "terraform.options:".style(self.ctx.styles.bold));
            for line in options.lines() {
                println!("    {line}");
            }
        }
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in [CONFIG_ENV, "NO_COLOR", "RUST_LOG"] {
            println!(
                "    {:<18} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!();
        Ok(())
    }

    /// Print Terraform's own output as-is. Suppressed when `quiet`.
    pub fn render_command_output(&self, output: &str) {
        if self.ctx.quiet {
            return;
        }
        let trimmed = output.trim_end();
        if !trimmed.is_empty() {
            println!("{trimmed}");
        }
    }

    /// Render `terraform output -json` as `name = value` lines.
    ///
    /// Sensitive values are masked. Anything that is not the usual
    /// name → `{value, sensitive}` object is pretty-printed as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be serialized.
    pub fn render_outputs(&self, outputs: &serde_json::Value) -> Result<()> {
        let Some(entries) = outputs.as_object() else {
            println!(
                "{}",
                serde_json::to_string_pretty(outputs).context("JSON serialization failed")?
            );
            return Ok(());
        };
        if entries.is_empty() {
            self.ctx.info("No outputs.");
            return Ok(());
        }
        let width = entries.keys().map(String::len).max().unwrap_or(0);
        for (name, entry) in entries {
            let sensitive = entry
                .get("sensitive")
                .and_then(serde_json::Value::as_bool)
                .unwrap_or(false);
            let shown = if sensitive {
                format!("{}", SENSITIVE_PLACEHOLDER.style(self.ctx.styles.sensitive))
            } else {
                display_value(entry.get("value").unwrap_or(entry))?
            };
            println!("{name:<width$} = {shown}");
        }
        Ok(())
    }
}

/// Strings print bare; everything else as compact JSON.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
pub fn display_value(value: &serde_json::Value) -> Result<String> {
    match value {
        serde_json::Value::String(s) => Ok(s.clone()),
        other => serde_json::to_string(other).context("JSON serialization failed"),
    }
}
