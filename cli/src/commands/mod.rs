//! Command implementations

pub mod apply;
pub mod config;
pub mod destroy;
pub mod init;
pub mod output;
pub mod validate;
pub mod version;

use std::future::Future;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::domain::params::{TerraformOptions, check_variable};
use crate::output::progress;

/// Working-directory selection shared by every Terraform command.
#[derive(Args, Debug, Default, Clone)]
pub struct WorkdirArgs {
    /// Directory holding the Terraform configuration (overrides terraform.workdir)
    #[arg(long, short = 'C', value_name = "DIR")]
    pub workdir: Option<String>,
}

impl WorkdirArgs {
    /// Overrides carrying only the working directory.
    #[must_use]
    pub fn options(&self) -> TerraformOptions {
        TerraformOptions {
            tf_path: self.workdir.clone(),
            ..TerraformOptions::default()
        }
    }
}

/// Arguments shared by `apply` and `destroy`.
#[derive(Args, Debug, Default, Clone)]
pub struct ChangeArgs {
    #[command(flatten)]
    pub workdir: WorkdirArgs,

    /// State file path passed as -state
    #[arg(long, value_name = "PATH")]
    pub state: Option<String>,

    /// Input variable passed as -var (repeatable)
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_var)]
    pub vars: Vec<(String, String)>,

    /// Let Terraform emit colored output (drops -no-color)
    #[arg(long)]
    pub color: bool,

    /// Let Terraform ask for approval (drops -auto-approve)
    #[arg(long)]
    pub no_auto_approve: bool,
}

impl ChangeArgs {
    /// Typed overrides for these flags. Unset flags leave config values alone.
    #[must_use]
    pub fn options(&self) -> TerraformOptions {
        TerraformOptions {
            no_color: self.color.then_some(false),
            auto_approve: self.no_auto_approve.then_some(false),
            json_view: None,
            state: self.state.clone(),
            variables: self.vars.clone(),
            tf_path: self.workdir.workdir.clone(),
        }
    }
}

/// Parse a `KEY=VALUE` pair. The value may itself contain `=`.
///
/// # Errors
///
/// Returns an error if there is no `=`, the key is empty, or either side
/// contains a single quote.
pub fn parse_var(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no `=` found in `{s}`"))?;
    if key.is_empty() {
        return Err(format!("invalid KEY=VALUE: empty key in `{s}`"));
    }
    check_variable(key, value).map_err(|e| e.to_string())?;
    Ok((key.to_string(), value.to_string()))
}

/// Await `fut` behind a spinner when progress display is appropriate.
pub(crate) async fn with_spinner<T>(
    app: &AppContext,
    label: &str,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    if app.is_json() || !app.output.show_progress() {
        return fut.await;
    }
    let pb = progress::spinner(label);
    let result = fut.await;
    match &result {
        Ok(_) => progress::finish_ok(&pb, label),
        Err(_) => progress::finish_error(&pb, label),
    }
    result
}

/// Print a success line unless JSON mode owns stdout.
pub(crate) fn done(app: &AppContext, msg: &str) {
    if !app.is_json() {
        app.output.success(msg);
    }
}
