//! `dlab apply`: run `terraform apply` with the configured flags.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::commands::{ChangeArgs, with_spinner};
use crate::domain::params::TerraformAction;

/// Run `dlab apply`.
///
/// Terraform's output is printed as-is; it is not checked for success.
///
/// # Errors
///
/// Returns an error if options are invalid or the command fails to run.
pub async fn run(app: &AppContext, args: &ChangeArgs) -> Result<ExitCode> {
    let tf = app.terraform(&args.options())?;
    let command = tf.command(TerraformAction::Apply);
    let output = with_spinner(app, &command, tf.apply()).await?;
    app.renderer().render_command_output(&command, &output)?;
    Ok(ExitCode::SUCCESS)
}
