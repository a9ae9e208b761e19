//! `dlab destroy`: run `terraform destroy` after confirmation.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::commands::{ChangeArgs, with_spinner};
use crate::domain::params::TerraformAction;

/// Run `dlab destroy`.
///
/// Terraform's output is printed as-is; it is not checked for success.
///
/// # Errors
///
/// Returns an error if options are invalid, the prompt fails, or the command
/// fails to run.
pub async fn run(app: &AppContext, args: &ChangeArgs) -> Result<ExitCode> {
    let tf = app.terraform(&args.options())?;
    let command = tf.command(TerraformAction::Destroy);

    if !app.confirm(&format!("Run `{command}`?"), true)? {
        app.output.warn("Destroy cancelled.");
        return Ok(ExitCode::SUCCESS);
    }

    let output = with_spinner(app, &command, tf.destroy()).await?;
    app.renderer().render_command_output(&command, &output)?;
    Ok(ExitCode::SUCCESS)
}
