//! `dlab init`: run `terraform init` in the working directory.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::CommandExecutor;
use crate::commands::{WorkdirArgs, done, with_spinner};
use crate::domain::params::TerraformAction;

/// Run `dlab init`.
///
/// # Errors
///
/// Returns an error if Terraform does not report a successful initialization.
pub async fn run(app: &AppContext, args: &WorkdirArgs) -> Result<ExitCode> {
    let tf = app.terraform(&args.options())?;
    let command = tf.command(TerraformAction::Init);
    let output = with_spinner(app, &command, async {
        let _cwd = tf.executor().cd(Path::new(tf.tf_path()))?;
        tf.initialize().await
    })
    .await?;
    app.renderer().render_command_output(&command, &output)?;
    done(app, "Terraform initialized");
    Ok(ExitCode::SUCCESS)
}
