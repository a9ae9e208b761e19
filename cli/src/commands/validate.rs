//! `dlab validate`: run `terraform validate` in the working directory.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::CommandExecutor;
use crate::commands::{WorkdirArgs, done, with_spinner};
use crate::domain::params::TerraformAction;

/// Run `dlab validate`.
///
/// # Errors
///
/// Returns an error if Terraform does not report the configuration as valid.
pub async fn run(app: &AppContext, args: &WorkdirArgs) -> Result<ExitCode> {
    let tf = app.terraform(&args.options())?;
    let command = tf.command(TerraformAction::Validate);
    let output = with_spinner(app, &command, async {
        let _cwd = tf.executor().cd(Path::new(tf.tf_path()))?;
        tf.validate().await
    })
    .await?;
    app.renderer().render_command_output(&command, &output)?;
    done(app, "Configuration is valid");
    Ok(ExitCode::SUCCESS)
}
