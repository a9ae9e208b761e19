//! `dlab output`: read and render `terraform output -json`.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::commands::{WorkdirArgs, with_spinner};
use crate::domain::params::{TerraformAction, TerraformOptions};

/// Arguments for the output command.
#[derive(Args, Debug, Default, Clone)]
pub struct OutputArgs {
    #[command(flatten)]
    pub workdir: WorkdirArgs,

    /// State file path passed as -state
    #[arg(long, value_name = "PATH")]
    pub state: Option<String>,
}

impl OutputArgs {
    #[must_use]
    pub fn options(&self) -> TerraformOptions {
        TerraformOptions {
            state: self.state.clone(),
            ..self.workdir.options()
        }
    }
}

/// Run `dlab output`.
///
/// # Errors
///
/// Returns an error if the command fails or its output is not JSON.
pub async fn run(app: &AppContext, args: &OutputArgs) -> Result<ExitCode> {
    let tf = app.terraform(&args.options())?;
    let command = tf.command(TerraformAction::Output);
    let outputs = with_spinner(app, &command, tf.output()).await?;
    app.renderer().render_outputs(&outputs)?;
    Ok(ExitCode::SUCCESS)
}
